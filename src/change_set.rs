/// 变更集模块
///
/// 记录一个 diff 片段中提取出的全部键级变更：新增/删除的键值、
/// diff 中观察到的键顺序，以及按出现顺序排列的动作序列。

use std::collections::HashMap;
use serde::Serialize;

/// 动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// 新增键（diff 中的 `+` 行）
    Add,
    /// 删除键（diff 中的 `-` 行）
    Remove,
}

impl ActionKind {
    /// diff 行前缀符号
    pub fn symbol(&self) -> char {
        match self {
            ActionKind::Add => '+',
            ActionKind::Remove => '-',
        }
    }
}

/// 单个动作：对某个键执行新增或删除
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub key: String,
    pub action: ActionKind,
}

impl Action {
    pub fn add(key: impl Into<String>) -> Self {
        Self { key: key.into(), action: ActionKind::Add }
    }

    pub fn remove(key: impl Into<String>) -> Self {
        Self { key: key.into(), action: ActionKind::Remove }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.action.symbol(), self.key)
    }
}

/// 单个文件的变更集
///
/// # 实现细节
/// - `added_key_values` 只用于取值，顺序无关
/// - `keys_order_in_diff` 是锚点解析的唯一依据：包含上下文行的键和所有新增键，
///   但不包含被删除的键
/// - `actions_order` 按 diff 中出现的顺序交错记录新增和删除
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    #[serde(rename = "addedKeyValueMap")]
    pub added_key_values: HashMap<String, String>,
    #[serde(rename = "removedKeyValueMap")]
    pub removed_key_values: HashMap<String, String>,
    pub keys_order_in_diff: Vec<String>,
    pub actions_order: Vec<Action>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录上下文中出现的键（仅参与锚点排序）
    pub fn record_context_key(&mut self, key: &str) {
        self.keys_order_in_diff.push(key.to_string());
    }

    /// 记录一个新增键
    pub fn record_added(&mut self, key: &str, value: &str) {
        self.added_key_values.insert(key.to_string(), value.to_string());
        self.keys_order_in_diff.push(key.to_string());
        self.actions_order.push(Action::add(key));
    }

    /// 记录一个删除键（被删除的键不能作为锚点）
    pub fn record_removed(&mut self, key: &str, value: &str) {
        self.removed_key_values.insert(key.to_string(), value.to_string());
        self.actions_order.push(Action::remove(key));
    }

    /// 获取新增键的锚点键
    ///
    /// 锚点是该键在 `keys_order_in_diff` 中第一次出现位置的前一个键。
    /// 键位于序列首位（或不在序列中）时返回 `None`，表示插入到文件顶部。
    pub fn anchor_for(&self, key: &str) -> Option<&str> {
        let index = self.keys_order_in_diff.iter().position(|k| k == key)?;
        index
            .checked_sub(1)
            .map(|prev| self.keys_order_in_diff[prev].as_str())
    }

    /// 新增键对应的值
    pub fn added_value(&self, key: &str) -> Option<&str> {
        self.added_key_values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.actions_order.is_empty()
    }

    /// 生成变更摘要
    pub fn summary(&self) -> String {
        let added = self
            .actions_order
            .iter()
            .filter(|a| a.action == ActionKind::Add)
            .count();
        format!(
            "新增: {}, 删除: {}, 顺序键: {}",
            added,
            self.actions_order.len() - added,
            self.keys_order_in_diff.len()
        )
    }
}

/// 解析结果：源文件路径及其变更集
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChanges {
    pub file_path: String,
    pub changes: ChangeSet,
}
