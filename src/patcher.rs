/// properties 文件补丁模块
///
/// 按 [`ChangeSet::actions_order`] 的顺序逐个重放动作。
/// 每个动作都是一次完整的 读取-修改-写回，后面的动作能看到前面动作的结果。

use std::path::Path;
use serde::Serialize;
use crate::change_set::{ActionKind, ChangeSet};
use crate::io::PropertyStore;
use crate::properties::{format_entry, is_blank_content, PropertyLine};
use crate::utils::SyncError;

/// 补丁统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatchStats {
    /// 目标文件原本不存在，已创建
    pub created: bool,
    /// 插入的行数
    pub added: usize,
    /// 删除的行数
    pub removed: usize,
    /// 锚点未找到、插入到文件顶部的次数
    pub anchors_missing: usize,
}

impl std::fmt::Display for PatchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "+{} -{} (锚点缺失: {}){}",
            self.added,
            self.removed,
            self.anchors_missing,
            if self.created { " [新建]" } else { "" }
        )
    }
}

/// 将变更集应用到目标文件
///
/// 目标文件不存在时先创建空文件（连同父目录）。
///
/// # 错误
/// 任何存储错误都会立即返回，此时目标文件状态未知
pub fn apply_changes<S: PropertyStore + ?Sized>(
    store: &S,
    target: &Path,
    changes: &ChangeSet,
) -> Result<PatchStats, SyncError> {
    let mut stats = PatchStats::default();

    if !store.exists(target) {
        store.write(target, "")?;
        stats.created = true;
    }

    for action in &changes.actions_order {
        let content = store.read(target)?;
        let updated = match action.action {
            ActionKind::Add => {
                let value = changes.added_value(&action.key).unwrap_or_default();
                let anchor = changes.anchor_for(&action.key);
                let (updated, anchored) = insert_entry(&content, &action.key, value, anchor);
                stats.added += 1;
                if !anchored {
                    stats.anchors_missing += 1;
                    tracing::warn!(
                        file = %target.display(),
                        key = %action.key,
                        anchor = anchor.unwrap_or_default(),
                        "锚点未找到，插入到文件顶部"
                    );
                }
                updated
            }
            ActionKind::Remove => {
                let (updated, dropped) = remove_entry(&content, &action.key);
                stats.removed += dropped;
                updated
            }
        };

        tracing::debug!(file = %target.display(), action = %action, "应用动作");
        store.write(target, &updated)?;
    }

    Ok(stats)
}

/// 在锚点之后插入 `key=value`
///
/// - 文件为空时，结果只有这一行
/// - 只在锚点第一次出现后插入一次
/// - 锚点缺失（或为 `None`）时插入到第一行
///
/// 返回新内容和是否找到了锚点
pub fn insert_entry(content: &str, key: &str, value: &str, anchor: Option<&str>) -> (String, bool) {
    let entry = format_entry(key, value);
    if is_blank_content(content) {
        return (entry, true);
    }

    let mut lines: Vec<&str> = Vec::new();
    let mut inserted = false;
    for line in content.split('\n') {
        lines.push(line);
        if inserted {
            continue;
        }
        if let (Some(anchor), Some(current)) = (anchor, PropertyLine::classify(line).key()) {
            if current == anchor {
                lines.push(&entry);
                inserted = true;
            }
        }
    }

    if !inserted {
        lines.insert(0, &entry);
    }
    (lines.join("\n"), inserted)
}

/// 删除所有键为 `key` 的键值行，其余行原样保留
///
/// 返回新内容和删除的行数
pub fn remove_entry(content: &str, key: &str) -> (String, usize) {
    let mut dropped = 0;
    let kept: Vec<&str> = content
        .split('\n')
        .filter(|line| {
            let matches = PropertyLine::classify(line).key() == Some(key);
            if matches {
                dropped += 1;
            }
            !matches
        })
        .collect();
    (kept.join("\n"), dropped)
}
