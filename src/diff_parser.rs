/// diff 解析模块
///
/// 将 `git diff` 输出解析为每个文件一个 [`ChangeSet`]。
/// 同一文件的多个片段不会合并，按输入顺序逐个输出。

use crate::change_set::{ChangeSet, FileChanges};
use crate::utils::{split_key_value, SyncError};
use crate::SEGMENT_MARKER;

/// 解析完整的 diff 文本
///
/// 第一个片段标记之前的内容会被丢弃。
///
/// # 错误
/// 任意片段头部缺少 ` b/` 路径时返回 [`SyncError::MalformedSegment`]
pub fn parse_diff(diff_text: &str) -> Result<Vec<FileChanges>, SyncError> {
    let files = diff_text
        .split(SEGMENT_MARKER)
        .skip(1)
        .enumerate()
        .map(|(index, segment)| parse_segment(index, segment))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(segments = files.len(), "diff 解析完成");
    Ok(files)
}

/// 解析单个片段（不含片段标记）
fn parse_segment(index: usize, segment: &str) -> Result<FileChanges, SyncError> {
    let mut lines = segment.split('\n');
    let header = lines.next().unwrap_or_default();
    let file_path = extract_file_path(header).ok_or_else(|| SyncError::MalformedSegment {
        index,
        header: header.to_string(),
    })?;

    let mut changes = ChangeSet::new();
    for line in lines {
        classify_line(line, &mut changes);
    }

    tracing::debug!(file = %file_path, summary = %changes.summary(), "解析片段 #{}", index);
    Ok(FileChanges { file_path, changes })
}

/// 从 `a/<old> b/<new>` 头部提取目标路径
fn extract_file_path(header: &str) -> Option<String> {
    let (_, new_path) = header.split_once(" b/")?;
    Some(new_path.trim().to_string())
}

/// 对一行 diff 分类并记录到变更集
fn classify_line(line: &str, changes: &mut ChangeSet) {
    let trimmed = line.trim();

    // 注释不参与键追踪
    if trimmed.starts_with('#') || trimmed.starts_with('!') {
        return;
    }

    if trimmed.starts_with("@@") {
        if let Some(key) = hunk_context_key(line) {
            changes.record_context_key(key);
        }
        return;
    }

    if line.starts_with('+') && !line.starts_with("+++") {
        if let Some((key, value)) = changed_key_value(&line[1..]) {
            changes.record_added(key, value);
        }
    } else if line.starts_with('-') && !line.starts_with("---") {
        if let Some((key, value)) = changed_key_value(&line[1..]) {
            changes.record_removed(key, value);
        }
    } else if let Some((key, _)) = split_key_value(trimmed) {
        if !key.is_empty() {
            changes.record_context_key(key);
        }
    }
}

/// 新增/删除行：必须恰好一个 `=`，且键和值都非空
fn changed_key_value(payload: &str) -> Option<(&str, &str)> {
    split_key_value(payload.trim()).filter(|(key, value)| !key.is_empty() && !value.is_empty())
}

/// 提取 hunk 头部（如 `@@ -170,6 +192,7 @@ BTN_EDIT=Edit`）尾随上下文中的键
///
/// 尾随文本按 `=` 拆分后只看前两段，二者去空白后都非空才算键值对。
fn hunk_context_key(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once("@@")?;
    let (_, context) = rest.split_once("@@")?;

    let mut parts = context.trim().split('=').map(str::trim);
    let key = parts.next().filter(|k| !k.is_empty())?;
    parts.next().filter(|v| !v.is_empty())?;
    Some(key)
}
