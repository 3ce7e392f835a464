use thiserror::Error;
use std::path::{Path, PathBuf};

/// 自定义错误类型
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Malformed diff segment #{index}: missing ' b/' path in header {header:?}")]
    MalformedSegment { index: usize, header: String },

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoding error on {path:?}: content not representable in {encoding}")]
    Encoding { path: PathBuf, encoding: &'static str },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SyncError {
    /// 为 IO 错误附加文件路径
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io { path: path.into(), source }
    }
}

/// 按 `=` 拆分键值对
///
/// 恰好包含一个 `=` 时返回 `(键, 值)`（均已去除首尾空白），否则返回 `None`。
/// 不检查键或值是否为空，由调用方决定。
pub fn split_key_value(text: &str) -> Option<(&str, &str)> {
    let (key, value) = text.split_once('=')?;
    if value.contains('=') {
        return None;
    }
    Some((key.trim(), value.trim()))
}

/// 创建文件备份
pub fn create_backup(file_path: &Path) -> Result<PathBuf, SyncError> {
    if !file_path.exists() {
        return Err(SyncError::io(
            file_path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "原文件不存在"),
        ));
    }

    let timestamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    let file_name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let backup_path = file_path.with_file_name(format!("{}.{}.bak", file_name, timestamp));

    std::fs::copy(file_path, &backup_path).map_err(|e| SyncError::io(file_path, e))?;

    Ok(backup_path)
}
