/// 同步配置
///
/// 描述基础文件名片段、目标语言文件名片段、目标路径的根目录和文件编码。
/// 可从 JSON 文件加载，缺失字段使用默认值。

use std::path::{Path, PathBuf};
use serde::Deserialize;
use crate::io::FsPropertyStore;
use crate::utils::SyncError;
use crate::{DEFAULT_BASE_FILE_NAME, DEFAULT_PRIMARY_FILE_NAME, DEFAULT_SECONDARY_FILE_NAME};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// 基础文件名片段（diff 中的源文件）
    pub base_file_name: String,
    /// 主语言文件名片段
    pub primary_file_name: String,
    /// 次语言文件名片段
    pub secondary_file_name: String,
    /// 相对目标路径的根目录，为空时使用当前工作目录
    pub base_dir: Option<PathBuf>,
    /// properties 文件编码标签
    pub encoding: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_file_name: DEFAULT_BASE_FILE_NAME.to_string(),
            primary_file_name: DEFAULT_PRIMARY_FILE_NAME.to_string(),
            secondary_file_name: DEFAULT_SECONDARY_FILE_NAME.to_string(),
            base_dir: None,
            encoding: "utf-8".to_string(),
        }
    }
}

impl SyncConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file(path: &Path) -> Result<Self, SyncError> {
        let content = std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 主语言目标路径
    pub fn primary_target(&self, source: &str) -> PathBuf {
        self.derive_target(source, &self.primary_file_name)
    }

    /// 次语言目标路径
    pub fn secondary_target(&self, source: &str) -> PathBuf {
        self.derive_target(source, &self.secondary_file_name)
    }

    /// 按配置的编码创建文件系统存储
    pub fn store(&self) -> Result<FsPropertyStore, SyncError> {
        FsPropertyStore::for_label(&self.encoding)
    }

    /// 源路径是否包含基础文件名片段
    pub fn is_base_file(&self, source: &str) -> bool {
        source.contains(&self.base_file_name)
    }

    /// 将源路径中第一次出现的基础文件名替换为目标文件名
    fn derive_target(&self, source: &str, file_name: &str) -> PathBuf {
        let relative = PathBuf::from(source.replacen(&self.base_file_name, file_name, 1));
        match &self.base_dir {
            Some(dir) => dir.join(relative),
            None => relative,
        }
    }
}
