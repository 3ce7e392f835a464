/// 内存 IO 实现
///
/// 所有文件保存在内存中，用于测试和 dry-run

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use super::traits::PropertyStore;
use crate::utils::SyncError;

/// 内存存储
#[derive(Debug, Clone, Default)]
pub struct MemoryPropertyStore {
    files: RefCell<BTreeMap<PathBuf, String>>,
}

impl MemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一个文件
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), content.into());
    }

    /// 获取文件内容
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// 所有文件（按路径排序）
    pub fn files(&self) -> BTreeMap<PathBuf, String> {
        self.files.borrow().clone()
    }
}

impl PropertyStore for MemoryPropertyStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String, SyncError> {
        self.get(path).ok_or_else(|| {
            SyncError::io(path, std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在"))
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), SyncError> {
        self.insert(path, content);
        Ok(())
    }
}
