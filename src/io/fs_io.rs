/// properties 文件 IO 实现
///
/// 提供基于文件系统的默认读写实现，按指定编码解码/编码文件内容

use std::path::Path;
use encoding_rs::Encoding;
use super::traits::PropertyStore;
use crate::utils::SyncError;

/// 基于文件系统的存储
#[derive(Debug, Clone, Copy)]
pub struct FsPropertyStore {
    encoding: &'static Encoding,
}

impl FsPropertyStore {
    /// 使用给定编码创建
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// UTF-8 存储
    pub fn utf8() -> Self {
        Self::new(encoding_rs::UTF_8)
    }

    /// 通过编码标签创建（如 "utf-8"、"iso-8859-1"）
    pub fn for_label(label: &str) -> Result<Self, SyncError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(Self::new)
            .ok_or_else(|| SyncError::UnknownEncoding(label.to_string()))
    }

    fn encoding_error(&self, path: &Path) -> SyncError {
        SyncError::Encoding {
            path: path.to_path_buf(),
            encoding: self.encoding.name(),
        }
    }
}

impl Default for FsPropertyStore {
    fn default() -> Self {
        Self::utf8()
    }
}

impl PropertyStore for FsPropertyStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<String, SyncError> {
        let bytes = std::fs::read(path).map_err(|e| SyncError::io(path, e))?;
        let (decoded, _, had_errors) = self.encoding.decode(&bytes);
        // 有损解码的内容写回会破坏原文件
        if had_errors {
            return Err(self.encoding_error(path));
        }
        Ok(decoded.into_owned())
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), SyncError> {
        // 先编码，无法表示的字符不会以 `&#NNNN;` 的形式落盘
        let (encoded, _, had_errors) = self.encoding.encode(content);
        if had_errors {
            return Err(self.encoding_error(path));
        }

        // 确保父目录存在
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
            }
        }

        std::fs::write(path, &encoded).map_err(|e| SyncError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_nonexistent() {
        let store = FsPropertyStore::utf8();
        let result = store.read(Path::new("nonexistent.properties"));

        // 应该返回错误
        assert!(matches!(result, Err(SyncError::Io { .. })));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/i18n_en.properties");

        let store = FsPropertyStore::utf8();
        assert!(!store.exists(&path));
        store.write(&path, "A=1\nB=2").unwrap();

        assert!(store.exists(&path));
        assert_eq!(store.read(&path).unwrap(), "A=1\nB=2");
    }

    #[test]
    fn test_latin1_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("i18n_de.properties");

        let store = FsPropertyStore::for_label("iso-8859-1").unwrap();
        store.write(&path, "GRUSS=Grüße").unwrap();

        // 单字节编码写入
        let raw = std::fs::read(&path).unwrap();
        assert_eq!(raw.len(), "GRUSS=Grüße".chars().count());
        assert_eq!(store.read(&path).unwrap(), "GRUSS=Grüße");
    }

    #[test]
    fn test_unmappable_write_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("i18n_en.properties");
        std::fs::write(&path, "A=1").unwrap();

        let store = FsPropertyStore::for_label("iso-8859-1").unwrap();
        let result = store.write(&path, "A=1\nJA=日本");

        assert!(matches!(result, Err(SyncError::Encoding { .. })));
        // 原文件保持不变
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "A=1");
    }

    #[test]
    fn test_invalid_utf8_read_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("i18n_en.properties");
        std::fs::write(&path, b"A=Gr\xf6\xdfe").unwrap();

        let store = FsPropertyStore::utf8();
        assert!(matches!(store.read(&path), Err(SyncError::Encoding { .. })));
    }

    #[test]
    fn test_unknown_encoding() {
        assert!(matches!(
            FsPropertyStore::for_label("klingon"),
            Err(SyncError::UnknownEncoding(_))
        ));
    }
}
