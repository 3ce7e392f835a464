/// IO 抽象层 - trait 定义
///
/// 该模块定义了 properties 文件读写的抽象接口，支持依赖注入和测试 mock。

use std::path::Path;
use crate::utils::SyncError;

/// properties 文件存储 trait
///
/// # 职责
/// - 以文本形式读取/写入整个文件
/// - 不负责解析，仅负责 IO
///
/// # 实现示例
/// ```rust,ignore
/// pub struct MyStore;
/// impl PropertyStore for MyStore {
///     fn exists(&self, path: &Path) -> bool { path.exists() }
///     fn read(&self, path: &Path) -> Result<String, SyncError> {
///         std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))
///     }
///     fn write(&self, path: &Path, content: &str) -> Result<(), SyncError> {
///         std::fs::write(path, content).map_err(|e| SyncError::io(path, e))
///     }
/// }
/// ```
pub trait PropertyStore {
    /// 检查文件是否存在
    fn exists(&self, path: &Path) -> bool;

    /// 读取整个文件内容
    ///
    /// # 参数
    /// * `path` - 文件路径
    fn read(&self, path: &Path) -> Result<String, SyncError>;

    /// 用给定内容整体覆盖文件，必要时创建父目录
    ///
    /// # 参数
    /// * `path` - 目标文件路径
    /// * `content` - 完整的文件内容
    fn write(&self, path: &Path, content: &str) -> Result<(), SyncError>;
}
