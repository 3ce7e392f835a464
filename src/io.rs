/// IO 抽象层模块
///
/// 该模块提供了 properties 文件读写的抽象接口，补丁器只通过它访问存储。
/// 支持依赖注入、测试 mock 和替换 IO 实现（如内存 IO）。
///
/// # 架构设计
///
/// - **traits**: 定义 PropertyStore trait 接口
/// - **fs_io**: 基于文件系统的默认实现（支持多编码）
/// - **memory_io**: 内存实现，用于测试和 dry-run
///
/// # 使用示例
///
/// ```rust,ignore
/// use i18n_sync::io::{FsPropertyStore, PropertyStore};
///
/// let store = FsPropertyStore::utf8();
/// let text = store.read(Path::new("i18n_en.properties"))?;
/// ```
pub mod traits;
pub mod fs_io;
pub mod memory_io;

// === 导出 trait 定义 ===
pub use traits::PropertyStore;

// === 导出默认实现 ===
pub use fs_io::FsPropertyStore;
pub use memory_io::MemoryPropertyStore;
