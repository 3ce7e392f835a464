pub mod change_set;
pub mod config;
pub mod diff_parser;
pub mod io;
pub mod patcher;
pub mod properties;
pub mod sync;
pub mod utils;

// 重新导出主要结构
pub use change_set::{Action, ActionKind, ChangeSet, FileChanges};
pub use config::SyncConfig;
pub use diff_parser::parse_diff;
pub use io::{FsPropertyStore, MemoryPropertyStore, PropertyStore};
pub use patcher::{apply_changes, PatchStats};
pub use sync::{run, run_with_store, Locale, SyncReport, TargetReport};
pub use utils::{split_key_value, SyncError};

// 常量定义
pub const SEGMENT_MARKER: &str = "diff --git a/";
pub const DEFAULT_BASE_FILE_NAME: &str = "i18n.properties";
pub const DEFAULT_PRIMARY_FILE_NAME: &str = "i18n_en.properties";
pub const DEFAULT_SECONDARY_FILE_NAME: &str = "i18n_en_US.properties";
