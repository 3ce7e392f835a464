/// 同步流程
///
/// 解析一次 diff，然后把每个变更集分别应用到主语言（以及可选的次语言）文件。
/// 每个目标文件独立处理，互不影响。

use std::path::PathBuf;
use serde::Serialize;
use crate::config::SyncConfig;
use crate::diff_parser::parse_diff;
use crate::io::PropertyStore;
use crate::patcher::{apply_changes, PatchStats};
use crate::utils::SyncError;

/// 目标语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Locale {
    Primary,
    Secondary,
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::Primary => write!(f, "主语言"),
            Locale::Secondary => write!(f, "次语言"),
        }
    }
}

/// 单个目标文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    pub source: String,
    pub target: PathBuf,
    pub locale: Locale,
    pub stats: PatchStats,
}

/// 一次同步的汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub targets: Vec<TargetReport>,
}

impl SyncReport {
    pub fn total_added(&self) -> usize {
        self.targets.iter().map(|t| t.stats.added).sum()
    }

    pub fn total_removed(&self) -> usize {
        self.targets.iter().map(|t| t.stats.removed).sum()
    }
}

/// 使用配置中的文件系统存储运行同步
pub fn run(config: &SyncConfig, diff_text: &str, produce_secondary: bool) -> Result<SyncReport, SyncError> {
    let store = config.store()?;
    run_with_store(&store, config, diff_text, produce_secondary)
}

/// 在给定存储上运行同步
///
/// # 参数
/// * `store` - 目标文件存储
/// * `config` - 路径推导配置
/// * `diff_text` - 基础文件的 diff 文本
/// * `produce_secondary` - 是否同时生成次语言文件
pub fn run_with_store<S: PropertyStore + ?Sized>(
    store: &S,
    config: &SyncConfig,
    diff_text: &str,
    produce_secondary: bool,
) -> Result<SyncReport, SyncError> {
    let files = parse_diff(diff_text)?;
    let mut report = SyncReport::default();

    for file in &files {
        if !config.is_base_file(&file.file_path) {
            tracing::warn!(
                source = %file.file_path,
                base = %config.base_file_name,
                "源路径不包含基础文件名，目标路径与源路径相同"
            );
        }

        let mut targets = vec![(Locale::Primary, config.primary_target(&file.file_path))];
        if produce_secondary {
            targets.push((Locale::Secondary, config.secondary_target(&file.file_path)));
        }

        for (locale, target) in targets {
            let stats = apply_changes(store, &target, &file.changes)?;
            tracing::info!(source = %file.file_path, file = %target.display(), %locale, %stats, "已更新");
            report.targets.push(TargetReport {
                source: file.file_path.clone(),
                target,
                locale,
                stats,
            });
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryPropertyStore;
    use std::path::Path;

    const DIFF: &str = "diff --git a/web/i18n.properties b/web/i18n.properties
index 1111111..2222222 100644
--- a/web/i18n.properties
+++ b/web/i18n.properties
@@ -1,3 +1,3 @@ A=Apple
 B=Banana
+B2=Blueberry
-C=Cherry
";

    #[test]
    fn test_primary_only() {
        let store = MemoryPropertyStore::new();
        store.insert("web/i18n_en.properties", "A=Apple\nB=Banana\nC=Cherry");
        store.insert("web/i18n_en_US.properties", "A=Apple\nB=Banana\nC=Cherry");

        let report = run_with_store(&store, &SyncConfig::default(), DIFF, false).unwrap();

        assert_eq!(report.targets.len(), 1);
        assert_eq!(report.targets[0].locale, Locale::Primary);
        assert_eq!(
            store.get(Path::new("web/i18n_en.properties")).unwrap(),
            "A=Apple\nB=Banana\nB2=Blueberry"
        );
        // 次语言文件未被触碰
        assert_eq!(
            store.get(Path::new("web/i18n_en_US.properties")).unwrap(),
            "A=Apple\nB=Banana\nC=Cherry"
        );
    }

    #[test]
    fn test_with_secondary() {
        let store = MemoryPropertyStore::new();
        store.insert("web/i18n_en.properties", "A=Apple\nB=Banana\nC=Cherry");

        let report = run_with_store(&store, &SyncConfig::default(), DIFF, true).unwrap();

        assert_eq!(report.targets.len(), 2);
        assert_eq!(report.targets[1].locale, Locale::Secondary);
        assert!(report.targets[1].stats.created);
        // 新建的次语言文件从空文件开始
        assert_eq!(store.get(Path::new("web/i18n_en_US.properties")).unwrap(), "B2=Blueberry");
        assert_eq!(report.total_added(), 2);
        assert_eq!(report.total_removed(), 1);
    }

    #[test]
    fn test_malformed_diff_aborts_before_patching() {
        let store = MemoryPropertyStore::new();
        let diff = format!("{}diff --git a/no-separator\n+X=1\n", DIFF);

        let result = run_with_store(&store, &SyncConfig::default(), &diff, true);
        assert!(matches!(result, Err(SyncError::MalformedSegment { index: 1, .. })));
        assert!(store.files().is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let store = MemoryPropertyStore::new();
        let report = run_with_store(&store, &SyncConfig::default(), DIFF, true).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["targets"][0]["locale"], "Primary");
        assert_eq!(json["targets"][1]["target"], "web/i18n_en_US.properties");
        assert_eq!(json["targets"][1]["stats"]["created"], true);
        assert_eq!(json["targets"][0]["stats"]["added"], 1);
    }

    #[test]
    fn test_empty_diff() {
        let store = MemoryPropertyStore::new();
        let report = run_with_store(&store, &SyncConfig::default(), "", true).unwrap();
        assert!(report.targets.is_empty());
    }
}
