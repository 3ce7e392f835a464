use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use i18n_sync::utils::create_backup;
use i18n_sync::{parse_diff, run_with_store, MemoryPropertyStore, PropertyStore, SyncConfig, SyncReport};

#[derive(Parser)]
#[command(name = "i18n_sync")]
#[command(about = "根据基础 properties 文件的 diff 同步更新各语言文件")]
#[command(version)]
struct Cli {
    /// diff 文本（未指定任何来源时读取环境变量 DIFF）
    #[arg(long, conflicts_with_all = ["diff_file", "diff_stdin"])]
    diff: Option<String>,

    /// 从文件读取 diff 文本
    #[arg(long, conflicts_with = "diff_stdin")]
    diff_file: Option<PathBuf>,

    /// 从标准输入读取 diff 文本
    #[arg(long)]
    diff_stdin: bool,

    /// 同时更新次语言文件（如 i18n_en_US.properties）
    #[arg(long, env = "ENUS")]
    en_us: bool,

    /// JSON 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 基础文件名
    #[arg(long)]
    base_name: Option<String>,

    /// 主语言文件名
    #[arg(long)]
    primary_name: Option<String>,

    /// 次语言文件名
    #[arg(long)]
    secondary_name: Option<String>,

    /// 目标路径的根目录
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// properties 文件编码（如 utf-8、iso-8859-1）
    #[arg(long)]
    encoding: Option<String>,

    /// 修改前备份已存在的目标文件
    #[arg(long)]
    backup: bool,

    /// 只在内存中应用并打印结果，不写入磁盘
    #[arg(long)]
    dry_run: bool,

    /// 以 JSON 打印解析出的变更集
    #[arg(long)]
    print_changes: bool,

    /// 以 JSON 输出同步结果
    #[arg(long)]
    json: bool,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,

    /// 静默模式(仅输出错误)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let source = resolve_diff_source(&cli, std::env::var("DIFF").ok())?;
    let config = build_config(&cli)?;
    let diff_text = read_diff_text(&cli, source)?;

    if cli.print_changes {
        print_changes(&diff_text)?;
    }

    if cli.dry_run {
        return handle_dry_run(&cli, &config, &diff_text);
    }

    let store = config.store()?;
    if cli.backup {
        backup_targets(&cli, &config, &diff_text)?;
    }

    let report = run_with_store(&store, &config, &diff_text, cli.en_us)
        .context("应用变更失败，目标文件状态未知，请从干净的检出重新运行")?;

    print_report(&cli, &report)?;
    Ok(())
}

/// 初始化日志
fn init_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// diff 来源
#[derive(Debug, PartialEq, Eq)]
enum DiffSource {
    Text(String),
    File(PathBuf),
    Stdin,
}

/// 确定 diff 来源
///
/// 显式参数优先；都未指定时使用环境变量 DIFF。参数之间的互斥由 clap 检查。
fn resolve_diff_source(cli: &Cli, env_diff: Option<String>) -> Result<DiffSource> {
    if let Some(diff) = &cli.diff {
        return Ok(DiffSource::Text(diff.clone()));
    }
    if let Some(path) = &cli.diff_file {
        return Ok(DiffSource::File(path.clone()));
    }
    if cli.diff_stdin {
        return Ok(DiffSource::Stdin);
    }
    match env_diff {
        Some(diff) => Ok(DiffSource::Text(diff)),
        None => bail!("需要提供 diff：--diff、--diff-file、--diff-stdin 或环境变量 DIFF"),
    }
}

/// 合并配置文件和命令行参数
fn build_config(cli: &Cli) -> Result<SyncConfig> {
    let mut config = match &cli.config {
        Some(path) => SyncConfig::from_file(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?,
        None => SyncConfig::default(),
    };

    if let Some(name) = &cli.base_name {
        config.base_file_name = name.clone();
    }
    if let Some(name) = &cli.primary_name {
        config.primary_file_name = name.clone();
    }
    if let Some(name) = &cli.secondary_name {
        config.secondary_file_name = name.clone();
    }
    if let Some(dir) = &cli.base_dir {
        config.base_dir = Some(dir.clone());
    }
    if let Some(encoding) = &cli.encoding {
        config.encoding = encoding.clone();
    }

    Ok(config)
}

/// 读取 diff 文本
fn read_diff_text(cli: &Cli, source: DiffSource) -> Result<String> {
    match source {
        DiffSource::Text(diff) => Ok(diff),
        DiffSource::File(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("读取 diff 文件失败: {:?}", path)),
        DiffSource::Stdin => {
            if !cli.quiet {
                eprintln!("等待从标准输入读取 diff... (Ctrl+D结束输入)");
            }

            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("从标准输入读取失败")?;
            Ok(buffer)
        }
    }
}

/// 打印解析出的变更集
fn print_changes(diff_text: &str) -> Result<()> {
    let files = parse_diff(diff_text)?;
    println!("{}", serde_json::to_string_pretty(&files)?);
    Ok(())
}

/// 备份本次会被修改的已存在目标文件
fn backup_targets(cli: &Cli, config: &SyncConfig, diff_text: &str) -> Result<()> {
    let mut targets: Vec<PathBuf> = Vec::new();
    for file in parse_diff(diff_text)? {
        targets.push(config.primary_target(&file.file_path));
        if cli.en_us {
            targets.push(config.secondary_target(&file.file_path));
        }
    }
    targets.sort();
    targets.dedup();

    for target in targets.iter().filter(|t| t.exists()) {
        let backup = create_backup(target)?;
        if !cli.quiet {
            println!("已备份: {:?} -> {:?}", target, backup);
        }
    }
    Ok(())
}

/// 处理 dry-run：把现有目标文件载入内存后应用
fn handle_dry_run(cli: &Cli, config: &SyncConfig, diff_text: &str) -> Result<()> {
    let disk = config.store()?;
    let memory = MemoryPropertyStore::new();

    for file in parse_diff(diff_text)? {
        let mut targets = vec![config.primary_target(&file.file_path)];
        if cli.en_us {
            targets.push(config.secondary_target(&file.file_path));
        }
        for target in targets {
            if disk.exists(&target) && !memory.exists(&target) {
                memory.insert(target.clone(), disk.read(&target)?);
            }
        }
    }

    let report = run_with_store(&memory, config, diff_text, cli.en_us)?;

    for (path, content) in memory.files() {
        println!("===== {:?} =====", path);
        println!("{}", content);
    }
    print_report(cli, &report)?;
    if !cli.quiet && !cli.json {
        println!("(dry-run，未写入磁盘)");
    }
    Ok(())
}

/// 输出同步结果：`--json` 时输出 JSON，否则在非静默模式下打印摘要
fn print_report(cli: &Cli, report: &SyncReport) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else if !cli.quiet {
        print_summary(report);
    }
    Ok(())
}

/// 打印同步摘要
fn print_summary(report: &SyncReport) {
    for target in &report.targets {
        println!("[{}] {:?}: {}", target.locale, target.target, target.stats);
    }
    println!(
        "共更新 {} 个文件，新增 {} 行，删除 {} 行",
        report.targets.len(),
        report.total_added(),
        report.total_removed()
    );
}
