//! Photo Binner - sort photos and videos into date buckets
//!
//! `sort` runs the terminal sorter, `bin` files media by capture year and
//! `config` manages the key mapping file.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use photo_binner::cli::{BinArgs, Command, ConfigArgs, SortArgs};
use photo_binner::config::{CONFIG_FILE_NAME, load_mappings};
use photo_binner::tui::SortState;
use photo_binner::{
    BatchRunner, Cli, Config, DateExtractor, KeyCoverage, SortApp, SortSession, display_summary,
    init_locale,
};
use rust_i18n::t;
use std::path::{Path, PathBuf};
use tracing::{Level, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// Initialize i18n for this binary
rust_i18n::i18n!("locales", fallback = "en");

// CLI Output Module
mod cli_output {
    //! CLI 输出美化模块

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI 主题颜色
    pub struct CliTheme;

    impl CliTheme {
        pub const SUCCESS: Color = Color::Green;
        pub const WARNING: Color = Color::Yellow;
        pub const ERROR: Color = Color::Red;
        pub const HINT: Color = Color::DarkGrey;
        pub const ACCENT: Color = Color::Cyan;
    }

    /// 打印成功消息
    pub fn print_success(msg: &str) {
        let _ = stdout().execute(Print(style("✓ ").with(CliTheme::SUCCESS).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// 打印警告消息
    pub fn print_warning(msg: &str) {
        let _ = stdout().execute(Print(style("⚠ ").with(CliTheme::WARNING).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// 打印错误消息
    pub fn print_error(msg: &str) {
        let _ = stdout().execute(Print(style("✗ ").with(CliTheme::ERROR).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// 打印提示消息
    pub fn print_hint(msg: &str) {
        let _ = stdout().execute(Print(style("→ ").with(CliTheme::HINT)));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// 打印按键映射行
    pub fn print_mapping(key: char, label: &str) {
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(style(key).with(CliTheme::ACCENT).bold()));
        let _ = stdout().execute(Print(format!("  {}\n", label)));
    }
}

fn main() -> Result<()> {
    // Initialize locale based on system settings
    init_locale();

    let cli = Cli::parse();

    // Get the executable directory for Config and Log directories
    let exe_dir = get_executable_dir()?;
    let log_path = get_log_path(&exe_dir, &cli);

    let _guard = setup_logging(&cli, &log_path)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = cli.mode_name(),
        "Photo Binner starting"
    );
    info!(log_file = %log_path.display(), "Log file location");

    let config_path = resolve_config_path(&exe_dir, cli.config.as_deref());

    let outcome = match &cli.command {
        Command::Sort(args) => run_sort(args, &config_path),
        Command::Bin(args) => run_bin(args, &config_path, &log_path),
        Command::Config(args) => run_config(args, &config_path),
    };

    if let Err(e) = &outcome {
        error!(error = %format!("{:#}", e), "Run failed");
    }
    outcome
}

/// Interactive sorting
fn run_sort(args: &SortArgs, config_path: &Path) -> Result<()> {
    let coverage = args.key_coverage();

    let (media, mappings) = match Config::load_from_file(config_path) {
        Ok(config) => match config.key_map(coverage) {
            Ok(map) => {
                info!(config = %config_path.display(), keys = map.len(), "Loaded key mappings");
                (config.media, Some(map))
            }
            Err(e) => {
                warn!(error = %e, "Key mappings unusable, starting setup");
                (config.media, None)
            }
        },
        Err(e) => {
            warn!(error = %e, "No usable configuration, starting setup");
            (Default::default(), None)
        }
    };

    let session = SortSession::scan(&args.dir, &media)
        .with_context(|| format!("Cannot open project folder {}", args.dir.display()))?;
    if args.create_buckets
        && let Some(map) = &mappings
    {
        session.create_bucket_dirs(map)?;
    }

    let app = SortApp::new(SortState::new(session, mappings, config_path, coverage));
    let state = app.run()?;

    info!(
        remaining = state.session().len(),
        "Interactive session complete"
    );
    Ok(())
}

/// Metadata binning
fn run_bin(args: &BinArgs, config_path: &Path, log_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let runner =
        BatchRunner::new(&args.dir, DateExtractor::new(config.media)).dry_run(args.dry_run);

    let files = runner.collect_files()?;
    if files.is_empty() {
        cli_output::print_warning(&t!("no_media_found"));
        return Ok(());
    }
    cli_output::print_hint(&t!("processing_files", count = files.len()));

    let report = runner.run()?;
    display_summary(&report, Some(log_path));

    info!(log_file = %log_path.display(), "Processing complete. Log saved to");
    Ok(())
}

/// Configuration file management
fn run_config(args: &ConfigArgs, config_path: &Path) -> Result<()> {
    let path = config_path.display().to_string();

    if args.init {
        if config_path.exists() {
            cli_output::print_warning(&t!("config_exists", path = path));
            return Ok(());
        }
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, Config::sample_config())
            .with_context(|| format!("Cannot write {}", path))?;
        info!(config = %path, "Wrote sample configuration");
        cli_output::print_success(&t!("config_written", path = path));
        return Ok(());
    }

    match load_mappings(config_path, KeyCoverage::Partial) {
        Ok(map) => {
            cli_output::print_hint(&t!("config_mappings_header", path = path));
            for (key, label) in map.iter() {
                cli_output::print_mapping(key, label);
            }
        }
        Err(e) => cli_output::print_error(&t!("config_invalid", error = e.to_string())),
    }
    Ok(())
}

/// Get the directory where the executable is located
fn get_executable_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe()?;
    Ok(exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// `Log/<Mode>_<timestamp>.log` next to the executable
fn get_log_path(exe_dir: &Path, cli: &Cli) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    exe_dir
        .join("Log")
        .join(format!("{}_{}.log", cli.mode_name(), timestamp))
}

/// Resolve config path - supports shorthand syntax
///
/// A bare name is looked up with a `.toml` extension and then under the
/// `Config` directory. Without `--config` the default file there is used.
fn resolve_config_path(exe_dir: &Path, config_path: Option<&Path>) -> PathBuf {
    let config_dir = exe_dir.join("Config");
    let Some(config_path) = config_path else {
        return config_dir.join(CONFIG_FILE_NAME);
    };

    if config_path.exists() {
        return config_path.to_path_buf();
    }

    let with_extension = if config_path.extension().is_none() {
        config_path.with_extension("toml")
    } else {
        config_path.to_path_buf()
    };

    if with_extension.exists() {
        return with_extension;
    }

    let filename = config_path.file_name().unwrap_or(config_path.as_os_str());
    let mut in_config_dir = config_dir.join(filename);
    if in_config_dir.extension().is_none() {
        in_config_dir = in_config_dir.with_extension("toml");
    }

    if in_config_dir.exists() {
        return in_config_dir;
    }

    config_path.to_path_buf()
}

/// Setup logging: always to the log file, and to stderr unless the TUI owns
/// the terminal
fn setup_logging(cli: &Cli, log_path: &Path) -> Result<WorkerGuard> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("Cannot open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let json_layer = cli.json_log.then(|| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(non_blocking.clone())
    });
    let text_layer = (!cli.json_log).then(|| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking.clone())
    });
    let console_layer =
        (!cli.is_interactive()).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(console_layer)
        .init();

    Ok(guard)
}
