use crate::{
    acquire::{AcquireError, FileSource, TextSource},
    config::Config,
    extract::Matchers,
    pipeline::Pipeline,
    sections,
    util::ensure_dir,
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "cv-distill")]
#[command(about = "Rule-driven resume/profile distiller (sections + entities + schema validation)")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./cv-distill.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Full pipeline: structured profile JSON to stdout or --output.
    Parse {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Per-line section tags, for auditing the classifier.
    Sections {
        #[arg(long)]
        input: PathBuf,
    },
    /// Raw candidate list, for auditing the extraction rules.
    Candidates {
        #[arg(long)]
        input: PathBuf,
    },
    /// Run the pipeline but print only the validation result.
    Validate {
        #[arg(long)]
        input: PathBuf,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let _guard = init_logging(&args, &cfg)?;

    match &args.cmd {
        Command::Parse { input, output } => parse(&cfg, input, output.as_deref()),
        Command::Sections { input } => print_sections(&cfg, input),
        Command::Candidates { input } => print_candidates(&cfg, input),
        Command::Validate { input } => validate(&cfg, input),
    }
}

fn load_config(user: Option<&Path>) -> Result<Config> {
    if let Some(p) = user {
        return Config::load(p);
    }
    let default = PathBuf::from("cv-distill.toml");
    if default.exists() {
        Config::load(&default)
    } else {
        Ok(Config::default())
    }
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = resolve_log_path(cfg) {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(&path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }
    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }
    Some(PathBuf::from("cv-distill.log"))
}

/// Acquire text or exit. Acquisition is the one fatal boundary: the caller
/// gets a JSON error object and a nonzero exit, never a partial profile
/// wrapped in an error.
fn acquire_or_exit(cfg: &Config, input: &Path) -> String {
    let source = FileSource::new(cfg);
    let label = input.display().to_string();

    let text = match source.extract_text(&label) {
        Ok(text) => text,
        Err(err) => exit_acquisition(&err),
    };

    if text.len() as u64 > cfg.limits.max_input_bytes {
        exit_acquisition(&AcquireError::FetchFailed(format!(
            "input exceeds max_input_bytes: {}",
            text.len()
        )));
    }

    text
}

fn exit_acquisition(err: &AcquireError) -> ! {
    println!(
        "{}",
        serde_json::json!({ "error": err.to_string() })
    );
    std::process::exit(1);
}

fn parse(cfg: &Config, input: &Path, output: Option<&Path>) -> Result<()> {
    let text = acquire_or_exit(cfg, input);
    let matchers = Matchers::new(cfg)?;
    let pipeline = Pipeline::new(cfg, &matchers);

    let result = pipeline.run(&input.display().to_string(), &text);

    let rendered = if cfg.output.pretty {
        serde_json::to_string_pretty(&result.profile)?
    } else {
        serde_json::to_string(&result.profile)?
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                ensure_dir(parent)?;
            }
            std::fs::write(path, &rendered)
                .with_context(|| format!("writing profile: {}", path.display()))?;
            info!("wrote profile to {}", path.display());

            if cfg.output.write_report_json {
                let report_path = path
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join(&cfg.output.report_filename);
                std::fs::write(&report_path, serde_json::to_string_pretty(&result.report)?)
                    .with_context(|| format!("writing report: {}", report_path.display()))?;
                info!("wrote report to {}", report_path.display());
            }
        }
        None => println!("{rendered}"),
    }

    // Exit 0 even with validation gaps: the contract is best-effort output.
    Ok(())
}

fn print_sections(cfg: &Config, input: &Path) -> Result<()> {
    let text = acquire_or_exit(cfg, input);
    let lines = sections::classify_lines(&cfg.vocab, &text);
    let blocks = sections::section_blocks(&lines, text.len());
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "lines": lines,
            "blocks": blocks,
        }))?
    );
    Ok(())
}

fn print_candidates(cfg: &Config, input: &Path) -> Result<()> {
    let text = acquire_or_exit(cfg, input);
    let matchers = Matchers::new(cfg)?;
    let lines = sections::classify_lines(&cfg.vocab, &text);
    let blocks = sections::section_blocks(&lines, text.len());

    let mut candidates = Vec::new();
    if let Some(name) = matchers.name_candidate(&text) {
        candidates.push(name);
    }
    candidates.extend(matchers.document_candidates(&lines, &blocks));

    println!("{}", serde_json::to_string_pretty(&candidates)?);
    Ok(())
}

fn validate(cfg: &Config, input: &Path) -> Result<()> {
    let text = acquire_or_exit(cfg, input);
    let matchers = Matchers::new(cfg)?;
    let pipeline = Pipeline::new(cfg, &matchers);
    let result = pipeline.run(&input.display().to_string(), &text);

    println!("{}", serde_json::to_string_pretty(&result.validation)?);

    if cfg.validation.strict && !result.validation.ok {
        std::process::exit(2);
    }
    Ok(())
}
