use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;

use crate::config::{NxCfgConfig, RenderMode};
use crate::decoder::{decode_file, DecodeStats};
use crate::source::{check_preconditions, resolve_path};

#[derive(Parser, Debug)]
#[command(
    name = "nxcfg",
    version,
    about = "Dump a system settings container as [owner] / name = type!value lines",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to the settings container (~ and $VARS are expanded)
    pub path: String,

    /// Collect all entries and print owners/names in sorted order (last duplicate wins)
    #[arg(long, conflicts_with = "stream")]
    pub sorted: bool,

    /// Print entries in stream order (default unless NXCFG_MODE says otherwise)
    #[arg(long)]
    pub stream: bool,

    /// Refuse files bigger than this many bytes
    #[arg(long)]
    pub max_size: Option<u64>,

    /// Print a one-line summary to stderr after a successful decode
    #[arg(long)]
    pub stats: bool,
}

impl Cli {
    /// Env-based config with CLI flags applied on top.
    pub fn config(&self) -> NxCfgConfig {
        self.config_from(NxCfgConfig::from_env())
    }

    /// Apply CLI flags on top of `base`.
    pub fn config_from(&self, base: NxCfgConfig) -> NxCfgConfig {
        let mut cfg = base;
        if self.sorted {
            cfg = cfg.with_mode(RenderMode::Sorted);
        } else if self.stream {
            cfg = cfg.with_mode(RenderMode::Stream);
        }
        if self.max_size.is_some() {
            cfg = cfg.with_max_file_size(self.max_size);
        }
        cfg.build()
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(&cli, &cli.config(), &mut out)?;
    Ok(())
}

/// Resolve the path, check caller preconditions, decode into `out`.
pub fn run_with<W: Write>(cli: &Cli, cfg: &NxCfgConfig, out: &mut W) -> Result<DecodeStats> {
    log::debug!("{}", cfg);

    let path = resolve_path(&cli.path).with_context(|| format!("resolve path '{}'", cli.path))?;
    let size = check_preconditions(&path, cfg)?;

    let stats = decode_file(&path, size, cfg.mode, out)
        .with_context(|| format!("decode {}", path.display()))?;

    if cli.stats {
        log::info!("stats: {:?}", stats);
        eprintln!(
            "{}: {} record(s), {} owner(s), {} duplicate(s)",
            path.display(),
            stats.records,
            stats.owners,
            stats.duplicates
        );
    }
    Ok(stats)
}
