//! Centralized configuration for NxCfg.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - NxCfgConfig::from_env() reads the NXCFG_* env vars; CLI flags override them
//!   through the fluent setters.
//!
//! Defaults:
//! - mode = Stream (stream order, duplicates printed as-is)
//! - max_file_size = None (only the u32 header limit applies)

use std::fmt;
use std::str::FromStr;

/// How decoded entries are turned into output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Render each record as soon as it is walked.
    #[default]
    Stream,
    /// Collect owner -> name -> value (last write wins), then render sorted.
    Sorted,
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stream" | "streaming" => Ok(RenderMode::Stream),
            "sorted" | "sort" | "collect" | "collecting" => Ok(RenderMode::Sorted),
            other => Err(format!("unknown render mode '{}'", other)),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Stream => f.write_str("stream"),
            RenderMode::Sorted => f.write_str("sorted"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NxCfgConfig {
    /// Output assembly mode.
    /// Env: NXCFG_MODE = stream|sorted (default stream)
    pub mode: RenderMode,

    /// Optional upper bound for the container file size in bytes.
    /// Env: NXCFG_MAX_FILE_SIZE (default None)
    pub max_file_size: Option<u64>,
}

impl NxCfgConfig {
    /// Load configuration from environment variables.
    /// Unparsable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("NXCFG_MODE") {
            if let Ok(m) = v.parse::<RenderMode>() {
                cfg.mode = m;
            }
        }

        if let Ok(v) = std::env::var("NXCFG_MAX_FILE_SIZE") {
            if let Ok(n) = v.trim().parse::<u64>() {
                cfg.max_file_size = Some(n);
            }
        }

        cfg
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_file_size(mut self, max: Option<u64>) -> Self {
        self.max_file_size = max;
        self
    }

    /// Effective size ceiling: the declared size is a u32, so nothing larger can be valid.
    pub fn effective_max_file_size(&self) -> u64 {
        let hard = u32::MAX as u64;
        self.max_file_size.map(|m| m.min(hard)).unwrap_or(hard)
    }

    pub fn build(self) -> Self {
        self
    }
}

impl fmt::Display for NxCfgConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NxCfgConfig {{ mode: {}, max_file_size: {} }}",
            self.mode,
            self.max_file_size
                .map(|v| v.to_string())
                .unwrap_or_else(|| "default(u32::MAX)".to_string()),
        )
    }
}
