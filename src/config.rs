use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::FitMode;
use crate::foundation::error::{PagecraftError, PagecraftResult};

/// Margin, in device-independent pixels, between a corner-anchored watermark and the frame edge.
pub const DEFAULT_WATERMARK_MARGIN: f64 = 20.0;

/// Engine-wide knobs. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Worker threads for the parallel decode stage of bulk import. `None` uses rayon defaults.
    pub import_threads: Option<usize>,
    /// Margin used for watermarks when the caller does not pick one.
    pub watermark_margin: f64,
    /// Fit mode used when the caller does not pick one.
    pub default_fit_mode: FitMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            import_threads: None,
            watermark_margin: DEFAULT_WATERMARK_MARGIN,
            default_fit_mode: FitMode::Contain,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PagecraftResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| PagecraftError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PagecraftResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PagecraftError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check field invariants.
    pub fn validate(&self) -> PagecraftResult<()> {
        if self.import_threads == Some(0) {
            return Err(PagecraftError::validation(
                "import_threads must be >= 1 when set",
            ));
        }
        if !self.watermark_margin.is_finite() || self.watermark_margin < 0.0 {
            return Err(PagecraftError::validation(
                "watermark_margin must be finite and >= 0",
            ));
        }
        Ok(())
    }

    pub(crate) fn build_import_pool(&self) -> PagecraftResult<rayon::ThreadPool> {
        self.validate()?;
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = self.import_threads {
            builder = builder.num_threads(n);
        }
        builder.build().map_err(|e| {
            PagecraftError::validation(format!("failed to build rayon thread pool: {e}"))
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
