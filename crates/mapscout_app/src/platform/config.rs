use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mapscout_engine::RunConfig;
use scout_logging::scout_info;

/// Loads the run configuration from a RON file, or defaults when no path is given.
///
/// Fields missing from the file keep their defaults. An unreadable or
/// malformed file is an error rather than a silent fallback.
pub fn load_run_config(path: Option<&Path>) -> Result<RunConfig> {
    let Some(path) = path else {
        return Ok(RunConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: RunConfig = ron::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    scout_info!("Loaded run configuration from {:?}", path);
    Ok(config)
}
