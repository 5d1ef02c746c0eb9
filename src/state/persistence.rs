use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{FuelError, Result};
use crate::models::{FuelConfig, Sku};

/// Load a configuration table from a JSON file.
///
/// Products missing from the file are reported; lookups fall back to empty products.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FuelConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FuelError::ConfigNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let config: FuelConfig = serde_json::from_str(&content)?;

    for sku in Sku::ALL {
        if !config.products.contains_key(&sku) {
            warn!(sku = sku.code(), path = %path.display(), "config has no product entry");
        }
    }
    debug!(
        path = %path.display(),
        products = config.products.len(),
        packs = config.packs.len(),
        "loaded config"
    );

    Ok(config)
}

/// Load the override file when given, otherwise the bundled table.
pub fn load_or_bundled(path: Option<&Path>) -> Result<FuelConfig> {
    match path {
        Some(path) => load_config(path),
        None => FuelConfig::bundled(),
    }
}

/// Save a configuration table as pretty-printed JSON.
pub fn save_config<P: AsRef<Path>>(path: P, config: &FuelConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
