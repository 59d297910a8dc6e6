use std::fs;
use std::path::Path;

use serde::Deserialize;

use namespec_core::NamingConfig;

/// On-disk preset: one JSON document holding an optional structure
/// template plus the configurable token values. Fields not present
/// keep their stock values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub structure: Option<String>,
    #[serde(flatten)]
    pub config: NamingConfig,
}

pub fn load(path: &Path) -> Result<Preset, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read preset {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("bad preset {}: {e}", path.display()))
}
