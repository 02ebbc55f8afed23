//! Static reference tables, loaded once at startup and read-only after.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::model::{HeatPump, House};

pub fn load_houses(path: &Path) -> Result<Vec<House>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read houses table: {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse houses table: {}", path.display()))
}

pub fn load_heat_pumps(path: &Path) -> Result<Vec<HeatPump>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read heat-pump catalog: {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse heat-pump catalog: {}", path.display()))
}
