//! Scenario loading from TOML files or named presets.

use std::path::Path;

use warfront_sim::Scenario;

use crate::error::{AppError, Result};

pub fn load(path: &Path) -> Result<Scenario> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

pub fn parse(text: &str) -> Result<Scenario> {
    Ok(toml::from_str(text)?)
}

pub fn preset(name: &str) -> Result<Scenario> {
    match name {
        "skirmish" => Ok(Scenario::skirmish()),
        "siege" => Ok(Scenario::siege()),
        other => Err(AppError::UnknownPreset(other.to_string())),
    }
}
