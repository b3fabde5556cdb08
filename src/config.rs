//! Debugger configuration.

use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path, result, str};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Settings that affect how disassembly is rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisassemblyConfig {
    /// Print mnemonics and register names in lowercase.
    pub lowercase: bool,

    /// Replace addresses with label names where one is known.
    pub show_labels: bool,
}

impl Default for DisassemblyConfig {
    fn default() -> Self {
        DisassemblyConfig {
            lowercase: false,
            show_labels: true,
        }
    }
}

/// Which Game Boy hardware revision to emulate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ModelSetting {
    /// Pick the model from the cartridge header.
    Auto,
    Gameboy,
    GameboyColor,
    SuperGameboy,
}

impl Default for ModelSetting {
    fn default() -> Self {
        ModelSetting::Auto
    }
}

impl str::FromStr for ModelSetting {
    type Err = ();

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "auto" => Ok(ModelSetting::Auto),
            "gameboy" | "dmg" => Ok(ModelSetting::Gameboy),
            "gameboycolor" | "cgb" => Ok(ModelSetting::GameboyColor),
            "supergameboy" | "sgb" => Ok(ModelSetting::SuperGameboy),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(ModelSetting, "valid Game Boy model");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameboyConfig {
    pub model: ModelSetting,

    /// Permit Super Game Boy emulation; without it, SGB selections fall back
    /// to the Game Boy Color.
    pub allow_sgb: bool,
}

/// Top-level configuration of the debugger core.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebuggerConfig {
    pub disassembly: DisassemblyConfig,
    pub gameboy: GameboyConfig,
}

impl DebuggerConfig {
    pub fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: io::Read,
    {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let file = fs::File::open(path)?;

        Self::from_reader(io::BufReader::new(file))
    }
}
