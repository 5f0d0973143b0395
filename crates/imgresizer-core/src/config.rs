// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Processor configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ResizerError, Result};
use crate::types::{ImageType, Quality};

/// Characters used for generated export names.
pub const DEFAULT_NAME_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated export names.
pub const DEFAULT_NAME_LENGTH: usize = 32;

/// Settings for an `ImageProcessor`. Missing JSON fields fall back to the
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizerConfig {
    /// Encoder quality, 0-100.
    pub quality: u8,
    /// Length of generated file names (without extension).
    pub name_length: usize,
    /// Alphabet generated file names are drawn from.
    pub name_alphabet: String,
    /// Format used when the caller does not pick one.
    pub default_output: ImageType,
}

impl Default for ResizerConfig {
    fn default() -> Self {
        Self {
            quality: Quality::DEFAULT.get(),
            name_length: DEFAULT_NAME_LENGTH,
            name_alphabet: DEFAULT_NAME_ALPHABET.to_owned(),
            default_output: ImageType::Jpeg,
        }
    }
}

impl ResizerConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ResizerError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Validated quality.
    pub fn quality(&self) -> Result<Quality> {
        Quality::new(i64::from(self.quality))
    }

    pub fn validate(&self) -> Result<()> {
        self.quality()?;
        if self.name_length == 0 {
            return Err(ResizerError::InvalidConfig(
                "name_length must be at least 1".into(),
            ));
        }
        if self.name_alphabet.is_empty() {
            return Err(ResizerError::InvalidConfig(
                "name_alphabet must not be empty".into(),
            ));
        }
        Ok(())
    }
}
