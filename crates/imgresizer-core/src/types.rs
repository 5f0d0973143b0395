// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for imgresizer.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ResizerError, Result};

/// Image encodings accepted on input and produced on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Jpeg,
    Png,
    Gif,
}

impl ImageType {
    /// Every supported type, in the order they are documented.
    pub const ALL: [ImageType; 3] = [Self::Jpeg, Self::Png, Self::Gif];

    /// File extension (and export tag) for this type, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }

    /// MIME type string.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    /// Parse an export tag. Only the exact lowercase tags `jpg`, `png` and
    /// `gif` are accepted.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageType {
    type Err = ResizerError;

    fn from_str(tag: &str) -> Result<Self> {
        Self::from_tag(tag).ok_or_else(|| ResizerError::UnsupportedOutputFormat(tag.to_owned()))
    }
}

/// Encoder quality in the range 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 100;
    pub const DEFAULT: Quality = Quality(75);

    /// Validate `value`, failing with `InvalidQuality` outside 0..=100.
    pub fn new(value: i64) -> Result<Self> {
        match u8::try_from(value) {
            Ok(q) if q <= Self::MAX => Ok(Self(q)),
            _ => Err(ResizerError::InvalidQuality(value)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Quality {
    type Error = ResizerError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where and how the last export was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// Full path of the written file.
    pub path: PathBuf,
    /// File name as written, including any generated extension.
    pub file_name: String,
    /// File name without the generated extension. Equal to `file_name`
    /// when the caller supplied the name.
    pub file_stem: String,
    /// Encoding used for the file.
    pub image_type: ImageType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_bounds() {
        assert!(Quality::new(0).is_ok());
        assert!(Quality::new(100).is_ok());
        assert!(matches!(
            Quality::new(-1),
            Err(ResizerError::InvalidQuality(-1))
        ));
        assert!(matches!(
            Quality::new(101),
            Err(ResizerError::InvalidQuality(101))
        ));
        assert!(Quality::new(i64::MAX).is_err());
    }

    #[test]
    fn quality_defaults_to_75() {
        assert_eq!(Quality::default().get(), 75);
    }

    #[test]
    fn quality_deserialize_rejects_out_of_range() {
        let ok: Quality = serde_json::from_str("90").unwrap();
        assert_eq!(ok.get(), 90);
        assert!(serde_json::from_str::<Quality>("150").is_err());
        assert!(serde_json::from_str::<Quality>("-3").is_err());
    }

    #[test]
    fn tags_are_exact() {
        assert_eq!(ImageType::from_tag("jpg"), Some(ImageType::Jpeg));
        assert_eq!(ImageType::from_tag("png"), Some(ImageType::Png));
        assert_eq!(ImageType::from_tag("gif"), Some(ImageType::Gif));
        assert_eq!(ImageType::from_tag("bmp"), None);
        assert_eq!(ImageType::from_tag("JPG"), None);
    }

    #[test]
    fn from_str_reports_unsupported_output() {
        let err = "webp".parse::<ImageType>().unwrap_err();
        match err {
            ResizerError::UnsupportedOutputFormat(tag) => assert_eq!(tag, "webp"),
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn extension_round_trips_through_tag() {
        for ty in ImageType::ALL {
            assert_eq!(ImageType::from_tag(ty.extension()), Some(ty));
        }
    }
}
