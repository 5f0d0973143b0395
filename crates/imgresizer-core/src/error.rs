// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for imgresizer.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all imgresizer operations.
#[derive(Debug, Error)]
pub enum ResizerError {
    // -- Construction / configuration --
    #[error("image quality {0} is invalid, must be between 0 and 100")]
    InvalidQuality(i64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Input --
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no codec available for {0} images in this build")]
    DecodeBackendUnavailable(String),

    #[error("attempted to load a non-supported image: {0}")]
    UnsupportedFormat(String),

    #[error("failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    // -- Transformation --
    #[error("no image loaded")]
    NoImageLoaded,

    #[error("invalid scale factor: {0}")]
    InvalidScale(String),

    // -- Output --
    #[error("bad file type {0:?}, must be jpg, png or gif")]
    UnsupportedOutputFormat(String),

    #[error("file name {0:?} must be a plain name inside the export directory")]
    InvalidFileName(String),

    #[error("{format} file could not be saved to {path}: {cause}")]
    Write {
        path: PathBuf,
        format: &'static str,
        #[source]
        cause: WriteFailure,
    },
}

/// Why an export failed: the encoder refused the image, or the filesystem
/// refused the bytes.
#[derive(Debug, Error)]
pub enum WriteFailure {
    #[error("encoder rejected the image: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ResizerError>;
