// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imgresizer — Core types, configuration and error definitions.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod types;

pub use config::ResizerConfig;
pub use error::{ResizerError, Result, WriteFailure};
pub use types::*;
