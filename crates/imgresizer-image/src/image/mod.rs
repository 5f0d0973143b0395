// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — content-sniffed load, area-averaging subdivision and
// JPEG/PNG/GIF export.

pub mod codec;
pub mod processor;

pub use processor::ImageProcessor;
