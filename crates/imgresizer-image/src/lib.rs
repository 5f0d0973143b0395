// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imgresizer-image — Load an image, subdivide its dimensions and export it.
//
// Decoding, resampling and encoding are delegated to the `image` crate; this
// crate adds the load → resize → export handle around it and the random
// naming used for exports written without an explicit file name.

pub mod image;
pub mod naming;

// Re-export the primary types so callers can use `imgresizer_image::ImageProcessor`.
pub use self::image::processor::ImageProcessor;
pub use naming::{NameGenerator, random_name};
