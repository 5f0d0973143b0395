// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — load, subdivide and export a single image. Decoding,
// resampling and encoding are delegated to the `image` crate.

use std::path::{Component, Path};

use image::DynamicImage;
use image::imageops::FilterType;
use imgresizer_core::config::ResizerConfig;
use imgresizer_core::error::{ResizerError, Result, WriteFailure};
use imgresizer_core::types::{ExportRecord, ImageType, Quality};
use tracing::{debug, info, instrument, warn};

use super::codec;
use crate::naming::NameGenerator;

/// Load → subdivide → export pipeline over one exclusively owned image.
///
/// Mutating methods take `&mut self` and hand the processor back, so calls
/// chain:
///
/// ```ignore
/// let mut processor = ImageProcessor::open("photo.jpg", 80)?;
/// processor.halve()?.halve()?.export("thumbs", None, "png")?;
/// ```
#[derive(Debug)]
pub struct ImageProcessor {
    /// The current working image, absent until a successful load.
    image: Option<DynamicImage>,
    /// Format the current image was decoded from.
    source_type: Option<ImageType>,
    /// Raw EXIF block from the last load. Never applied.
    exif: Option<Vec<u8>>,
    quality: Quality,
    names: NameGenerator,
    default_output: ImageType,
    last_export: Option<ExportRecord>,
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// An empty processor with quality 75.
    pub fn new() -> Self {
        Self::with(Quality::DEFAULT, NameGenerator::default(), ImageType::Jpeg)
    }

    /// An empty processor. Fails with `InvalidQuality` outside 0..=100.
    pub fn with_quality(quality: i64) -> Result<Self> {
        Ok(Self::with(
            Quality::new(quality)?,
            NameGenerator::default(),
            ImageType::Jpeg,
        ))
    }

    /// Validate `quality`, then load the image at `path`.
    pub fn open(path: impl AsRef<Path>, quality: i64) -> Result<Self> {
        let mut processor = Self::with_quality(quality)?;
        processor.load(path)?;
        Ok(processor)
    }

    /// An empty processor configured from `config`.
    pub fn from_config(config: &ResizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with(
            config.quality()?,
            NameGenerator::new(config.name_length, &config.name_alphabet)?,
            config.default_output,
        ))
    }

    /// Wrap an already-decoded `DynamicImage`. The source type stays unknown.
    pub fn from_dynamic(image: DynamicImage, quality: Quality) -> Self {
        let mut processor = Self::with(quality, NameGenerator::default(), ImageType::Jpeg);
        processor.image = Some(image);
        processor
    }

    /// Replace the generator used for default export names.
    pub fn with_name_generator(mut self, names: NameGenerator) -> Self {
        self.names = names;
        self
    }

    fn with(quality: Quality, names: NameGenerator, default_output: ImageType) -> Self {
        Self {
            image: None,
            source_type: None,
            exif: None,
            quality,
            names,
            default_output,
            last_export: None,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Current width in pixels, 0 when nothing is loaded.
    pub fn width(&self) -> u32 {
        self.image.as_ref().map_or(0, DynamicImage::width)
    }

    /// Current height in pixels, 0 when nothing is loaded.
    pub fn height(&self) -> u32 {
        self.image.as_ref().map_or(0, DynamicImage::height)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Format detected by the last load.
    pub fn source_type(&self) -> Option<ImageType> {
        self.source_type
    }

    /// EXIF payload read during the last load, if the file carried one.
    pub fn exif(&self) -> Option<&[u8]> {
        self.exif.as_deref()
    }

    pub fn last_export(&self) -> Option<&ExportRecord> {
        self.last_export.as_ref()
    }

    pub fn name_generator(&self) -> &NameGenerator {
        &self.names
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> Option<DynamicImage> {
        self.image
    }

    fn loaded(&self) -> Result<&DynamicImage> {
        self.image.as_ref().ok_or(ResizerError::NoImageLoaded)
    }

    // -- Load -----------------------------------------------------------------

    /// Load a JPEG, PNG or GIF file, replacing any current image.
    ///
    /// The format comes from the file's content, not its extension.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| ResizerError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let image_type = codec::sniff(&data)?;
        codec::ensure_decoder(image_type)?;

        let decoded = codec::decode(&data, image_type).map_err(|err| ResizerError::Decode {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        debug!(exif = decoded.exif.is_some(), "Decoded image");

        self.image = Some(decoded.image);
        self.source_type = Some(image_type);
        self.exif = decoded.exif;

        info!(
            width = self.width(),
            height = self.height(),
            format = image_type.mime_type(),
            "Image loaded"
        );
        Ok(self)
    }

    // -- Resize ---------------------------------------------------------------

    /// Divide both dimensions by `scale`, rounding to the nearest pixel, and
    /// resample with the triangle filter. Its kernel widens with the
    /// downscale ratio, so each output pixel averages its whole source area.
    ///
    /// Fails with `InvalidScale` for a non-positive or non-finite scale, or
    /// one that would leave a zero-sized (or `u32`-overflowing) image. The
    /// image is untouched on failure.
    #[instrument(skip(self))]
    pub fn resize_subdivide(&mut self, scale: f64) -> Result<&mut Self> {
        let image = self.loaded()?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ResizerError::InvalidScale(format!(
                "{scale} is not a positive number"
            )));
        }

        let (width, height) = (image.width(), image.height());
        let (new_width, new_height) = match (
            subdivided(width, scale),
            subdivided(height, scale),
        ) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(ResizerError::InvalidScale(format!(
                    "{width}x{height} divided by {scale} has no valid size"
                )));
            }
        };

        let resized = image.resize_exact(new_width, new_height, FilterType::Triangle);
        self.image = Some(resized);

        info!(
            from_w = width,
            from_h = height,
            new_w = new_width,
            new_h = new_height,
            "Image subdivided"
        );
        Ok(self)
    }

    /// `resize_subdivide(2.0)`.
    pub fn halve(&mut self) -> Result<&mut Self> {
        self.resize_subdivide(2.0)
    }

    // -- Export ---------------------------------------------------------------

    /// Write the current image into `directory` using the format tag
    /// `jpg`, `png` or `gif`.
    ///
    /// Without `filename` a random name plus `.<tag>` is generated; an
    /// explicit `filename` is used verbatim, but must be a plain name with no
    /// directory part (`InvalidFileName` otherwise). Unknown tags fail with
    /// `UnsupportedOutputFormat` before anything touches the disk.
    pub fn export(
        &mut self,
        directory: impl AsRef<Path>,
        filename: Option<&str>,
        format: &str,
    ) -> Result<&mut Self> {
        let image_type: ImageType = format.parse()?;
        self.export_as(directory, filename, image_type)
    }

    /// Export under a generated name in the configured default format.
    pub fn export_default(&mut self, directory: impl AsRef<Path>) -> Result<&mut Self> {
        self.export_as(directory, None, self.default_output)
    }

    /// Typed form of [`export`](Self::export).
    #[instrument(skip(self, directory), fields(directory = %directory.as_ref().display(), format = %image_type))]
    pub fn export_as(
        &mut self,
        directory: impl AsRef<Path>,
        filename: Option<&str>,
        image_type: ImageType,
    ) -> Result<&mut Self> {
        let image = self.loaded()?;
        codec::ensure_encoder(image_type)?;

        let (file_name, file_stem) = match filename {
            Some(name) => {
                check_file_name(name)?;
                (name.to_owned(), name.to_owned())
            }
            None => {
                let stem = self.names.generate();
                debug!(name = %stem, "Generated export name");
                (format!("{stem}.{}", image_type.extension()), stem)
            }
        };
        let path = directory.as_ref().join(&file_name);

        let write_error = |cause: WriteFailure| ResizerError::Write {
            path: path.clone(),
            format: image_type.extension(),
            cause,
        };

        let bytes = codec::encode(image, image_type, self.quality)
            .map_err(|err| write_error(WriteFailure::Encode(err.to_string())))?;

        if let Err(err) = std::fs::write(&path, &bytes) {
            remove_partial(&path);
            return Err(write_error(WriteFailure::Io(err)));
        }

        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            bytes = bytes.len(),
            "Image exported"
        );

        self.last_export = Some(ExportRecord {
            path,
            file_name,
            file_stem,
            image_type,
        });
        Ok(self)
    }
}

/// An explicit export name must be exactly one normal path component, so
/// the file always lands directly inside the export directory.
fn check_file_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ResizerError::InvalidFileName(name.to_owned())),
    }
}

/// `round(len / scale)` if it is a usable, non-zero dimension.
fn subdivided(len: u32, scale: f64) -> Option<u32> {
    let value = (f64::from(len) / scale).round();
    if value >= 1.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

fn remove_partial(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %err, "Could not remove partial export");
        }
    }
}

// -- Tests --------------------------------------------------------------------
