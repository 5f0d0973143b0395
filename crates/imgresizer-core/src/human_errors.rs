// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a suggestion, so
// callers can surface failures without matching on error variants.

use crate::error::{ResizerError, WriteFailure};

/// Severity of an error from the caller's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Filesystem hiccup; trying again may work.
    Transient,
    /// The caller has to change an argument or a file.
    ActionRequired,
    /// Retrying with the same input will never work.
    Permanent,
}

/// A human-readable error with a plain English message and a suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    /// Whether retrying the same call could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `ResizerError` into a `HumanError`.
pub fn humanize_error(err: &ResizerError) -> HumanError {
    match err {
        ResizerError::InvalidQuality(value) => HumanError {
            message: "The image quality setting is out of range.".into(),
            suggestion: format!("Choose a quality between 0 and 100 (got {value})."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ResizerError::InvalidConfig(detail) => HumanError {
            message: "The configuration is not valid.".into(),
            suggestion: format!("Fix the configuration and try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ResizerError::Serialization(detail) => HumanError {
            message: "The configuration file could not be parsed.".into(),
            suggestion: format!("Check the file is valid JSON. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ResizerError::FileRead { path, source } => humanize_io(
            "The image file could not be read.",
            &path.display().to_string(),
            source,
        ),

        ResizerError::DecodeBackendUnavailable(kind) => HumanError {
            message: format!("{kind} support is not available."),
            suggestion: "Use a build with this image codec enabled, or convert the file to another format.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        ResizerError::UnsupportedFormat(detail) => HumanError {
            message: "This type of image isn't supported.".into(),
            suggestion: format!("Use a JPEG, PNG or GIF image. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        ResizerError::Decode { path, .. } => HumanError {
            message: "The image appears to be damaged.".into(),
            suggestion: format!("Re-save {} from the original source and try again.", path.display()),
            retriable: false,
            severity: Severity::Permanent,
        },

        ResizerError::NoImageLoaded => HumanError {
            message: "No image has been loaded yet.".into(),
            suggestion: "Load an image before resizing or exporting it.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ResizerError::InvalidScale(detail) => HumanError {
            message: "The resize factor can't be used.".into(),
            suggestion: format!("Use a positive factor that leaves at least one pixel. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ResizerError::UnsupportedOutputFormat(tag) => HumanError {
            message: "Images can't be saved in that format.".into(),
            suggestion: format!("Save as jpg, png or gif instead of {tag:?}."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ResizerError::InvalidFileName(name) => HumanError {
            message: "That file name can't be used.".into(),
            suggestion: format!("Give a plain file name without folders, such as \"thumb.jpg\" (got {name:?})."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ResizerError::Write { path, cause, .. } => match cause {
            WriteFailure::Encode(reason) => HumanError {
                message: "The image could not be encoded in that format.".into(),
                suggestion: format!("Try a different output format or resize the image first. ({reason})"),
                retriable: false,
                severity: Severity::Permanent,
            },
            WriteFailure::Io(source) => humanize_io(
                "The image could not be saved.",
                &path.display().to_string(),
                source,
            ),
        },
    }
}

fn humanize_io(message: &str, path: &str, source: &std::io::Error) -> HumanError {
    match source.kind() {
        std::io::ErrorKind::NotFound => HumanError {
            message: message.into(),
            suggestion: format!("Check that {path} exists."),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: message.into(),
            suggestion: format!("Check you are allowed to access {path}."),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        std::io::ErrorKind::StorageFull => HumanError {
            message: message.into(),
            suggestion: format!("Free up some disk space for {path}, then try again."),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        _ => HumanError {
            message: message.into(),
            suggestion: format!("Try again. ({source})"),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn bad_quality_is_action_required() {
        let human = humanize_error(&ResizerError::InvalidQuality(120));
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
        assert!(human.suggestion.contains("120"));
    }

    #[test]
    fn unsupported_format_is_permanent() {
        let human = humanize_error(&ResizerError::UnsupportedFormat("bmp".into()));
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn missing_file_is_action_required() {
        let err = ResizerError::FileRead {
            path: PathBuf::from("/nowhere/cat.png"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("/nowhere/cat.png"));
    }

    #[test]
    fn interrupted_read_is_transient() {
        let err = ResizerError::FileRead {
            path: PathBuf::from("cat.png"),
            source: std::io::Error::from(std::io::ErrorKind::Interrupted),
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }

    #[test]
    fn permission_denied_write_is_action_required() {
        let err = ResizerError::Write {
            path: PathBuf::from("/root/out.jpg"),
            format: "jpg",
            cause: WriteFailure::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied)),
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
    }

    #[test]
    fn full_disk_write_is_action_required() {
        let err = ResizerError::Write {
            path: PathBuf::from("/mnt/full/out.png"),
            format: "png",
            cause: WriteFailure::Io(std::io::Error::from(std::io::ErrorKind::StorageFull)),
        };
        assert_eq!(humanize_error(&err).severity, Severity::ActionRequired);
    }

    #[test]
    fn encoder_rejection_is_permanent() {
        let err = ResizerError::Write {
            path: PathBuf::from("wide.gif"),
            format: "gif",
            cause: WriteFailure::Encode(
                "The Image's dimensions are either too small or too large".into(),
            ),
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Permanent);
        assert!(!human.retriable);
    }

    #[test]
    fn interrupted_write_is_transient() {
        let err = ResizerError::Write {
            path: PathBuf::from("out.jpg"),
            format: "jpg",
            cause: WriteFailure::Io(std::io::Error::from(std::io::ErrorKind::Interrupted)),
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }

    #[test]
    fn invalid_file_name_is_action_required() {
        let human = humanize_error(&ResizerError::InvalidFileName("../x.png".into()));
        assert_eq!(human.severity, Severity::ActionRequired);
    }
}
