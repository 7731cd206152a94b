// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error type and stderr rendering.

use thiserror::Error;

/// A single configuration problem.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML/env layers could not be parsed or merged.
    #[error("{0}")]
    Parse(#[from] Box<figment::Error>),

    /// A semantic constraint was violated after deserialization.
    #[error("{message}")]
    Validation { message: String },
}

impl ConfigError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ConfigError::Validation {
            message: message.into(),
        }
    }
}

/// Print every collected configuration error to stderr, one per line.
pub fn render_errors(errors: &[ConfigError]) {
    eprintln!("driplet: invalid configuration:");
    for err in errors {
        eprintln!("  - {err}");
    }
    eprintln!("see driplet.toml.sample for a working starting point");
}
