// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Errors from loading files at the edges of the editor.
//!
//! Editing itself never fails: a gesture that cannot proceed is aborted and
//! logged instead. Only reading configs, images, and replay scripts can
//! produce an `Error`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid replay script: {0}")]
    Script(#[from] serde_json::Error),

    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),

    #[error("image {} has zero size", path.display())]
    EmptyImage { path: PathBuf },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Read a file to a string, tagging I/O failures with the path
pub(crate) fn read_to_string(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
