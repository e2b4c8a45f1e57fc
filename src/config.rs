// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration loaded from TOML.
//!
//! Every field is optional in the file; missing fields fall back to the
//! defaults in `settings.rs`. A missing file is not an error.
//!
//! ```toml
//! snap_tolerance = 8.0
//! hole_target = "first-found"
//! ```

use crate::error::{self, Result};
use crate::settings;
use serde::Deserialize;
use std::path::Path;

/// Rule for choosing the hole target when several shapes qualify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoleTargetRule {
    /// Smallest outer ring area, ties to the earliest inserted
    #[default]
    SmallestArea,
    /// Earliest inserted shape
    FirstFound,
}

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Close a polygon by clicking this close to its first vertex
    pub snap_tolerance: f64,
    /// Pointer travel before a press becomes a drag
    pub drag_threshold: f64,
    /// Grab radius for vertices and edges in modify mode
    pub vertex_tolerance: f64,
    /// Vertices needed before a drawing may finish
    pub min_ring_vertices: usize,
    /// Which shape receives a hole when several extents match
    pub hole_target: HoleTargetRule,
    /// Default tracing directive
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snap_tolerance: settings::draw::SNAP_TOLERANCE,
            drag_threshold: settings::pointer::DRAG_THRESHOLD,
            vertex_tolerance: settings::modify::VERTEX_TOLERANCE,
            min_ring_vertices: settings::draw::MIN_RING_VERTICES,
            hole_target: HoleTargetRule::default(),
            log_filter: settings::app::LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Parse a config from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        Ok(config.sanitized())
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = error::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, else the default file when it exists, else
    /// the built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = Path::new(settings::app::CONFIG_FILE_NAME);
        if default_path.is_file() {
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// A ring needs three vertices no matter what the file says
    fn sanitized(mut self) -> Self {
        if self.min_ring_vertices < 3 {
            tracing::warn!(
                "min_ring_vertices = {} is below 3, using 3",
                self.min_ring_vertices
            );
            self.min_ring_vertices = 3;
        }
        self.snap_tolerance = self.snap_tolerance.max(0.0);
        self.drag_threshold = self.drag_threshold.max(0.0);
        self.vertex_tolerance = self.vertex_tolerance.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.hole_target, HoleTargetRule::SmallestArea);
    }

    #[test]
    fn partial_override() {
        let config = Config::from_toml(
            "snap_tolerance = 4.5\nhole_target = \"first-found\"\n",
        )
        .unwrap();
        assert_eq!(config.snap_tolerance, 4.5);
        assert_eq!(config.hole_target, HoleTargetRule::FirstFound);
        assert_eq!(config.vertex_tolerance, settings::modify::VERTEX_TOLERANCE);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml("snap = 1.0").is_err());
    }

    #[test]
    fn min_ring_vertices_is_clamped() {
        let config = Config::from_toml("min_ring_vertices = 1").unwrap();
        assert_eq!(config.min_ring_vertices, 3);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "vertex_tolerance = 2.0").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.vertex_tolerance, 2.0);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io { .. }));
    }
}
