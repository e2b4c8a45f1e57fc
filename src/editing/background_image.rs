// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! The static raster image shapes are drawn over.
//!
//! The image defines the pixel coordinate space: its extent is
//! `[0, 0, width, height]` and every shape coordinate is a plain pixel
//! position in that frame. There is no projection and the image never moves.
//! Pixel data is decoded once so a renderer can upload it as a texture.

use crate::error::{Error, Result};
use kurbo::{Point, Rect};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A decoded background image and the coordinate space it defines
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    /// Decoded RGBA8 pixel data, empty for size-only images
    pub pixels: Arc<Vec<u8>>,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Where the image came from, if it was loaded from disk
    pub source_path: Option<PathBuf>,
}

impl BackgroundImage {
    /// Load and decode an image file.
    ///
    /// Returns an error if the file cannot be read or decoded, or if it has
    /// no pixels at all (an empty extent could not host any shape).
    pub fn load(path: &Path) -> Result<Self> {
        let rgba = image::open(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage {
                path: path.to_path_buf(),
            });
        }
        tracing::info!("Loaded background {} ({}x{})", path.display(), width, height);

        Ok(Self {
            pixels: Arc::new(rgba.into_raw()),
            width,
            height,
            source_path: Some(path.to_path_buf()),
        })
    }

    /// A blank background of the given size, for headless sessions
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: Arc::new(Vec::new()),
            width,
            height,
            source_path: None,
        }
    }

    /// The image extent in pixel space
    pub fn extent(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f64, self.height as f64)
    }

    /// Initial view center
    pub fn center(&self) -> Point {
        self.extent().center()
    }

    /// Whether a pixel-space point lies on the image
    pub fn contains(&self, point: Point) -> bool {
        let extent = self.extent();
        point.x >= extent.x0 && point.x <= extent.x1 && point.y >= extent.y0 && point.y <= extent.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_png_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.png");
        image::RgbaImage::new(4, 3).save(&path).unwrap();

        let bg = BackgroundImage::load(&path).unwrap();
        assert_eq!((bg.width, bg.height), (4, 3));
        assert_eq!(bg.pixels.len(), 4 * 3 * 4);
        assert_eq!(bg.extent(), Rect::new(0.0, 0.0, 4.0, 3.0));
        assert_eq!(bg.source_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(BackgroundImage::load(&dir.path().join("missing.png")).is_err());
    }

    #[test]
    fn extent_and_center() {
        let bg = BackgroundImage::with_size(200, 100);
        assert_eq!(bg.center(), Point::new(100.0, 50.0));
        assert!(bg.contains(Point::new(200.0, 100.0)));
        assert!(!bg.contains(Point::new(-1.0, 5.0)));
    }
}
