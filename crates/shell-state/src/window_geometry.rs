use crate::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

use serde::{Deserialize, Serialize};

/// Persisted window size in logical pixels.
///
/// Both dimensions are positive integers; anything else read from
/// disk is rejected in favour of the default geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
}

/// On-disk shape before validation. Numbers are read as f64 so that
/// fractional, negative or oversized values can be told apart from
/// type errors and rejected explicitly.
#[derive(Debug, Deserialize)]
struct RawGeometry {
    width: f64,
    height: f64,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl WindowGeometry {
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let geometry = Self { width, height };
        geometry.is_valid().then_some(geometry)
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Build from a window's logical size, rounding to whole pixels.
    pub fn from_logical(width: f64, height: f64) -> Option<Self> {
        Self::new(dimension(width.round())?, dimension(height.round())?)
    }

    /// Parse a persisted record, returning `None` for anything malformed.
    pub fn from_json(contents: &str) -> Option<Self> {
        let raw: RawGeometry = serde_json::from_str(contents).ok()?;
        Self::new(dimension(raw.width)?, dimension(raw.height)?)
    }
}

fn dimension(value: f64) -> Option<u32> {
    if !value.is_finite() || value.fract() != 0.0 || value <= 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}
