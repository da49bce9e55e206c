//! Logical and physical coordinate spaces.
//!
//! The overlay is laid out in logical pixels (egui points), while capture
//! backends address display memory in physical pixels. The two spaces are
//! kept as distinct types so they cannot be mixed by accident; the only way
//! from one to the other is through a [`DeviceScale`].
//!
//! # Conversion
//!
//! `physical = round(logical * scale)`. For a rectangle the top-left corner
//! and the size are converted independently: the size comes from the scaled
//! absolute difference of the two corners, never from subtracting corners
//! that were already rounded.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical pixels per logical pixel for the active display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceScale(f64);

impl DeviceScale {
    /// Scale for displays where logical and physical pixels coincide.
    pub const IDENTITY: Self = Self(1.0);

    /// Creates a scale, rejecting zero, negative and non-finite factors.
    pub fn new(factor: f64) -> Result<Self> {
        if factor.is_finite() && factor > 0.0 {
            Ok(Self(factor))
        } else {
            Err(AppError::InvalidScale(factor))
        }
    }

    /// Returns the raw factor.
    pub fn factor(self) -> f64 {
        self.0
    }

    /// Converts a single logical length or coordinate to physical pixels.
    ///
    /// Negative inputs clamp to zero; the overlay origin is the display
    /// origin, so nothing left of or above it is addressable.
    pub fn to_physical(self, logical: f64) -> u32 {
        (logical * self.0).round().max(0.0) as u32
    }

    /// Converts a logical point to physical pixels.
    pub fn point_to_physical(self, point: LogicalPoint) -> PhysicalPoint {
        PhysicalPoint {
            x: self.to_physical(point.x),
            y: self.to_physical(point.y),
        }
    }
}

impl Default for DeviceScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for DeviceScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pointer sample in the overlay's logical coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LogicalPoint {
    pub x: f64,
    pub y: f64,
}

impl LogicalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in logical pixels, used for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LogicalRect {
    /// Top-left corner.
    pub min: LogicalPoint,
    pub width: f64,
    pub height: f64,
}

impl LogicalRect {
    /// Bounding rectangle of two corners given in any order.
    pub fn spanning(a: LogicalPoint, b: LogicalPoint) -> Self {
        Self {
            min: LogicalPoint::new(a.x.min(b.x), a.y.min(b.y)),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Bottom-right corner.
    pub fn max(&self) -> LogicalPoint {
        LogicalPoint::new(self.min.x + self.width, self.min.y + self.height)
    }

    /// Converts to physical pixels, scaling origin and size independently.
    pub fn to_physical(&self, scale: DeviceScale) -> PhysicalRect {
        let origin = scale.point_to_physical(self.min);
        PhysicalRect {
            x: origin.x,
            y: origin.y,
            width: scale.to_physical(self.width),
            height: scale.to_physical(self.height),
        }
    }
}

/// A point in physical pixels relative to the display origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhysicalPoint {
    pub x: u32,
    pub y: u32,
}

/// A rectangle in physical pixels that may still be degenerate.
///
/// This is what the live readout shows while dragging. Only a rectangle
/// that passes [`PhysicalRect::exceeds`] and converts into a [`Region`]
/// ever leaves the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhysicalRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PhysicalRect {
    /// True when both dimensions are strictly greater than `min_size`.
    pub fn exceeds(&self, min_size: u32) -> bool {
        self.width > min_size && self.height > min_size
    }
}

/// A committed, non-degenerate selection in physical pixels.
///
/// Serializes as `{"x", "y", "width", "height"}`, the shape the recording
/// subsystem consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Builds a region, rejecting zero width or height.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AppError::InvalidGeometry { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }
}

impl TryFrom<PhysicalRect> for Region {
    type Error = AppError;

    fn try_from(rect: PhysicalRect) -> Result<Self> {
        Region::new(rect.x, rect.y, rect.width, rect.height)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}
