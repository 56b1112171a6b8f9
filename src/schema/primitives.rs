//! Leaf geometry values wrapped by the annotation messages.
//!
//! These types are permissive: a `BoundingBox3D` with `truncation = 1.5`
//! is representable and encodable so that validation can report it
//! instead of the codec refusing it. Only wire-level ranges (sign and
//! width of integer fields) are enforced, by the checked constructors.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Pose;
use crate::error::SchemaError;

/// Narrows a wide integer into an unsigned 32-bit wire field.
///
/// # Errors
/// Returns [`SchemaError::Range`] for negative values or values above
/// `u32::MAX`.
pub fn checked_u32(field: &'static str, value: i64) -> Result<u32, SchemaError> {
    u32::try_from(value).map_err(|_| SchemaError::Range { field, value })
}

/// Narrows a wide integer into a signed 32-bit wire field.
///
/// # Errors
/// Returns [`SchemaError::Range`] for values outside `i32`.
pub fn checked_i32(field: &'static str, value: i64) -> Result<i32, SchemaError> {
    i32::try_from(value).map_err(|_| SchemaError::Range { field, value })
}

/// Axis-aligned 2D box in pixel space: top-left corner plus extent.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct BoundingBox2D {
    /// Left edge. May be negative for boxes clipped at the image border.
    #[prost(int32, tag = "1")]
    pub x: i32,

    /// Top edge.
    #[prost(int32, tag = "2")]
    pub y: i32,

    /// Width in pixels.
    #[prost(uint32, tag = "3")]
    pub w: u32,

    /// Height in pixels.
    #[prost(uint32, tag = "4")]
    pub h: u32,
}

impl BoundingBox2D {
    /// Creates a box from its corner and extent.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a box from untyped integer inputs, checking each against
    /// the range of its wire field.
    ///
    /// # Errors
    /// Returns [`SchemaError::Range`] if `w` or `h` is negative, or any
    /// value does not fit its 32-bit field.
    pub fn try_new(x: i64, y: i64, w: i64, h: i64) -> Result<Self, SchemaError> {
        Ok(Self {
            x: checked_i32("BoundingBox2D.x", x)?,
            y: checked_i32("BoundingBox2D.y", y)?,
            w: checked_u32("BoundingBox2D.w", w)?,
            h: checked_u32("BoundingBox2D.h", h)?,
        })
    }

    /// Pixel area covered by the box.
    pub fn area(&self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }
}

/// Occlusion level of a 3D box, stored on the wire as its code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Occlusion {
    FullyVisible = 0,
    PartlyOccluded = 1,
    LargelyOccluded = 2,
    Unknown = 3,
}

impl Occlusion {
    /// The code written into `BoundingBox3D::occlusion`.
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Occlusion {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Occlusion::FullyVisible),
            1 => Ok(Occlusion::PartlyOccluded),
            2 => Ok(Occlusion::LargelyOccluded),
            3 => Ok(Occlusion::Unknown),
            other => Err(other),
        }
    }
}

impl fmt::Display for Occlusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Occlusion::FullyVisible => "fully visible",
            Occlusion::PartlyOccluded => "partly occluded",
            Occlusion::LargelyOccluded => "largely occluded",
            Occlusion::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Oriented 3D box: a pose at the box center plus its extent.
#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct BoundingBox3D {
    /// Box center and orientation.
    #[prost(message, optional, tag = "1")]
    pub pose: Option<Pose>,

    #[prost(double, tag = "2")]
    pub width: f64,

    #[prost(double, tag = "3")]
    pub length: f64,

    #[prost(double, tag = "4")]
    pub height: f64,

    /// Occlusion code, see [`Occlusion`]. Values above 3 decode but fail
    /// validation.
    #[prost(uint32, tag = "5")]
    pub occlusion: u32,

    /// Fraction of the object outside the sensor's field of view, in
    /// `[0.0, 1.0]`.
    #[prost(double, tag = "6")]
    pub truncation: f64,
}

impl BoundingBox3D {
    /// Creates a fully visible, untruncated box.
    pub fn new(pose: Pose, width: f64, length: f64, height: f64) -> Self {
        Self {
            pose: Some(pose),
            width,
            length,
            height,
            occlusion: Occlusion::FullyVisible.code(),
            truncation: 0.0,
        }
    }

    /// Sets the occlusion level.
    pub fn with_occlusion(mut self, occlusion: Occlusion) -> Self {
        self.occlusion = occlusion.code();
        self
    }

    /// Sets the occlusion from an untyped code.
    ///
    /// # Errors
    /// Returns [`SchemaError::Range`] if `code` is negative or wider than
    /// the wire field. Codes above 3 are accepted here and left for
    /// validation to report.
    pub fn with_occlusion_code(mut self, code: i64) -> Result<Self, SchemaError> {
        self.occlusion = checked_u32("BoundingBox3D.occlusion", code)?;
        Ok(self)
    }

    /// Sets the truncation fraction.
    pub fn with_truncation(mut self, truncation: f64) -> Self {
        self.truncation = truncation;
        self
    }

    /// The occlusion as a typed level, if its code is in the domain.
    pub fn occlusion_level(&self) -> Option<Occlusion> {
        Occlusion::try_from(self.occlusion).ok()
    }

    /// Box volume.
    pub fn volume(&self) -> f64 {
        self.width * self.length * self.height
    }
}

/// A 2D key point in pixel space.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct KeyPoint2D {
    #[prost(int32, tag = "1")]
    pub x: i32,
    #[prost(int32, tag = "2")]
    pub y: i32,
}

impl KeyPoint2D {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A polygon vertex in pixel space.
///
/// Structurally the same as [`KeyPoint2D`], but negative coordinates carry
/// meaning here: polygons truncated at the image boundary keep their
/// off-image vertices.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct PolygonPoint2D {
    #[prost(int32, tag = "1")]
    pub x: i32,
    #[prost(int32, tag = "2")]
    pub y: i32,
}

impl PolygonPoint2D {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for KeyPoint2D {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for PolygonPoint2D {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
