//! Minimal rendition of the external geometry messages.
//!
//! `BoundingBox3D` embeds a 6-DoF pose owned by a separate geometry
//! schema. Only the wire shape is reproduced here so the box can be
//! encoded and decoded; no transform math lives in this crate.

use serde::{Deserialize, Serialize};

/// A 3-vector of doubles.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct Vector3 {
    #[prost(double, tag = "1")]
    pub x: f64,
    #[prost(double, tag = "2")]
    pub y: f64,
    #[prost(double, tag = "3")]
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A rotation quaternion in (qx, qy, qz, qw) order.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct Quaternion {
    #[prost(double, tag = "1")]
    pub qx: f64,
    #[prost(double, tag = "2")]
    pub qy: f64,
    #[prost(double, tag = "3")]
    pub qz: f64,
    #[prost(double, tag = "4")]
    pub qw: f64,
}

impl Quaternion {
    pub fn new(qx: f64, qy: f64, qz: f64, qw: f64) -> Self {
        Self { qx, qy, qz, qw }
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Euclidean norm of the four components.
    pub fn norm(&self) -> f64 {
        (self.qx * self.qx + self.qy * self.qy + self.qz * self.qz + self.qw * self.qw).sqrt()
    }
}

/// A 6-DoF pose: translation plus rotation.
#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct Pose {
    #[prost(message, optional, tag = "1")]
    pub translation: Option<Vector3>,

    #[prost(message, optional, tag = "2")]
    pub rotation: Option<Quaternion>,

    /// Name of the frame the pose is expressed in.
    #[prost(string, tag = "3")]
    pub reference_coordinate_system: String,
}

impl Pose {
    /// Creates a pose from a translation and rotation.
    pub fn new(translation: Vector3, rotation: Quaternion) -> Self {
        Self {
            translation: Some(translation),
            rotation: Some(rotation),
            reference_coordinate_system: String::new(),
        }
    }

    /// A pose at `translation` with identity rotation.
    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self::new(Vector3::new(x, y, z), Quaternion::identity())
    }

    /// Sets the reference coordinate system name.
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        self.reference_coordinate_system = frame.into();
        self
    }
}
