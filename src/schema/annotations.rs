//! Annotation messages: a leaf value plus classification metadata.
//!
//! Field tags are the compatibility contract. They are permanent: a field
//! may be retired but its number is never handed to another field.

use serde::{Deserialize, Serialize};

use super::attributes::{deserialize_unique, insert_unique, Attributes};
use super::primitives::{BoundingBox2D, BoundingBox3D, KeyPoint2D, PolygonPoint2D};
use crate::error::SchemaError;

/// A labeled 2D box.
#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct BoundingBox2DAnnotation {
    /// Index into the dataset's class vocabulary.
    #[prost(uint32, tag = "1")]
    pub class_id: u32,

    #[prost(message, optional, tag = "2")]
    pub r#box: Option<BoundingBox2D>,

    /// Pixel count of the object, which may be smaller than the box.
    #[prost(uint32, tag = "3")]
    pub area: u32,

    /// COCO-style crowd region flag.
    #[prost(bool, tag = "4")]
    pub iscrowd: bool,

    #[prost(uint32, tag = "5")]
    pub instance_id: u32,

    #[prost(btree_map = "string, string", tag = "6")]
    #[serde(deserialize_with = "deserialize_unique")]
    pub attributes: Attributes,
}

impl BoundingBox2DAnnotation {
    /// Creates an annotation with the box area filled in from its extent.
    pub fn new(class_id: u32, bbox: BoundingBox2D) -> Self {
        Self {
            class_id,
            area: u32::try_from(bbox.area()).unwrap_or(u32::MAX),
            r#box: Some(bbox),
            ..Default::default()
        }
    }

    pub fn with_instance_id(mut self, instance_id: u32) -> Self {
        self.instance_id = instance_id;
        self
    }

    /// Overrides the pixel area (e.g. from a segmentation mask).
    pub fn with_area(mut self, area: u32) -> Self {
        self.area = area;
        self
    }

    pub fn with_iscrowd(mut self, iscrowd: bool) -> Self {
        self.iscrowd = iscrowd;
        self
    }

    /// Adds an attribute.
    ///
    /// # Errors
    /// Returns [`SchemaError::DuplicateKey`] if `key` is already set.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        insert_unique(&mut self.attributes, key.into(), value.into())?;
        Ok(self)
    }
}

/// A labeled 3D box.
#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct BoundingBox3DAnnotation {
    #[prost(uint32, tag = "1")]
    pub class_id: u32,

    #[prost(message, optional, tag = "2")]
    pub r#box: Option<BoundingBox3D>,

    /// Must be unique within a scene. Checked by validation per collection.
    #[prost(uint32, tag = "3")]
    pub instance_id: u32,

    #[prost(btree_map = "string, string", tag = "4")]
    #[serde(deserialize_with = "deserialize_unique")]
    pub attributes: Attributes,

    /// Number of LIDAR points inside the box.
    #[prost(uint32, tag = "5")]
    pub num_points: u32,
}

impl BoundingBox3DAnnotation {
    pub fn new(class_id: u32, instance_id: u32, bbox: BoundingBox3D) -> Self {
        Self {
            class_id,
            r#box: Some(bbox),
            instance_id,
            ..Default::default()
        }
    }

    pub fn with_num_points(mut self, num_points: u32) -> Self {
        self.num_points = num_points;
        self
    }

    /// Adds an attribute.
    ///
    /// # Errors
    /// Returns [`SchemaError::DuplicateKey`] if `key` is already set.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        insert_unique(&mut self.attributes, key.into(), value.into())?;
        Ok(self)
    }
}

/// A labeled 2D key point.
#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct KeyPoint2DAnnotation {
    #[prost(uint32, tag = "1")]
    pub class_id: u32,

    #[prost(message, optional, tag = "2")]
    pub point: Option<KeyPoint2D>,

    #[prost(btree_map = "string, string", tag = "3")]
    #[serde(deserialize_with = "deserialize_unique")]
    pub attributes: Attributes,

    /// Identifier used to link this point with other annotations of the
    /// same scene.
    #[prost(string, tag = "4")]
    pub key: String,

    #[prost(uint32, tag = "5")]
    pub instance_id: u32,
}

impl KeyPoint2DAnnotation {
    pub fn new(class_id: u32, point: KeyPoint2D) -> Self {
        Self {
            class_id,
            point: Some(point),
            ..Default::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_instance_id(mut self, instance_id: u32) -> Self {
        self.instance_id = instance_id;
        self
    }

    /// Adds an attribute.
    ///
    /// # Errors
    /// Returns [`SchemaError::DuplicateKey`] if `key` is already set.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        insert_unique(&mut self.attributes, key.into(), value.into())?;
        Ok(self)
    }
}

/// A labeled polyline. Vertex order is the line's order.
#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct KeyLine2DAnnotation {
    #[prost(uint32, tag = "1")]
    pub class_id: u32,

    #[prost(message, repeated, tag = "2")]
    pub vertices: Vec<KeyPoint2D>,

    #[prost(btree_map = "string, string", tag = "3")]
    #[serde(deserialize_with = "deserialize_unique")]
    pub attributes: Attributes,

    #[prost(string, tag = "4")]
    pub key: String,

    #[prost(uint32, tag = "5")]
    pub instance_id: u32,
}

impl KeyLine2DAnnotation {
    pub fn new<I, P>(class_id: u32, vertices: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<KeyPoint2D>,
    {
        Self {
            class_id,
            vertices: vertices.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_instance_id(mut self, instance_id: u32) -> Self {
        self.instance_id = instance_id;
        self
    }

    /// Adds an attribute.
    ///
    /// # Errors
    /// Returns [`SchemaError::DuplicateKey`] if `key` is already set.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        insert_unique(&mut self.attributes, key.into(), value.into())?;
        Ok(self)
    }
}

/// A labeled polygon.
///
/// Vertices run counter-clockwise and the ring closes implicitly: the
/// last vertex connects back to the first and is not repeated.
#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
#[serde(default)]
pub struct Polygon2DAnnotation {
    #[prost(uint32, tag = "1")]
    pub class_id: u32,

    #[prost(message, repeated, tag = "2")]
    pub vertices: Vec<PolygonPoint2D>,

    #[prost(btree_map = "string, string", tag = "3")]
    #[serde(deserialize_with = "deserialize_unique")]
    pub attributes: Attributes,

    #[prost(uint32, tag = "4")]
    pub instance_id: u32,
}

impl Polygon2DAnnotation {
    pub fn new<I, P>(class_id: u32, vertices: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PolygonPoint2D>,
    {
        Self {
            class_id,
            vertices: vertices.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_instance_id(mut self, instance_id: u32) -> Self {
        self.instance_id = instance_id;
        self
    }

    /// Adds an attribute.
    ///
    /// # Errors
    /// Returns [`SchemaError::DuplicateKey`] if `key` is already set.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        insert_unique(&mut self.attributes, key.into(), value.into())?;
        Ok(self)
    }

    /// Shoelace signed area; positive for counter-clockwise rings in a
    /// y-up frame.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: i64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y)
            })
            .sum();
        twice as f64 / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Pose;

    #[test]
    fn test_bbox2d_annotation_builder() {
        let annotation = BoundingBox2DAnnotation::new(3, BoundingBox2D::new(10, 20, 30, 40))
            .with_instance_id(9)
            .with_iscrowd(true)
            .with_attribute("truncated", "false")
            .unwrap();

        assert_eq!(annotation.area, 1200);
        assert_eq!(annotation.instance_id, 9);
        assert!(annotation.iscrowd);
        assert_eq!(
            annotation.attributes.get("truncated"),
            Some(&"false".to_string())
        );
    }

    #[test]
    fn test_with_attribute_rejects_duplicate() {
        let result = BoundingBox3DAnnotation::new(
            1,
            7,
            BoundingBox3D::new(Pose::from_translation(0.0, 0.0, 0.0), 1.0, 1.0, 1.0),
        )
        .with_attribute("state", "parked")
        .and_then(|a| a.with_attribute("state", "moving"));

        assert!(matches!(result, Err(SchemaError::DuplicateKey { .. })));
    }

    #[test]
    fn test_default_attributes_are_empty() {
        let annotation = KeyPoint2DAnnotation::default();
        assert!(annotation.attributes.is_empty());
        assert!(annotation.point.is_none());
    }

    #[test]
    fn test_keyline_vertex_order_kept() {
        let line = KeyLine2DAnnotation::new(0, [(0, 0), (5, 5), (1, 9)]).with_key("lane-1");
        assert_eq!(
            line.vertices,
            vec![
                KeyPoint2D::new(0, 0),
                KeyPoint2D::new(5, 5),
                KeyPoint2D::new(1, 9)
            ]
        );
        assert_eq!(line.key, "lane-1");
    }

    #[test]
    fn test_polygon_signed_area() {
        let ccw = Polygon2DAnnotation::new(0, [(0, 0), (4, 0), (4, 3)]);
        assert_eq!(ccw.signed_area(), 6.0);

        let cw = Polygon2DAnnotation::new(0, [(0, 0), (4, 3), (4, 0)]);
        assert_eq!(cw.signed_area(), -6.0);

        let degenerate = Polygon2DAnnotation::new(0, [(0, 0), (4, 3)]);
        assert_eq!(degenerate.signed_area(), 0.0);
    }
}
