//! Binary and JSON codecs for the annotation schema.
//!
//! The binary form is the protobuf (proto3) wire encoding of the
//! [`schema`](crate::schema) types. Encoding is deterministic: map entries
//! are emitted in key order and default-valued fields are omitted.
//!
//! Decoding is purely structural. It fails on truncated or mistyped
//! fields, invalid UTF-8, enum values outside the closed set and map keys
//! repeated on the wire, but never on values outside their documented
//! domain: a `truncation` of 1.5 decodes fine and is left for
//! [`validation`](crate::validation) to report. Unknown fields are
//! skipped, so readers built against an older schema accept messages from
//! newer producers and vice versa.
//!
//! Round-trips are lossless with one proto3 exception: a `double` field
//! holding `-0.0` compares equal to the default and is omitted, so it
//! decodes as `+0.0`. Every other value, NaN and infinities included,
//! comes back bit for bit.
//!
//! # Example
//!
//! ```
//! use annoschema::codec::{decode, encode};
//! use annoschema::schema::{Polygon2DAnnotation, PolygonPoint2D};
//!
//! let polygon = Polygon2DAnnotation::new(4, [(-5, 10), (20, 10), (20, 40)]);
//! let bytes = encode(&polygon);
//! let restored: Polygon2DAnnotation = decode(&bytes).unwrap();
//!
//! assert_eq!(restored.vertices[0], PolygonPoint2D::new(-5, 10));
//! ```

mod any;
pub mod file;
pub mod json;
mod wire_checks;

pub use any::AnyCollection;

use prost::Message;

use crate::error::SchemaError;
use crate::schema::{
    AnnotationIndex, AnnotationType, BoundingBox2D, BoundingBox2DAnnotation,
    BoundingBox2DAnnotations, BoundingBox3D, BoundingBox3DAnnotation, BoundingBox3DAnnotations,
    KeyLine2DAnnotation, KeyLine2DAnnotations, KeyPoint2D, KeyPoint2DAnnotation,
    KeyPoint2DAnnotations, Polygon2DAnnotation, Polygon2DAnnotations, PolygonPoint2D, Pose,
    Quaternion, Vector3,
};
use wire_checks::{
    unique_map_keys, AttributesAt3, AttributesAt4, AttributesAt6, IndexEntries,
    ListOfAttributesAt3, ListOfAttributesAt4, ListOfAttributesAt6,
};

/// A schema message with a stable wire form.
///
/// The two hooks cover what prost leaves unchecked; both default to
/// accepting everything.
pub trait WireMessage: Message + Default + Sized {
    /// Message name used in error reports.
    const TYPE_NAME: &'static str;

    /// Checks over the raw bytes, run after a successful prost decode.
    fn check_wire(_bytes: &[u8]) -> Result<(), SchemaError> {
        Ok(())
    }

    /// Checks over the decoded value (enum fields carried as `i32`).
    fn check_decoded(&self) -> Result<(), SchemaError> {
        Ok(())
    }
}

/// Encodes a message to its wire bytes.
pub fn encode<M: WireMessage>(message: &M) -> Vec<u8> {
    message.encode_to_vec()
}

/// Decodes a message from its wire bytes.
///
/// # Errors
/// Returns [`SchemaError::MalformedInput`] for structurally invalid input
/// and [`SchemaError::DuplicateKey`] if a map field repeats a key.
pub fn decode<M: WireMessage>(bytes: &[u8]) -> Result<M, SchemaError> {
    let message =
        M::decode(bytes).map_err(|source| SchemaError::malformed(M::TYPE_NAME, source))?;
    M::check_wire(bytes)?;
    message.check_decoded()?;
    Ok(message)
}

/// Encodes a message prefixed with its varint length, for streams that
/// concatenate several messages.
pub fn encode_length_delimited<M: WireMessage>(message: &M) -> Vec<u8> {
    message.encode_length_delimited_to_vec()
}

/// Decodes one length-prefixed message from the front of `buf`, advancing
/// it past the consumed bytes.
///
/// # Errors
/// As [`decode`], plus a malformed error when the prefix overruns `buf`.
/// On error `buf` is left where it was.
pub fn decode_length_delimited<M: WireMessage>(buf: &mut &[u8]) -> Result<M, SchemaError> {
    // Work on a copy so `buf` only moves once a whole message decoded.
    let mut cursor = *buf;
    let len = prost::encoding::decode_varint(&mut cursor)
        .map_err(|source| SchemaError::malformed(M::TYPE_NAME, source))?;
    let len = usize::try_from(len).unwrap_or(usize::MAX);
    if len > cursor.len() {
        return Err(SchemaError::MalformedInput {
            message_type: M::TYPE_NAME,
            reason: format!(
                "length prefix {} exceeds remaining {} byte(s)",
                len,
                cursor.len()
            ),
        });
    }
    let (body, rest) = cursor.split_at(len);
    let message = decode(body)?;
    *buf = rest;
    Ok(message)
}

macro_rules! plain_wire_message {
    ($($message:ident),* $(,)?) => {
        $(
            impl WireMessage for $message {
                const TYPE_NAME: &'static str = stringify!($message);
            }
        )*
    };
}

plain_wire_message!(
    Vector3,
    Quaternion,
    Pose,
    BoundingBox2D,
    BoundingBox3D,
    KeyPoint2D,
    PolygonPoint2D,
);

macro_rules! attributed_wire_message {
    ($message:ident, $scan:ty) => {
        impl WireMessage for $message {
            const TYPE_NAME: &'static str = stringify!($message);

            fn check_wire(bytes: &[u8]) -> Result<(), SchemaError> {
                unique_map_keys::<$scan>(Self::TYPE_NAME, bytes)
            }
        }
    };
}

attributed_wire_message!(BoundingBox2DAnnotation, AttributesAt6);
attributed_wire_message!(BoundingBox3DAnnotation, AttributesAt4);
attributed_wire_message!(KeyPoint2DAnnotation, AttributesAt3);
attributed_wire_message!(KeyLine2DAnnotation, AttributesAt3);
attributed_wire_message!(Polygon2DAnnotation, AttributesAt3);
attributed_wire_message!(BoundingBox2DAnnotations, ListOfAttributesAt6);
attributed_wire_message!(BoundingBox3DAnnotations, ListOfAttributesAt4);
attributed_wire_message!(KeyPoint2DAnnotations, ListOfAttributesAt3);
attributed_wire_message!(KeyLine2DAnnotations, ListOfAttributesAt3);
attributed_wire_message!(Polygon2DAnnotations, ListOfAttributesAt3);

impl WireMessage for AnnotationIndex {
    const TYPE_NAME: &'static str = "AnnotationIndex";

    fn check_wire(bytes: &[u8]) -> Result<(), SchemaError> {
        unique_map_keys::<IndexEntries>(Self::TYPE_NAME, bytes)
    }

    fn check_decoded(&self) -> Result<(), SchemaError> {
        match self
            .annotations
            .keys()
            .find(|code| AnnotationType::try_from(**code).is_err())
        {
            Some(code) => Err(SchemaError::MalformedInput {
                message_type: Self::TYPE_NAME,
                reason: format!("invalid AnnotationType value {}", code),
            }),
            None => Ok(()),
        }
    }
}
