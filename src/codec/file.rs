//! Reading and writing single messages to files.
//!
//! The encoding follows the file extension: `.json` files hold the JSON
//! form, anything else the binary wire form. Where a file sits in a
//! dataset tree is up to the caller.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{decode, encode, WireMessage};
use crate::error::SchemaError;

/// On-disk encoding of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Binary,
    Json,
}

impl Encoding {
    /// Picks the encoding from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Encoding::Json,
            _ => Encoding::Binary,
        }
    }
}

/// Reads a message from `path`.
///
/// # Errors
/// Returns an error if the file cannot be read or does not decode.
pub fn read_message<M>(path: &Path) -> Result<M, SchemaError>
where
    M: WireMessage + DeserializeOwned,
{
    let encoding = Encoding::from_path(path);
    debug!("reading {} from {} as {:?}", M::TYPE_NAME, path.display(), encoding);

    match encoding {
        Encoding::Json => {
            let file = File::open(path).map_err(|source| SchemaError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
            let message: M = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                SchemaError::JsonParse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            message.check_decoded()?;
            Ok(message)
        }
        Encoding::Binary => {
            let bytes = fs::read(path).map_err(|source| SchemaError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
            decode(&bytes)
        }
    }
}

/// Writes a message to `path`, replacing any existing file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_message<M>(path: &Path, message: &M) -> Result<(), SchemaError>
where
    M: WireMessage + Serialize,
{
    let encoding = Encoding::from_path(path);
    debug!("writing {} to {} as {:?}", M::TYPE_NAME, path.display(), encoding);

    match encoding {
        Encoding::Json => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, message).map_err(|source| {
                SchemaError::JsonWrite {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            Ok(())
        }
        Encoding::Binary => {
            fs::write(path, encode(message))?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{KeyLine2DAnnotation, KeyLine2DAnnotations};
    use std::path::PathBuf;

    fn sample() -> KeyLine2DAnnotations {
        KeyLine2DAnnotations::new(vec![
            KeyLine2DAnnotation::new(1, [(0, 0), (10, 4)]).with_key("lane-left"),
            KeyLine2DAnnotation::new(1, [(30, 0), (25, 40), (20, 80)]).with_key("lane-right"),
        ])
    }

    #[test]
    fn test_encoding_from_path() {
        assert_eq!(Encoding::from_path(Path::new("a/b.json")), Encoding::Json);
        assert_eq!(Encoding::from_path(Path::new("a/b.JSON")), Encoding::Json);
        assert_eq!(Encoding::from_path(Path::new("a/b.pb")), Encoding::Binary);
        assert_eq!(Encoding::from_path(Path::new("a/b")), Encoding::Binary);
    }

    #[test]
    fn test_file_roundtrip_both_encodings() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["lines.json", "lines.pb"] {
            let path = dir.path().join(name);
            write_message(&path, &sample()).unwrap();
            let restored: KeyLine2DAnnotations = read_message(&path).unwrap();
            assert_eq!(restored, sample());
        }
    }

    #[test]
    fn test_missing_file() {
        let path = PathBuf::from("definitely/not/here.pb");
        let err = read_message::<KeyLine2DAnnotations>(&path).unwrap_err();
        assert!(matches!(err, SchemaError::FileRead { .. }));
    }
}
