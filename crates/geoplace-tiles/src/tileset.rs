//! 3D Tiles tileset documents.
//!
//! Only the root tile's `transform` and `boundingVolume` are interpreted; the
//! rest of the document is carried through untouched so it can be written
//! back with the new root transform.

use std::path::Path;

use glam::DMat4;
use serde_json::Value;

use crate::bounds::{BoundingSphere, RootVolume, read_matrix};
use crate::error::{Error, Result};
use crate::scene::SceneObject;

/// A tileset whose root can be placed on the globe.
#[derive(Debug, Clone)]
pub struct Tileset {
    source: String,
    document: Value,
    root_transform: DMat4,
    root_volume: RootVolume,
}

impl Tileset {
    /// Parse a tileset document.
    ///
    /// `source` names where the document came from and is only used for
    /// logging. A missing `root.transform` is treated as the identity.
    pub fn from_json_str(source: impl Into<String>, json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json).map_err(|e| Error::Json {
            context: "tileset",
            message: e.to_string(),
        })?;

        let root = document.get("root").ok_or_else(|| Error::InvalidTileset {
            context: "root",
            detail: "missing root tile".to_string(),
        })?;

        let root_transform = match root.get("transform") {
            Some(value) => read_matrix(value, "root.transform")?,
            None => DMat4::IDENTITY,
        };

        let volume = root
            .get("boundingVolume")
            .ok_or_else(|| Error::InvalidTileset {
                context: "root.boundingVolume",
                detail: "missing bounding volume".to_string(),
            })?;
        let root_volume = RootVolume::from_tileset_volume(volume)?;

        let source = source.into();
        tracing::debug!(
            source = %source,
            radius = root_volume.sphere().radius,
            "parsed tileset"
        );

        Ok(Self {
            source,
            document,
            root_transform,
            root_volume,
        })
    }

    /// Read a tileset document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(path.display().to_string(), &json)
    }

    /// Where the document was loaded from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The root bounding volume as written in the document.
    #[must_use]
    pub fn root_volume(&self) -> RootVolume {
        self.root_volume
    }

    /// Serialize the document with the current root transform.
    pub fn to_json_string(&self) -> Result<String> {
        let mut document = self.document.clone();
        let transform: Vec<Value> = self
            .root_transform
            .to_cols_array()
            .iter()
            .map(|&v| Value::from(v))
            .collect();

        let root = document
            .get_mut("root")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| Error::InvalidTileset {
                context: "root",
                detail: "root tile is not an object".to_string(),
            })?;
        root.insert("transform".to_string(), Value::Array(transform));

        serde_json::to_string_pretty(&document).map_err(|e| Error::Json {
            context: "tileset",
            message: e.to_string(),
        })
    }

    /// Write the document with the current root transform to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(|e| Error::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), "wrote tileset");
        Ok(())
    }
}

impl SceneObject for Tileset {
    fn root_transform(&self) -> DMat4 {
        self.root_transform
    }

    fn set_root_transform(&mut self, transform: DMat4) {
        self.root_transform = transform;
    }

    fn bounding_volume(&self) -> BoundingSphere {
        self.root_volume.world_bounds(&self.root_transform)
    }
}
