use std::{collections::HashMap, sync::Arc};

use crate::{assets::decode, model::normalize_name};

/// Prepared raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Immutable registry of participant avatars keyed by lowercased name.
///
/// Decoding is front-loaded here so rendering stays deterministic and
/// IO-free; the store is a read-only snapshot safe to share across
/// concurrent renders. Entries whose bytes do not decode are skipped with a
/// warning — a missing avatar falls back to the placeholder tile at compose
/// time rather than failing the render.
#[derive(Clone, Debug, Default)]
pub struct AvatarStore {
    by_name: HashMap<String, Arc<PreparedImage>>,
}

impl AvatarStore {
    /// Empty registry; every participant gets a placeholder tile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `(name, bytes)` pairs into a registry.
    pub fn prepare<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        let mut out = Self::default();
        for (name, bytes) in entries {
            match decode::decode_image(bytes) {
                Ok(img) => out.insert_decoded(name, img),
                Err(err) => {
                    tracing::warn!(name, %err, "skipping undecodable avatar");
                }
            }
        }
        out
    }

    /// Register an already-decoded avatar under `name`.
    pub fn insert_decoded(&mut self, name: &str, image: PreparedImage) {
        self.by_name.insert(normalize_name(name), Arc::new(image));
    }

    /// Case-insensitive, trimmed lookup.
    pub fn get(&self, name: &str) -> Option<&Arc<PreparedImage>> {
        self.by_name.get(&normalize_name(name))
    }

    /// Number of registered avatars.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the registry holds no avatars.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
