//! The packaged asset bundle: an immutable path → payload map.
//!
//! The bundle is assembled once at packaging time through
//! [`AssetBundleBuilder`] and never mutated afterwards; there is no
//! insertion or removal API on [`AssetBundle`] itself. Each entry carries
//! its MIME type and a SHA-256 content hash used as the HTTP ETag.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::mime::mime_for_path;

/// One packaged asset: payload plus the response metadata derived from it.
#[derive(Debug, Clone)]
pub struct AssetEntry {
    mime: &'static str,
    etag: String,
    body: Vec<u8>,
}

impl AssetEntry {
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// Quoted entity tag, e.g. `"ab12..."`, ready for an ETag header.
    pub fn etag(&self) -> &str {
        &self.etag
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Immutable, content-hashed mapping from request path to payload.
#[derive(Debug, Default)]
pub struct AssetBundle {
    entries: HashMap<String, AssetEntry>,
}

impl AssetBundle {
    pub fn builder() -> AssetBundleBuilder {
        AssetBundleBuilder::default()
    }

    /// Look up an asset by its normalized request path.
    pub fn get(&self, path: &str) -> Option<&AssetEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all bundled paths (arbitrary order).
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Builds an [`AssetBundle`]. Consumed by [`AssetBundleBuilder::build`],
/// after which no further assets can be added.
#[derive(Debug, Default)]
pub struct AssetBundleBuilder {
    entries: HashMap<String, AssetEntry>,
}

impl AssetBundleBuilder {
    /// Add an asset under `path`. A leading `/` is added if missing; a
    /// duplicate path replaces the previous payload.
    pub fn asset(mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        let path = normalize_bundle_path(path.into());
        let body = body.into();
        let entry = AssetEntry {
            mime: mime_for_path(&path),
            etag: content_etag(&body),
            body,
        };
        if self.entries.insert(path.clone(), entry).is_some() {
            tracing::warn!(path = %path, "bundle asset replaced by a later registration");
        }
        self
    }

    pub fn build(self) -> AssetBundle {
        AssetBundle {
            entries: self.entries,
        }
    }
}

fn normalize_bundle_path(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

/// Quoted SHA-256 hex digest of the payload.
fn content_etag(body: &[u8]) -> String {
    use std::fmt::Write;

    let digest = Sha256::digest(body);
    let mut hex = String::with_capacity(2 + digest.len() * 2);
    hex.push('"');
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex.push('"');
    hex
}
