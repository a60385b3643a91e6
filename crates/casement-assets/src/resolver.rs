//! The resolver that serves every content request from the renderer.
//!
//! Resolution order is fixed: exact bundle lookup first, then the
//! fallback chain in registration order, then a terminal 404. A path the
//! bundle satisfies is never offered to a fallback handler, and a
//! malformed path is an ordinary 404 rather than an error: content
//! serving favors availability over strict validation.

use http::header::{CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use http::{Request, Response, StatusCode};

use crate::bundle::AssetBundle;
use crate::fallback::FallbackRoute;

/// Serves renderer content requests from the bundle and fallback chain.
///
/// Holds no mutable runtime state; `resolve` is a pure function of the
/// bundle, the chain, and the request, and is safe to call concurrently
/// without synchronization.
pub struct AssetResolver {
    bundle: AssetBundle,
    fallback: FallbackRoute,
}

impl AssetResolver {
    pub fn new(bundle: AssetBundle, fallback: FallbackRoute) -> Self {
        Self { bundle, fallback }
    }

    pub fn bundle(&self) -> &AssetBundle {
        &self.bundle
    }

    /// Resolve one content request to a response.
    pub fn resolve(&self, request: &Request<Vec<u8>>) -> Response<Vec<u8>> {
        let raw = request.uri().path();
        let path = match sanitize_path(raw) {
            Some(path) => path,
            None => {
                tracing::debug!(path = %raw, "rejected malformed asset path");
                return not_found();
            }
        };

        if let Some(entry) = self.bundle.get(&path) {
            // Conditional request: the renderer already holds this payload.
            let cached = request
                .headers()
                .get(IF_NONE_MATCH)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value == entry.etag());
            if cached {
                return Response::builder()
                    .status(StatusCode::NOT_MODIFIED)
                    .header(ETAG, entry.etag())
                    .body(Vec::new())
                    .unwrap();
            }

            tracing::debug!(path = %path, mime = entry.mime(), "served bundled asset");
            return Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, entry.mime())
                .header(ETAG, entry.etag())
                .body(entry.body().to_vec())
                .unwrap();
        }

        if let Some(handler) = self.fallback.find(&path) {
            tracing::debug!(path = %path, "bundle miss, delegated to fallback handler");
            return handler(request);
        }

        tracing::debug!(path = %path, "asset not found");
        not_found()
    }
}

/// Normalize a request path, or reject it as malformed.
///
/// `/` maps to `/index.html` (the bundle root document). Empty, NUL-
/// carrying, and `.`/`..`-segment paths resolve to `None`.
fn sanitize_path(raw: &str) -> Option<String> {
    if raw.is_empty() || raw.contains('\0') {
        return None;
    }
    if raw == "/" {
        return Some("/index.html".to_string());
    }
    if !raw.starts_with('/') {
        return None;
    }
    if raw.split('/').any(|segment| segment == "." || segment == "..") {
        return None;
    }
    Some(raw.to_string())
}

fn not_found() -> Response<Vec<u8>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Vec::new())
        .unwrap()
}
