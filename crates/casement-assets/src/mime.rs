//! MIME type guessing for bundled assets.

/// Guess the MIME type of an asset from its path extension.
pub fn mime_for_path(path: &str) -> &'static str {
    let ext = path.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
    match ext {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "wasm" => "application/wasm",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "webp" => "image/webp",
        "txt" => "text/plain",
        "xml" => "application/xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_html() {
        assert_eq!(mime_for_path("/index.html"), "text/html");
        assert_eq!(mime_for_path("/legacy.htm"), "text/html");
    }

    #[test]
    fn mime_type_css_and_js() {
        assert_eq!(mime_for_path("/style.css"), "text/css");
        assert_eq!(mime_for_path("/app.js"), "application/javascript");
        assert_eq!(mime_for_path("/module.mjs"), "application/javascript");
    }

    #[test]
    fn mime_type_unknown_is_octet_stream() {
        assert_eq!(mime_for_path("/data.xyz"), "application/octet-stream");
        assert_eq!(mime_for_path("/no-extension"), "application/octet-stream");
    }

    #[test]
    fn extension_is_taken_from_last_dot() {
        assert_eq!(mime_for_path("/bundle.min.js"), "application/javascript");
    }
}
