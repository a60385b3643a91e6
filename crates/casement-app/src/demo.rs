//! The demo application: embedded frontend bundle, bound backend
//! objects, the quit menu command, and lifecycle handlers.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use http::{Request, Response, StatusCode};
use serde_json::json;

use casement_assets::AssetBundle;
use casement_bridge::{ArgShape, BoundObject, ParamSpec};
use casement_config::ShellConfig;
use casement_shell::{CloseDecision, Shell};

const INDEX_HTML: &[u8] = include_bytes!("../ui/index.html");
const APP_JS: &[u8] = include_bytes!("../ui/app.js");

/// Assemble the demo shell: bundle, API route, bound objects, menu,
/// lifecycle handlers.
pub fn build_demo_shell(config: ShellConfig) -> Shell {
    let bundle = AssetBundle::builder()
        .asset("/index.html", INDEX_HTML.to_vec())
        .asset("/app.js", APP_JS.to_vec())
        .build();

    let builder = Shell::builder(config)
        .assets(bundle)
        .route("/api/version", |_| json_response(json!({ "version": env!("CARGO_PKG_VERSION") })))
        .route("/api/*", api_not_found)
        .bind(counter_object())
        .bind(greeter_object());

    let quit = builder.quit_handle();
    builder
        .menu_command("file.quit", "Quit", Some("CmdOrCtrl+Q"), move || {
            quit.request_quit()
        })
        .on_start(|_| tracing::info!("backend started"))
        .on_ready(|_| tracing::info!("frontend content ready"))
        .on_close_request(|_| {
            tracing::info!("close requested, proceeding");
            CloseDecision::Proceed
        })
        .on_shutdown(|ctx| {
            tracing::info!(cancelled = ctx.is_cancelled(), "backend shut down");
        })
        .build()
}

/// A stateful counter. The atomic serializes its own state; the bridge
/// provides no per-object locking.
fn counter_object() -> BoundObject {
    let count = Arc::new(AtomicI64::new(0));
    BoundObject::builder("counter")
        .method(
            "increment",
            vec![ParamSpec::new("by", ArgShape::Int)],
            move |args| {
                let by = args[0]
                    .as_i64()
                    .ok_or_else(|| "'by' out of range".to_string())?;
                Ok(json!(count.fetch_add(by, Ordering::SeqCst) + by))
            },
        )
        .build()
}

fn greeter_object() -> BoundObject {
    BoundObject::builder("greeter")
        .method(
            "greet",
            vec![ParamSpec::new("name", ArgShape::Str)],
            |args| {
                let name = args[0].as_str().unwrap_or_default();
                Ok(json!(format!("Hello, {name}!")))
            },
        )
        .build()
}

fn json_response(value: serde_json::Value) -> Response<Vec<u8>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(value.to_string().into_bytes())
        .unwrap()
}

fn api_not_found(_request: &Request<Vec<u8>>) -> Response<Vec<u8>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(br#"{"error":"no such endpoint"}"#.to_vec())
        .unwrap()
}
