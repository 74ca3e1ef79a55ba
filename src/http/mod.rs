//! HTTP surface
//!
//! - `POST /api/v1/commands` — run a command, answer with an envelope
//! - `OPTIONS /api/v1/commands` — cross-origin preflight
//! - `/assets/*` and index fallback when a static directory is configured

mod commands;
mod listen;

pub use listen::resolve_host;

use crate::command::CommandExecutor;
use crate::config::GatewayConfig;
use anyhow::{Context, Result};
use axum::http::Method;
use axum::routing::post;
use axum::Router;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Route that receives commands
pub const COMMANDS_PATH: &str = "/api/v1/commands";

/// Build the axum router (separated for testing).
pub fn router(executor: CommandExecutor, static_dir: Option<&Path>) -> Router {
    // Every origin with credentials: the origin is mirrored back since a
    // wildcard is not allowed together with credentials
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request());

    let mut app = Router::new()
        .route(
            COMMANDS_PATH,
            post(commands::handle_commands).options(commands::preflight),
        )
        .with_state(executor);

    if let Some(dir) = static_dir {
        app = app
            .nest_service("/assets", ServeDir::new(dir.join("assets")))
            .fallback_service(ServeFile::new(dir.join("index.html")));
    }

    app.layer(cors).layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: &GatewayConfig, executor: CommandExecutor) -> Result<()> {
    let app = router(executor, config.static_dir.as_deref());

    let host = resolve_host(config.host.as_deref()).await;
    let listener = TcpListener::bind((host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", host, config.port))?;

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::commands::status_code;
    use super::*;
    use crate::audio::testing::MemoryAudio;
    use crate::shell::testing::RecordingShell;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use bytes::Bytes;
    use gkb_shared::{ExecutionResult, Status};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> (Router, Arc<MemoryAudio>, Arc<RecordingShell>) {
        let audio = Arc::new(MemoryAudio::new(20));
        let shell = Arc::new(RecordingShell::with_stdout("hello\n"));
        let executor = CommandExecutor::new(audio.clone(), shell.clone());
        (router(executor, None), audio, shell)
    }

    fn post_body(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(COMMANDS_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn read_envelope(resp: axum::response::Response) -> ExecutionResult {
        let body = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).expect("response is not an envelope")
    }

    #[tokio::test]
    async fn test_shell_command_created() {
        let (app, _, shell) = test_router();

        let resp = app.oneshot(post_body(r#"{"cmd":"echo hello"}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");

        let envelope = read_envelope(resp).await;
        assert_eq!(envelope.status, Status::Ok);
        assert_eq!(envelope.output, "hello\n");
        assert_eq!(shell.lines(), vec!["echo hello".to_string()]);
    }

    #[tokio::test]
    async fn test_volume_command_created() {
        let (app, audio, _) = test_router();

        let resp = app.oneshot(post_body(r#"{"cmd":"volume 42"}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(read_envelope(resp).await.status, Status::Ok);
        assert_eq!(audio.level(), 42);
    }

    #[tokio::test]
    async fn test_invalid_volume_is_server_error_envelope() {
        let (app, audio, _) = test_router();

        let resp = app.oneshot(post_body(r#"{"cmd":"volume abc"}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let envelope = read_envelope(resp).await;
        assert_eq!(envelope.status, Status::Ko);
        assert!(envelope.message.contains("invalid volume value"));
        assert_eq!(audio.level(), 20);
    }

    #[tokio::test]
    async fn test_missing_cmd_is_bad_request_envelope() {
        let (app, _, shell) = test_router();

        let resp = app
            .clone()
            .oneshot(post_body(r#"{"command":"ls"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let envelope = read_envelope(resp).await;
        assert_eq!(envelope.status, Status::Ko);
        assert!(!envelope.message.is_empty());
        assert!(shell.lines().is_empty());

        // The service keeps answering
        let resp = app.oneshot(post_body(r#"{"cmd":"echo hello"}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_empty_body_is_bad_request() {
        let (app, _, _) = test_router();

        let resp = app.oneshot(post_body(Body::empty())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let envelope = read_envelope(resp).await;
        assert_eq!(envelope.status, Status::Ko);
        assert_eq!(envelope.message, gkb_shared::messages::MISSING_BODY);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (app, _, _) = test_router();

        let resp = app.oneshot(post_body("{not json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_envelope(resp).await.status, Status::Ko);
    }

    #[tokio::test]
    async fn test_oversized_body_is_bad_request_envelope() {
        let (app, _, shell) = test_router();

        // Past axum's default 2 MiB extractor limit as well as ours
        let body = format!(r#"{{"cmd":"{}"}}"#, "a".repeat(3 * 1024 * 1024));
        let resp = app.oneshot(post_body(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");

        let envelope = read_envelope(resp).await;
        assert_eq!(envelope.status, Status::Ko);
        assert!(envelope.message.contains("too large"), "{}", envelope.message);
        assert!(shell.lines().is_empty());
    }

    #[tokio::test]
    async fn test_body_stream_error_is_bad_request_envelope() {
        let (app, _, shell) = test_router();

        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(br#"{"cmd":"#)),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ];
        let body = Body::from_stream(futures::stream::iter(chunks));
        let resp = app.oneshot(post_body(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let envelope = read_envelope(resp).await;
        assert_eq!(envelope.status, Status::Ko);
        assert!(envelope.message.contains("failed to read request body"));
        assert!(shell.lines().is_empty());
    }

    #[tokio::test]
    async fn test_get_is_not_allowed() {
        let (app, _, _) = test_router();

        let req = Request::builder()
            .uri(COMMANDS_PATH)
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_cors_preflight_mirrors_origin_with_credentials() {
        let (app, _, shell) = test_router();

        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri(COMMANDS_PATH)
            .header(header::ORIGIN, "http://phone.lan:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.status().is_success());

        let headers = resp.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://phone.lan:3000"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert!(shell.lines().is_empty());
    }

    #[tokio::test]
    async fn test_bare_options() {
        let (app, _, _) = test_router();

        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri(COMMANDS_PATH)
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_unknown_path_without_static_dir() {
        let (app, _, _) = test_router();

        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_assets_and_index_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>gkb</html>").unwrap();
        std::fs::write(dir.path().join("assets/app.js"), "sendCommand()").unwrap();

        let executor = CommandExecutor::new(
            Arc::new(MemoryAudio::new(0)),
            Arc::new(RecordingShell::default()),
        );
        let app = router(executor, Some(dir.path()));

        let req = Request::builder()
            .uri("/assets/app.js")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"sendCommand()");

        let req = Request::builder()
            .uri("/some/page")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"<html>gkb</html>");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_live_shell_round_trip() {
        let executor = CommandExecutor::new(
            Arc::new(MemoryAudio::new(0)),
            Arc::new(crate::shell::SystemShell::new("sh")),
        );
        let app = router(executor, None);

        let resp = app
            .clone()
            .oneshot(post_body(r#"{"cmd":"echo hello"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert!(read_envelope(resp).await.output.contains("hello"));

        let resp = app
            .oneshot(post_body(r#"{"cmd":"nonexistent-binary-xyz"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let envelope = read_envelope(resp).await;
        assert_eq!(envelope.status, Status::Ko);
        assert!(envelope.output.is_empty());
        assert!(envelope.message.contains("nonexistent-binary-xyz"));
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(status_code(Status::Ok), StatusCode::CREATED);
        assert_eq!(status_code(Status::Ko), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
