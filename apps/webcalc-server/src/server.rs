//! HTTP host: router assembly, middleware stack and the serve loop.

use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, Request, Response, StatusCode};
use axum::routing::get;
use calculator::CalculatorModule;
use tokio_util::sync::CancellationToken;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::config::AppConfig;
use crate::signals;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates a UUID v4 request id when the client did not send one.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        id.parse().ok().map(RequestId::new)
    }
}

async fn healthz() -> &'static str {
    "ok"
}

/// Build the full application router with middleware applied.
#[must_use]
pub fn build_router(config: &AppConfig) -> Router {
    let calculator = CalculatorModule::new(config.calculator.clone());
    let router = Router::new().route("/healthz", get(healthz));
    let router = calculator.register_rest(router);
    apply_middleware_stack(router, config)
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(|res: &Response<Body>, latency: Duration, span: &tracing::Span| {
                span.record("status", res.status().as_u16());
                span.record("latency_ms", latency.as_millis());
            }),
    )
}

/// Layers are registered innermost first. At runtime a request flows
/// `SetRequestId` -> `PropagateRequestId` -> Trace -> Timeout -> `BodyLimit` -> Router.
fn apply_middleware_stack(mut router: Router, config: &AppConfig) -> Router {
    let server = &config.server;

    // 4) Body limit
    router = router.layer(RequestBodyLimitLayer::new(server.body_limit_bytes));
    router = router.layer(DefaultBodyLimit::max(server.body_limit_bytes));

    // 3) Timeout
    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        server.request_timeout,
    ));

    // 2) Trace
    router = apply_trace_layer(router);

    // 1) Request id: set on the way in, copied to the response on the way out
    let header = HeaderName::from_static(REQUEST_ID_HEADER);
    router = router.layer(PropagateRequestIdLayer::new(header.clone()));
    router.layer(SetRequestIdLayer::new(header, MakeReqId))
}

/// Bind and serve until `cancel` fires.
///
/// # Errors
/// Returns an error if the address is invalid, the listener cannot bind,
/// or the server fails while running.
pub async fn serve(config: &AppConfig, cancel: CancellationToken) -> Result<()> {
    let addr = config.server.socket_addr()?;
    let router = build_router(config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr()?;
    tracing::info!(%local, debug = config.server.debug, "webcalc server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("HTTP server error")?;

    tracing::info!("webcalc server stopped");
    Ok(())
}

/// Serve until Ctrl+C or SIGTERM.
///
/// # Errors
/// Propagates errors from [`serve`].
pub async fn run(config: AppConfig) -> Result<()> {
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = signals::wait_for_shutdown().await {
            tracing::warn!(error = %e, "signal handler failed, shutting down");
        }
        signal_cancel.cancel();
    });

    serve(&config, cancel).await
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header;
    use tower::ServiceExt;

    async fn body_text(res: Response<Body>) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn healthz_returns_ok() {
        let app = build_router(&AppConfig::default());
        let res = app
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "ok");
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let app = build_router(&AppConfig::default());
        let res = app
            .oneshot(
                Request::get("/healthz")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[tokio::test]
    async fn request_id_is_generated() {
        let app = build_router(&AppConfig::default());
        let res = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let rid = res.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(rid).is_ok(), "{rid}");
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let mut config = AppConfig::default();
        config.server.body_limit_bytes = 16;
        let app = build_router(&config);
        let body = "num1=1&num2=2&operation=add&padding=xxxxxxxxxxxxxxxx";
        let res = app
            .oneshot(
                Request::post("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn slow_request_times_out_with_408() {
        let mut config = AppConfig::default();
        config.server.request_timeout = Duration::from_millis(20);
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let app = apply_middleware_stack(slow, &config);

        let res = app
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
        assert!(res.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn form_round_trip_through_the_full_stack() {
        let app = build_router(&AppConfig::default());
        let res = app
            .oneshot(
                Request::post("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("num1=10&num2=4&operation=divide"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_text(res).await.contains("<output>2.5</output>"));
    }

    #[tokio::test]
    async fn serve_stops_on_cancel() {
        let mut config = AppConfig::default();
        config.server.bind_addr = "127.0.0.1:0".to_owned();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn({
            let cancel = cancel.clone();
            async move { serve(&config, cancel).await }
        });
        cancel.cancel();
        handle.await.unwrap().unwrap();
    }
}
