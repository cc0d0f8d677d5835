//! Alert Advisory API Server
//!
//! HTTP front end for the alert decision engine.

use anyhow::Context;
use axum::{extract::State, routing::get, routing::post, Json, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub mod config;
pub mod cue;
pub mod error;
pub mod rate_limit;
mod routes;

pub use config::{AppConfig, LogConfig};
pub use cue::SoundCue;
pub use error::ApiError;
pub use routes::evaluate::{DecisionTrace, EvaluateRequest, EvaluateResponse};

use input_validator::{ValidationError, Validator};
use rate_limit::{create_governor_config, RateLimitConfig};

/// Application state shared across handlers
///
/// Read-only after startup; evaluations keep no state between requests.
pub struct AppState {
    pub config: AppConfig,
    pub validator: Validator,
    /// Prometheus handle, when the exporter is installed
    pub metrics: Option<PrometheusHandle>,
    pub version: String,
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: AppConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            validator: Validator::new(config.validation.clone())?,
            config,
            metrics,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        })
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/evaluate", post(routes::evaluate::evaluate))
        .route("/api/v1/explanations", get(routes::explanations::get_explanations))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// Prometheus scrape handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .ok_or(ApiError::MetricsDisabled)
}

/// Build the log filter from the configured directive
pub fn log_filter(config: &LogConfig) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(&config.level)
        .with_context(|| format!("invalid log.level directive '{}'", config.level))
}

/// Initialize logging
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let builder = FmtSubscriber::builder()
        .with_env_filter(log_filter(config)?)
        .with_target(true);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Router with rate limiting applied when enabled
///
/// Spawns the limiter cleanup task, so it must be called inside a Tokio
/// runtime. Serve with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn create_app(state: Arc<AppState>, rate_limit: &RateLimitConfig) -> anyhow::Result<Router> {
    let app = create_router(state);
    if !rate_limit.enabled {
        return Ok(app);
    }

    let governor = create_governor_config(rate_limit)
        .context("rate limit per_second and burst_size must be non-zero")?;

    let limiter = governor.limiter().clone();
    let interval = rate_limit.cleanup_interval();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            limiter.retain_recent();
        }
    });

    info!(
        "Rate limiting enabled: burst {}, one request per {}s",
        rate_limit.burst_size, rate_limit.per_second
    );
    Ok(app.layer(GovernorLayer { config: governor }))
}

/// Run the server until ctrl-c
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let metrics = if config.metrics.enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    let addr = config.server.addr.clone();
    let rate_limit = config.rate_limit.clone();
    let state = Arc::new(AppState::new(config, metrics).context("invalid validation config")?);
    let app = create_app(state, &rate_limit)?;

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_with(config: AppConfig) -> Router {
        create_router(Arc::new(AppState::new(config, None).unwrap()))
    }

    async fn post_evaluate(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/evaluate")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_evaluate_delay_with_reminder_cue() {
        let (status, body) = post_evaluate(
            app_with(AppConfig::default()),
            r#"{"severity":"high","area_risk":"low","hours_since_last_alert":0}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["decision"], "DELAY");
        assert_eq!(body["sound_cue"], "reminder");
        assert_eq!(body["trace"]["risk_score"], 4);
        assert_eq!(body["trace"]["fatigue"], "high");
        assert_eq!(body["trace"]["rule"], "elevated_risk_high_fatigue");
    }

    #[tokio::test]
    async fn test_evaluate_override_reported() {
        let (status, body) = post_evaluate(
            app_with(AppConfig::default()),
            r#"{"severity":"HIGH","area_risk":"HIGH","hours_since_last_alert":0.25}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["decision"], "SEND");
        assert_eq!(body["sound_cue"], "alert");
        assert_eq!(body["trace"]["overrides_fatigue"], true);
    }

    #[tokio::test]
    async fn test_sound_toggle_from_request() {
        let (_, body) = post_evaluate(
            app_with(AppConfig::default()),
            r#"{"severity":"high","area_risk":"high","hours_since_last_alert":3,"sound_enabled":false}"#,
        )
        .await;
        assert_eq!(body["decision"], "SEND");
        assert!(body["sound_cue"].is_null());
    }

    #[tokio::test]
    async fn test_sound_default_from_config() {
        let mut config = AppConfig::default();
        config.sound.enabled_by_default = false;

        let (_, body) = post_evaluate(
            app_with(config),
            r#"{"severity":"medium","area_risk":"high","hours_since_last_alert":6}"#,
        )
        .await;
        assert_eq!(body["decision"], "SEND");
        assert!(body["sound_cue"].is_null());
    }

    #[tokio::test]
    async fn test_suppress_has_no_cue() {
        let (_, body) = post_evaluate(
            app_with(AppConfig::default()),
            r#"{"severity":"low","area_risk":"low","hours_since_last_alert":8}"#,
        )
        .await;
        assert_eq!(body["decision"], "SUPPRESS");
        assert!(body["sound_cue"].is_null());
    }

    #[tokio::test]
    async fn test_invalid_severity_rejected() {
        let (status, body) = post_evaluate(
            app_with(AppConfig::default()),
            r#"{"severity":"apocalyptic","area_risk":"low","hours_since_last_alert":1}"#,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_input");
        assert_eq!(body["field"], "severity");
    }

    #[tokio::test]
    async fn test_negative_hours_rejected() {
        let (status, body) = post_evaluate(
            app_with(AppConfig::default()),
            r#"{"severity":"low","area_risk":"low","hours_since_last_alert":-2}"#,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_input");
        assert_eq!(body["field"], "hours_since_last_alert");
    }

    #[tokio::test]
    async fn test_hours_outside_configured_range() {
        let mut config = AppConfig::default();
        config.validation = input_validator::ValidationConfig::compact();

        let (status, body) = post_evaluate(
            app_with(config),
            r#"{"severity":"low","area_risk":"low","hours_since_last_alert":12}"#,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "out_of_range");
    }

    #[tokio::test]
    async fn test_missing_hours_rejected() {
        let (status, body) = post_evaluate(
            app_with(AppConfig::default()),
            r#"{"severity":"low","area_risk":"low"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "missing_field");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, bytes) = get(app_with(AppConfig::default()), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_explanations_listed() {
        let (status, bytes) = get(app_with(AppConfig::default()), "/api/v1/explanations").await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["count"], 3);
        assert_eq!(body["data"][0]["decision"], "SEND");
        assert_eq!(body["data"][2]["explanation"], decision_engine::SUPPRESS_EXPLANATION);
    }

    #[tokio::test]
    async fn test_metrics_disabled() {
        let (status, _) = get(app_with(AppConfig::default()), "/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_metrics_rendered_when_handle_present() {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let app = create_router(Arc::new(
            AppState::new(AppConfig::default(), Some(handle)).unwrap(),
        ));

        let (status, _) = get(app, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_typed_hours_gets_json_error() {
        let response = app_with(AppConfig::default())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/evaluate")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"severity":"low","area_risk":"low","hours_since_last_alert":"two"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "application/json"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "invalid_body");
        assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_wrong_typed_severity_gets_json_error() {
        let (status, body) = post_evaluate(
            app_with(AppConfig::default()),
            r#"{"severity":3,"area_risk":"low","hours_since_last_alert":1}"#,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_body");
    }

    #[tokio::test]
    async fn test_malformed_json_gets_json_error() {
        let (status, body) = post_evaluate(app_with(AppConfig::default()), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_body");
    }

    #[test]
    fn test_inverted_hours_range_rejected_at_startup() {
        let mut config = AppConfig::default();
        config.validation.hours_range = (24.0, 0.0);
        assert!(AppState::new(config, None).is_err());
    }

    #[test]
    fn test_malformed_log_directive_rejected() {
        let config = LogConfig {
            level: "not a [valid filter".to_string(),
            json: false,
        };
        let err = log_filter(&config).unwrap_err();
        assert!(err.to_string().contains("invalid log.level directive"));

        assert!(log_filter(&LogConfig::default()).is_ok());
        assert!(init_logging(&config).is_err());
    }

    fn from_peer(uri: &str, peer: SocketAddr) -> Request<Body> {
        let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        request.extensions_mut().insert(ConnectInfo(peer));
        request
    }

    #[tokio::test]
    async fn test_rate_limit_rejects_after_burst() {
        let rate_limit = RateLimitConfig {
            enabled: true,
            per_second: 60,
            burst_size: 2,
            cleanup_interval_secs: 60,
        };
        let state = Arc::new(AppState::new(AppConfig::default(), None).unwrap());
        let app = create_app(state, &rate_limit).unwrap();

        let peer: SocketAddr = "10.0.0.7:40000".parse().unwrap();
        for _ in 0..rate_limit.burst_size {
            let response = app.clone().oneshot(from_peer("/api/v1/health", peer)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.clone().oneshot(from_peer("/api/v1/health", peer)).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        // Other peers keep their own quota
        let other: SocketAddr = "10.0.0.8:40000".parse().unwrap();
        let response = app.oneshot(from_peer("/api/v1/health", other)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rate_limit_disabled_passes_through() {
        let rate_limit = RateLimitConfig {
            enabled: false,
            ..Default::default()
        };
        let state = Arc::new(AppState::new(AppConfig::default(), None).unwrap());
        let app = create_app(state, &rate_limit).unwrap();

        for _ in 0..30 {
            let (status, _) = get(app.clone(), "/api/v1/health").await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    #[test]
    fn test_decision_and_failure_counters() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                let app = app_with(AppConfig::default());
                post_evaluate(
                    app.clone(),
                    r#"{"severity":"high","area_risk":"low","hours_since_last_alert":0}"#,
                )
                .await;
                post_evaluate(
                    app.clone(),
                    r#"{"severity":"unknown","area_risk":"low","hours_since_last_alert":0}"#,
                )
                .await;
                post_evaluate(
                    app,
                    r#"{"severity":"low","area_risk":"low","hours_since_last_alert":"soon"}"#,
                )
                .await;
            })
        });

        let rendered = handle.render();
        let decision_line = rendered
            .lines()
            .find(|line| line.starts_with("alert_decisions_total{"))
            .unwrap();
        assert!(decision_line.contains(r#"decision="DELAY""#));
        assert!(decision_line.contains(r#"rule="elevated_risk_high_fatigue""#));
        assert!(decision_line.ends_with(" 1"));

        assert!(rendered.contains(r#"alert_validation_failures_total{field="severity"} 1"#));
        assert!(rendered.contains(r#"alert_validation_failures_total{field="body"} 1"#));
    }
}
