pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;

use axum::middleware::from_fn;
use axum::{
    routing::{get, post},
    Router,
};
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

use config::Config;
use services::{AcquirerClient, PaymentProcessor, PaymentRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub processor: PaymentProcessor,
}

pub struct Application {
    port: u16,
    listener: tokio::net::TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: Config) -> anyhow::Result<Self> {
        let acquirer = AcquirerClient::new(&config.acquirer);
        let repository = PaymentRepository::new();
        let processor = PaymentProcessor::new(acquirer, repository);

        tracing::info!(
            acquirer_url = %config.acquirer.api_base_url,
            "Acquiring bank client initialized"
        );

        let state = AppState {
            config: config.clone(),
            processor,
        };

        let router = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics))
            .route(
                "/payments",
                post(handlers::payments::process_payment).get(handlers::payments::get_payment),
            )
            .layer(from_fn(metrics_middleware))
            .layer(from_fn(request_id_middleware))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                }),
            )
            .with_state(state);

        // Bind here so tests can ask for port 0 and read the real port back.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let port = listener.local_addr()?.port();

        tracing::info!("Gateway service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        axum::serve(self.listener, self.router).await?;

        Ok(())
    }
}
