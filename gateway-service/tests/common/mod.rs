use gateway_service::config::{AcquirerConfig, Config, ServerConfig};
use gateway_service::Application;

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    /// Spawn the gateway on a random port, pointed at the given
    /// acquiring bank base URL (usually a wiremock server).
    pub async fn spawn(acquirer_base_url: &str) -> Self {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            acquirer: AcquirerConfig {
                api_base_url: acquirer_base_url.to_string(),
            },
            service_name: "gateway-service-test".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept requests.
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address }
    }
}
