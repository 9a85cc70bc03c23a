use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub acquirer: AcquirerConfig,
    pub service_name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection settings for the acquiring bank. The base address is the
/// only knob the gateway consumes; the bank endpoint itself is
/// unauthenticated.
#[derive(Deserialize, Clone, Debug)]
pub struct AcquirerConfig {
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let host = env::var("GATEWAY_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("GATEWAY_SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let api_base_url =
            env::var("ACQUIRER_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        Ok(Self {
            server: ServerConfig { host, port },
            acquirer: AcquirerConfig { api_base_url },
            service_name: "gateway-service".to_string(),
        })
    }
}
