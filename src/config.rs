use std::{env, net::SocketAddr, time::Duration};

use crate::error::AppError;

pub const DEFAULT_DATABASE_NAME: &str = "mobile-app";
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub listen_addr: SocketAddr,
    pub store_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        // `URL` is what older deployments put in their .env files.
        let database_url = env::var("DATABASE_URL")
            .or_else(|_| env::var("URL"))
            .unwrap_or_else(|_| "sqlite://hikelog.db".to_string());

        let database_name =
            env::var("DATABASE_NAME").unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string());

        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let store_timeout = match env::var("STORE_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => DEFAULT_STORE_TIMEOUT,
        };

        Ok(Self {
            database_url,
            database_name,
            listen_addr,
            store_timeout,
        })
    }

    /// The connection string with any password removed, safe for logs.
    pub fn redacted_database_url(&self) -> String {
        match url::Url::parse(&self.database_url) {
            Ok(mut parsed) if parsed.password().is_some() => {
                let _ = parsed.set_password(Some("***"));
                parsed.to_string()
            }
            _ => self.database_url.clone(),
        }
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, AppError> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|err| AppError::Config(format!("invalid STORE_TIMEOUT_SECS: {err}")))?;
    if secs == 0 {
        return Err(AppError::Config(
            "invalid STORE_TIMEOUT_SECS: must be greater than zero".into(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
