use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`). This is the only
    /// ceiling on a generation request; the pipeline itself never times out.
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
        }
    }
}

/// Credentials and settings for the outbound generation services.
///
/// Read once at startup; everything below the composition root receives
/// explicit clients, never environment variables. Absent values select the
/// documented degraded modes rather than failing startup.
#[derive(Debug, Clone, Default)]
pub struct GenerationConfig {
    /// Text-generation service key. Absent: story generation answers 500.
    pub anthropic_api_key: Option<String>,
    /// Image-generation service key. Absent: stories come back with
    /// illustration descriptions only.
    pub openai_api_key: Option<String>,
    /// Object-storage bucket for generated and uploaded images.
    pub s3_bucket: Option<String>,
    /// Object-storage region.
    pub s3_region: Option<String>,
}

impl GenerationConfig {
    /// Load generation settings from `ANTHROPIC_API_KEY`, `OPENAI_API_KEY`,
    /// `S3_BUCKET`, and `S3_REGION`.
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            anthropic_api_key: non_empty("ANTHROPIC_API_KEY"),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            s3_bucket: non_empty("S3_BUCKET"),
            s3_region: non_empty("S3_REGION"),
        }
    }

    /// Object storage is usable when both bucket and region are set.
    pub fn storage_configured(&self) -> Option<(&str, &str)> {
        match (&self.s3_bucket, &self.s3_region) {
            (Some(bucket), Some(region)) => Some((bucket, region)),
            _ => None,
        }
    }

    /// Illustration rendering needs the image service key plus storage.
    pub fn illustrations_configured(&self) -> bool {
        self.openai_api_key.is_some() && self.storage_configured().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illustrations_need_key_and_storage() {
        let mut config = GenerationConfig {
            anthropic_api_key: Some("sk-ant".into()),
            openai_api_key: Some("sk".into()),
            s3_bucket: Some("bucket".into()),
            s3_region: Some("us-east-1".into()),
        };
        assert!(config.illustrations_configured());

        config.s3_bucket = None;
        assert!(!config.illustrations_configured());

        config.s3_bucket = Some("bucket".into());
        config.openai_api_key = None;
        assert!(!config.illustrations_configured());
    }
}
