use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub minio_endpoint: String,
    pub minio_bucket: String,
    pub minio_access_key: String,
    pub minio_secret_key: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            // No fallback: starting without a signing secret is a config bug.
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "photofeed".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "photofeed-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        Ok(Self {
            database_url,
            jwt,
            minio_endpoint: std::env::var("MINIO_ENDPOINT").context("MINIO_ENDPOINT is not set")?,
            minio_bucket: std::env::var("MINIO_BUCKET").context("MINIO_BUCKET is not set")?,
            minio_access_key: std::env::var("MINIO_ACCESS_KEY")
                .context("MINIO_ACCESS_KEY is not set")?,
            minio_secret_key: std::env::var("MINIO_SECRET_KEY")
                .context("MINIO_SECRET_KEY is not set")?,
        })
    }
}
