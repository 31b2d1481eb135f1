use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub secret_key: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base: String,
    pub tmdb_rps: u32,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let secret_key = std::env::var("SECRET_KEY")
            .context("SECRET_KEY is required (signs the flash cookie)")?;
        if secret_key.len() < 32 {
            anyhow::bail!("SECRET_KEY must be at least 32 bytes");
        }

        let tmdb_api_key = std::env::var("TMDB_API_KEY").context("TMDB_API_KEY is required")?;

        let tmdb_base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());

        let tmdb_image_base = std::env::var("TMDB_IMAGE_BASE")
            .unwrap_or_else(|_| "https://image.tmdb.org/t/p/original".to_string());

        let tmdb_rps: u32 =
            std::env::var("TMDB_RPS").ok().and_then(|s| s.parse().ok()).unwrap_or(4);

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://reelrank.db?mode=rwc".to_string());

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            secret_key,
            tmdb_api_key,
            tmdb_base_url,
            tmdb_image_base,
            tmdb_rps,
            database_url,
        })
    }
}
