use std::{net::SocketAddr, str::FromStr};

use anyhow::Context;
use axum::http::HeaderValue;

use crate::validation::ValidationRules;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub max_connections: u32,
    pub route_prefix: String,
    pub rules: ValidationRules,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env_or("PORT", 3000)?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());
        let max_connections: u32 = env_or("DATABASE_MAX_CONNECTIONS", 10)?;

        let route_prefix = normalize_prefix(
            &std::env::var("MOVIE_ROUTE_PREFIX").unwrap_or_else(|_| "/movie".to_string()),
        )?;

        let defaults = ValidationRules::default();
        let rules = ValidationRules {
            require_title: env_or("MOVIE_REQUIRE_TITLE", defaults.require_title)?,
            require_genre: env_or("MOVIE_REQUIRE_GENRE", defaults.require_genre)?,
            max_genre_len: env_opt("MOVIE_MAX_GENRE_LEN")?.or(defaults.max_genre_len),
            min_duration: env_opt("MOVIE_MIN_DURATION")?.or(defaults.min_duration),
            max_duration: env_opt("MOVIE_MAX_DURATION")?.or(defaults.max_duration),
            validate_writes: env_or("MOVIE_VALIDATE_WRITES", defaults.validate_writes)?,
        };

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            max_connections,
            route_prefix,
            rules,
        })
    }
}

fn env_opt<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map(Some).with_context(|| format!("{key}={raw:?}"))
        },
        _ => Ok(None),
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(env_opt(key)?.unwrap_or(default))
}

/// `movies/` and `/movies/` both become `/movies`; a bare `/` mounts at the root (empty prefix).
///
/// The prefix ends up in every `Location` header, so it must be a valid header value.
fn normalize_prefix(raw: &str) -> anyhow::Result<String> {
    let prefix = match raw.trim().trim_matches('/') {
        "" => String::new(),
        trimmed => format!("/{trimmed}"),
    };
    HeaderValue::from_str(&prefix).with_context(|| format!("MOVIE_ROUTE_PREFIX={raw:?}"))?;
    Ok(prefix)
}
