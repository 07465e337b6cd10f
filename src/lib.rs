pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod validation;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, service::MovieService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub movies: MovieService,
}

impl AppState {
    pub fn new(config: Config, db: sea_orm::DatabaseConnection) -> Self {
        let movies = MovieService::new(db, config.rules.clone());
        Self { config: Arc::new(config), movies }
    }
}

pub fn app(state: AppState) -> Router {
    let prefix = state.config.route_prefix.clone();
    let collection = if prefix.is_empty() { "/".to_string() } else { prefix.clone() };
    let item = format!("{prefix}/{{id}}");

    Router::new()
        .route("/health", get(routes::health))
        .route(&collection, get(routes::list).post(routes::create))
        .route(
            &item,
            get(routes::get).put(routes::update).patch(routes::patch).delete(routes::delete),
        )
        .with_state(Arc::new(state))
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
}
