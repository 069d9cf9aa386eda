use std::sync::Arc;

use sprout_geo::GeoClient;
use sprout_mail::Mailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sprout_db::DbPool,
    /// Server configuration (JWT secret, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// Geolocation resolver (external lookup service).
    pub geo: Arc<GeoClient>,
    /// SMTP mailer (may be running with delivery disabled).
    pub mailer: Arc<Mailer>,
}
