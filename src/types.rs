use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::db::{Database, DatabaseHealth};

#[derive(Serialize, Deserialize)]
pub struct ResponsePayload {
    pub status: i32,
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub db_health: DatabaseHealth,
    pub uptime_seconds: u64,
}

// Shared application state available to all handlers
pub struct AppState {
    pub start_time: Instant,
    pub db: Database,
    pub version: String,
}
