// src/state.rs
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::mail::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub mailer: Arc<dyn Mailer>,
    pub business_name: Arc<str>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, mailer: Arc<dyn Mailer>, business_name: impl Into<Arc<str>>) -> Self {
        Self {
            db_pool,
            mailer,
            business_name: business_name.into(),
        }
    }
}
