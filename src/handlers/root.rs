use axum::Json;
use serde_json::{json, Value};

// GET /
pub async fn index() -> Json<Value> {
    Json(json!({ "Msg": "Inventory API: see /supplier, /product and /email/{product_id}" }))
}

// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
