use axum::{routing::post, Router};
use crate::handlers::email::send_email;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/email/{product_id}", post(send_email))
}
