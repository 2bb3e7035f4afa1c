use axum::{routing::get, Router};
use crate::handlers::product::{
    create_product, delete_product, get_product, get_products, update_product,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    // POST takes the owning supplier's id in the same slot the others use for the product id.
    Router::new()
        .route("/product", get(get_products))
        .route(
            "/product/{id}",
            get(get_product).post(create_product).put(update_product).delete(delete_product),
        )
}
