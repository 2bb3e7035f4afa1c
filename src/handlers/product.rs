// src/handlers/product.rs
use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{debug, error, instrument};

use crate::dtos::product::{CreateProductRequest, ProductPatch, ProductResponse};
use crate::dtos::{Envelope, StatusResponse};
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::handlers::supplier::find_supplier;
use crate::models::product::Product;
use crate::state::AppState;

const PRODUCT_COLUMNS: &str =
    "id, name, quantity_in_stock, quantity_sold, unit_price, revenue, supplied_by_id, created_at";

// POST /product/{supplier_id} - Create product under a supplier
#[instrument(skip(state, payload))]
pub async fn create_product(
    AppPath(supplier_id): AppPath<i64>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> Result<Json<Envelope<ProductResponse>>, AppError> {
    payload.validate()?;

    let supplier = find_supplier(&state, supplier_id)
        .await?
        .ok_or_else(|| AppError::not_found("Supplier not found"))?;

    let quantity_sold = payload.quantity_sold.unwrap_or(0);
    let unit_price = payload.unit_price.unwrap_or(0.0);

    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products
             (name, quantity_in_stock, quantity_sold, unit_price, revenue, supplied_by_id, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(payload.name.trim())
    .bind(payload.quantity_in_stock.unwrap_or(0))
    .bind(quantity_sold)
    .bind(unit_price)
    .bind(Product::revenue_for(quantity_sold, unit_price))
    .bind(supplier.id)
    .bind(Utc::now())
    .fetch_one(&state.db_pool)
    .await?;

    debug!(id = product.id, supplier_id, "product created");
    Ok(Json(Envelope::ok(ProductResponse::from(product))))
}

// GET /product - List all products
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<ProductResponse>>>, AppError> {
    match sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products"))
        .fetch_all(&state.db_pool)
        .await
    {
        Ok(products) => {
            let response = products.into_iter().map(ProductResponse::from).collect();
            Ok(Json(Envelope::ok(response)))
        }
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(e.into())
        }
    }
}

// GET /product/{id} - Get single product
#[instrument(skip(state))]
pub async fn get_product(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<Envelope<ProductResponse>>, AppError> {
    let product = find_product(&state, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(Envelope::ok(ProductResponse::from(product))))
}

// PUT /product/{id} - Update supplied fields; revenue stays as stored
#[instrument(skip(state, patch))]
pub async fn update_product(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
    AppJson(patch): AppJson<ProductPatch>,
) -> Result<Json<Envelope<ProductResponse>>, AppError> {
    patch.validate()?;

    let mut product = find_product(&state, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    product.apply(patch);

    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET name = ?, quantity_in_stock = ?, quantity_sold = ?, unit_price = ?
         WHERE id = ? RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(product.name.trim())
    .bind(product.quantity_in_stock)
    .bind(product.quantity_sold)
    .bind(product.unit_price)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(Envelope::ok(ProductResponse::from(product))))
}

// DELETE /product/{id} - Succeeds whether or not the row existed
#[instrument(skip(state))]
pub async fn delete_product(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, AppError> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    debug!(rows = result.rows_affected(), "product delete");
    Ok(Json(StatusResponse::ok()))
}

pub(crate) async fn find_product(state: &AppState, id: i64) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"))
        .bind(id)
        .fetch_optional(&state.db_pool)
        .await
}
