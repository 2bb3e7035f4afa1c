// src/handlers/supplier.rs
use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{debug, error, instrument};

use crate::dtos::supplier::{CreateSupplierRequest, SupplierPatch, SupplierResponse};
use crate::dtos::{Envelope, StatusResponse};
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::supplier::Supplier;
use crate::state::AppState;

const SUPPLIER_COLUMNS: &str = "id, name, company, email, phone, created_at";

// POST /supplier - Create supplier
#[instrument(skip(state, payload))]
pub async fn create_supplier(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSupplierRequest>,
) -> Result<Json<Envelope<SupplierResponse>>, AppError> {
    payload.validate()?;

    let supplier = sqlx::query_as::<_, Supplier>(&format!(
        "INSERT INTO suppliers (name, company, email, phone, created_at)
         VALUES (?, ?, ?, ?, ?) RETURNING {SUPPLIER_COLUMNS}"
    ))
    .bind(payload.name.trim())
    .bind(payload.company.unwrap_or_default())
    .bind(payload.email.trim())
    .bind(payload.phone.unwrap_or_default())
    .bind(Utc::now())
    .fetch_one(&state.db_pool)
    .await?;

    debug!(id = supplier.id, "supplier created");
    Ok(Json(Envelope::ok(SupplierResponse::from(supplier))))
}

// GET /supplier - List all suppliers
#[instrument(skip(state))]
pub async fn get_suppliers(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<SupplierResponse>>>, AppError> {
    match sqlx::query_as::<_, Supplier>(&format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers"))
        .fetch_all(&state.db_pool)
        .await
    {
        Ok(suppliers) => {
            let response = suppliers.into_iter().map(SupplierResponse::from).collect();
            Ok(Json(Envelope::ok(response)))
        }
        Err(e) => {
            error!(?e, "Failed to fetch suppliers");
            Err(e.into())
        }
    }
}

// GET /supplier/{id} - Get single supplier
#[instrument(skip(state))]
pub async fn get_supplier(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<Envelope<SupplierResponse>>, AppError> {
    let supplier = find_supplier(&state, id)
        .await?
        .ok_or_else(|| AppError::not_found("Supplier not found"))?;

    Ok(Json(Envelope::ok(SupplierResponse::from(supplier))))
}

// PUT /supplier/{id} - Update supplied fields only
#[instrument(skip(state, patch))]
pub async fn update_supplier(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
    AppJson(patch): AppJson<SupplierPatch>,
) -> Result<Json<Envelope<SupplierResponse>>, AppError> {
    patch.validate()?;

    let mut supplier = find_supplier(&state, id)
        .await?
        .ok_or_else(|| AppError::not_found("Supplier not found"))?;
    supplier.apply(patch);

    let supplier = sqlx::query_as::<_, Supplier>(&format!(
        "UPDATE suppliers SET name = ?, company = ?, email = ?, phone = ?
         WHERE id = ? RETURNING {SUPPLIER_COLUMNS}"
    ))
    .bind(supplier.name.trim())
    .bind(&supplier.company)
    .bind(supplier.email.trim())
    .bind(&supplier.phone)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Supplier not found"))?;

    Ok(Json(Envelope::ok(SupplierResponse::from(supplier))))
}

// DELETE /supplier/{id} - Succeeds whether or not the row existed
#[instrument(skip(state))]
pub async fn delete_supplier(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, AppError> {
    let result = sqlx::query("DELETE FROM suppliers WHERE id = ?")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    debug!(rows = result.rows_affected(), "supplier delete");
    Ok(Json(StatusResponse::ok()))
}

pub(crate) async fn find_supplier(state: &AppState, id: i64) -> Result<Option<Supplier>, sqlx::Error> {
    sqlx::query_as::<_, Supplier>(&format!(
        "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await
}
