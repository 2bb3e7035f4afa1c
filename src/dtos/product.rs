// src/dtos/product.rs
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub quantity_in_stock: Option<i64>,
    pub quantity_sold: Option<i64>,
    pub unit_price: Option<f64>,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Product name is required"));
        }
        check_amounts(self.quantity_in_stock, self.quantity_sold, self.unit_price)
    }
}

/// Partial update. Has no `revenue` field; revenue is fixed at creation.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub quantity_in_stock: Option<i64>,
    pub quantity_sold: Option<i64>,
    pub unit_price: Option<f64>,
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::validation("Product name cannot be empty"));
        }
        check_amounts(self.quantity_in_stock, self.quantity_sold, self.unit_price)
    }
}

fn check_amounts(
    quantity_in_stock: Option<i64>,
    quantity_sold: Option<i64>,
    unit_price: Option<f64>,
) -> Result<(), AppError> {
    if quantity_in_stock.is_some_and(|q| q < 0) {
        return Err(AppError::validation("quantity_in_stock cannot be negative"));
    }
    if quantity_sold.is_some_and(|q| q < 0) {
        return Err(AppError::validation("quantity_sold cannot be negative"));
    }
    if unit_price.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(AppError::validation("unit_price must be a non-negative number"));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub quantity_in_stock: i64,
    pub quantity_sold: i64,
    pub unit_price: f64,
    pub revenue: f64,
    pub supplied_by: i64,
    pub created_at: String,
}

// Convert from Model to Response DTO
impl From<crate::models::product::Product> for ProductResponse {
    fn from(product: crate::models::product::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            quantity_in_stock: product.quantity_in_stock,
            quantity_sold: product.quantity_sold,
            unit_price: product.unit_price,
            revenue: product.revenue,
            supplied_by: product.supplied_by_id,
            created_at: product.created_at.to_rfc3339(),
        }
    }
}
