use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::dtos::product::ProductPatch;

#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity_in_stock: i64,
    pub quantity_sold: i64,
    pub unit_price: f64,
    /// `quantity_sold * unit_price` as of creation. Not kept in sync by updates.
    pub revenue: f64,
    pub supplied_by_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn revenue_for(quantity_sold: i64, unit_price: f64) -> f64 {
        quantity_sold as f64 * unit_price
    }

    /// Overwrites the fields present in `patch`. Revenue is left as stored.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(quantity_in_stock) = patch.quantity_in_stock {
            self.quantity_in_stock = quantity_in_stock;
        }
        if let Some(quantity_sold) = patch.quantity_sold {
            self.quantity_sold = quantity_sold;
        }
        if let Some(unit_price) = patch.unit_price {
            self.unit_price = unit_price;
        }
    }
}
