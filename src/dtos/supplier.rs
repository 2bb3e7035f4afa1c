// src/dtos/supplier.rs
use lettre::Address;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: Option<String>,
}

impl CreateSupplierRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Supplier name is required"));
        }
        check_address(&self.email)?;
        Ok(())
    }
}

/// Partial update: only the fields present in the body are overwritten.
#[derive(Debug, Default, Deserialize)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl SupplierPatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::validation("Supplier name cannot be empty"));
        }
        if let Some(email) = &self.email {
            check_address(email)?;
        }
        Ok(())
    }
}

// Same parser the mailer uses, so every stored address can be mailed.
fn check_address(raw: &str) -> Result<(), AppError> {
    raw.trim()
        .parse::<Address>()
        .map(|_| ())
        .map_err(|e| AppError::validation(format!("Supplier email is not a valid address: {e}")))
}

#[derive(Debug, Serialize)]
pub struct SupplierResponse {
    pub id: i64,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
}

impl From<crate::models::supplier::Supplier> for SupplierResponse {
    fn from(supplier: crate::models::supplier::Supplier) -> Self {
        Self {
            id: supplier.id,
            name: supplier.name,
            company: supplier.company,
            email: supplier.email,
            phone: supplier.phone,
            created_at: supplier.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(email: &str) -> CreateSupplierRequest {
        CreateSupplierRequest {
            name: "Ada".into(),
            company: None,
            email: email.into(),
            phone: None,
        }
    }

    #[test]
    fn addresses_are_checked_with_the_mail_parser() {
        assert!(create("orders@acme.test").validate().is_ok());
        assert!(create(" orders@acme.test ").validate().is_ok());

        for bad in [
            "orders",
            "@acme.test",
            "orders@",
            "a@b@c",
            "or ders@acme.test",
            "ada@acme..test",
            "ada@acme.test>",
            "a(b@acme.test",
            "ada@[acme",
        ] {
            assert!(
                matches!(create(bad).validate(), Err(AppError::ValidationError(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn patch_checks_email_only_when_present() {
        assert!(SupplierPatch::default().validate().is_ok());

        let patch = SupplierPatch {
            email: Some("ada@acme..test".into()),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(AppError::ValidationError(_))));

        let patch = SupplierPatch {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(AppError::ValidationError(_))));
    }
}
