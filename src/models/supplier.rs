use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::dtos::supplier::SupplierPatch;

#[derive(Debug, Clone, FromRow)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl Supplier {
    /// Overwrites the fields present in `patch`, leaving the rest alone.
    pub fn apply(&mut self, patch: SupplierPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier() -> Supplier {
        Supplier {
            id: 1,
            name: "Ada".into(),
            company: "Acme".into(),
            email: "ada@acme.test".into(),
            phone: "555-0100".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn patch_overwrites_only_supplied_fields() {
        let mut s = supplier();
        s.apply(SupplierPatch {
            email: Some("orders@acme.test".into()),
            ..Default::default()
        });

        assert_eq!(s.email, "orders@acme.test");
        assert_eq!(s.name, "Ada");
        assert_eq!(s.company, "Acme");
        assert_eq!(s.phone, "555-0100");
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut s = supplier();
        s.apply(SupplierPatch::default());
        assert_eq!(s.name, "Ada");
        assert_eq!(s.email, "ada@acme.test");
    }
}
