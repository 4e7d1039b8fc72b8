//! Seller profile domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SellerStatus {
    Active,
    Inactive,
}

/// Seller contact details, shared by [`SellerProfile`] and the
/// seller-request submission form.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SellerContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    /// Tax registration number (GSTIN in the original market).
    pub tax_id: Option<String>,
}

impl SellerContact {
    /// Merge an incoming contact over this one: non-empty new values
    /// override, empty values fall back to the existing ones.
    pub fn merged_with(&self, new: &SellerContact) -> SellerContact {
        fn pick(new: &str, existing: &str) -> String {
            if new.trim().is_empty() {
                existing.to_string()
            } else {
                new.to_string()
            }
        }

        SellerContact {
            name: pick(&new.name, &self.name),
            email: pick(&new.email, &self.email),
            phone: pick(&new.phone, &self.phone),
            business_name: pick(&new.business_name, &self.business_name),
            address: pick(&new.address, &self.address),
            city: pick(&new.city, &self.city),
            state: pick(&new.state, &self.state),
            postal_code: pick(&new.postal_code, &self.postal_code),
            tax_id: match &new.tax_id {
                Some(t) if !t.trim().is_empty() => Some(t.clone()),
                _ => self.tax_id.clone(),
            },
        }
    }
}

/// Durable record that a user is an approved seller.
///
/// Invariant: at most one profile per user id. Created on first
/// approval of a seller request, merge-updated on later approvals,
/// never deleted in normal flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerProfile {
    pub user_id: String,
    pub contact: SellerContact,
    pub status: SellerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(address: &str, phone: &str) -> SellerContact {
        SellerContact {
            name: "Frank Herbert".into(),
            email: "frank@example.com".into(),
            phone: phone.into(),
            business_name: "Arrakis Press".into(),
            address: address.into(),
            city: "Portland".into(),
            state: "OR".into(),
            postal_code: "97201".into(),
            tax_id: None,
        }
    }

    #[test]
    fn merge_prefers_non_empty_new_values() {
        let existing = contact("1 Old St", "555-0100");
        let incoming = contact("2 New Ave", "");

        let merged = existing.merged_with(&incoming);
        assert_eq!(merged.address, "2 New Ave");
        assert_eq!(merged.phone, "555-0100");
    }

    #[test]
    fn merge_keeps_existing_tax_id_when_new_is_absent() {
        let mut existing = contact("1 Old St", "555-0100");
        existing.tax_id = Some("22AAAAA0000A1Z5".into());
        let incoming = contact("1 Old St", "555-0100");

        let merged = existing.merged_with(&incoming);
        assert_eq!(merged.tax_id.as_deref(), Some("22AAAAA0000A1Z5"));
    }
}
