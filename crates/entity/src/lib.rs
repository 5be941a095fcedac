//! Entity definitions for the MamaSouk marketplace
//!
//! This crate contains Sea-ORM entity definitions for the database models.

pub mod sea_orm_active_enums;
pub mod types;

pub mod companies;
pub use companies::Entity as Companies;
pub mod material_suppliers;
pub use material_suppliers::Entity as MaterialSuppliers;
pub mod materials;
pub use materials::Entity as Materials;
pub mod order_items;
pub use order_items::Entity as OrderItems;
pub mod orders;
pub use orders::Entity as Orders;
pub mod products;
pub use products::Entity as Products;
pub mod users;
pub use users::Entity as Users;

/// Generate a prefixed, collision-free identifier (e.g. `ord_y3cgmd4...`).
///
/// Identifiers are application-generated so that no sequence or document
/// count is involved; two concurrent inserts can never collide.
#[must_use]
pub fn new_id(prefix: &str) -> String { format!("{}_{}", prefix, cuid2::cuid()) }

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_new_id_prefix() {
        let id = new_id("prd");
        assert!(id.starts_with("prd_"));
        assert!(id.len() > 10);
    }

    #[test]
    fn test_new_id_unique() {
        let ids: HashSet<String> = (0 .. 100).map(|_| new_id("ord")).collect();
        assert_eq!(ids.len(), 100);
    }
}
