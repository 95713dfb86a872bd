//! Domain entities for the storefront catalog and its user accounts, plus the
//! document validation rules enforced on every write path.

pub mod errors;
pub mod product;
pub mod user;
