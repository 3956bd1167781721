//! Service layer for the product catalog.
//! - `catalog` owns the in-memory product collection and its CRUD rules.
//! - Errors are typed; the HTTP layer decides status codes.

pub mod catalog;
pub mod errors;
