//! Product catalog: domain types, storage seam, in-memory store and the
//! service that the HTTP layer talks to.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod seed;
pub mod service;

pub use configs::IdStrategy;
pub use domain::{Product, ProductInput, ProductPatch};
pub use memory::InMemoryProductStore;
pub use repository::ProductRepository;
pub use service::ProductService;
