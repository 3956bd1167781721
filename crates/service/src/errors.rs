use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("seed error: {0}")]
    Seed(String),
    #[error("product id space exhausted")]
    IdsExhausted,
}

impl ServiceError {
    pub fn not_found(entity: &str, id: u64) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }

    pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }
}
