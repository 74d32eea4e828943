use thiserror::Error;

#[derive(Error, Debug)]
pub enum AskError {
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("product id must be positive, got {0}")]
    InvalidProductId(i64),

    #[error("product {0} not found")]
    ProductNotFound(i64),

    #[error("catalog error: {0}")]
    Catalog(anyhow::Error),
}
