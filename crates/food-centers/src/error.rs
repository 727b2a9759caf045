use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoodCenterError {
    #[error("Query error: {0}")]
    QueryError(#[from] crate::query::QueryError),
    #[error("Food center not found: {0}")]
    NotFound(String),
    #[error("Duplicate food center id: {0}")]
    DuplicateId(String),
    #[error("Data error: {0}")]
    DataError(#[from] food_centers_data::DataError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),
}

pub type Result<T> = std::result::Result<T, FoodCenterError>;
