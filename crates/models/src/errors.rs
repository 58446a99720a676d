use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("no such {entity}: {id}")]
    NotFound { entity: &'static str, id: i32 },
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// HTTP-equivalent status marker for callers mapping errors onto responses.
    pub fn status(&self) -> u16 {
        match self {
            ModelError::Validation(_) => 400,
            ModelError::NotFound { .. } => 404,
            ModelError::Db(_) => 500,
        }
    }
}
