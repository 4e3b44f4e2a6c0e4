use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Invalid generator parameter: {0}")]
    InvalidParameter(String),

    #[error("Weighted choice could not be built: {0}")]
    Weights(String),
}

impl From<rand::distributions::WeightedError> for GeneratorError {
    fn from(error: rand::distributions::WeightedError) -> Self {
        GeneratorError::Weights(error.to_string())
    }
}
