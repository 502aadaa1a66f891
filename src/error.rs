use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupIdError {
    #[error("expected a transitive group label like 4T3, got `{0}`")]
    Malformed(String),
    #[error("transitive group labels start at 1T1, got `{0}`")]
    Zero(String),
}

/// Failures reported by the algebra engine. The message is passed through to
/// the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("could not parse polynomial: {0}")]
    Parse(String),
    #[error("{0}")]
    Computation(String),
    #[error("engine returned malformed data: {0}")]
    InvalidResponse(String),
    #[error("algebra engine unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("max_degree must be between 1 and {limit}, got {value}")]
    MaxDegree { value: u32, limit: u32 },
    #[error("self_test_polynomial must not be empty")]
    EmptySelfTest,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Polynomial cannot be empty")]
    EmptyPolynomial,
    #[error("invalid request: {0}")]
    BadRequest(#[source] serde_json::Error),
    #[error("Computation failed: {0}")]
    Engine(#[from] EngineError),
    #[error("Computation failed: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ServiceError {
    /// HTTP status a web front end should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::EmptyPolynomial | Self::BadRequest(_) => 400,
            Self::Engine(_) | Self::Serialization(_) | Self::Config(_) => 500,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EmptyPolynomial => "empty_polynomial",
            Self::BadRequest(_) => "bad_request",
            Self::Engine(_) => "engine",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ServiceError::EmptyPolynomial.status_code(), 400);
        let engine = ServiceError::from(EngineError::Computation("PARI stack overflow".into()));
        assert_eq!(engine.status_code(), 500);
        assert_eq!(engine.to_string(), "Computation failed: PARI stack overflow");
        let config = ServiceError::from(ConfigError::EmptySelfTest);
        assert_eq!(config.status_code(), 500);
        assert_eq!(config.kind(), "config");
    }
}
