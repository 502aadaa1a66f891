use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::group_label::MAX_TABLE_DEGREE;
use crate::roots::RootStyle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Highest polynomial degree accepted. Capped by the transitive group
    /// table, since higher degrees would have no label to resolve.
    pub max_degree: u32,
    pub root_style: RootStyle,
    pub self_test_polynomial: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_degree: MAX_TABLE_DEGREE,
            root_style: RootStyle::Latex,
            self_test_polynomial: "x^2 - 2".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Reads a configuration from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if `max_degree` is outside `1..=11` or the self-test
    /// polynomial is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TABLE_DEGREE).contains(&self.max_degree) {
            return Err(ConfigError::MaxDegree {
                value: self.max_degree,
                limit: MAX_TABLE_DEGREE,
            });
        }
        if self.self_test_polynomial.trim().is_empty() {
            return Err(ConfigError::EmptySelfTest);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_json("{}").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.max_degree, 11);
        assert_eq!(config.root_style, RootStyle::Latex);
    }

    #[test]
    fn test_partial_override() {
        let config = ServiceConfig::from_json(r#"{"max_degree": 6, "root_style": "plain"}"#).unwrap();
        assert_eq!(config.max_degree, 6);
        assert_eq!(config.root_style, RootStyle::Plain);
        assert_eq!(config.self_test_polynomial, "x^2 - 2");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ServiceConfig::from_json(r#"{"max_degree": 12}"#),
            Err(ConfigError::MaxDegree { value: 12, limit: 11 })
        ));
        assert!(matches!(
            ServiceConfig::from_json(r#"{"max_degree": 0}"#),
            Err(ConfigError::MaxDegree { .. })
        ));
        assert!(matches!(
            ServiceConfig::from_json(r#"{"self_test_polynomial": "  "}"#),
            Err(ConfigError::EmptySelfTest)
        ));
        assert!(matches!(
            ServiceConfig::from_json(r#"{"port": 8001}"#),
            Err(ConfigError::Json(_))
        ));
    }
}
