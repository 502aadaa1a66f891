//! The seam to the computer-algebra engine.
//!
//! Factoring, number fields, Galois groups and splitting fields are all
//! computed elsewhere. Implementations of [`AlgebraEngine`] receive the
//! polynomial exactly as the user typed it (trimmed) and are expected to parse
//! it themselves.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::roots::ApproximateComplex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolynomialAnalysis {
    /// Factored form of the polynomial, as printed by the engine.
    pub factored: String,
    pub degree: u32,
    pub irreducible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaloisGroupData {
    /// Engine's own description, e.g. `Galois group 4T3 (D4) with order 8 of x^4 + 1`.
    pub description: String,
    pub order: u64,
    #[serde(default)]
    pub transitive_label: Option<String>,
    #[serde(default)]
    pub structure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplittingFieldData {
    pub field: String,
    pub degree: u64,
    #[serde(default)]
    pub defining_polynomial: Option<String>,
}

pub trait AlgebraEngine {
    /// Parses the polynomial over Q and reports its degree and whether it is
    /// irreducible.
    ///
    /// # Errors
    ///
    /// Returns an error if the polynomial cannot be parsed.
    fn analyze(&self, polynomial: &str) -> Result<PolynomialAnalysis, EngineError>;

    /// # Errors
    ///
    /// Returns an error if the group computation fails.
    fn galois_group(&self, polynomial: &str) -> Result<GaloisGroupData, EngineError>;

    /// Description of the number field `Q[x]/(f)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the field cannot be constructed.
    fn number_field(&self, polynomial: &str) -> Result<String, EngineError>;

    /// All complex roots, in whatever order the engine produces them.
    ///
    /// # Errors
    ///
    /// Returns an error if root isolation fails.
    fn complex_roots(&self, polynomial: &str) -> Result<Vec<ApproximateComplex>, EngineError>;

    /// # Errors
    ///
    /// Returns an error if the splitting field computation fails.
    fn splitting_field(&self, polynomial: &str) -> Result<SplittingFieldData, EngineError>;
}

impl<E: AlgebraEngine + ?Sized> AlgebraEngine for &E {
    fn analyze(&self, polynomial: &str) -> Result<PolynomialAnalysis, EngineError> {
        (**self).analyze(polynomial)
    }

    fn galois_group(&self, polynomial: &str) -> Result<GaloisGroupData, EngineError> {
        (**self).galois_group(polynomial)
    }

    fn number_field(&self, polynomial: &str) -> Result<String, EngineError> {
        (**self).number_field(polynomial)
    }

    fn complex_roots(&self, polynomial: &str) -> Result<Vec<ApproximateComplex>, EngineError> {
        (**self).complex_roots(polynomial)
    }

    fn splitting_field(&self, polynomial: &str) -> Result<SplittingFieldData, EngineError> {
        (**self).splitting_field(polynomial)
    }
}
