//! Request handling for the Galois playground.
//!
//! [`GaloisService`] checks the request, asks the [`AlgebraEngine`] for the
//! heavy lifting and assembles the response. Computation failures do not abort
//! a request: they come back as a response with `computation_successful: false`
//! and the engine's message, which is what the web front end displays. A blank
//! polynomial, an unreadable request body or an unreachable engine is a hard
//! error.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::clock::{round_seconds, Stopwatch};
use crate::config::ServiceConfig;
use crate::engine::{AlgebraEngine, GaloisGroupData, PolynomialAnalysis, SplittingFieldData};
use crate::error::{ConfigError, EngineError, ServiceError};
use crate::group_label::{resolve, CanonicalGroupName, GroupIdentifier};
use crate::roots::format_roots;

const REDUCIBLE_GALOIS: &str = "This polynomial is reducible over Q and does not have a single \
                                Galois group. Consider its irreducible factors instead.";
const REDUCIBLE_SPLITTING_FIELD: &str =
    "This polynomial is reducible over Q. Consider its irreducible factors instead.";
/// How much of an engine error is quoted in a splitting field fallback.
const ERROR_EXCERPT_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolynomialRequest {
    pub polynomial: String,
    #[serde(default)]
    pub compute_splitting_field: Option<bool>,
}

impl PolynomialRequest {
    pub fn new(polynomial: impl Into<String>) -> Self {
        Self {
            polynomial: polynomial.into(),
            compute_splitting_field: None,
        }
    }

    #[must_use]
    pub fn with_splitting_field(mut self) -> Self {
        self.compute_splitting_field = Some(true);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplittingFieldRequest {
    pub polynomial: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    ReduciblePolynomial,
    DegreeTooHigh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaloisGroupInfo {
    pub order: u64,
    pub description: String,
    pub structure: String,
    /// Annotated LaTeX name, e.g. `S_3 \cong D_3`.
    pub explicit: String,
    /// Short display name, e.g. `S_3`.
    pub name: String,
}

impl GaloisGroupInfo {
    fn new(group: GaloisGroupData, name: CanonicalGroupName) -> Self {
        let structure = group
            .structure
            .unwrap_or_else(|| group.description.clone());
        Self {
            order: group.order,
            description: group.description,
            structure,
            explicit: name.latex().to_string(),
            name: name.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplittingFieldInfo {
    pub field: String,
    pub degree: Option<u64>,
    pub defining_polynomial: Option<String>,
    pub description: String,
    pub computed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SplittingFieldInfo {
    fn computed(data: SplittingFieldData, polynomial: &str) -> Self {
        Self {
            field: data.field,
            degree: Some(data.degree),
            defining_polynomial: data.defining_polynomial,
            description: format!("The splitting field of {polynomial} over ℚ"),
            computed: true,
            error: None,
        }
    }

    /// Stand-in when the engine gives up. The group order is reported as the
    /// degree, since the splitting field has degree `|Gal(f)|` over Q.
    fn failed(group_order: u64, err: &EngineError) -> Self {
        let message = err.to_string();
        let excerpt: String = message.chars().take(ERROR_EXCERPT_CHARS).collect();
        Self {
            field: "Splitting field computation failed".to_string(),
            degree: Some(group_order),
            defining_polynomial: None,
            description: format!("Unable to compute splitting field. Error: {excerpt}..."),
            computed: false,
            error: Some(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationResponse {
    pub polynomial: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub galois_group: Option<GaloisGroupInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splitting_field: Option<SplittingFieldInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roots: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_irreducible: Option<bool>,
    pub computation_successful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computation_time_seconds: Option<f64>,
}

impl ComputationResponse {
    fn failed(polynomial: &str, error: impl Into<String>) -> Self {
        Self {
            polynomial: polynomial.to_string(),
            degree: None,
            galois_group: None,
            splitting_field: None,
            roots: None,
            number_field: None,
            is_irreducible: None,
            computation_successful: false,
            error: Some(error.into()),
            error_type: None,
            computation_time_seconds: None,
        }
    }

    fn rejected(analysis: PolynomialAnalysis, error_type: ErrorType, error: String) -> Self {
        Self {
            degree: Some(analysis.degree),
            is_irreducible: Some(analysis.irreducible),
            error_type: Some(error_type),
            ..Self::failed(&analysis.factored, error)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplittingFieldResponse {
    pub polynomial: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splitting_field: Option<SplittingFieldInfo>,
    pub computation_successful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computation_time_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub max_polynomial_degree: u32,
    pub supported_features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfTestStatus {
    /// The self-test polynomial was computed successfully.
    Passed,
    /// The engine answered but the computation was unsuccessful.
    Failed,
    /// The algebra engine could not be reached.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfTestReport {
    pub status: SelfTestStatus,
    pub computation_time_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_result: Option<ComputationResponse>,
}

pub struct GaloisService<E> {
    engine: E,
    config: ServiceConfig,
}

impl<E: AlgebraEngine> GaloisService<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            config: ServiceConfig::default(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn with_config(engine: E, config: ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { engine, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Computes the Galois group, roots and, if asked for, the splitting field.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::EmptyPolynomial`] for a blank polynomial and
    /// [`ServiceError::Engine`] if the engine is unavailable. Other engine
    /// failures are reported inside the response instead.
    #[instrument(skip_all, fields(polynomial = %request.polynomial.trim()))]
    pub fn compute_galois(
        &self,
        request: &PolynomialRequest,
    ) -> Result<ComputationResponse, ServiceError> {
        let polynomial = non_empty(&request.polynomial)?;
        let with_splitting_field = request.compute_splitting_field.unwrap_or(false);
        let watch = Stopwatch::start();

        let mut response = match self.galois_report(polynomial, with_splitting_field) {
            Ok(response) => response,
            Err(err @ EngineError::Unavailable(_)) => {
                error!(error = %err, "algebra engine unavailable");
                return Err(err.into());
            }
            Err(err) => {
                warn!(error = %err, "galois computation failed");
                ComputationResponse::failed(polynomial, err.to_string())
            }
        };
        if response.computation_successful {
            let seconds = round_seconds(watch.elapsed_seconds());
            info!(seconds, "galois computation finished");
            response.computation_time_seconds = Some(seconds);
        }
        Ok(response)
    }

    /// # Errors
    ///
    /// Returns [`ServiceError::EmptyPolynomial`] for a blank polynomial and
    /// [`ServiceError::Engine`] if the engine is unavailable.
    #[instrument(skip_all, fields(polynomial = %request.polynomial.trim()))]
    pub fn compute_splitting_field(
        &self,
        request: &SplittingFieldRequest,
    ) -> Result<SplittingFieldResponse, ServiceError> {
        let polynomial = non_empty(&request.polynomial)?;
        let watch = Stopwatch::start();

        let analysis = match self.engine.analyze(polynomial) {
            Ok(analysis) => analysis,
            Err(err @ EngineError::Unavailable(_)) => {
                error!(error = %err, "algebra engine unavailable");
                return Err(err.into());
            }
            Err(err) => {
                warn!(error = %err, "could not analyze polynomial");
                return Ok(SplittingFieldResponse::failed(polynomial, err.to_string(), None));
            }
        };
        if let Some((error_type, message)) = self.reject(
            &analysis,
            REDUCIBLE_SPLITTING_FIELD,
            splitting_field_degree_message,
        ) {
            return Ok(SplittingFieldResponse::failed(
                &analysis.factored,
                message,
                Some(error_type),
            ));
        }

        match self.engine.splitting_field(polynomial) {
            Ok(data) => {
                let seconds = round_seconds(watch.elapsed_seconds());
                info!(seconds, degree = data.degree, "splitting field computed");
                Ok(SplittingFieldResponse {
                    polynomial: analysis.factored,
                    splitting_field: Some(SplittingFieldInfo::computed(data, polynomial)),
                    computation_successful: true,
                    error: None,
                    error_type: None,
                    computation_time_seconds: Some(seconds),
                })
            }
            Err(err @ EngineError::Unavailable(_)) => {
                error!(error = %err, "algebra engine unavailable");
                Err(err.into())
            }
            Err(err) => {
                warn!(error = %err, "splitting field computation failed");
                Ok(SplittingFieldResponse::failed(
                    &analysis.factored,
                    format!("Failed to compute splitting field: {err}"),
                    None,
                ))
            }
        }
    }

    /// JSON in, JSON out, for callers that only speak strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a valid request or the polynomial
    /// is blank.
    pub fn compute_galois_json(&self, body: &str) -> Result<String, ServiceError> {
        let request: PolynomialRequest =
            serde_json::from_str(body).map_err(ServiceError::BadRequest)?;
        let response = self.compute_galois(&request)?;
        serde_json::to_string(&response).map_err(ServiceError::Serialization)
    }

    /// # Errors
    ///
    /// Returns an error if the body is not a valid request or the polynomial
    /// is blank.
    pub fn compute_splitting_field_json(&self, body: &str) -> Result<String, ServiceError> {
        let request: SplittingFieldRequest =
            serde_json::from_str(body).map_err(ServiceError::BadRequest)?;
        let response = self.compute_splitting_field(&request)?;
        serde_json::to_string(&response).map_err(ServiceError::Serialization)
    }

    pub fn info(&self) -> ServiceInfo {
        let max = self.config.max_degree;
        ServiceInfo {
            message: "Galois Playground API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            max_polynomial_degree: max,
            supported_features: vec![
                "Galois group computation for irreducible polynomials".to_string(),
                "Polynomial root calculation".to_string(),
                "LaTeX group notation formatting".to_string(),
                "Optional splitting field computation".to_string(),
                "Separate API for splitting field calculations".to_string(),
                format!("Degree 1-{max} polynomials supported"),
            ],
        }
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Runs the configured self-test polynomial through the whole pipeline.
    pub fn self_test(&self) -> SelfTestReport {
        let watch = Stopwatch::start();
        let request = PolynomialRequest::new(self.config.self_test_polynomial.as_str());
        let outcome = self.compute_galois(&request);
        let computation_time_seconds = round_seconds(watch.elapsed_seconds());

        match outcome {
            Ok(response) if response.computation_successful => SelfTestReport {
                status: SelfTestStatus::Passed,
                computation_time_seconds,
                error: None,
                test_result: Some(response),
            },
            Ok(response) => SelfTestReport {
                status: SelfTestStatus::Failed,
                computation_time_seconds,
                error: response.error.clone(),
                test_result: Some(response),
            },
            Err(err) => SelfTestReport {
                status: SelfTestStatus::Unavailable,
                computation_time_seconds,
                error: Some(err.to_string()),
                test_result: None,
            },
        }
    }

    fn galois_report(
        &self,
        polynomial: &str,
        with_splitting_field: bool,
    ) -> Result<ComputationResponse, EngineError> {
        let analysis = self.engine.analyze(polynomial)?;
        if let Some((error_type, message)) =
            self.reject(&analysis, REDUCIBLE_GALOIS, galois_degree_message)
        {
            return Ok(ComputationResponse::rejected(analysis, error_type, message));
        }

        let group = self.engine.galois_group(polynomial)?;
        let identifier = GroupIdentifier::from_engine(
            group.transitive_label.as_deref(),
            &group.description,
            group.structure.as_deref(),
            group.order,
        );
        let name = resolve(&identifier);
        debug!(?identifier, name = name.name(), "resolved group name");

        let number_field = self.engine.number_field(polynomial)?;
        let roots = self.engine.complex_roots(polynomial)?;
        let roots = format_roots(&roots, self.config.root_style);

        let splitting_field = with_splitting_field.then(|| {
            self.engine
                .splitting_field(polynomial)
                .map_or_else(
                    |err| {
                        warn!(error = %err, "splitting field computation failed");
                        SplittingFieldInfo::failed(group.order, &err)
                    },
                    |data| SplittingFieldInfo::computed(data, polynomial),
                )
        });

        Ok(ComputationResponse {
            polynomial: analysis.factored,
            degree: Some(analysis.degree),
            galois_group: Some(GaloisGroupInfo::new(group, name)),
            splitting_field,
            roots: Some(roots),
            number_field: Some(number_field),
            is_irreducible: Some(true),
            computation_successful: true,
            error: None,
            error_type: None,
            computation_time_seconds: None,
        })
    }

    fn reject(
        &self,
        analysis: &PolynomialAnalysis,
        reducible_message: &str,
        degree_message: fn(u32) -> String,
    ) -> Option<(ErrorType, String)> {
        let max = self.config.max_degree;
        if !analysis.irreducible {
            Some((ErrorType::ReduciblePolynomial, reducible_message.to_string()))
        } else if analysis.degree > max {
            Some((ErrorType::DegreeTooHigh, degree_message(max)))
        } else {
            None
        }
    }
}

fn galois_degree_message(max: u32) -> String {
    format!(
        "Polynomials of degree {} or higher are not supported. Galois group computations for \
         high-degree polynomials can be extremely time-intensive. Please try a polynomial of \
         degree {max} or lower.",
        max + 1
    )
}

fn splitting_field_degree_message(max: u32) -> String {
    format!(
        "Polynomials of degree {} or higher are not supported for splitting field computation.",
        max + 1
    )
}

impl SplittingFieldResponse {
    fn failed(polynomial: &str, error: String, error_type: Option<ErrorType>) -> Self {
        Self {
            polynomial: polynomial.to_string(),
            splitting_field: None,
            computation_successful: false,
            error: Some(error),
            error_type,
            computation_time_seconds: None,
        }
    }
}

fn non_empty(polynomial: &str) -> Result<&str, ServiceError> {
    let polynomial = polynomial.trim();
    if polynomial.is_empty() {
        return Err(ServiceError::EmptyPolynomial);
    }
    Ok(polynomial)
}
