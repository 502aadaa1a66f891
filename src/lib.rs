#![allow(clippy::module_name_repetitions)]
use wasm_bindgen::prelude::*;

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod group_label;
pub mod js_engine;
pub mod roots;
pub mod service;

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::group_label::{resolve, CanonicalGroupName, GroupIdentifier, TransitiveGroupId};
use crate::js_engine::JsAlgebraEngine;
use crate::roots::{ApproximateComplex, RootStyle};
use crate::service::{GaloisService, PolynomialRequest, SplittingFieldRequest};

impl From<ServiceError> for JsValue {
    fn from(err: ServiceError) -> Self {
        let obj = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&obj, &"kind".into(), &err.kind().into());
        let _ = js_sys::Reflect::set(&obj, &"message".into(), &err.to_string().into());
        let _ = js_sys::Reflect::set(&obj, &"status".into(), &err.status_code().into());
        obj.into()
    }
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// wasm-bindgen can't return tuples, so names come back as [name, latex].
fn name_pair(name: &CanonicalGroupName) -> Vec<String> {
    vec![name.name().to_string(), name.latex().to_string()]
}

/// Name of the transitive group `<degree>T<index>`, as `[name, latex]`.
#[wasm_bindgen(js_name = transitiveGroupName)]
#[must_use]
pub fn transitive_group_name(degree: u32, index: u32, order: u32) -> Vec<String> {
    let identifier =
        GroupIdentifier::structured(TransitiveGroupId::new(degree, index), u64::from(order));
    name_pair(&resolve(&identifier))
}

/// Name of a group given either a label like `4T3` or a structure
/// description like `C4 x C2`, as `[name, latex]`.
#[wasm_bindgen(js_name = groupName)]
#[must_use]
pub fn group_name(label_or_structure: &str, order: u32) -> Vec<String> {
    let identifier = GroupIdentifier::from_engine(
        Some(label_or_structure),
        "",
        Some(label_or_structure),
        u64::from(order),
    );
    name_pair(&resolve(&identifier))
}

/// Formats roots given as parallel arrays of real and imaginary parts. A
/// missing imaginary part is taken as zero.
#[wasm_bindgen(js_name = formatRoots)]
#[allow(clippy::needless_pass_by_value)]
#[must_use]
pub fn format_roots(real: Vec<f64>, imag: Vec<f64>, latex: bool) -> Vec<String> {
    let values: Vec<ApproximateComplex> = real
        .iter()
        .enumerate()
        .map(|(i, &re)| ApproximateComplex::new(re, imag.get(i).copied().unwrap_or(0.0)))
        .collect();
    let style = if latex { RootStyle::Latex } else { RootStyle::Plain };
    roots::format_roots(&values, style)
}

/// The playground backend, driving a JavaScript algebra engine.
///
/// ```javascript
/// const playground = new Playground(engine, '{"max_degree": 8}');
/// const reply = JSON.parse(playground.computeGalois('{"polynomial": "x^3 - 2"}'));
/// console.log(reply.galois_group.explicit); // S_3 \cong D_3
/// ```
#[wasm_bindgen]
pub struct Playground {
    service: GaloisService<JsAlgebraEngine>,
}

#[wasm_bindgen]
impl Playground {
    /// # Errors
    ///
    /// Throws if `config` is not a valid configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(engine: JsAlgebraEngine, config: Option<String>) -> Result<Playground, JsValue> {
        let config = match config {
            Some(json) => ServiceConfig::from_json(&json).map_err(ServiceError::from)?,
            None => ServiceConfig::default(),
        };
        let service = GaloisService::with_config(engine, config).map_err(ServiceError::from)?;
        Ok(Self { service })
    }

    /// Takes and returns JSON, see [`PolynomialRequest`] and
    /// [`service::ComputationResponse`].
    ///
    /// # Errors
    ///
    /// Throws `{kind, message, status}` for a malformed request or a blank
    /// polynomial.
    #[wasm_bindgen(js_name = computeGalois)]
    pub fn compute_galois(&self, request: &str) -> Result<String, JsValue> {
        Ok(self.service.compute_galois_json(request)?)
    }

    /// Takes and returns JSON, see [`SplittingFieldRequest`].
    ///
    /// # Errors
    ///
    /// Throws `{kind, message, status}` for a malformed request or a blank
    /// polynomial.
    #[wasm_bindgen(js_name = computeSplittingField)]
    pub fn compute_splitting_field(&self, request: &str) -> Result<String, JsValue> {
        Ok(self.service.compute_splitting_field_json(request)?)
    }

    /// Same as `computeGalois` for a bare polynomial string.
    ///
    /// # Errors
    ///
    /// Throws for a blank polynomial.
    #[wasm_bindgen(js_name = galoisOf)]
    pub fn galois_of(&self, polynomial: &str, splitting_field: bool) -> Result<String, JsValue> {
        let request = PolynomialRequest {
            polynomial: polynomial.to_string(),
            compute_splitting_field: Some(splitting_field),
        };
        let response = self.service.compute_galois(&request)?;
        Ok(to_json(&response)?)
    }

    /// Same as `computeSplittingField` for a bare polynomial string.
    ///
    /// # Errors
    ///
    /// Throws for a blank polynomial.
    #[wasm_bindgen(js_name = splittingFieldOf)]
    pub fn splitting_field_of(&self, polynomial: &str) -> Result<String, JsValue> {
        let request = SplittingFieldRequest {
            polynomial: polynomial.to_string(),
        };
        let response = self.service.compute_splitting_field(&request)?;
        Ok(to_json(&response)?)
    }

    /// # Errors
    ///
    /// Throws if serialization fails.
    pub fn info(&self) -> Result<String, JsValue> {
        Ok(to_json(&self.service.info())?)
    }

    /// # Errors
    ///
    /// Throws if serialization fails.
    pub fn health(&self) -> Result<String, JsValue> {
        Ok(to_json(&self.service.health())?)
    }

    /// # Errors
    ///
    /// Throws if serialization fails.
    #[wasm_bindgen(js_name = selfTest)]
    pub fn self_test(&self) -> Result<String, JsValue> {
        Ok(to_json(&self.service.self_test())?)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ServiceError> {
    serde_json::to_string(value).map_err(ServiceError::Serialization)
}
