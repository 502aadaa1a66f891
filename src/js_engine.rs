use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::engine::{AlgebraEngine, GaloisGroupData, PolynomialAnalysis, SplittingFieldData};
use crate::error::EngineError;
use crate::roots::ApproximateComplex;

#[wasm_bindgen]
extern "C" {
    /// An algebra engine living on the JavaScript side, typically a thin
    /// client for a CAS server. Every method takes the polynomial string and
    /// returns the result as a JSON string, or throws. `numberField` returns
    /// plain text.
    pub type JsAlgebraEngine;

    #[wasm_bindgen(method, catch, js_name = analyze)]
    fn js_analyze(this: &JsAlgebraEngine, polynomial: &str) -> Result<String, JsValue>;

    #[wasm_bindgen(method, catch, js_name = galoisGroup)]
    fn js_galois_group(this: &JsAlgebraEngine, polynomial: &str) -> Result<String, JsValue>;

    #[wasm_bindgen(method, catch, js_name = numberField)]
    fn js_number_field(this: &JsAlgebraEngine, polynomial: &str) -> Result<String, JsValue>;

    #[wasm_bindgen(method, catch, js_name = complexRoots)]
    fn js_complex_roots(this: &JsAlgebraEngine, polynomial: &str) -> Result<String, JsValue>;

    #[wasm_bindgen(method, catch, js_name = splittingField)]
    fn js_splitting_field(this: &JsAlgebraEngine, polynomial: &str) -> Result<String, JsValue>;
}

fn decode<T: DeserializeOwned>(reply: Result<String, JsValue>) -> Result<T, EngineError> {
    let json = reply.map_err(|err| engine_error(&err))?;
    serde_json::from_str(&json).map_err(|err| EngineError::InvalidResponse(err.to_string()))
}

/// A `TypeError` means the engine object is missing or lacks the method, so
/// nothing was computed.
fn engine_error(value: &JsValue) -> EngineError {
    if value.is_instance_of::<js_sys::TypeError>() {
        EngineError::Unavailable(js_message(value))
    } else {
        EngineError::Computation(js_message(value))
    }
}

fn js_message(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    value
        .dyn_ref::<js_sys::Error>()
        .map_or_else(|| format!("{value:?}"), |err| err.message().into())
}

impl AlgebraEngine for JsAlgebraEngine {
    fn analyze(&self, polynomial: &str) -> Result<PolynomialAnalysis, EngineError> {
        decode(self.js_analyze(polynomial))
    }

    fn galois_group(&self, polynomial: &str) -> Result<GaloisGroupData, EngineError> {
        decode(self.js_galois_group(polynomial))
    }

    fn number_field(&self, polynomial: &str) -> Result<String, EngineError> {
        self.js_number_field(polynomial)
            .map_err(|err| engine_error(&err))
    }

    fn complex_roots(&self, polynomial: &str) -> Result<Vec<ApproximateComplex>, EngineError> {
        decode(self.js_complex_roots(polynomial))
    }

    fn splitting_field(&self, polynomial: &str) -> Result<SplittingFieldData, EngineError> {
        decode(self.js_splitting_field(polynomial))
    }
}
