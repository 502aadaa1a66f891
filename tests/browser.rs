//! Browser tests for the JavaScript bindings.
//!
//! Run these tests with: wasm-pack test --headless --firefox

#![cfg(target_arch = "wasm32")]

use galois_playground::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_version() {
    let v = version();
    assert!(!v.is_empty());
    assert!(v.contains('.'));
}

#[wasm_bindgen_test]
fn test_transitive_group_name() {
    assert_eq!(
        transitive_group_name(4, 3, 8),
        vec!["D_4".to_string(), r"D_4 \cong C_4 \rtimes C_2".to_string()]
    );
    assert_eq!(transitive_group_name(12, 1, 17)[1], "G_{17}");
}

#[wasm_bindgen_test]
fn test_group_name_from_label_or_structure() {
    assert_eq!(group_name("5T3", 20)[1], r"F_5 \cong C_5 \rtimes C_4");
    assert_eq!(group_name("C7 : C3", 21)[1], r"C_{7} \rtimes C_{3}");
    assert_eq!(group_name("1", 1)[1], r"C_1 \cong \{1\}");
}

#[wasm_bindgen_test]
fn test_format_roots() {
    assert_eq!(
        format_roots(vec![2.0, -2.0, 3.0], vec![], true),
        vec![r"\pm 2.000000".to_string(), "3.000000".to_string()]
    );
    assert_eq!(
        format_roots(vec![1.0, 1.0], vec![2.0, -2.0], false),
        vec!["1.000000 ± 2.000000i".to_string()]
    );
}
