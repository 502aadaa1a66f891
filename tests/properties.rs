//! Property tests for root pairing and group name resolution.

use galois_playground::group_label::{
    resolve, transitive_group_count, GroupIdentifier, TransitiveGroupId, MAX_TABLE_DEGREE,
};
use galois_playground::roots::{format_roots, pair_roots, ApproximateComplex, RootStyle};
use proptest::prelude::*;

fn root() -> impl Strategy<Value = ApproximateComplex> {
    prop_oneof![
        (-100.0..100.0f64).prop_map(ApproximateComplex::real),
        (-100.0..100.0f64, -100.0..100.0f64).prop_map(|(re, im)| ApproximateComplex::new(re, im)),
    ]
}

/// Roots that are pairwise far apart and never each other's negative or
/// conjugate: distinct positive reals.
fn unpairable() -> impl Strategy<Value = Vec<ApproximateComplex>> {
    prop::collection::vec(1u32..10_000, 0..12).prop_map(|mut ints| {
        ints.sort_unstable();
        ints.dedup();
        ints.into_iter()
            .map(|n| ApproximateComplex::real(f64::from(n)))
            .collect()
    })
}

proptest! {
    /// Every root lands in exactly one group.
    #[test]
    fn prop_pairing_is_total(roots in prop::collection::vec(root(), 0..16)) {
        let pairing = pair_roots(&roots);
        let mut seen = vec![0u32; roots.len()];
        for group in pairing.groups() {
            seen[group.leader()] += 1;
            if let Some(partner) = group.partner() {
                prop_assert!(partner > group.leader());
                seen[partner] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&count| count == 1));
        prop_assert_eq!(pairing.len() + pairing.pair_count(), roots.len());
    }

    /// One output string per group.
    #[test]
    fn prop_output_matches_pairing(roots in prop::collection::vec(root(), 0..16)) {
        let formatted = format_roots(&roots, RootStyle::Latex);
        prop_assert_eq!(formatted.len(), roots.len() - pair_roots(&roots).pair_count());
    }

    #[test]
    fn prop_formatting_is_deterministic(roots in prop::collection::vec(root(), 0..16)) {
        prop_assert_eq!(
            format_roots(&roots, RootStyle::Latex),
            format_roots(&roots, RootStyle::Latex)
        );
    }

    #[test]
    fn prop_unpairable_roots_stay_single(roots in unpairable()) {
        prop_assert_eq!(format_roots(&roots, RootStyle::Plain).len(), roots.len());
    }

    /// Mirrored real roots always collapse into `±` pairs.
    #[test]
    fn prop_mirrored_reals_pair(values in prop::collection::vec(1u32..10_000, 1..8)) {
        let mut roots = Vec::new();
        for &v in &values {
            roots.push(ApproximateComplex::real(f64::from(v)));
            roots.push(ApproximateComplex::real(-f64::from(v)));
        }
        let formatted = format_roots(&roots, RootStyle::Latex);
        prop_assert_eq!(formatted.len(), values.len());
        prop_assert!(formatted.iter().all(|s| s.starts_with(r"\pm ")));
    }

    /// Resolution never fails and always produces something printable.
    #[test]
    fn prop_resolve_is_total(degree in 0u32..20, index in 0u32..60, order in 1u64..100_000) {
        let name = resolve(&GroupIdentifier::structured(TransitiveGroupId::new(degree, index), order));
        prop_assert!(!name.latex().is_empty());
        prop_assert!(!name.name().is_empty());
        if order == 2 {
            let annotated = name.latex().contains(r"\mathbb{Z}/2\mathbb{Z}");
            prop_assert!(annotated, "order 2 should be annotated, got {}", name.latex());
        }
        let tabulated = transitive_group_count(degree)
            .is_some_and(|count| index >= 1 && index as usize <= count);
        if !tabulated && order > 2 {
            prop_assert_eq!(name.latex(), format!("G_{{{order}}}"));
        }
    }

    #[test]
    fn prop_free_form_is_total(text in "[CDSAQx: 0-9()]{0,20}", order in 1u64..1000) {
        let name = resolve(&GroupIdentifier::free_form(text, order));
        prop_assert!(!name.latex().is_empty());
    }
}

#[test]
fn test_order_two_everywhere_in_table() {
    for degree in 1..=MAX_TABLE_DEGREE {
        let count = transitive_group_count(degree).unwrap_or(0);
        for index in 1..=count as u32 {
            let name = resolve(&GroupIdentifier::structured(
                TransitiveGroupId::new(degree, index),
                2,
            ));
            assert!(name.latex().contains(r"\mathbb{Z}/2\mathbb{Z}"));
        }
    }
}
