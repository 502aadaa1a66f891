//! Pairing and printing of approximate polynomial roots.
//!
//! Roots come from the algebra engine in no particular order. A single
//! left-to-right scan pairs each real root with its negative and each complex
//! root with its conjugate, so that e.g. the four roots of `x^4 - 5x^2 + 6`
//! print as `\pm 1.414214` and `\pm 1.732051`.
//!
//! The scan always takes the first unconsumed candidate, not the closest one,
//! so the output depends on input order when several candidates qualify.

use std::fmt;

use auto_ops::impl_op_ex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Below this magnitude a real or imaginary part counts as zero.
pub const ZERO_TOLERANCE: f64 = 1e-10;
/// Two roots match when their parts agree to within this.
pub const PAIR_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ApproximateComplex {
    pub re: f64,
    pub im: f64,
}

impl ApproximateComplex {
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[must_use]
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    #[must_use]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    #[must_use]
    pub fn is_real(self) -> bool {
        self.im.abs() < ZERO_TOLERANCE
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    fn is_close(self, other: Self) -> bool {
        let diff = self - other;
        diff.re.abs() < PAIR_TOLERANCE && diff.im.abs() < PAIR_TOLERANCE
    }
}

impl_op_ex!(-|a: &ApproximateComplex| -> ApproximateComplex {
    ApproximateComplex::new(-a.re, -a.im)
});
impl_op_ex!(+|a: &ApproximateComplex, b: &ApproximateComplex| -> ApproximateComplex {
    ApproximateComplex::new(a.re + b.re, a.im + b.im)
});
impl_op_ex!(-|a: &ApproximateComplex, b: &ApproximateComplex| -> ApproximateComplex {
    ApproximateComplex::new(a.re - b.re, a.im - b.im)
});

impl fmt::Display for ApproximateComplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:+}i", self.re, self.im)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootStyle {
    /// `\pm 2.000000`
    #[default]
    Latex,
    /// `±2.000000`
    Plain,
}

impl RootStyle {
    const fn leading_pm(self) -> &'static str {
        match self {
            Self::Latex => r"\pm ",
            Self::Plain => "±",
        }
    }

    const fn infix_pm(self) -> &'static str {
        match self {
            Self::Latex => r" \pm ",
            Self::Plain => " ± ",
        }
    }
}

/// One group of the pairing, holding indices into the input slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootGroup {
    /// A real root `r` and a later root `-r`.
    PlusMinus(usize, usize),
    /// A complex root and a later conjugate.
    Conjugate(usize, usize),
    Single(usize),
}

impl RootGroup {
    /// Index of the root that opened the group.
    #[must_use]
    pub const fn leader(self) -> usize {
        match self {
            Self::PlusMinus(i, _) | Self::Conjugate(i, _) | Self::Single(i) => i,
        }
    }

    #[must_use]
    pub const fn partner(self) -> Option<usize> {
        match self {
            Self::PlusMinus(_, j) | Self::Conjugate(_, j) => Some(j),
            Self::Single(_) => None,
        }
    }
}

/// A partition of a root list into pairs and singletons, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RootPairing {
    groups: Vec<RootGroup>,
}

impl RootPairing {
    #[must_use]
    pub fn groups(&self) -> &[RootGroup] {
        &self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.groups.iter().filter(|g| g.partner().is_some()).count()
    }
}

#[must_use]
pub fn pair_roots(roots: &[ApproximateComplex]) -> RootPairing {
    let mut consumed = vec![false; roots.len()];
    let mut groups = Vec::with_capacity(roots.len());

    for (i, root) in roots.iter().enumerate() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;

        let is_partner = |other: &ApproximateComplex| {
            if root.is_real() {
                other.is_real() && (root + other).re.abs() < PAIR_TOLERANCE
            } else {
                root.conj().is_close(*other)
            }
        };
        let partner = (i + 1..roots.len()).find(|&j| !consumed[j] && is_partner(&roots[j]));

        let group = match partner {
            Some(j) if root.is_real() => RootGroup::PlusMinus(i, j),
            Some(j) => RootGroup::Conjugate(i, j),
            None => RootGroup::Single(i),
        };
        if let Some(j) = partner {
            consumed[j] = true;
        }
        groups.push(group);
    }

    RootPairing { groups }
}

/// Pairs up `roots` and renders one string per group.
#[must_use]
pub fn format_roots(roots: &[ApproximateComplex], style: RootStyle) -> Vec<String> {
    pair_roots(roots)
        .groups()
        .iter()
        .map(|&group| {
            let root = roots[group.leader()];
            format_group(root, group, style).unwrap_or_else(|| {
                warn!(%root, "root cannot be formatted, using raw representation");
                root.to_string()
            })
        })
        .collect()
}

fn format_group(root: ApproximateComplex, group: RootGroup, style: RootStyle) -> Option<String> {
    if !root.is_finite() {
        return None;
    }
    let formatted = match group {
        RootGroup::PlusMinus(..) => format!("{}{:.6}", style.leading_pm(), root.re.abs()),
        RootGroup::Conjugate(..) if root.re.abs() < ZERO_TOLERANCE => {
            format!("{}{:.6}i", style.leading_pm(), root.im.abs())
        }
        RootGroup::Conjugate(..) => {
            format!("{:.6}{}{:.6}i", root.re, style.infix_pm(), root.im.abs())
        }
        RootGroup::Single(_) if root.is_real() => format!("{:.6}", root.re),
        RootGroup::Single(_) if root.re.abs() < ZERO_TOLERANCE => format!("{:.6}i", root.im),
        RootGroup::Single(_) => format!("{:.6} + {:.6}i", root.re, root.im),
    };
    Some(formatted)
}

#[cfg(test)]
mod test {
    use super::*;

    fn c(re: f64, im: f64) -> ApproximateComplex {
        ApproximateComplex::new(re, im)
    }

    fn latex(roots: &[ApproximateComplex]) -> Vec<String> {
        format_roots(roots, RootStyle::Latex)
    }

    #[test]
    fn test_plus_minus_pair() {
        let roots = [ApproximateComplex::real(2.0), ApproximateComplex::real(-2.0)];
        assert_eq!(latex(&roots), vec![r"\pm 2.000000"]);
        assert_eq!(format_roots(&roots, RootStyle::Plain), vec!["±2.000000"]);
    }

    #[test]
    fn test_plus_minus_uses_absolute_value() {
        let roots = [ApproximateComplex::real(-1.5), ApproximateComplex::real(1.5)];
        assert_eq!(latex(&roots), vec![r"\pm 1.500000"]);
    }

    #[test]
    fn test_conjugate_pair() {
        assert_eq!(latex(&[c(1.0, 2.0), c(1.0, -2.0)]), vec![r"1.000000 \pm 2.000000i"]);
        assert_eq!(
            format_roots(&[c(1.0, -2.0), c(1.0, 2.0)], RootStyle::Plain),
            vec!["1.000000 ± 2.000000i"]
        );
    }

    #[test]
    fn test_purely_imaginary_pair() {
        assert_eq!(latex(&[c(0.0, -3.0), c(0.0, 3.0)]), vec![r"\pm 3.000000i"]);
    }

    #[test]
    fn test_singletons() {
        assert_eq!(latex(&[ApproximateComplex::real(3.0)]), vec!["3.000000"]);
        assert_eq!(latex(&[c(0.0, 2.5)]), vec!["2.500000i"]);
        assert_eq!(latex(&[c(1.0, -2.0)]), vec!["1.000000 + -2.000000i"]);
    }

    #[test]
    fn test_pair_plus_singleton() {
        let roots = [
            ApproximateComplex::real(2.0),
            ApproximateComplex::real(5.0),
            ApproximateComplex::real(-2.0),
        ];
        assert_eq!(latex(&roots), vec![r"\pm 2.000000", "5.000000"]);
    }

    #[test]
    fn test_tolerances() {
        let roots = [
            ApproximateComplex::real(2.0),
            c(-2.0 + 5e-7, 1e-11),
        ];
        assert_eq!(pair_roots(&roots).pair_count(), 1);

        let roots = [ApproximateComplex::real(2.0), ApproximateComplex::real(-2.00001)];
        assert_eq!(pair_roots(&roots).pair_count(), 0);

        // 1e-9 is not zero, so these are a conjugate pair rather than two reals.
        let roots = [c(2.0, 1e-9), c(2.0, -1e-9)];
        assert_eq!(pair_roots(&roots).groups(), &[RootGroup::Conjugate(0, 1)]);
    }

    #[test]
    fn test_first_candidate_wins() {
        let roots = [
            ApproximateComplex::real(1.0),
            ApproximateComplex::real(-1.0),
            ApproximateComplex::real(-1.0),
        ];
        let pairing = pair_roots(&roots);
        assert_eq!(
            pairing.groups(),
            &[RootGroup::PlusMinus(0, 1), RootGroup::Single(2)]
        );
        assert_eq!(latex(&roots), vec![r"\pm 1.000000", "-1.000000"]);
    }

    #[test]
    fn test_quartic_roots_in_engine_order() {
        // x^4 + 1, roots as an engine might list them.
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let roots = [c(-h, -h), c(-h, h), c(h, -h), c(h, h)];
        assert_eq!(
            latex(&roots),
            vec![r"-0.707107 \pm 0.707107i", r"0.707107 \pm 0.707107i"]
        );
    }

    #[test]
    fn test_non_finite_root_falls_back() {
        let odd = c(f64::NAN, 1.0);
        let roots = [ApproximateComplex::real(1.0), odd];
        assert_eq!(latex(&roots), vec!["1.000000".to_string(), odd.to_string()]);
    }

    #[test]
    fn test_empty() {
        assert!(pair_roots(&[]).is_empty());
        assert!(latex(&[]).is_empty());
    }

    #[test]
    fn test_ops() {
        let a = c(1.0, 2.0);
        assert_eq!(-a, c(-1.0, -2.0));
        assert_eq!(a + a.conj(), c(2.0, 0.0));
        assert_eq!(a - a, c(0.0, 0.0));
        assert_eq!(a.to_string(), "1+2i");
    }
}
