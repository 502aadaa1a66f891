//! Canonical names for Galois groups.
//!
//! Transitive groups of degree at most 11 are looked up in a static table
//! keyed by `(degree, index)`, following the numbering of the transitive group
//! database. Groups that only come with a structure description (such as
//! `C4 x C2`) go through a textual rewrite into LaTeX instead.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GroupIdError;

/// Largest degree covered by the transitive group table.
pub const MAX_TABLE_DEGREE: u32 = 11;

pub const TRIVIAL_GROUP: &str = r"C_1 \cong \{1\}";
const ORDER_TWO_GROUP: &str = r"C_2 \cong \mathbb{Z}/2\mathbb{Z}";
const KLEIN_FOUR_GROUP: &str = r"V_4 \cong C_2 \times C_2";

/// Fixed renderings for the groups people recognise on sight. These win over
/// whatever the table or the rewrite produced.
const WELL_KNOWN_GROUPS: [(&str, &str); 8] = [
    ("S_3", r"S_3 \cong D_3"),
    ("S_4", r"S_4 \cong \mathrm{PGL}(2, 3)"),
    ("A_4", r"A_4 \cong \mathrm{PSL}(2, 3)"),
    ("A_5", r"A_5 \cong \mathrm{PSL}(2, 5)"),
    ("D_4", r"D_4 \cong C_4 \rtimes C_2"),
    ("D_6", r"D_6 \cong S_3 \times C_2"),
    ("Q_8", r"Q_8 \cong \{\pm 1, \pm i, \pm j, \pm k\}"),
    ("V_4", KLEIN_FOUR_GROUP),
];

/// LaTeX names of all transitive groups of degree 1 through 11, indexed by
/// `[degree - 1][index - 1]`.
static TRANSITIVE_GROUPS: [&[&str]; MAX_TABLE_DEGREE as usize] = [
    // Degree 1
    &[
        r"C_1 \cong \{1\}",
    ],
    // Degree 2
    &[
        r"C_2 \cong \mathbb{Z}/2\mathbb{Z}",
    ],
    // Degree 3
    &[
        r"C_3 \cong \mathbb{Z}/3\mathbb{Z}",
        r"S_3 \cong D_3",
    ],
    // Degree 4
    &[
        r"C_4 \cong \mathbb{Z}/4\mathbb{Z}",
        r"V_4 \cong \mathbb{Z}/2\mathbb{Z} \times \mathbb{Z}/2\mathbb{Z}",
        r"D_4",
        r"A_4",
        r"S_4",
    ],
    // Degree 5
    &[
        r"C_5 \cong \mathbb{Z}/5\mathbb{Z}",
        r"D_5",
        r"F_5 \cong C_5 \rtimes C_4",
        r"A_5",
        r"S_5",
    ],
    // Degree 6
    &[
        r"C_6 \cong \mathbb{Z}/6\mathbb{Z}",
        r"S_6",
        r"D_6",
        r"A_6",
        r"S_3 \times C_3",
        r"A_4 \times C_2",
        r"S_4",
        r"S_4",
        r"S_3 \times S_3",
        r"(C_3 \times C_3) \rtimes C_4",
        r"S_4 \times C_2",
        r"\mathrm{PSL}(2, 5)",
        r"(C_3 \times C_3) \rtimes D_4",
        r"\mathrm{PGL}(2, 5)",
        r"A_6",
        r"S_6",
    ],
    // Degree 7
    &[
        r"C_7 \cong \mathbb{Z}/7\mathbb{Z}",
        r"D_7",
        r"C_7 \rtimes C_3",
        r"F_7 \cong C_7 \rtimes C_6",
        r"\mathrm{GL}(3, 2)",
        r"A_7",
        r"S_7",
    ],
    // Degree 8
    &[
        r"C_8 \cong \mathbb{Z}/8\mathbb{Z}",
        r"C_4 \times C_2",
        r"C_2 \times C_2 \times C_2",
        r"D_4",
        r"Q_8",
        r"D_8",
        r"C_8 \rtimes C_2",
        r"QD_{16}",
        r"D_4 \times C_2",
        r"V_4 \rtimes C_4",
        r"Q_8 \rtimes C_2",
        r"\mathrm{SL}(2, 3)",
        r"A_4 \times C_2",
        r"S_4",
        r"D_8 \rtimes C_2",
        r"(C_8 \rtimes C_2) \rtimes C_2",
        r"C_4 \wr C_2",
        r"V_4 \wr C_2",
        r"(C_2 \times C_2 \times C_2) \rtimes C_4",
        r"(C_2 \times C_2 \times C_2) \rtimes C_4",
        r"(C_2 \times C_2 \times C_2) \rtimes C_4",
        r"Q_8 \rtimes V_4",
        r"\mathrm{GL}(2, 3)",
        r"S_4 \times C_2",
        r"(C_2 \times C_2 \times C_2) \rtimes C_7",
        r"((C_4 \times C_4) \rtimes C_2) \rtimes C_2",
        r"((C_8 \rtimes C_2) \rtimes C_2) \rtimes C_2",
        r"(((C_4 \times C_2) \rtimes C_2) \rtimes C_2) \rtimes C_2",
        r"(((C_4 \times C_2) \rtimes C_2) \rtimes C_2) \rtimes C_2",
        r"(((C_4 \times C_2) \rtimes C_2) \rtimes C_2) \rtimes C_2",
        r"(((C_4 \times C_2) \rtimes C_2) \rtimes C_2) \rtimes C_2",
        r"((C_2 \times D_4) \rtimes C_2) \rtimes C_3",
        r"(V_4 \times V_4) \rtimes C_6",
        r"(V_4 \times V_4) \rtimes S_3",
        r"C_2 \wr C_2 \wr C_2",
        r"(C_2 \times C_2 \times C_2) \rtimes (C_7 \rtimes C_3)",
        r"\mathrm{PSL}(2, 7)",
        r"C_2 \wr A_4",
        r"(C_2 \times C_2 \times C_2) \rtimes S_4",
        r"Q_8 \rtimes S_4",
        r"(V_4 \times V_4) \rtimes (S_3 \times C_2)",
        r"A_4 \wr C_2",
        r"\mathrm{PGL}(2, 7)",
        r"C_2 \wr S_4",
        r"(A_4 \wr C_2) \rtimes C_2",
        r"(A_4 \times A_4) \rtimes C_2",
        r"S_4 \wr C_2",
        r"(C_2 \times C_2 \times C_2) \rtimes \mathrm{GL}(3, 2)",
        r"A_8",
        r"S_8",
    ],
    // Degree 9
    &[
        r"C_9 \cong \mathbb{Z}/9\mathbb{Z}",
        r"C_3 \times C_3",
        r"D_9",
        r"S_3 \times C_3",
        r"(C_3 \times C_3) \rtimes C_2",
        r"C_9 \rtimes C_3",
        r"(C_3 \times C_3) \rtimes C_3",
        r"S_3 \times S_3",
        r"(C_3 \times C_3) \rtimes C_4",
        r"(C_9 \rtimes C_3) \rtimes C_2",
        r"(C_3 \times C_3) \rtimes C_6",
        r"((C_3 \times C_3) \rtimes C_3) \rtimes C_2",
        r"(C_3 \times C_3) \rtimes S_3",
        r"(C_3 \times C_3) \rtimes Q_8",
        r"(C_3 \times C_3) \rtimes C_8",
        r"(S_3 \times S_3) \rtimes C_2",
        r"C_3 \wr C_3",
        r"(C_3 \times C_3) \rtimes D_6",
        r"((C_3 \times C_3) \rtimes C_8) \rtimes C_2",
        r"C_3 \wr S_3",
        r"((C_3 \times C_3 \times C_3) \rtimes C_3) \rtimes C_2",
        r"((C_3 \times C_3 \times C_3) \rtimes C_3) \rtimes C_2",
        r"((C_3 \times C_3) \rtimes Q_8) \rtimes C_3",
        r"(((C_3 \times C_3 \times C_3) \rtimes C_3) \rtimes C_2) \rtimes C_2",
        r"((C_3 \times ((C_3 \times C_3) \rtimes C_2)) \rtimes C_2) \rtimes C_3",
        r"(((C_3 \times C_3) \rtimes Q_8) \rtimes C_3) \rtimes C_2",
        r"\mathrm{PSL}(2, 8)",
        r"S_3 \wr C_3",
        r"(((C_3 \times ((C_3 \times C_3) \rtimes C_2)) \rtimes C_2) \rtimes C_3) \rtimes C_2",
        r"(((C_3 \times ((C_3 \times C_3) \rtimes C_2)) \rtimes C_2) \rtimes C_3) \rtimes C_2",
        r"S_3 \wr S_3",
        r"\mathrm{P}\Gamma\mathrm{L}(2,8)",
        r"A_9",
        r"S_9",
    ],
    // Degree 10
    &[
        r"C_{10} \cong \mathbb{Z}/10\mathbb{Z}",
        r"D_5",
        r"D_{10}",
        r"F_5",
        r"F_5 \times C_2",
        r"D_5 \times C_5",
        r"A_5",
        r"(V_4 \times V_4) \rtimes C_5",
        r"D_5 \times D_5",
        r"(C_5 \times C_5) \rtimes C_4",
        r"A_5 \times C_2",
        r"S_5",
        r"S_5",
        r"C_2 \times ((V_4 \times V_4) \rtimes C_5)",
        r"((V_4 \times V_4) \rtimes C_5) \rtimes C_2",
        r"((V_4 \times V_4) \rtimes C_5) \rtimes C_2",
        r"((C_5 \times C_5) \rtimes C_4) \rtimes C_2",
        r"(C_5 \times C_5) \rtimes C_8",
        r"(D_5 \times D_5) \rtimes C_2",
        r"(C_5 \times C_5) \rtimes Q_8",
        r"(D_5 \times D_5) \rtimes C_2",
        r"S_5 \times C_2",
        r"C_2 \times ((V_4 \times V_4) \rtimes D_5)",
        r"((V_4 \times V_4) \rtimes C_5) \rtimes C_4",
        r"((V_4 \times V_4) \rtimes C_5) \rtimes C_4",
        r"\mathrm{PSL}(2, 9)",
        r"(D_5 \wr C_2) \rtimes C_2",
        r"((C_5 \times C_5) \rtimes C_8) \rtimes C_2",
        r"(((V_4 \times V_4) \rtimes C_5) \rtimes C_4) \times C_2",
        r"\mathrm{PGL}(2, 9)",
        r"M_{10}",
        r"S_6",
        r"F_5 \wr C_2",
        r"(V_4 \times V_4) \rtimes A_5",
        r"(A_6 \rtimes C_2) \rtimes C_2",
        r"C_2 \wr A_5",
        r"((V_4 \times V_4) \rtimes A_5) \rtimes C_2",
        r"((V_4 \times V_4) \rtimes A_5) \rtimes C_2",
        r"C_2 \wr S_5",
        r"A_5 \wr C_2",
        r"((A_5 \times A_5) \rtimes C_2) \rtimes C_2",
        r"(A_5 \times A_5) \rtimes C_4",
        r"(S_5 \times S_5) \wr C_2",
        r"A_{10}",
        r"S_{10}",
    ],
    // Degree 11
    &[
        r"C_{11} \cong \mathbb{Z}/11\mathbb{Z}",
        r"D_{11}",
        r"C_{11} \rtimes C_5",
        r"F_{11} \cong C_{11} \rtimes C_{10}",
        r"\mathrm{PSL}(2, 11)",
        r"M_{11}",
        r"A_{11}",
        r"S_{11}",
    ],
];

static GROUP_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([CDSAQ])(\d+)\b").expect("static pattern"));
// `x` between two factors, with or without spaces: `C2 x C2`, `C2xC2`, `C3 x (C3 : C2)`.
static DIRECT_PRODUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\d)])\s*x\s*([CDSAQ(])").expect("static pattern"));
static SEMIDIRECT_PRODUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*:\s*").expect("static pattern"));
static SINGLE_DIGIT_SUBSCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_\{(\d)\}").expect("static pattern"));
static TRANSITIVE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)T(\d+)\b").expect("static pattern"));

/// Number of transitive groups of the given degree, if the table covers it.
#[must_use]
pub fn transitive_group_count(degree: u32) -> Option<usize> {
    let slot = usize::try_from(degree.checked_sub(1)?).ok()?;
    TRANSITIVE_GROUPS.get(slot).map(|groups| groups.len())
}

/// A transitive permutation group, identified as the `index`-th group of
/// degree `degree` (written `<degree>T<index>`, e.g. `4T3` for `D_4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitiveGroupId {
    degree: u32,
    index: u32,
}

impl TransitiveGroupId {
    #[must_use]
    pub const fn new(degree: u32, index: u32) -> Self {
        Self { degree, index }
    }

    #[must_use]
    pub const fn degree(self) -> u32 {
        self.degree
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Finds the first `<degree>T<index>` label inside a free-text group
    /// description, e.g. `"Galois group 4T3 (D4) with order 8 of x^4 + 1"`.
    #[must_use]
    pub fn find_in(description: &str) -> Option<Self> {
        TRANSITIVE_LABEL
            .find_iter(description)
            .find_map(|label| label.as_str().parse().ok())
    }

    /// Whether the table holds an entry for this id.
    #[must_use]
    pub fn is_tabulated(self) -> bool {
        self.table_entry().is_some()
    }

    fn table_entry(self) -> Option<&'static str> {
        let degree = usize::try_from(self.degree.checked_sub(1)?).ok()?;
        let index = usize::try_from(self.index.checked_sub(1)?).ok()?;
        TRANSITIVE_GROUPS.get(degree)?.get(index).copied()
    }
}

impl FromStr for TransitiveGroupId {
    type Err = GroupIdError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let malformed = || GroupIdError::Malformed(label.to_string());
        let (degree, index) = label.trim().split_once('T').ok_or_else(malformed)?;
        let degree: u32 = degree.parse().map_err(|_| malformed())?;
        let index: u32 = index.parse().map_err(|_| malformed())?;
        if degree == 0 || index == 0 {
            return Err(GroupIdError::Zero(label.to_string()));
        }
        Ok(Self::new(degree, index))
    }
}

impl fmt::Display for TransitiveGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.degree, self.index)
    }
}

/// What the resolver gets to work with. Both variants carry the group order,
/// which is the only thing left to print when nothing else matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupIdentifier {
    Structured { degree: u32, index: u32, order: u64 },
    FreeForm { text: String, order: u64 },
}

impl GroupIdentifier {
    #[must_use]
    pub const fn structured(id: TransitiveGroupId, order: u64) -> Self {
        Self::Structured {
            degree: id.degree,
            index: id.index,
            order,
        }
    }

    #[must_use]
    pub fn free_form(text: impl Into<String>, order: u64) -> Self {
        Self::FreeForm {
            text: text.into(),
            order,
        }
    }

    /// Builds an identifier from what an algebra engine reports: an explicit
    /// transitive label wins, then a label embedded in the description, then
    /// the structure description.
    #[must_use]
    pub fn from_engine(
        label: Option<&str>,
        description: &str,
        structure: Option<&str>,
        order: u64,
    ) -> Self {
        label
            .and_then(|label| label.parse().ok())
            .or_else(|| TransitiveGroupId::find_in(description))
            .map_or_else(
                || Self::free_form(structure.unwrap_or_default(), order),
                |id| Self::structured(id, order),
            )
    }

    #[must_use]
    pub const fn order(&self) -> u64 {
        match self {
            Self::Structured { order, .. } | Self::FreeForm { order, .. } => *order,
        }
    }
}

/// A display name (`D_4`) together with its annotated LaTeX form
/// (`D_4 \cong C_4 \rtimes C_2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalGroupName {
    name: String,
    latex: String,
}

impl CanonicalGroupName {
    /// The display name is everything before the first `\cong`.
    #[must_use]
    pub fn from_latex(latex: impl Into<String>) -> Self {
        let latex = latex.into();
        let name = latex
            .split_once(r"\cong")
            .map_or(latex.as_str(), |(name, _)| name)
            .trim()
            .to_string();
        Self { name, latex }
    }

    #[must_use]
    pub fn generic(order: u64) -> Self {
        Self::from_latex(format!("G_{{{order}}}"))
    }

    #[must_use]
    pub fn trivial() -> Self {
        Self::from_latex(TRIVIAL_GROUP)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn latex(&self) -> &str {
        &self.latex
    }
}

impl fmt::Display for CanonicalGroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.latex)
    }
}

/// Resolves a group identifier to its canonical name. Never fails: anything
/// unrecognised comes back as `G_{order}`.
#[must_use]
pub fn resolve(identifier: &GroupIdentifier) -> CanonicalGroupName {
    let order = identifier.order();
    if order == 1 {
        return CanonicalGroupName::trivial();
    }

    let resolved = match identifier {
        GroupIdentifier::Structured { degree, index, .. } => {
            resolve_structured(TransitiveGroupId::new(*degree, *index), order)
        }
        GroupIdentifier::FreeForm { text, .. } => resolve_free_form(text, order),
    };

    if order == 2 {
        return CanonicalGroupName::from_latex(ORDER_TWO_GROUP);
    }
    well_known(&resolved).unwrap_or(resolved)
}

fn resolve_structured(id: TransitiveGroupId, order: u64) -> CanonicalGroupName {
    if id == TransitiveGroupId::new(1, 1) {
        return CanonicalGroupName::trivial();
    }
    match id.table_entry() {
        Some(latex) => CanonicalGroupName::from_latex(latex),
        None => {
            debug!(%id, order, "transitive group not tabulated, using generic name");
            CanonicalGroupName::generic(order)
        }
    }
}

fn resolve_free_form(text: &str, order: u64) -> CanonicalGroupName {
    let raw = text.trim();
    if raw == "1" {
        return CanonicalGroupName::trivial();
    }

    let rewritten = rewrite_structure(raw);
    if order == 4 && normalize_subscripts(&rewritten) == r"C_2 \times C_2" {
        return CanonicalGroupName::from_latex(KLEIN_FOUR_GROUP);
    }
    if rewritten == raw {
        debug!(structure = raw, order, "structure description not recognised");
        return CanonicalGroupName::generic(order);
    }
    CanonicalGroupName::from_latex(rewritten)
}

/// `C4 x C2` becomes `C_{4} \times C_{2}`, `C7 : C3` becomes
/// `C_{7} \rtimes C_{3}`.
fn rewrite_structure(raw: &str) -> String {
    let products = DIRECT_PRODUCT.replace_all(raw, r"${1} \times ${2}");
    let tokens = GROUP_TOKEN.replace_all(&products, "${1}_{${2}}");
    SEMIDIRECT_PRODUCT
        .replace_all(&tokens, NoExpand(r" \rtimes "))
        .into_owned()
}

fn normalize_subscripts(latex: &str) -> String {
    SINGLE_DIGIT_SUBSCRIPT.replace_all(latex, "_${1}").into_owned()
}

fn well_known(resolved: &CanonicalGroupName) -> Option<CanonicalGroupName> {
    let name = normalize_subscripts(resolved.name());
    WELL_KNOWN_GROUPS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, latex)| CanonicalGroupName::from_latex(*latex))
}
