use std::fmt::{self, Display, Formatter};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Token substituted for every word-size reference in emitted expressions.
pub const XLEN_PLACEHOLDER: &str = "__riscv_xlen";

static XLEN_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new("(?i)[mxsu]xlen").unwrap());

/// One entry of a field's `bits` list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum BitPosition {
    Concrete(u32),
    Symbolic(String),
}

impl Display for BitPosition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Concrete(value) => write!(f, "{value}"),
            Self::Symbolic(text) => f.write_str(text),
        }
    }
}

impl From<u32> for BitPosition {
    fn from(value: u32) -> Self {
        Self::Concrete(value)
    }
}

impl From<&str> for BitPosition {
    fn from(value: &str) -> Self {
        Self::Symbolic(value.to_string())
    }
}

/// Returns the position if it is known at generation time.
///
/// `None` means the position is not a compile-time constant and the caller must fall back to an
/// expression.
pub fn to_int(bit: &BitPosition) -> Option<u32> {
    match bit {
        BitPosition::Concrete(value) => Some(*value),
        BitPosition::Symbolic(_) => None,
    }
}

/// Rewrites every `mxlen`, `xxlen`, `sxlen`, or `uxlen` marker (in any case) to
/// [`XLEN_PLACEHOLDER`].
pub fn normalize_symbolic(bit: &BitPosition) -> String {
    XLEN_MARKER
        .replace_all(&bit.to_string(), XLEN_PLACEHOLDER)
        .into_owned()
}
