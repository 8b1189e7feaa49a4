use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::{Error, InvalidArgumentSnafu, Result};

/// Spelling rules for one target language.
///
/// Both dialects share every algorithm in this crate. They differ only in how an expression is
/// parenthesized, how an unsigned long literal is suffixed, and how accessor types are named.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dialect {
    name: &'static str,
    /// Wraps a symbolic width expression in one extra pair of parentheses.
    pub wrap_width_expr: bool,
    /// Wraps a symbolic mask expression in one pair of parentheses.
    pub wrap_mask_expr: bool,
    /// Appended to hexadecimal and `1` literals inside symbolic mask expressions.
    pub ulong_suffix: &'static str,
    /// The type name for a value as wide as the architecture word.
    pub xlen_type: &'static str,
    arg_type: TypeSpelling,
    csr_type: TypeSpelling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct TypeSpelling {
    prefix: &'static str,
    suffix: &'static str,
}

impl TypeSpelling {
    fn spell(self, width: u32) -> String {
        format!("{}{width}{}", self.prefix, self.suffix)
    }
}

impl Dialect {
    pub const C: Self = Self {
        name: "c",
        wrap_width_expr: true,
        wrap_mask_expr: true,
        ulong_suffix: "UL",
        xlen_type: "uint_xlen_t",
        arg_type: TypeSpelling {
            prefix: "uint",
            suffix: "_t",
        },
        csr_type: TypeSpelling {
            prefix: "uint_csr",
            suffix: "_t",
        },
    };

    pub const RUST: Self = Self {
        name: "rust",
        wrap_width_expr: false,
        wrap_mask_expr: false,
        ulong_suffix: "",
        xlen_type: "UintXlen",
        arg_type: TypeSpelling {
            prefix: "u",
            suffix: "",
        },
        csr_type: TypeSpelling {
            prefix: "UintCsr",
            suffix: "",
        },
    };

    pub fn name(self) -> &'static str {
        self.name
    }

    /// Names the fixed-width type passed to, or returned from, an accessor function.
    pub fn arg_type_name(self, width: u32) -> String {
        self.arg_type.spell(width)
    }

    /// Names the fixed-width type passed to, or returned from, the CSR instruction.
    pub fn csr_type_name(self, width: u32) -> String {
        self.csr_type.spell(width)
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "c" | "cpp" | "c++" => Ok(Self::C),
            "rust" | "rs" => Ok(Self::RUST),
            _ => InvalidArgumentSnafu {
                filter: "dialect",
                reason: format!("unknown dialect {s:?}"),
            }
            .fail(),
        }
    }
}
