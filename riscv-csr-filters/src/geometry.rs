use std::fmt::{self, Display, Formatter};

use serde_json::Value;
use snafu::{ensure, OptionExt};

use crate::bit::{normalize_symbolic, to_int};
use crate::dialect::Dialect;
use crate::error::{InvalidArgumentSnafu, InvertedBitRangeSnafu, Result};
use crate::field::FieldDescriptor;

/// A value that is either known now or left for the target compiler to fold.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resolved {
    Int(u64),
    Expr(String),
}

impl Resolved {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Expr(_) => None,
        }
    }

    /// Reads a value produced by an earlier filter: an integer or an expression string.
    pub fn from_value(filter: &'static str, value: &Value) -> Result<Self> {
        match value {
            Value::Number(number) => number.as_u64().map(Self::Int).context(InvalidArgumentSnafu {
                filter,
                reason: format!("{number} is not a non-negative integer"),
            }),
            Value::String(text) => Ok(Self::Expr(text.clone())),
            other => InvalidArgumentSnafu {
                filter,
                reason: format!("expected an integer or an expression, found {other}"),
            }
            .fail(),
        }
    }
}

impl Display for Resolved {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Expr(expr) => f.write_str(expr),
        }
    }
}

impl From<u64> for Resolved {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Resolved {
    fn from(value: &str) -> Self {
        Self::Expr(value.to_string())
    }
}

impl From<Resolved> for Value {
    fn from(value: Resolved) -> Self {
        match value {
            Resolved::Int(value) => Value::from(value),
            Resolved::Expr(expr) => Value::String(expr),
        }
    }
}

/// Number of bits in the field.
///
/// A single-bit field is always `1`. Otherwise the width is `msb - lsb + 1`, computed now if both
/// ends are concrete and emitted as an expression otherwise.
pub fn bit_width(field: &FieldDescriptor, dialect: Dialect) -> Result<Resolved> {
    if field.is_single_bit() {
        return Ok(Resolved::Int(1));
    }

    let (msb, lsb) = (field.msb(), field.lsb());
    if let (Some(msb), Some(lsb)) = (to_int(msb), to_int(lsb)) {
        ensure!(msb >= lsb, InvertedBitRangeSnafu { msb, lsb });
        return Ok(Resolved::Int(u64::from(msb - lsb) + 1));
    }

    log::trace!("bits [{msb}, {lsb}] are symbolic; emitting a {dialect} expression");
    let expr = format!("({})-({}) + 1", normalize_symbolic(msb), normalize_symbolic(lsb));
    Ok(Resolved::Expr(if dialect.wrap_width_expr {
        format!("({expr})")
    } else {
        expr
    }))
}

/// Position of the field's least significant bit.
///
/// The output is the same in both dialects.
pub fn bit_offset(field: &FieldDescriptor) -> Resolved {
    let lsb = field.lsb();
    match to_int(lsb) {
        Some(lsb) => Resolved::Int(lsb.into()),
        None => {
            log::trace!("offset {lsb} is not a compile-time constant");
            Resolved::Expr(normalize_symbolic(lsb))
        }
    }
}
