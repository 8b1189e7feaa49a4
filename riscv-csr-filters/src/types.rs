use snafu::OptionExt;

use crate::dialect::Dialect;
use crate::error::{Result, UnsupportedWidthSnafu};
use crate::field::{FieldDescriptor, FieldWidth};

/// The width class of a value moved through a CSR accessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessorType {
    /// As wide as the architecture word.
    Xlen,
    /// A fixed number of bits.
    Fixed(u32),
}

impl AccessorType {
    /// Classifies a field by its declared `width`.
    ///
    /// A missing width, or one mentioning `xlen`, is word sized. Any other width is read from its
    /// leading decimal digits, so `"32"` and `"32 bits"` are both 32.
    pub fn of(field: &FieldDescriptor) -> Result<Self> {
        Self::from_width(field.width())
    }

    pub fn from_width(width: Option<&FieldWidth>) -> Result<Self> {
        match width {
            None => Ok(Self::Xlen),
            Some(FieldWidth::Bits(bits)) => Ok(Self::Fixed(*bits)),
            Some(FieldWidth::Text(text)) if text.contains("xlen") => Ok(Self::Xlen),
            Some(FieldWidth::Text(text)) => {
                let digits = text
                    .find(|c: char| !c.is_ascii_digit())
                    .map_or(text.as_str(), |end| &text[..end]);
                digits
                    .parse()
                    .ok()
                    .map(Self::Fixed)
                    .context(UnsupportedWidthSnafu { width: text })
            }
        }
    }

    /// The type passed to, or returned from, the generated wrapper function.
    pub fn arg_name(self, dialect: Dialect) -> String {
        match self {
            Self::Xlen => dialect.xlen_type.to_string(),
            Self::Fixed(width) => dialect.arg_type_name(width),
        }
    }

    /// The type passed to, or returned from, the CSR instruction itself.
    pub fn csr_name(self, dialect: Dialect) -> String {
        match self {
            Self::Xlen => dialect.xlen_type.to_string(),
            Self::Fixed(width) => dialect.csr_type_name(width),
        }
    }
}

/// Names the wrapper's value type for a declared `width`, which registers carry without `bits`.
pub fn arg_type(width: Option<&FieldWidth>, dialect: Dialect) -> Result<String> {
    Ok(AccessorType::from_width(width)?.arg_name(dialect))
}

pub fn csr_type(width: Option<&FieldWidth>, dialect: Dialect) -> Result<String> {
    Ok(AccessorType::from_width(width)?.csr_name(dialect))
}
