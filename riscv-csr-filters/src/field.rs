use std::fmt::{self, Display, Formatter};

use serde::Deserialize;
use snafu::{OptionExt, ResultExt};

use crate::bit::BitPosition;
use crate::error::{DecodeSnafu, Error, MalformedFieldDescriptorSnafu, Result};

/// A field's declared `width` attribute.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldWidth {
    Bits(u32),
    Text(String),
}

impl Display for FieldWidth {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Bits(bits) => write!(f, "{bits}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One bitfield of a control/status register, as read from the register schema.
///
/// Keys other than `bits` and `width` are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawFieldDescriptor")]
pub struct FieldDescriptor {
    msb: BitPosition,
    // `None` for a single-bit field.
    lsb: Option<BitPosition>,
    width: Option<FieldWidth>,
}

#[derive(Deserialize)]
struct DeclaredWidth {
    width: Option<FieldWidth>,
}

/// Reads the `width` attribute of a register or field without requiring `bits`.
pub fn declared_width(value: &serde_json::Value) -> Result<Option<FieldWidth>> {
    DeclaredWidth::deserialize(value)
        .map(|declared| declared.width)
        .context(DecodeSnafu)
}

#[derive(Deserialize)]
struct RawFieldDescriptor {
    bits: Option<Vec<BitPosition>>,
    width: Option<FieldWidth>,
}

impl TryFrom<RawFieldDescriptor> for FieldDescriptor {
    type Error = Error;

    fn try_from(raw: RawFieldDescriptor) -> Result<Self> {
        let bits = raw.bits.context(MalformedFieldDescriptorSnafu {
            reason: "missing `bits`",
        })?;
        Self::new(bits, raw.width)
    }
}

impl FieldDescriptor {
    /// Builds a descriptor from a `bits` list of `[bit]` or `[msb, lsb]`.
    pub fn new(bits: Vec<BitPosition>, width: Option<FieldWidth>) -> Result<Self> {
        let len = bits.len();
        let mut bits = bits.into_iter();
        let (Some(msb), lsb, None) = (bits.next(), bits.next(), bits.next()) else {
            return MalformedFieldDescriptorSnafu {
                reason: format!("`bits` must hold one or two positions, found {len}"),
            }
            .fail();
        };
        Ok(Self { msb, lsb, width })
    }

    /// A single-bit field.
    pub fn single(bit: impl Into<BitPosition>) -> Self {
        Self {
            msb: bit.into(),
            lsb: None,
            width: None,
        }
    }

    /// A field spanning `msb` down to `lsb`, inclusive.
    pub fn range(msb: impl Into<BitPosition>, lsb: impl Into<BitPosition>) -> Self {
        Self {
            msb: msb.into(),
            lsb: Some(lsb.into()),
            width: None,
        }
    }

    pub fn with_width(self, width: FieldWidth) -> Self {
        Self {
            width: Some(width),
            ..self
        }
    }

    /// Reads a descriptor from template data.
    ///
    /// A value that is not an object is a decode error; an object with a missing or misshapen
    /// `bits` list is a [`Error::MalformedFieldDescriptor`].
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        RawFieldDescriptor::deserialize(value)
            .context(DecodeSnafu)?
            .try_into()
    }

    pub fn msb(&self) -> &BitPosition {
        &self.msb
    }

    /// The least significant position; the same as [`Self::msb`] for a single-bit field.
    pub fn lsb(&self) -> &BitPosition {
        self.lsb.as_ref().unwrap_or(&self.msb)
    }

    pub fn is_single_bit(&self) -> bool {
        self.lsb.is_none()
    }

    pub fn width(&self) -> Option<&FieldWidth> {
        self.width.as_ref()
    }
}
