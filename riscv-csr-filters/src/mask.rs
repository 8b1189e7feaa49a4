use crate::dialect::Dialect;
use crate::error::Result;
use crate::field::FieldDescriptor;
use crate::geometry::{bit_offset, bit_width, Resolved};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Hexadecimal literal with bits `offset..offset + width` set, of any length.
fn hex_mask(offset: u64, width: u64) -> String {
    if width == 0 {
        return "0x0".to_string();
    }
    let bits = offset..offset.saturating_add(width);
    let nibbles = (bits.end - 1) / 4 + 1;
    let mut text = String::from("0x");
    for nibble in (0..nibbles).rev() {
        let digit = (0..4)
            .filter(|bit| bits.contains(&(nibble * 4 + bit)))
            .fold(0usize, |digit, bit| digit | 1 << bit);
        text.push(char::from(HEX_DIGITS[digit]));
    }
    text
}

/// Converts a bit offset and width into a mask.
///
/// When both are concrete the result is a single hexadecimal literal, e.g. offset 5 and width 4
/// give `0x1e0`. Otherwise the result is an expression that shifts a low-bit mask into place.
pub fn format_mask(offset: &Resolved, width: &Resolved, dialect: Dialect) -> Result<Resolved> {
    if let (Resolved::Int(offset), Resolved::Int(width)) = (offset, width) {
        return Ok(Resolved::Expr(hex_mask(*offset, *width)));
    }

    let suffix = dialect.ulong_suffix;
    let mask = match width {
        Resolved::Int(width) => format!("{}{suffix}", hex_mask(0, *width)),
        Resolved::Expr(width) => format!("(1{suffix}<<({width}-1))"),
    };
    let expr = format!("{mask} << ({offset})");
    Ok(Resolved::Expr(if dialect.wrap_mask_expr {
        format!("({expr})")
    } else {
        expr
    }))
}

/// The mask selecting the field within its register.
pub fn field_mask(field: &FieldDescriptor, dialect: Dialect) -> Result<Resolved> {
    format_mask(&bit_offset(field), &bit_width(field, dialect)?, dialect)
}

/// The field's mask shifted down to bit zero.
pub fn all_set_mask(field: &FieldDescriptor, dialect: Dialect) -> Result<Resolved> {
    format_mask(&Resolved::Int(0), &bit_width(field, dialect)?, dialect)
}
