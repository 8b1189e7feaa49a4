use crate::bit::to_int;
use crate::field::FieldDescriptor;

/// Bits available to the `csrrwi`, `csrrsi`, and `csrrci` immediate operand.
pub const IMMEDIATE_BITS: u32 = 5;

/// Whether the field's most significant bit lies within the immediate operand.
///
/// A symbolic position is never proven to fit.
pub fn fits_in_immediate(field: &FieldDescriptor) -> bool {
    to_int(field.msb()).map_or(false, |msb| msb < IMMEDIATE_BITS)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fits(value: serde_json::Value) -> bool {
        fits_in_immediate(&FieldDescriptor::from_value(&value).unwrap())
    }

    #[test]
    fn single_bits() {
        assert!(fits(json!({ "bits": [3] })));
        assert!(fits(json!({ "bits": [4] })));
        assert!(!fits(json!({ "bits": [5] })));
        assert!(!fits(json!({ "bits": [7] })));
    }

    #[test]
    fn ranges_check_msb_only() {
        assert!(fits(json!({ "bits": [4, 0] })));
        assert!(!fits(json!({ "bits": [12, 11] })));
    }

    #[test]
    fn symbolic_never_fits() {
        assert!(!fits(json!({ "bits": ["mxlen-1"] })));
        assert!(!fits(json!({ "bits": ["mxlen-1", 0] })));
    }
}
