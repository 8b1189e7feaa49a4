#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod bit;
pub mod dialect;
pub mod error;
pub mod field;
pub mod filters;
pub mod geometry;
pub mod imm;
pub mod mask;
pub mod types;

pub use bit::{BitPosition, XLEN_PLACEHOLDER};
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use field::{FieldDescriptor, FieldWidth};
pub use filters::{filters, setup, Filter, FilterEnv};
pub use geometry::{bit_offset, bit_width, Resolved};
pub use imm::fits_in_immediate;
pub use mask::{all_set_mask, field_mask, format_mask};
pub use types::{arg_type, csr_type, AccessorType};
