//! Template filter bindings.
//!
//! Each filter receives the piped value and any extra arguments as JSON values, e.g.
//! `{{ field_data | csr_bit_width }}` or `{{ bit_offset | csr_format_mask(bit_width) }}`, and
//! returns an integer, a string, or a boolean.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::Value;
use snafu::ensure;

use crate::dialect::Dialect;
use crate::error::{InvalidArgumentSnafu, Result};
use crate::field::{declared_width, FieldDescriptor, FieldWidth};
use crate::geometry::{bit_offset, bit_width, Resolved};
use crate::imm::fits_in_immediate;
use crate::mask::format_mask;
use crate::types::{arg_type, csr_type};

pub type Filter = fn(&Value, &[Value]) -> Result<Value>;

/// A template environment's filter namespace.
pub trait FilterEnv {
    fn add_filter(&mut self, name: &'static str, filter: Filter);
}

impl FilterEnv for BTreeMap<&'static str, Filter> {
    fn add_filter(&mut self, name: &'static str, filter: Filter) {
        self.insert(name, filter);
    }
}

impl<S: BuildHasher> FilterEnv for HashMap<&'static str, Filter, S> {
    fn add_filter(&mut self, name: &'static str, filter: Filter) {
        self.insert(name, filter);
    }
}

const FILTERS: [(&str, Filter); 10] = [
    ("csr_bit_width", csr_bit_width),
    ("csr_bit_width_rs", csr_bit_width_rs),
    ("csr_bit_offset", csr_bit_offset),
    ("csr_bit_offset_rs", csr_bit_offset_rs),
    ("csr_format_mask", csr_format_mask),
    ("csr_format_mask_rs", csr_format_mask_rs),
    ("csr_ctype", csr_ctype),
    ("csr_ctype_rs", csr_ctype_rs),
    ("arg_ctype", arg_ctype),
    ("csr_field_imm_valid", csr_field_imm_valid),
];

/// Registers every filter in this crate with `env`.
pub fn setup(env: &mut impl FilterEnv) {
    for (name, filter) in FILTERS {
        env.add_filter(name, filter);
    }
    log::debug!("registered {} CSR filters", FILTERS.len());
}

/// Returns a new filter namespace holding every filter in this crate.
pub fn filters() -> BTreeMap<&'static str, Filter> {
    let mut env: BTreeMap<&'static str, Filter> = BTreeMap::new();
    setup(&mut env);
    env
}

fn no_args(filter: &'static str, args: &[Value]) -> Result<()> {
    ensure!(
        args.is_empty(),
        InvalidArgumentSnafu {
            filter,
            reason: format!("takes no arguments, got {}", args.len()),
        }
    );
    Ok(())
}

fn field_arg(filter: &'static str, value: &Value, args: &[Value]) -> Result<FieldDescriptor> {
    no_args(filter, args)?;
    FieldDescriptor::from_value(value)
}

// Type filters are applied to whole registers as well as fields, so `bits` is not required.
fn width_arg(filter: &'static str, value: &Value, args: &[Value]) -> Result<Option<FieldWidth>> {
    no_args(filter, args)?;
    declared_width(value)
}

fn width_filter(
    filter: &'static str,
    dialect: Dialect,
    value: &Value,
    args: &[Value],
) -> Result<Value> {
    let field = field_arg(filter, value, args)?;
    bit_width(&field, dialect).map(Value::from)
}

fn offset_filter(filter: &'static str, value: &Value, args: &[Value]) -> Result<Value> {
    let field = field_arg(filter, value, args)?;
    Ok(bit_offset(&field).into())
}

fn mask_filter(
    filter: &'static str,
    dialect: Dialect,
    value: &Value,
    args: &[Value],
) -> Result<Value> {
    let [width] = args else {
        return InvalidArgumentSnafu {
            filter,
            reason: format!("takes one argument (the bit width), got {}", args.len()),
        }
        .fail();
    };
    let offset = Resolved::from_value(filter, value)?;
    let width = Resolved::from_value(filter, width)?;
    format_mask(&offset, &width, dialect).map(Value::from)
}

fn csr_bit_width(value: &Value, args: &[Value]) -> Result<Value> {
    width_filter("csr_bit_width", Dialect::C, value, args)
}

fn csr_bit_width_rs(value: &Value, args: &[Value]) -> Result<Value> {
    width_filter("csr_bit_width_rs", Dialect::RUST, value, args)
}

fn csr_bit_offset(value: &Value, args: &[Value]) -> Result<Value> {
    offset_filter("csr_bit_offset", value, args)
}

fn csr_bit_offset_rs(value: &Value, args: &[Value]) -> Result<Value> {
    offset_filter("csr_bit_offset_rs", value, args)
}

fn csr_format_mask(value: &Value, args: &[Value]) -> Result<Value> {
    mask_filter("csr_format_mask", Dialect::C, value, args)
}

fn csr_format_mask_rs(value: &Value, args: &[Value]) -> Result<Value> {
    mask_filter("csr_format_mask_rs", Dialect::RUST, value, args)
}

fn csr_ctype(value: &Value, args: &[Value]) -> Result<Value> {
    let width = width_arg("csr_ctype", value, args)?;
    csr_type(width.as_ref(), Dialect::C).map(Value::from)
}

fn csr_ctype_rs(value: &Value, args: &[Value]) -> Result<Value> {
    let width = width_arg("csr_ctype_rs", value, args)?;
    csr_type(width.as_ref(), Dialect::RUST).map(Value::from)
}

fn arg_ctype(value: &Value, args: &[Value]) -> Result<Value> {
    let width = width_arg("arg_ctype", value, args)?;
    arg_type(width.as_ref(), Dialect::C).map(Value::from)
}

fn csr_field_imm_valid(value: &Value, args: &[Value]) -> Result<Value> {
    let field = field_arg("csr_field_imm_valid", value, args)?;
    Ok(fits_in_immediate(&field).into())
}
