use std::collections::BTreeMap;

use riscv_csr_filters::{filters, Error, Filter};
use serde_json::{json, Value};

fn call(env: &BTreeMap<&'static str, Filter>, name: &str, value: &Value, args: &[Value]) -> Value {
    env[name](value, args).unwrap()
}

/// Renders the constants a Rust register header declares for one field.
fn rust_constants(reg: &str, field: &str, data: &Value) -> Vec<String> {
    let env = filters();
    let width = call(&env, "csr_bit_width_rs", data, &[]);
    let offset = call(&env, "csr_bit_offset_rs", data, &[]);
    let mask = call(&env, "csr_format_mask_rs", &offset, &[width.clone()]);
    let all_set = call(&env, "csr_format_mask_rs", &json!(0), &[width.clone()]);
    let text = |value: &Value| match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    let prefix = format!("{}_{}", reg.to_uppercase(), field.to_uppercase());
    vec![
        format!("pub const {prefix}_BIT_OFFSET:isize   = {};", text(&offset)),
        format!("pub const {prefix}_BIT_WIDTH:isize    = {};", text(&width)),
        format!("pub const {prefix}_BIT_MASK:UintXlen = {};", text(&mask)),
        format!("pub const {prefix}_ALL_SET_MASK:UintXlen = {};", text(&all_set)),
    ]
}

#[test]
fn mstatus_mpp() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert_eq!(
        rust_constants("mstatus", "mpp", &json!({ "bits": [12, 11], "desc": "Previous mode" })),
        [
            "pub const MSTATUS_MPP_BIT_OFFSET:isize   = 11;",
            "pub const MSTATUS_MPP_BIT_WIDTH:isize    = 2;",
            "pub const MSTATUS_MPP_BIT_MASK:UintXlen = 0x1800;",
            "pub const MSTATUS_MPP_ALL_SET_MASK:UintXlen = 0x3;",
        ],
    );
}

#[test]
fn mtvec_base() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert_eq!(
        rust_constants("mtvec", "base", &json!({ "bits": ["mxlen-1", 2] })),
        [
            "pub const MTVEC_BASE_BIT_OFFSET:isize   = 2;",
            "pub const MTVEC_BASE_BIT_WIDTH:isize    = (__riscv_xlen-1)-(2) + 1;",
            "pub const MTVEC_BASE_BIT_MASK:UintXlen = (1<<((__riscv_xlen-1)-(2) + 1-1)) << (2);",
            "pub const MTVEC_BASE_ALL_SET_MASK:UintXlen = \
             (1<<((__riscv_xlen-1)-(2) + 1-1)) << (0);",
        ],
    );
}

#[test]
fn mcause_interrupt() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert_eq!(
        rust_constants("mcause", "interrupt", &json!({ "bits": ["mxlen-1"] })),
        [
            "pub const MCAUSE_INTERRUPT_BIT_OFFSET:isize   = __riscv_xlen-1;",
            "pub const MCAUSE_INTERRUPT_BIT_WIDTH:isize    = 1;",
            "pub const MCAUSE_INTERRUPT_BIT_MASK:UintXlen = 0x1 << (__riscv_xlen-1);",
            "pub const MCAUSE_INTERRUPT_ALL_SET_MASK:UintXlen = 0x1;",
        ],
    );
}

#[test]
fn c_dialect() {
    let env = filters();
    let base = json!({ "bits": ["mxlen-1", 2] });
    let width = call(&env, "csr_bit_width", &base, &[]);
    assert_eq!(width, json!("((__riscv_xlen-1)-(2) + 1)"));
    let offset = call(&env, "csr_bit_offset", &base, &[]);
    assert_eq!(offset, json!(2));
    assert_eq!(
        call(&env, "csr_format_mask", &offset, &[width]),
        json!("((1UL<<(((__riscv_xlen-1)-(2) + 1)-1)) << (2))"),
    );

    let interrupt = json!({ "bits": ["mxlen-1"] });
    let offset = call(&env, "csr_bit_offset", &interrupt, &[]);
    assert_eq!(offset, json!("__riscv_xlen-1"));
    assert_eq!(
        call(&env, "csr_format_mask", &offset, &[json!(1)]),
        json!("(0x1UL << (__riscv_xlen-1))"),
    );
}

#[test]
fn accessor_types() {
    let env = filters();
    let misa = json!({ "width": "mxlen", "priv": "MRW" });
    let mvendorid = json!({ "width": 32, "priv": "MRO" });
    let no_width = json!({ "priv": "MRW" });

    for reg in [&misa, &no_width] {
        assert_eq!(call(&env, "csr_ctype", reg, &[]), json!("uint_xlen_t"));
        assert_eq!(call(&env, "csr_ctype_rs", reg, &[]), json!("UintXlen"));
        assert_eq!(call(&env, "arg_ctype", reg, &[]), json!("uint_xlen_t"));
    }
    assert_eq!(call(&env, "csr_ctype", &mvendorid, &[]), json!("uint_csr32_t"));
    assert_eq!(call(&env, "csr_ctype_rs", &mvendorid, &[]), json!("UintCsr32"));
    assert_eq!(call(&env, "arg_ctype", &mvendorid, &[]), json!("uint32_t"));
}

#[test]
fn immediate_fit() {
    let env = filters();
    assert_eq!(call(&env, "csr_field_imm_valid", &json!({ "bits": [3] }), &[]), json!(true));
    assert_eq!(call(&env, "csr_field_imm_valid", &json!({ "bits": [7] }), &[]), json!(false));
    assert_eq!(
        call(&env, "csr_field_imm_valid", &json!({ "bits": ["mxlen-1"] }), &[]),
        json!(false),
    );
}

#[test]
fn filters_are_pure() {
    let env = filters();
    let fields = [
        json!({ "bits": [12, 11] }),
        json!({ "bits": ["sxlen-1", "sxlen-4"], "width": 8 }),
        json!({ "bits": ["uxlen-1"] }),
    ];
    for (name, filter) in &env {
        for field in &fields {
            let args = if name.starts_with("csr_format_mask") {
                vec![json!(4)]
            } else {
                vec![]
            };
            let value = if args.is_empty() { field.clone() } else { json!(3) };
            let first = filter(&value, &args).unwrap();
            let second = filter(&value, &args).unwrap();
            assert_eq!(first, second, "{name} on {field}");
        }
    }
}

#[test]
fn malformed_descriptors_fail() {
    let env = filters();
    for field in [json!({}), json!({ "bits": [] }), json!({ "bits": [7, 4, 0] })] {
        for name in ["csr_bit_width", "csr_bit_offset_rs", "csr_field_imm_valid"] {
            assert!(
                matches!(env[name](&field, &[]), Err(Error::MalformedFieldDescriptor { .. })),
                "{name} on {field}",
            );
        }
    }
    assert!(matches!(
        env["csr_bit_width_rs"](&json!({ "bits": [3, 7] }), &[]),
        Err(Error::InvertedBitRange { msb: 3, lsb: 7 }),
    ));
}
