use snafu::Snafu;

/// Errors reported at the filter boundary.
///
/// A symbolic bit position is not an error; see [`crate::bit::to_int`].
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("malformed field descriptor: {reason}"))]
    MalformedFieldDescriptor { reason: String },

    #[snafu(display("bit range is inverted: msb {msb} is below lsb {lsb}"))]
    InvertedBitRange { msb: u32, lsb: u32 },

    #[snafu(display("unsupported field width: {width:?}"))]
    UnsupportedWidth { width: String },

    #[snafu(display("argument is not a field descriptor"))]
    Decode { source: serde_json::Error },

    #[snafu(display("invalid argument to `{filter}`: {reason}"))]
    InvalidArgument {
        filter: &'static str,
        reason: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
