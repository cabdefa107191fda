use thiserror::Error;

/// Errors raised at the boundaries of the generator.
///
/// Inference itself never fails on well-formed JSON; unresolvable types are
/// reported in-band as [`FieldType::Unknown`][`crate::FieldType::Unknown`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid documentation URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Documentation URL '{url}' has no path segments to derive a module name from")]
    EmptyModulePath { url: String },

    #[error("Unknown numeric type '{0}'")]
    UnknownNumType(String),
}

pub type Result<T> = std::result::Result<T, Error>;
