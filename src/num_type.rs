use crate::error::Error;
use jtd::Type;
use std::str::FromStr;

/// A JSON Typedef numeric type.
///
/// Used as the default when exporting numbers with
/// [`to_jtd_schema`][`crate::to_jtd_schema`]. The default is ignored when it
/// cannot hold the sample; the narrowest integer type holding the sample is
/// used instead, preferring unsigned over signed, and `float64` after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumType {
    /// A signed 8-bit integer.
    Int8,

    /// An unsigned 8-bit integer.
    Uint8,

    /// A signed 16-bit integer.
    Int16,

    /// An unsigned 16-bit integer.
    Uint16,

    /// A signed 32-bit integer.
    Int32,

    /// An unsigned 32-bit integer.
    Uint32,

    /// A 32-bit floating-point number.
    Float32,

    /// A 64-bit floating-point number.
    Float64,
}

const NARROWING_ORDER: [NumType; 6] = [
    NumType::Uint8,
    NumType::Int8,
    NumType::Uint16,
    NumType::Int16,
    NumType::Uint32,
    NumType::Int32,
];

impl NumType {
    /// Picks the JTD type for a numeric sample.
    pub fn narrowest_for(self, sample: f64) -> Type {
        if self.contains(sample) {
            return self.to_type();
        }

        NARROWING_ORDER
            .iter()
            .find(|type_| type_.contains(sample))
            .map_or(Type::Float64, NumType::to_type)
    }

    fn contains(&self, sample: f64) -> bool {
        if sample.fract() != 0.0 && !self.is_float() {
            return false;
        }

        let (min, max) = self.range();
        min <= sample && sample <= max
    }

    fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    fn range(&self) -> (f64, f64) {
        match self {
            Self::Int8 => (i8::MIN as f64, i8::MAX as f64),
            Self::Uint8 => (u8::MIN as f64, u8::MAX as f64),
            Self::Int16 => (i16::MIN as f64, i16::MAX as f64),
            Self::Uint16 => (u16::MIN as f64, u16::MAX as f64),
            Self::Int32 => (i32::MIN as f64, i32::MAX as f64),
            Self::Uint32 => (u32::MIN as f64, u32::MAX as f64),
            Self::Float32 | Self::Float64 => (f64::MIN, f64::MAX),
        }
    }

    fn to_type(&self) -> Type {
        match self {
            Self::Int8 => Type::Int8,
            Self::Uint8 => Type::Uint8,
            Self::Int16 => Type::Int16,
            Self::Uint16 => Type::Uint16,
            Self::Int32 => Type::Int32,
            Self::Uint32 => Type::Uint32,
            Self::Float32 => Type::Float32,
            Self::Float64 => Type::Float64,
        }
    }
}

impl FromStr for NumType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int8" => Ok(Self::Int8),
            "uint8" => Ok(Self::Uint8),
            "int16" => Ok(Self::Int16),
            "uint16" => Ok(Self::Uint16),
            "int32" => Ok(Self::Int32),
            "uint32" => Ok(Self::Uint32),
            "float32" => Ok(Self::Float32),
            "float64" => Ok(Self::Float64),
            _ => Err(Error::UnknownNumType(s.to_owned())),
        }
    }
}
