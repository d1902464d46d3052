use core::fmt;

/// A borrowed leaf value.
///
/// Signed and unsigned integers are widened to 64 bits, narrowing back is
/// checked by [`ScalarInfo::from_scalar`](crate::info::ScalarInfo::from_scalar).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(&'a str),
}

impl Scalar<'_> {
    /// Returns the value as `i64` if it is an integer in range.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            Self::UInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is an integer in range.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::Int(v) => u64::try_from(v).ok(),
            Self::UInt(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as `f64`, integers are converted.
    ///
    /// The strings `"NaN"`, `"Infinity"` and `"-Infinity"` are read back as
    /// the non-finite values they name, see [`non_finite_name`].
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int(v) => Some(v as f64),
            Self::UInt(v) => Some(v as f64),
            Self::Float(v) => Some(v),
            Self::Str(NAN) => Some(f64::NAN),
            Self::Str(INFINITY) => Some(f64::INFINITY),
            Self::Str(NEG_INFINITY) => Some(f64::NEG_INFINITY),
            _ => None,
        }
    }
}

const NAN: &str = "NaN";
const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

/// The text form of a float JSON numbers cannot hold.
///
/// Returns `None` for finite values.
///
/// # Examples
///
/// ```
/// use vc_reflect::ops::non_finite_name;
///
/// assert_eq!(non_finite_name(f64::NEG_INFINITY), Some("-Infinity"));
/// assert_eq!(non_finite_name(1.5), None);
/// ```
pub fn non_finite_name(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some(NAN)
    } else if value.is_infinite() {
        Some(if value > 0.0 { INFINITY } else { NEG_INFINITY })
    } else {
        None
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::UInt(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::Char(v) => fmt::Debug::fmt(v, f),
            Self::Str(v) => fmt::Debug::fmt(v, f),
        }
    }
}
