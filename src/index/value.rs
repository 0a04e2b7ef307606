//! Ordered scalar values used as index keys
//!
//! Four kinds share one ordering capability: Int32, Int8, Float32, Text.
//! Values of different kinds are never compared; an attribute index locks
//! its kind on first insert, so a cross-kind comparison can only mean a
//! broken invariant and panics.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// The kind of an ordered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueKind {
    /// 32-bit signed integer, numeric order
    Int32,
    /// 8-bit signed integer, numeric order
    Int8,
    /// 32-bit IEEE float, numeric order (NaN is not supported)
    Float32,
    /// Text string, lexicographic byte order
    Text,
}

impl ValueKind {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Int32 => "int32",
            ValueKind::Int8 => "int8",
            ValueKind::Float32 => "float32",
            ValueKind::Text => "text",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered scalar value.
///
/// Float32 stores order-adjusted IEEE bits so that `Eq`, `Ord` and `Hash`
/// are consistent and numeric order is preserved; construct floats via
/// [`Value::float32`] and read them back via [`Value::as_f32`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// 32-bit signed integer
    Int32(i32),
    /// 8-bit signed integer
    Int8(i8),
    /// Order-adjusted float bits; see [`Value::float32`]
    Float32(u32),
    /// Text string
    Text(String),
}

impl Value {
    /// Create an Int32 value
    pub fn int32(v: i32) -> Self {
        Value::Int32(v)
    }

    /// Create an Int8 value
    pub fn int8(v: i8) -> Self {
        Value::Int8(v)
    }

    /// Create a Float32 value.
    ///
    /// Uses the bit representation for total ordering: negative floats flip
    /// all bits, positive floats flip the sign bit. `-0.0` collapses to
    /// `+0.0` so that equal floats map to equal keys. Attaching NaN is
    /// undefined behavior as far as ordering guarantees go.
    pub fn float32(v: f32) -> Self {
        let bits = if v == 0.0 { 0.0_f32.to_bits() } else { v.to_bits() };
        let ordered = if (bits >> 31) == 1 {
            !bits // Negative: flip all bits
        } else {
            bits ^ (1 << 31) // Positive: flip sign bit
        };
        Value::Float32(ordered)
    }

    /// Create a Text value
    pub fn text(v: impl Into<String>) -> Self {
        Value::Text(v.into())
    }

    /// Returns the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int32(_) => ValueKind::Int32,
            Value::Int8(_) => ValueKind::Int8,
            Value::Float32(_) => ValueKind::Float32,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Decodes a Float32 value back to its `f32`, if this is one
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float32(ordered) => {
                let bits = if (ordered >> 31) == 1 {
                    ordered ^ (1 << 31) // Was positive
                } else {
                    !ordered // Was negative
                };
                Some(f32::from_bits(bits))
            }
            _ => None,
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Int32(a), Value::Int32(b)) => a.cmp(b),
            (Value::Int8(a), Value::Int8(b)) => a.cmp(b),
            (Value::Float32(a), Value::Float32(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => panic!(
                "cross-kind value comparison: {} vs {}",
                self.kind(),
                other.kind()
            ),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int32_ordering() {
        assert!(Value::int32(-100) < Value::int32(0));
        assert!(Value::int32(0) < Value::int32(100));
        assert_eq!(Value::int32(7), Value::int32(7));
    }

    #[test]
    fn test_int8_ordering() {
        assert!(Value::int8(-128) < Value::int8(0));
        assert!(Value::int8(0) < Value::int8(127));
    }

    #[test]
    fn test_text_ordering() {
        assert!(Value::text("A") < Value::text("AA"));
        assert!(Value::text("AA") < Value::text("B"));
        assert_eq!(Value::text("abc"), Value::text("abc"));
    }

    #[test]
    fn test_float32_ordering() {
        let values = [
            Value::float32(-100.5),
            Value::float32(-1.0),
            Value::float32(-0.25),
            Value::float32(0.0),
            Value::float32(0.25),
            Value::float32(1.5),
            Value::float32(100.5),
        ];
        for i in 1..values.len() {
            assert!(values[i - 1] < values[i], "floats should be ordered");
        }
    }

    #[test]
    fn test_float32_roundtrip() {
        for v in [-3.5_f32, 0.0, 1.5, 42.25] {
            assert_eq!(Value::float32(v).as_f32(), Some(v));
        }
        assert_eq!(Value::int32(1).as_f32(), None);
    }

    #[test]
    fn test_float32_zero_signs_collapse() {
        assert_eq!(Value::float32(-0.0), Value::float32(0.0));
        assert!(Value::float32(-0.0).as_f32().unwrap().is_sign_positive());
        assert!(Value::float32(-0.25) < Value::float32(-0.0));
        assert!(Value::float32(-0.0) < Value::float32(0.25));
    }

    #[test]
    fn test_value_kinds() {
        assert_eq!(Value::int32(1).kind(), ValueKind::Int32);
        assert_eq!(Value::int8(1).kind(), ValueKind::Int8);
        assert_eq!(Value::float32(1.0).kind(), ValueKind::Float32);
        assert_eq!(Value::text("x").kind(), ValueKind::Text);
        assert_eq!(ValueKind::Float32.as_str(), "float32");
    }

    #[test]
    #[should_panic(expected = "cross-kind value comparison")]
    fn test_cross_kind_comparison_panics() {
        let _ = Value::int32(1) < Value::text("x");
    }
}
