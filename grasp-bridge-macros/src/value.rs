//! Parameter values and the typed conversions out of them

use serde::Serialize;
use std::fmt;

/// A single value held by a parameter store.
///
/// The variants follow the middleware parameter types: scalars plus
/// homogeneous arrays of each scalar type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    BoolArray(Vec<bool>),
    IntegerArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<String>),
}

/// Type tag of a [`ParameterValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Bool,
    Integer,
    Double,
    String,
    BoolArray,
    IntegerArray,
    DoubleArray,
    StringArray,
}

impl ParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::Bool => "bool",
            ParameterKind::Integer => "integer",
            ParameterKind::Double => "double",
            ParameterKind::String => "string",
            ParameterKind::BoolArray => "bool_array",
            ParameterKind::IntegerArray => "integer_array",
            ParameterKind::DoubleArray => "double_array",
            ParameterKind::StringArray => "string_array",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ParameterValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Bool(_) => ParameterKind::Bool,
            ParameterValue::Integer(_) => ParameterKind::Integer,
            ParameterValue::Double(_) => ParameterKind::Double,
            ParameterValue::String(_) => ParameterKind::String,
            ParameterValue::BoolArray(_) => ParameterKind::BoolArray,
            ParameterValue::IntegerArray(_) => ParameterKind::IntegerArray,
            ParameterValue::DoubleArray(_) => ParameterKind::DoubleArray,
            ParameterValue::StringArray(_) => ParameterKind::StringArray,
        }
    }

    /// True for an array of any element type with no elements.
    ///
    /// File formats cannot tag the element type of `[]`, so an empty array
    /// is accepted wherever any array is expected.
    pub fn is_empty_array(&self) -> bool {
        match self {
            ParameterValue::BoolArray(v) => v.is_empty(),
            ParameterValue::IntegerArray(v) => v.is_empty(),
            ParameterValue::DoubleArray(v) => v.is_empty(),
            ParameterValue::StringArray(v) => v.is_empty(),
            _ => false,
        }
    }
}

fn write_list<T, F>(f: &mut fmt::Formatter<'_>, items: &[T], mut write_item: F) -> fmt::Result
where
    F: FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
{
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_str("]")
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(b) => write!(f, "{}", b),
            ParameterValue::Integer(i) => write!(f, "{}", i),
            ParameterValue::Double(d) => write!(f, "{:?}", d),
            ParameterValue::String(s) => write!(f, "{:?}", s),
            ParameterValue::BoolArray(v) => write_list(f, v, |f, b| write!(f, "{}", b)),
            ParameterValue::IntegerArray(v) => write_list(f, v, |f, i| write!(f, "{}", i)),
            ParameterValue::DoubleArray(v) => write_list(f, v, |f, d| write!(f, "{:?}", d)),
            ParameterValue::StringArray(v) => write_list(f, v, |f, s| write!(f, "{:?}", s)),
        }
    }
}

/// Conversion between a Rust field type and a [`ParameterValue`].
///
/// `from_parameter` returns `None` when the stored value has an incompatible
/// type or does not fit the target (a negative count, a vector of the wrong
/// length). Integers widen to doubles; nothing narrows.
pub trait Parameter: Sized {
    const KIND: ParameterKind;

    fn from_parameter(value: &ParameterValue) -> Option<Self>;

    fn to_parameter(&self) -> ParameterValue;
}

impl Parameter for bool {
    const KIND: ParameterKind = ParameterKind::Bool;

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn to_parameter(&self) -> ParameterValue {
        ParameterValue::Bool(*self)
    }
}

impl Parameter for i64 {
    const KIND: ParameterKind = ParameterKind::Integer;

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    fn to_parameter(&self) -> ParameterValue {
        ParameterValue::Integer(*self)
    }
}

macro_rules! impl_integer_parameter {
    ($($ty:ty),*) => {
        $(
            impl Parameter for $ty {
                const KIND: ParameterKind = ParameterKind::Integer;

                fn from_parameter(value: &ParameterValue) -> Option<Self> {
                    match value {
                        ParameterValue::Integer(i) => <$ty>::try_from(*i).ok(),
                        _ => None,
                    }
                }

                fn to_parameter(&self) -> ParameterValue {
                    ParameterValue::Integer(i64::try_from(*self).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

impl_integer_parameter!(i32, u32, usize);

impl Parameter for f64 {
    const KIND: ParameterKind = ParameterKind::Double;

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::Double(d) => Some(*d),
            ParameterValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    fn to_parameter(&self) -> ParameterValue {
        ParameterValue::Double(*self)
    }
}

impl Parameter for String {
    const KIND: ParameterKind = ParameterKind::String;

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn to_parameter(&self) -> ParameterValue {
        ParameterValue::String(self.clone())
    }
}

impl Parameter for Vec<bool> {
    const KIND: ParameterKind = ParameterKind::BoolArray;

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::BoolArray(v) => Some(v.clone()),
            other if other.is_empty_array() => Some(Vec::new()),
            _ => None,
        }
    }

    fn to_parameter(&self) -> ParameterValue {
        ParameterValue::BoolArray(self.clone())
    }
}

impl Parameter for Vec<i64> {
    const KIND: ParameterKind = ParameterKind::IntegerArray;

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::IntegerArray(v) => Some(v.clone()),
            other if other.is_empty_array() => Some(Vec::new()),
            _ => None,
        }
    }

    fn to_parameter(&self) -> ParameterValue {
        ParameterValue::IntegerArray(self.clone())
    }
}

impl Parameter for Vec<f64> {
    const KIND: ParameterKind = ParameterKind::DoubleArray;

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::DoubleArray(v) => Some(v.clone()),
            ParameterValue::IntegerArray(v) => Some(v.iter().map(|i| *i as f64).collect()),
            other if other.is_empty_array() => Some(Vec::new()),
            _ => None,
        }
    }

    fn to_parameter(&self) -> ParameterValue {
        ParameterValue::DoubleArray(self.clone())
    }
}

impl Parameter for Vec<String> {
    const KIND: ParameterKind = ParameterKind::StringArray;

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::StringArray(v) => Some(v.clone()),
            other if other.is_empty_array() => Some(Vec::new()),
            _ => None,
        }
    }

    fn to_parameter(&self) -> ParameterValue {
        ParameterValue::StringArray(self.clone())
    }
}

/// Fixed-size vectors such as an approach direction. Any other length is
/// rejected.
impl<const N: usize> Parameter for [f64; N] {
    const KIND: ParameterKind = ParameterKind::DoubleArray;

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        let values = Vec::<f64>::from_parameter(value)?;
        <[f64; N]>::try_from(values.as_slice()).ok()
    }

    fn to_parameter(&self) -> ParameterValue {
        ParameterValue::DoubleArray(self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_widen_to_doubles() {
        assert_eq!(f64::from_parameter(&ParameterValue::Integer(3)), Some(3.0));
        assert_eq!(
            Vec::<f64>::from_parameter(&ParameterValue::IntegerArray(vec![0, 0, -1])),
            Some(vec![0.0, 0.0, -1.0])
        );
    }

    #[test]
    fn doubles_do_not_narrow_to_integers() {
        assert_eq!(i32::from_parameter(&ParameterValue::Double(3.0)), None);
        assert_eq!(usize::from_parameter(&ParameterValue::Double(3.0)), None);
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert_eq!(usize::from_parameter(&ParameterValue::Integer(-1)), None);
        assert_eq!(i32::from_parameter(&ParameterValue::Integer(-1)), Some(-1));
    }

    #[test]
    fn integer_out_of_range_is_rejected() {
        assert_eq!(i32::from_parameter(&ParameterValue::Integer(i64::MAX)), None);
    }

    #[test]
    fn fixed_vectors_require_exact_length() {
        let short = ParameterValue::DoubleArray(vec![1.0, 2.0]);
        let exact = ParameterValue::DoubleArray(vec![1.0, 2.0, 3.0]);
        assert_eq!(<[f64; 3]>::from_parameter(&short), None);
        assert_eq!(<[f64; 3]>::from_parameter(&exact), Some([1.0, 2.0, 3.0]));
    }

    #[test]
    fn empty_arrays_match_any_array_type() {
        let empty = ParameterValue::DoubleArray(Vec::new());
        assert_eq!(Vec::<String>::from_parameter(&empty), Some(Vec::new()));
        assert_eq!(Vec::<bool>::from_parameter(&empty), Some(Vec::new()));
        assert_eq!(String::from_parameter(&empty), None);
    }

    #[test]
    fn strings_do_not_parse_into_numbers() {
        let value = ParameterValue::String("0.5".to_string());
        assert_eq!(f64::from_parameter(&value), None);
        assert_eq!(bool::from_parameter(&value), None);
    }

    #[test]
    fn display_formats() {
        assert_eq!(ParameterValue::Double(500.0).to_string(), "500.0");
        assert_eq!(ParameterValue::String("base".into()).to_string(), "\"base\"");
        assert_eq!(
            ParameterValue::DoubleArray(vec![-1.0, 1.0]).to_string(),
            "[-1.0, 1.0]"
        );
        assert_eq!(
            ParameterValue::StringArray(vec!["a".into(), "b".into()]).to_string(),
            "[\"a\", \"b\"]"
        );
        assert_eq!(ParameterKind::DoubleArray.to_string(), "double_array");
    }

    #[test]
    fn serializes_untagged() {
        let value = ParameterValue::IntegerArray(vec![1, 2]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "[1,2]");
    }
}
