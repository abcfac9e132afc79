use indexmap::IndexMap;
use std::fmt;

/// Attribute map in insertion order
pub type Attributes = IndexMap<String, AttrValue>;

/// An attribute value as supplied at commit time.
///
/// Values keep their type until serialization, where they are rendered with
/// their `Display` form. Whole floats keep a trailing `.0` (`57.0`, not `57`)
/// and booleans print as lowercase `true`/`false`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    String(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Float(n) => {
                let text = n.to_string();
                if n.is_finite() && !text.contains('.') {
                    write!(f, "{text}.0")
                } else {
                    write!(f, "{text}")
                }
            }
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<char> for AttrValue {
    fn from(value: char) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for AttrValue {
            fn from(value: $ty) -> Self {
                Self::Integer(i64::from(value))
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for AttrValue {
            fn from(value: $ty) -> Self {
                Self::Unsigned(u64::from(value))
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<usize> for AttrValue {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::String(value.to_string()), Self::Unsigned)
    }
}

impl From<isize> for AttrValue {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::String(value.to_string()), Self::Integer)
    }
}

/// Build an [`Attributes`] map in the written order.
///
/// ```
/// use xmlchain::attrs;
///
/// let attributes = attrs! { "name" => "John Smith", "age" => 57 };
/// assert_eq!(attributes.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::Attributes::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut attributes = $crate::Attributes::new();
        $(
            attributes.insert(
                ::std::string::String::from($key),
                $crate::AttrValue::from($value),
            );
        )+
        attributes
    }};
}
