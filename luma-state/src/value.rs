//! Parameter values.
//!
//! A [`Value`] is what users hand over when changing a parameter and what the state store gives
//! back when asked. It’s loosely typed on purpose, so that values can be written by hand, decoded
//! from any serde format or built from the typed helpers of this crate (see
//! [`blending`](crate::blending) for instance).
//!
//! Before reaching a device, a value is made _canonical_ by its parameter’s descriptor: scalars
//! are coerced to the parameter’s [`ScalarType`] and composite values are turned into a
//! [`Value::List`] holding one scalar per component, in declaration order.

use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A parameter value.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
  /// A boolean.
  Bool(bool),
  /// An integer; also used for enumerants and unsigned masks.
  Int(i64),
  /// A floating point number.
  Float(f64),
  /// Positional components.
  List(Vec<Value>),
  /// Named components.
  Record(BTreeMap<String, Value>),
}

impl Value {
  /// Build a [`Value::Record`] from `(name, value)` pairs.
  pub fn record<K, V, I>(fields: I) -> Self
  where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
  {
    Value::Record(
      fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    )
  }

  pub fn as_bool(&self) -> Option<bool> {
    match *self {
      Value::Bool(b) => Some(b),
      _ => None,
    }
  }

  pub fn as_int(&self) -> Option<i64> {
    match *self {
      Value::Int(i) => Some(i),
      _ => None,
    }
  }

  pub fn as_float(&self) -> Option<f64> {
    match *self {
      Value::Float(f) => Some(f),
      Value::Int(i) => Some(i as f64),
      _ => None,
    }
  }

  pub fn as_list(&self) -> Option<&[Value]> {
    match self {
      Value::List(l) => Some(l),
      _ => None,
    }
  }

  /// Whether this value is a scalar (neither a list nor a record).
  pub fn is_scalar(&self) -> bool {
    !matches!(self, Value::List(_) | Value::Record(_))
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Value::Bool(b) => write!(f, "{}", b),
      Value::Int(i) => write!(f, "{}", i),
      Value::Float(x) => write!(f, "{}", x),

      Value::List(l) => {
        f.write_str("[")?;
        for (i, v) in l.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{}", v)?;
        }
        f.write_str("]")
      }

      Value::Record(r) => {
        f.write_str("{")?;
        for (i, (k, v)) in r.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{}: {}", k, v)?;
        }
        f.write_str("}")
      }
    }
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

macro_rules! impl_From_integer {
  ($($t:ty),*) => {
    $(
      impl From<$t> for Value {
        fn from(i: $t) -> Self {
          Value::Int(i as i64)
        }
      }
    )*
  }
}

impl_From_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
  fn from(x: f32) -> Self {
    Value::Float(x as f64)
  }
}

impl From<f64> for Value {
  fn from(x: f64) -> Self {
    Value::Float(x)
  }
}

impl<T> From<Vec<T>> for Value
where
  T: Into<Value>,
{
  fn from(v: Vec<T>) -> Self {
    Value::List(v.into_iter().map(Into::into).collect())
  }
}

impl<T, const N: usize> From<[T; N]> for Value
where
  T: Into<Value>,
{
  fn from(a: [T; N]) -> Self {
    Value::List(IntoIterator::into_iter(a).map(Into::into).collect())
  }
}

/// Type of a single parameter component.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScalarType {
  /// `GLboolean`.
  Bool,
  /// `GLenum`.
  Enum,
  /// `GLint`.
  Int,
  /// `GLuint`, typically a bit mask.
  Uint,
  /// `GLfloat`.
  Float,
}

impl ScalarType {
  /// Coerce a scalar value to this type.
  ///
  /// `Uint` accepts negative 32-bit integers and reinterprets their bits, because signed native
  /// queries report all-ones masks as `-1`. Floats are rounded through `f32`, which is the precision
  /// devices store them with.
  pub fn coerce(self, value: &Value) -> Result<Value, String> {
    match (self, value) {
      (ScalarType::Bool, Value::Bool(b)) => Ok(Value::Bool(*b)),

      (ScalarType::Enum, Value::Int(i)) if (0..=u32::MAX as i64).contains(i) => Ok(Value::Int(*i)),

      (ScalarType::Int, Value::Int(i)) if (i32::MIN as i64..=i32::MAX as i64).contains(i) => {
        Ok(Value::Int(*i))
      }

      (ScalarType::Uint, Value::Int(i)) if (0..=u32::MAX as i64).contains(i) => Ok(Value::Int(*i)),
      (ScalarType::Uint, Value::Int(i)) if (i32::MIN as i64..0).contains(i) => {
        Ok(Value::Int((*i as i32) as u32 as i64))
      }

      (ScalarType::Float, Value::Float(x)) => Ok(Value::Float((*x as f32) as f64)),
      (ScalarType::Float, Value::Int(i)) => Ok(Value::Float((*i as f32) as f64)),

      (ty, v) => Err(format!("{} is not a valid {}", v, ty)),
    }
  }
}

impl fmt::Display for ScalarType {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      ScalarType::Bool => f.write_str("boolean"),
      ScalarType::Enum => f.write_str("enumerant"),
      ScalarType::Int => f.write_str("signed integer"),
      ScalarType::Uint => f.write_str("unsigned integer"),
      ScalarType::Float => f.write_str("float"),
    }
  }
}
