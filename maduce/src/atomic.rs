//! Atomic values.
//!
//! The scalar values a collection can hold without boxing them as opaque
//! values. Every atomic remembers the Rust type it was created from, and
//! converting back out only succeeds for that same type: an `i32` element
//! does not turn into an `i64` parameter. The exception is [`IBig`], which
//! accepts an integer of any width.
use std::fmt;
use std::rc::Rc;

use ibig::IBig;
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;

use crate::error;

/// The Rust integer type an integer atomic was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IntegerType {
    /// Arbitrary precision, [`IBig`]
    Integer,
    /// `i64`
    Long,
    /// `i32`
    Int,
    /// `i16`
    Short,
    /// `i8`
    Byte,
    /// `u64`
    UnsignedLong,
    /// `u32`
    UnsignedInt,
    /// `u16`
    UnsignedShort,
    /// `u8`
    UnsignedByte,
    /// `usize`, the type of positions handed to indexed functions
    Size,
}

impl IntegerType {
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            IntegerType::Integer => "IBig",
            IntegerType::Long => "i64",
            IntegerType::Int => "i32",
            IntegerType::Short => "i16",
            IntegerType::Byte => "i8",
            IntegerType::UnsignedLong => "u64",
            IntegerType::UnsignedInt => "u32",
            IntegerType::UnsignedShort => "u16",
            IntegerType::UnsignedByte => "u8",
            IntegerType::Size => "usize",
        }
    }
}

/// A scalar value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Atomic {
    String(Rc<String>),
    Boolean(bool),
    Integer(
        IntegerType,
        #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_integer"))] Rc<IBig>,
    ),
    Decimal(Decimal),
    Float(OrderedFloat<f32>),
    Double(OrderedFloat<f64>),
}

impl Atomic {
    /// The name of the Rust type this atomic converts back into.
    pub fn type_name(&self) -> &'static str {
        match self {
            Atomic::String(_) => "String",
            Atomic::Boolean(_) => "bool",
            Atomic::Integer(integer_type, _) => integer_type.type_name(),
            Atomic::Decimal(_) => "Decimal",
            Atomic::Float(_) => "f32",
            Atomic::Double(_) => "f64",
        }
    }
}

// integers serialize as their decimal digits, whatever their width
#[cfg(feature = "serde")]
fn serialize_integer<S>(i: &Rc<IBig>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(i)
}

impl fmt::Display for Atomic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atomic::String(s) => write!(f, "{}", s),
            Atomic::Boolean(b) => write!(f, "{}", b),
            Atomic::Integer(_, i) => write!(f, "{}", i),
            Atomic::Decimal(d) => write!(f, "{}", d),
            Atomic::Float(v) => write!(f, "{}", v.into_inner()),
            Atomic::Double(v) => write!(f, "{}", v.into_inner()),
        }
    }
}

// strings

impl From<String> for Atomic {
    fn from(s: String) -> Self {
        Atomic::String(Rc::new(s))
    }
}

impl From<&str> for Atomic {
    fn from(s: &str) -> Self {
        Atomic::String(Rc::new(s.to_string()))
    }
}

impl From<&String> for Atomic {
    fn from(s: &String) -> Self {
        Atomic::String(Rc::new(s.clone()))
    }
}

impl TryFrom<Atomic> for String {
    type Error = error::Error;

    fn try_from(a: Atomic) -> Result<Self, Self::Error> {
        match a {
            Atomic::String(s) => Ok(s.as_ref().clone()),
            _ => Err(error::Error::TypeMismatch),
        }
    }
}

// bool

impl From<bool> for Atomic {
    fn from(b: bool) -> Self {
        Atomic::Boolean(b)
    }
}

impl TryFrom<Atomic> for bool {
    type Error = error::Error;

    fn try_from(a: Atomic) -> Result<Self, Self::Error> {
        match a {
            Atomic::Boolean(b) => Ok(b),
            _ => Err(error::Error::TypeMismatch),
        }
    }
}

// decimal

impl From<Decimal> for Atomic {
    fn from(d: Decimal) -> Self {
        Atomic::Decimal(d)
    }
}

impl TryFrom<Atomic> for Decimal {
    type Error = error::Error;

    fn try_from(a: Atomic) -> Result<Self, Self::Error> {
        match a {
            Atomic::Decimal(d) => Ok(d),
            _ => Err(error::Error::TypeMismatch),
        }
    }
}

// integers

impl From<IBig> for Atomic {
    fn from(i: IBig) -> Self {
        Atomic::Integer(IntegerType::Integer, Rc::new(i))
    }
}

// an arbitrary precision integer can hold an integer of any width
impl TryFrom<Atomic> for IBig {
    type Error = error::Error;

    fn try_from(a: Atomic) -> Result<Self, Self::Error> {
        match a {
            Atomic::Integer(_, i) => Ok(i.as_ref().clone()),
            _ => Err(error::Error::TypeMismatch),
        }
    }
}

macro_rules! integer_conversions {
    ($($t:ty => $integer_type:ident),* $(,)?) => {
        $(
            impl From<$t> for Atomic {
                fn from(i: $t) -> Self {
                    Atomic::Integer(IntegerType::$integer_type, Rc::new(i.into()))
                }
            }

            impl TryFrom<Atomic> for $t {
                type Error = error::Error;

                fn try_from(a: Atomic) -> Result<Self, Self::Error> {
                    match a {
                        Atomic::Integer(IntegerType::$integer_type, i) => {
                            Ok(i.as_ref().clone().try_into()?)
                        }
                        _ => Err(error::Error::TypeMismatch),
                    }
                }
            }
        )*
    };
}

integer_conversions!(
    i64 => Long,
    i32 => Int,
    i16 => Short,
    i8 => Byte,
    u64 => UnsignedLong,
    u32 => UnsignedInt,
    u16 => UnsignedShort,
    u8 => UnsignedByte,
    usize => Size,
);

// floats

impl From<f32> for Atomic {
    fn from(f: f32) -> Self {
        Atomic::Float(OrderedFloat(f))
    }
}

impl From<OrderedFloat<f32>> for Atomic {
    fn from(f: OrderedFloat<f32>) -> Self {
        Atomic::Float(f)
    }
}

impl TryFrom<Atomic> for f32 {
    type Error = error::Error;

    fn try_from(a: Atomic) -> Result<Self, Self::Error> {
        match a {
            Atomic::Float(f) => Ok(f.into_inner()),
            _ => Err(error::Error::TypeMismatch),
        }
    }
}

impl From<f64> for Atomic {
    fn from(f: f64) -> Self {
        Atomic::Double(OrderedFloat(f))
    }
}

impl From<OrderedFloat<f64>> for Atomic {
    fn from(f: OrderedFloat<f64>) -> Self {
        Atomic::Double(f)
    }
}

impl TryFrom<Atomic> for f64 {
    type Error = error::Error;

    fn try_from(a: Atomic) -> Result<Self, Self::Error> {
        match a {
            Atomic::Double(f) => Ok(f.into_inner()),
            _ => Err(error::Error::TypeMismatch),
        }
    }
}
