use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;

use ibig::IBig;
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;

use crate::atomic;
use crate::error;

/// An element of a collection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Item {
    /// A scalar value such as an integer, float or string.
    Atomic(atomic::Atomic),
    /// Any other host value, shared by reference.
    Opaque(Opaque),
}

impl Item {
    /// Try to get the atomic value of the item.
    pub fn to_atomic(&self) -> error::Result<atomic::Atomic> {
        match self {
            Item::Atomic(a) => Ok(a.clone()),
            _ => Err(error::Error::TypeMismatch),
        }
    }

    /// Try to get the opaque value of the item.
    pub fn to_opaque(&self) -> error::Result<Opaque> {
        match self {
            Item::Opaque(o) => Ok(o.clone()),
            _ => Err(error::Error::TypeMismatch),
        }
    }

    /// Convert the item into a value of type `V`.
    pub fn try_into_value<V>(&self) -> error::Result<V>
    where
        V: FromItem,
    {
        V::from_item(self)
    }

    /// The name of the Rust type held by this item.
    pub fn type_name(&self) -> &'static str {
        match self {
            Item::Atomic(a) => a.type_name(),
            Item::Opaque(o) => o.type_name(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Atomic(a) => fmt::Display::fmt(a, f),
            Item::Opaque(o) => fmt::Display::fmt(o, f),
        }
    }
}

/// A host value without an atomic representation.
///
/// Cloning an opaque value shares it; two opaque values are equal only if
/// they share the same allocation.
#[derive(Clone)]
pub struct Opaque {
    value: Rc<dyn Any>,
    type_name: &'static str,
    debug: fn(&dyn Any, &mut fmt::Formatter<'_>) -> fmt::Result,
}

fn debug_value<T: Any + fmt::Debug>(value: &dyn Any, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(value) => fmt::Debug::fmt(value, f),
        None => f.write_str(type_name::<T>()),
    }
}

impl Opaque {
    pub fn new<T: Any + fmt::Debug>(value: T) -> Self {
        Self::from_rc(Rc::new(value))
    }

    pub fn from_rc<T: Any + fmt::Debug>(value: Rc<T>) -> Self {
        Self {
            value,
            type_name: type_name::<T>(),
            debug: debug_value::<T>,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Get a shared handle to the value if it has type `T`.
    pub fn downcast<T: Any>(&self) -> error::Result<Rc<T>> {
        self.value
            .clone()
            .downcast::<T>()
            .map_err(|_| error::Error::TypeMismatch)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.debug)(self.value.as_ref(), f)
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.value), Rc::as_ptr(&other.value))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Opaque {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_name)
    }
}

/// Conversion of an item into a function parameter.
///
/// Implemented for every type an atomic can convert into, for [`Item`]
/// itself (accepting anything) and for `Rc<T>` of opaque host values.
pub trait FromItem: Sized {
    fn from_item(item: &Item) -> error::Result<Self>;
}

impl FromItem for Item {
    fn from_item(item: &Item) -> error::Result<Self> {
        Ok(item.clone())
    }
}

impl FromItem for atomic::Atomic {
    fn from_item(item: &Item) -> error::Result<Self> {
        item.to_atomic()
    }
}

impl FromItem for Opaque {
    fn from_item(item: &Item) -> error::Result<Self> {
        item.to_opaque()
    }
}

impl<T: Any> FromItem for Rc<T> {
    fn from_item(item: &Item) -> error::Result<Self> {
        item.to_opaque()?.downcast()
    }
}

impl From<atomic::Atomic> for Item {
    fn from(atomic: atomic::Atomic) -> Self {
        Item::Atomic(atomic)
    }
}

impl From<Opaque> for Item {
    fn from(opaque: Opaque) -> Self {
        Item::Opaque(opaque)
    }
}

impl<T: Any + fmt::Debug> From<Rc<T>> for Item {
    fn from(value: Rc<T>) -> Self {
        Item::Opaque(Opaque::from_rc(value))
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::Atomic(s.into())
    }
}

impl From<&String> for Item {
    fn from(s: &String) -> Self {
        Item::Atomic(s.into())
    }
}

macro_rules! atomic_items {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Item {
                fn from(value: $t) -> Self {
                    Item::Atomic(value.into())
                }
            }

            impl FromItem for $t {
                fn from_item(item: &Item) -> error::Result<Self> {
                    item.to_atomic()?.try_into()
                }
            }
        )*
    };
}

atomic_items!(
    String,
    bool,
    Decimal,
    IBig,
    i64,
    i32,
    i16,
    i8,
    u64,
    u32,
    u16,
    u8,
    usize,
    f32,
    f64,
);

impl From<OrderedFloat<f32>> for Item {
    fn from(f: OrderedFloat<f32>) -> Self {
        Item::Atomic(f.into())
    }
}

impl From<OrderedFloat<f64>> for Item {
    fn from(f: OrderedFloat<f64>) -> Self {
        Item::Atomic(f.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Product {
        id: i64,
        title: String,
    }

    #[test]
    fn test_atomic_item() {
        let item = Item::from(3i64);
        assert_eq!(item.try_into_value::<i64>(), Ok(3));
        assert_eq!(
            item.try_into_value::<String>(),
            Err(error::Error::TypeMismatch)
        );
        assert_eq!(item.type_name(), "i64");
        assert_eq!(item.to_string(), "3");
    }

    #[test]
    fn test_item_accepts_anything() {
        let item = Item::from("x");
        assert_eq!(Item::from_item(&item), Ok(item.clone()));
    }

    #[test]
    fn test_opaque_round_trip() {
        let product = Rc::new(Product {
            id: 1,
            title: "Tea".to_string(),
        });
        let item: Item = product.clone().into();
        assert!(item.type_name().ends_with("Product"));
        let back: Rc<Product> = item.try_into_value().unwrap();
        assert!(Rc::ptr_eq(&back, &product));
        assert_eq!(item.to_string(), r#"Product { id: 1, title: "Tea" }"#);
    }

    #[test]
    fn test_opaque_wrong_type() {
        let item = Item::Opaque(Opaque::new(vec![1u8, 2]));
        assert_eq!(
            item.try_into_value::<Rc<String>>(),
            Err(error::Error::TypeMismatch)
        );
        assert_eq!(
            item.try_into_value::<u8>(),
            Err(error::Error::TypeMismatch)
        );
        let opaque = item.to_opaque().unwrap();
        assert_eq!(opaque.downcast_ref::<Vec<u8>>(), Some(&vec![1u8, 2]));
    }

    #[test]
    fn test_opaque_identity() {
        let a = Opaque::new(5u8);
        let b = Opaque::new(5u8);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
