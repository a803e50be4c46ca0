use std::any::type_name;
use std::fmt::{self, Debug, Display, Formatter};

use crate::error;
use crate::item::{FromItem, Item};

/// A function signature.
///
/// Parameter and return types are recorded by their Rust type name. They
/// are only used to describe the function; conversion of the arguments is
/// done by the function itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    parameter_types: Vec<&'static str>,
    return_type: &'static str,
}

impl Signature {
    pub fn new(parameter_types: Vec<&'static str>, return_type: &'static str) -> Self {
        Self {
            parameter_types,
            return_type,
        }
    }

    /// The parameter types of the function.
    pub fn parameter_types(&self) -> &[&'static str] {
        &self.parameter_types
    }

    /// The return type of the function.
    pub fn return_type(&self) -> &'static str {
        self.return_type
    }

    /// Return the arity of the function signature.
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fn({}) -> {}",
            self.parameter_types.join(", "),
            self.return_type
        )
    }
}

type FunctionType<'a> = dyn FnMut(&[Item]) -> error::Result<Item> + 'a;

/// A function with its types erased.
///
/// A function takes its arguments as a slice of items and produces one
/// item. It is built from a typed Rust closure through [`IntoFunction`], or
/// directly with [`Function::new`] when the caller wants to handle items
/// itself.
pub struct Function<'a> {
    signature: Signature,
    func: Box<FunctionType<'a>>,
}

impl Debug for Function<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("signature", &self.signature)
            .finish()
    }
}

impl<'a> Function<'a> {
    pub fn new<F>(signature: Signature, func: F) -> Self
    where
        F: FnMut(&[Item]) -> error::Result<Item> + 'a,
    {
        Self {
            signature,
            func: Box::new(func),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn arity(&self) -> usize {
        self.signature.arity()
    }

    /// Call the function.
    ///
    /// The number of arguments has to match the arity of the function.
    pub fn call(&mut self, arguments: &[Item]) -> error::Result<Item> {
        if arguments.len() != self.arity() {
            return Err(error::Error::ShapeMismatch);
        }
        (self.func)(arguments)
    }
}

/// Turn something callable into a [`Function`].
///
/// This is implemented for [`Function`] itself, and for closures and
/// function items of up to five parameters whose parameters implement
/// [`FromItem`] and whose return value converts into an [`Item`]. The `Args`
/// parameter only serves to tell the implementations apart.
pub trait IntoFunction<'a, Args> {
    fn into_function(self) -> Function<'a>;
}

impl<'a> IntoFunction<'a, Function<'a>> for Function<'a> {
    fn into_function(self) -> Function<'a> {
        self
    }
}

macro_rules! impl_into_function {
    ($($param:ident $arg:ident),*) => {
        impl<'a, F, R, $($param,)*> IntoFunction<'a, fn($($param,)*) -> R> for F
        where
            F: FnMut($($param),*) -> R + 'a,
            R: Into<Item> + 'a,
            $($param: FromItem + 'a,)*
        {
            #[allow(unused_mut, unused_variables)]
            fn into_function(mut self) -> Function<'a> {
                let signature = Signature::new(vec![$(type_name::<$param>()),*], type_name::<R>());
                Function::new(signature, move |arguments: &[Item]| {
                    let mut arguments = arguments.iter();
                    $(
                        let $arg = match arguments.next() {
                            Some(item) => $param::from_item(item)?,
                            None => return Err(error::Error::ShapeMismatch),
                        };
                    )*
                    Ok(self($($arg),*).into())
                })
            }
        }
    };
}

impl_into_function!();
impl_into_function!(A a);
impl_into_function!(A a, B b);
impl_into_function!(A a, B b, C c);
impl_into_function!(A a, B b, C c, D d);
impl_into_function!(A a, B b, C c, D d, E e);
