//! Filter, map and reduce over collections of dynamically typed values.
//!
//! A [`Collection`] holds [`Item`]s of any type. Its operations take plain
//! Rust closures; the number of parameters a closure declares decides how it
//! is called, and its parameter types decide which items it accepts:
//!
//! ```
//! use maduce::Collection;
//!
//! let collection = Collection::from(vec![0.0f64, 1.8, 2.0, 3.3, 4.0, 5.0]);
//!
//! let mut report = String::new();
//! collection
//!     .filter(|n: f64| n > 0.0)?
//!     .map(|n: f64| format!("{:.2}", n))?
//!     .reduce(&mut report, |s: String, report: String, index: usize| {
//!         if report.is_empty() {
//!             format!("{}: {}", index, s)
//!         } else {
//!             format!("{}\n{}: {}", report, index, s)
//!         }
//!     })?;
//!
//! assert_eq!(report, "0: 1.80\n1: 2.00\n2: 3.30\n3: 4.00\n4: 5.00");
//! # Ok::<(), maduce::DispatchError>(())
//! ```
//!
//! This trades compile time guarantees for flexibility, which suits
//! exploring a data set more than it suits production code. A closure whose
//! shape the operation has no calling convention for, or whose parameter
//! types don't match the items, makes the operation fail with a
//! [`DispatchError`]; nothing is ever coerced.
pub mod atomic;
mod collection;
pub mod dispatch;
pub mod error;
pub mod function;
mod item;

pub use atomic::Atomic;
pub use collection::Collection;
pub use dispatch::{Convention, Operation};
pub use error::{DispatchError, DispatchResult, Error};
pub use function::{Function, IntoFunction, Signature};
pub use item::{FromItem, Item, Opaque};
