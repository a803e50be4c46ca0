use arrayvec::ArrayVec;
use strum_macros::Display;

use crate::error::{self, DispatchError, DispatchResult, Error};
use crate::function::Function;
use crate::item::Item;

/// The collection operations that call functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Operation {
    Filter,
    Map,
    Reduce,
}

/// How a function is called during a traversal.
///
/// The element always comes first, then the accumulator for reductions,
/// then the index if the function has a parameter left for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Convention {
    /// `(element)`
    Item,
    /// `(element, index)`
    ItemIndex,
    /// `(element, accumulator)`
    ItemAccumulator,
    /// `(element, accumulator, index)`
    ItemAccumulatorIndex,
}

// element, accumulator and index
const ARGUMENTS_MAX: usize = 3;

pub(crate) type Arguments = ArrayVec<Item, ARGUMENTS_MAX>;

impl Convention {
    /// The convention an operation uses for a function of the given arity,
    /// if it has one.
    pub fn resolve(operation: Operation, arity: usize) -> Option<Convention> {
        match (operation, arity) {
            (Operation::Filter | Operation::Map, 1) => Some(Convention::Item),
            (Operation::Filter | Operation::Map, 2) => Some(Convention::ItemIndex),
            (Operation::Reduce, 2) => Some(Convention::ItemAccumulator),
            (Operation::Reduce, 3) => Some(Convention::ItemAccumulatorIndex),
            _ => None,
        }
    }

    /// Resolve the convention for a function, or reject its shape.
    pub(crate) fn for_function(
        operation: Operation,
        function: &Function,
    ) -> DispatchResult<Convention> {
        Self::resolve(operation, function.arity()).ok_or_else(|| DispatchError::Shape {
            operation,
            signature: function.signature().to_string(),
            error: Error::ShapeMismatch,
        })
    }

    fn takes_index(&self) -> bool {
        matches!(
            self,
            Convention::ItemIndex | Convention::ItemAccumulatorIndex
        )
    }

    fn takes_accumulator(&self) -> bool {
        matches!(
            self,
            Convention::ItemAccumulator | Convention::ItemAccumulatorIndex
        )
    }

    /// Assemble the arguments for one call.
    ///
    /// An accumulator has to be given exactly when the convention takes one.
    pub(crate) fn arguments(
        &self,
        item: &Item,
        accumulator: Option<Item>,
        index: usize,
    ) -> error::Result<Arguments> {
        let mut arguments = Arguments::new();
        arguments.push(item.clone());
        match (self.takes_accumulator(), accumulator) {
            (true, Some(accumulator)) => arguments.push(accumulator),
            (false, None) => {}
            _ => return Err(Error::ShapeMismatch),
        }
        if self.takes_index() {
            arguments.push(index.into());
        }
        Ok(arguments)
    }
}
