use std::any::Any;
use std::fmt;

use crate::dispatch::{Convention, Operation};
use crate::error::{self, DispatchResult};
use crate::function::{Function, IntoFunction};
use crate::item::{FromItem, Item, Opaque};

/// An ordered list of items of any type.
///
/// The items don't have to share a type, but the functions handed to
/// [`filter`](Collection::filter), [`map`](Collection::map) and
/// [`reduce`](Collection::reduce) have to accept whatever type they are
/// given, so in practice a collection mostly holds one type.
///
/// A collection never changes once it is built: filter and map produce new
/// collections.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Collection {
    items: Vec<Item>,
}

impl Collection {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection of host values, each held as an opaque item.
    ///
    /// Functions receive the values as `Rc<T>`:
    ///
    /// ```
    /// use std::rc::Rc;
    ///
    /// use maduce::Collection;
    ///
    /// #[derive(Debug)]
    /// struct Product {
    ///     price: f64,
    /// }
    ///
    /// let products = Collection::from_opaque(vec![Product { price: 3.5 }, Product { price: 9.0 }]);
    /// let total = products
    ///     .fold(0.0f64, |p: Rc<Product>, total: f64| total + p.price)
    ///     .unwrap();
    /// assert_eq!(total, 12.5);
    /// ```
    pub fn from_opaque<T, I>(values: I) -> Self
    where
        T: Any + fmt::Debug,
        I: IntoIterator<Item = T>,
    {
        Self {
            items: values
                .into_iter()
                .map(|value| Item::Opaque(Opaque::new(value)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Keep the items for which the predicate returns `true`.
    ///
    /// The predicate takes the item, optionally followed by its index, and
    /// returns a `bool`:
    ///
    /// ```
    /// use maduce::collection;
    ///
    /// // delete the item at index 1
    /// let result = collection![1i64, 2i64, 3i64]
    ///     .filter(|_n: i64, index: usize| index != 1)
    ///     .unwrap();
    /// assert_eq!(result.to_string(), "[1 3]");
    /// ```
    pub fn filter<'a, Args>(
        &self,
        predicate: impl IntoFunction<'a, Args>,
    ) -> DispatchResult<Collection> {
        let mut predicate = predicate.into_function();
        let convention = Convention::for_function(Operation::Filter, &predicate)?;

        let mut result = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            let keep = call(&mut predicate, convention, item, None, index)
                .and_then(|value| bool::from_item(&value))
                .map_err(|e| e.at(Operation::Filter, index))?;
            if keep {
                result.push(item.clone());
            }
        }
        Ok(result.into())
    }

    /// Transform each item into a new one.
    ///
    /// The transform takes the item, optionally followed by its index, and
    /// may return a value of any type. The result has as many items as this
    /// collection, in the same order.
    pub fn map<'a, Args>(
        &self,
        transform: impl IntoFunction<'a, Args>,
    ) -> DispatchResult<Collection> {
        let mut transform = transform.into_function();
        let convention = Convention::for_function(Operation::Map, &transform)?;

        let mut result = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            let value = call(&mut transform, convention, item, None, index)
                .map_err(|e| e.at(Operation::Map, index))?;
            result.push(value);
        }
        Ok(result.into())
    }

    /// Fold the items into the accumulator.
    ///
    /// The reducer takes the item and the current accumulator value,
    /// optionally followed by the index, and returns the new accumulator
    /// value. The accumulator is only written once the whole collection has
    /// been folded; if the reduction fails it keeps its original value.
    ///
    /// ```
    /// use maduce::Collection;
    ///
    /// let mut sum = 0i64;
    /// Collection::from(vec![1i64, 2, 3, 4, 5])
    ///     .reduce(&mut sum, |n: i64, sum: i64| n + sum)
    ///     .unwrap();
    /// assert_eq!(sum, 15);
    /// ```
    pub fn reduce<'a, A, Args>(
        &self,
        accumulator: &mut A,
        reducer: impl IntoFunction<'a, Args>,
    ) -> DispatchResult<()>
    where
        A: FromItem + Into<Item> + Clone,
    {
        *accumulator = self.fold(accumulator.clone(), reducer)?;
        Ok(())
    }

    /// Fold the items, starting from `zero`, and return the result.
    ///
    /// This takes the same reducers as [`reduce`](Collection::reduce).
    pub fn fold<'a, A, Args>(
        &self,
        zero: A,
        reducer: impl IntoFunction<'a, Args>,
    ) -> DispatchResult<A>
    where
        A: FromItem + Into<Item>,
    {
        let mut reducer = reducer.into_function();
        let convention = Convention::for_function(Operation::Reduce, &reducer)?;

        let mut accumulator = zero;
        for (index, item) in self.items.iter().enumerate() {
            accumulator = call(
                &mut reducer,
                convention,
                item,
                Some(accumulator.into()),
                index,
            )
            .and_then(|value| A::from_item(&value))
            .map_err(|e| e.at(Operation::Reduce, index))?;
        }
        Ok(accumulator)
    }

    /// Convert every item into a value of type `V`.
    ///
    /// A failed conversion is reported like a failing map.
    pub fn try_into_values<V: FromItem>(&self) -> DispatchResult<Vec<V>> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                V::from_item(item).map_err(|e| e.at(Operation::Map, index))
            })
            .collect()
    }
}

fn call(
    function: &mut Function,
    convention: Convention,
    item: &Item,
    accumulator: Option<Item>,
    index: usize,
) -> error::Result<Item> {
    let arguments = convention.arguments(item, accumulator, index)?;
    function.call(&arguments)
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

impl<T> From<Vec<T>> for Collection
where
    T: Into<Item>,
{
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T> From<&[T]> for Collection
where
    T: Clone + Into<Item>,
{
    fn from(values: &[T]) -> Self {
        values.iter().cloned().collect()
    }
}

impl<T> FromIterator<T> for Collection
where
    T: Into<Item>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for Collection {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Build a collection from a list of values, which may have different
/// types.
///
/// ```
/// let c = maduce::collection![1i64, "two", 3.5f64];
/// assert_eq!(c.to_string(), "[1 two 3.5]");
/// ```
#[macro_export]
macro_rules! collection {
    () => {
        $crate::Collection::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Collection::from(vec![$($crate::Item::from($value)),+])
    };
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::error::Error;

    #[test]
    fn test_filter_keeps_order() {
        let c = Collection::from(vec![5i64, 1, 4, 2, 3]);
        let result = c.filter(|n: i64| n >= 3).unwrap();
        assert_eq!(result, Collection::from(vec![5i64, 4, 3]));
        // the receiver is untouched
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn test_filter_by_index() {
        let c = Collection::from(vec!["a", "b", "c"]);
        let result = c.filter(|_s: String, i: usize| i != 1).unwrap();
        assert_eq!(result.to_string(), "[a c]");
    }

    #[test]
    fn test_filter_non_bool_result() {
        let c = Collection::from(vec![1i64]);
        let error = c.filter(|n: i64| n).unwrap_err();
        assert_eq!(error, Error::TypeMismatch.at(Operation::Filter, 0));
    }

    #[test]
    fn test_map_with_index() {
        let c = Collection::from(vec![10i64, 20, 30]);
        let result = c.map(|n: i64, i: usize| n + i as i64).unwrap();
        assert_eq!(result, Collection::from(vec![10i64, 21, 32]));
    }

    #[test]
    fn test_map_stops_at_first_mismatch() {
        let calls = Cell::new(0);
        let c = collection![1i64, 2i64, "three", 4i64];
        let error = c
            .map(|n: i64| {
                calls.set(calls.get() + 1);
                n
            })
            .unwrap_err();
        assert_eq!(error.index(), Some(2));
        assert_eq!(error.error(), &Error::TypeMismatch);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_fold_with_index() {
        let c = Collection::from(vec!["a", "b"]);
        let result = c
            .fold(String::new(), |s: String, acc: String, i: usize| {
                format!("{}{}{}", acc, i, s)
            })
            .unwrap();
        assert_eq!(result, "0a1b");
    }

    #[test]
    fn test_reduce_leaves_accumulator_on_failure() {
        let c = collection![1i64, 2i64, 3.0f64];
        let mut sum = 100i64;
        let error = c.reduce(&mut sum, |n: i64, sum: i64| n + sum).unwrap_err();
        assert_eq!(error, Error::TypeMismatch.at(Operation::Reduce, 2));
        assert_eq!(sum, 100);
    }

    #[test]
    fn test_reduce_wrong_return_type() {
        let c = Collection::from(vec![1i64]);
        let mut sum = 0i64;
        let error = c
            .reduce(&mut sum, |n: i64, _sum: i64| n.to_string())
            .unwrap_err();
        assert_eq!(error, Error::TypeMismatch.at(Operation::Reduce, 0));
    }

    #[test]
    fn test_reduce_wrong_accumulator_parameter() {
        let c = Collection::from(vec![1i64]);
        let mut sum = 0i64;
        let error = c
            .reduce(&mut sum, |n: i64, _sum: String| n)
            .unwrap_err();
        assert_eq!(error, Error::TypeMismatch.at(Operation::Reduce, 0));
    }

    #[test]
    fn test_reduce_with_item_accumulator() {
        let c = collection![1i64, "x"];
        let mut last = Item::from(false);
        c.reduce(&mut last, |item: Item, _last: Item| item).unwrap();
        assert_eq!(last, Item::from("x"));
    }

    #[test]
    fn test_try_into_values() {
        let c = Collection::from(vec![1u32, 2, 3]);
        assert_eq!(c.try_into_values::<u32>(), Ok(vec![1, 2, 3]));
        let error = c.try_into_values::<i64>().unwrap_err();
        assert_eq!(error.index(), Some(0));
    }

    #[test]
    fn test_construction() {
        let c: Collection = (1u8..=3).collect();
        assert_eq!(c.len(), 3);
        assert_eq!(c.get(2), Some(&Item::from(3u8)));
        assert_eq!(c.get(3), None);
        let slice: &[f64] = &[0.5, 1.5];
        assert_eq!(Collection::from(slice).to_string(), "[0.5 1.5]");
        assert_eq!(collection![], Collection::new());
    }

    #[test]
    fn test_from_opaque() {
        #[derive(Debug)]
        struct Point {
            x: i64,
        }

        let c = Collection::from_opaque(vec![Point { x: 1 }, Point { x: -2 }]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.to_string(), "[Point { x: 1 } Point { x: -2 }]");
        let xs = c.map(|p: Rc<Point>| p.x).unwrap();
        assert_eq!(xs, Collection::from(vec![1i64, -2]));
        // the host values don't convert into other host types
        let error = c.map(|s: Rc<String>| s.len()).unwrap_err();
        assert_eq!(error, Error::TypeMismatch.at(Operation::Map, 0));
    }

    #[test]
    fn test_iteration() {
        let c = collection![1i64, "a"];
        let names = c.iter().map(|item| item.type_name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["i64", "String"]);
        let mut count = 0;
        for _item in &c {
            count += 1;
        }
        assert_eq!(count, 2);
        let items = c.into_iter().collect::<Vec<_>>();
        assert_eq!(items[1], Item::from("a"));
    }
}
