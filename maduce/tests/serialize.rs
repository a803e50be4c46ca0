#![cfg(feature = "serde")]

use std::rc::Rc;

use insta::assert_ron_snapshot;

use maduce::{collection, Collection};

mod common;

use common::{numbers, product};

#[test]
fn test_serialize_mixed_collection() {
    let c = collection![4i64, -7i32, "x", 1.5f64, true, Rc::new(product(1, "Tea", 3.5))];
    assert_ron_snapshot!(c, @r#"
    Collection(
      items: [
        Atomic(Integer(Long, "4")),
        Atomic(Integer(Int, "-7")),
        Atomic(String("x")),
        Atomic(Double(1.5)),
        Atomic(Boolean(true)),
        Opaque("serialize::common::Product"),
      ],
    )
    "#);
}

#[test]
fn test_serialize_shape_error() {
    let error = numbers()
        .filter(|n: i64, _i: usize, _x: i64| n > 0)
        .unwrap_err();
    assert_ron_snapshot!(error, @r#"
    Shape(
      operation: Filter,
      signature: "fn(i64, usize, i64) -> bool",
      error: ShapeMismatch,
    )
    "#);
}

#[test]
fn test_serialize_element_error() {
    let c = Collection::from_opaque(vec![product(1, "Tea", 3.5)]);
    let error = c.map(|n: i64| n).unwrap_err();
    assert_ron_snapshot!(error, @r"
    Element(
      operation: Map,
      index: 0,
      error: TypeMismatch,
    )
    ");
}
