// not every test file uses every helper
#![allow(dead_code)]

use maduce::Collection;

pub(crate) fn numbers() -> Collection {
    Collection::from(vec![1i64, 2, 3, 4, 5])
}

pub(crate) fn floats() -> Collection {
    Collection::from(vec![0.0f64, 1.8, 2.0, 3.3, 4.0, 5.0])
}

#[derive(Debug)]
pub(crate) struct Product {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) price: f64,
}

pub(crate) fn product(id: i64, title: &str, price: f64) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
    }
}
