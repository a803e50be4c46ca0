use std::rc::Rc;

use maduce::{Collection, DispatchError, Error};

#[derive(Debug)]
struct Product {
    title: String,
    price: f64,
}

fn measurements() -> anyhow::Result<String> {
    let collection = Collection::from(vec![0.0f64, 1.8, 2.0, 3.3, 4.0, 5.0]);

    let mut report = String::new();
    collection
        .filter(|n: f64| n > 0.0)?
        .map(|n: f64| format!("{:.2}", n))?
        .reduce(&mut report, |s: String, report: String, index: usize| {
            if report.is_empty() {
                format!("{}: {}", index, s)
            } else {
                format!("{}\n{}: {}", report, index, s)
            }
        })?;
    Ok(report)
}

fn catalog() -> anyhow::Result<String> {
    let products = Collection::from(vec![
        Rc::new(Product {
            title: "Tea".to_string(),
            price: 3.5,
        }),
        Rc::new(Product {
            title: "Coffee".to_string(),
            price: 9.0,
        }),
    ]);
    let total = products.fold(0.0f64, |p: Rc<Product>, total: f64| total + p.price)?;
    let titles = products.map(|p: Rc<Product>| p.title.clone())?;
    Ok(format!("{} cost {:.2}", titles, total))
}

fn render_error(e: &DispatchError) {
    eprintln!("error: {}", e);
    let error: &Error = e.error();
    eprintln!("  {}", error.message());
    eprintln!("  {}", error.note());
}

fn main() -> anyhow::Result<()> {
    println!("{}", measurements()?);
    println!("{}", catalog()?);

    // a reducer must take the accumulator
    let mut sum = 0i64;
    if let Err(e) = Collection::from(vec![1i64, 2, 3]).reduce(&mut sum, |n: i64| n) {
        render_error(&e);
    }
    Ok(())
}
