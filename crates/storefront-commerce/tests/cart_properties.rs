//! Cart behaviour checked end to end through the public API.

use std::str::FromStr;

use rust_decimal::Decimal;
use storefront_commerce::prelude::*;

fn usd(amount: &str) -> Money {
    Money::parse(amount, Currency::USD).unwrap()
}

fn product(id: &str, price: &str, stock: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {}", id),
        category: "Electronics".to_string(),
        price: usd(price),
        quantity: stock,
        image: String::new(),
        description: String::new(),
        specification: String::new(),
        rating: 4.0,
    }
}

#[test]
fn add_count_matches_call_count() {
    let sequences: [&[&str]; 4] = [
        &["a"],
        &["a", "b", "a", "c", "a"],
        &["x", "x", "x", "x", "x", "x", "x"],
        &["b", "a", "b", "a", "c"],
    ];

    for sequence in sequences {
        let mut cart = CartStore::new();
        for id in sequence {
            cart.add_to_cart(&ProductId::new(*id));
        }
        for id in sequence {
            let expected = sequence.iter().filter(|other| *other == id).count() as i64;
            assert_eq!(cart.quantity(&ProductId::new(*id)), expected);
        }
    }
}

#[test]
fn removing_last_unit_deletes_entry() {
    let mut cart = CartStore::new();
    let id = ProductId::new("1");
    cart.add_to_cart(&id);
    cart.add_to_cart(&ProductId::new("2"));
    cart.remove_from_cart(&id);

    let snapshot = cart.snapshot();
    assert!(!snapshot.contains(&id));
    assert!(snapshot.entries().iter().all(|e| e.quantity > 0));
}

#[test]
fn update_sets_or_removes() {
    let mut cart = CartStore::new();
    let id = ProductId::new("1");

    for q in [3, 1, 12, 2] {
        cart.update_cart_quantity(&id, q);
        assert_eq!(cart.quantity(&id), q);
    }
    for q in [0, -1, i64::MIN] {
        cart.update_cart_quantity(&id, 5);
        cart.update_cart_quantity(&id, q);
        assert!(!cart.snapshot().contains(&id));
    }
}

#[test]
fn clear_empties_and_is_idempotent() {
    let mut cart = CartStore::new();
    cart.add_to_cart(&ProductId::new("1"));
    cart.update_cart_quantity(&ProductId::new("2"), 9);

    cart.clear_cart();
    assert!(cart.snapshot().is_empty());
    assert_eq!(cart.item_count(), 0);

    let once = cart.clone();
    cart.clear_cart();
    assert_eq!(cart, once);
}

#[test]
fn summary_for_two_line_cart() {
    let catalog = Catalog::new(vec![product("A", "10", 10), product("B", "5", 10)]).unwrap();
    let mut cart = CartStore::new();
    cart.update_cart_quantity(&ProductId::new("A"), 2);
    cart.update_cart_quantity(&ProductId::new("B"), 1);

    let summary = compute_summary(cart.snapshot(), &catalog);
    assert_eq!(summary.subtotal, usd("25"));
    assert_eq!(summary.tax, usd("2.50"));
    assert_eq!(summary.total, usd("27.50"));
}

#[test]
fn stale_entry_is_counted_but_not_priced() {
    let catalog = Catalog::new(vec![product("A", "10", 10)]).unwrap();
    let mut cart = CartStore::new();
    cart.update_cart_quantity(&ProductId::new("X"), 3);

    let summary = compute_summary(cart.snapshot(), &catalog);
    assert!(summary.line_items.is_empty());
    assert!(summary.subtotal.is_zero());
    assert_eq!(summary.item_count, 3);
}

#[test]
fn increment_at_stock_leaves_quantity() {
    let catalog = Catalog::new(vec![product("A", "10", 5)]).unwrap();
    let id = ProductId::new("A");
    let mut cart = CartStore::new();
    cart.update_cart_quantity(&id, 5);

    let outcome = ClampingCartFacade::new(&mut cart, &catalog).increment(&id);
    assert_eq!(outcome, ClampOutcome::AtStockLimit { quantity: 5 });
    assert_eq!(cart.quantity(&id), 5);
}

#[test]
fn headphones_scenario() {
    let mut session = Session::start(Catalog::seeded());
    let id = ProductId::new("1");

    {
        let mut cart = session.clamp().unwrap();
        for _ in 0..3 {
            cart.increment(&id);
        }
    }
    assert_eq!(session.cart().unwrap().quantity(&id), 3);

    let summary = session.summary().unwrap();
    assert_eq!(summary.line_items[0].line_subtotal, usd("239.97"));
    assert_eq!(summary.subtotal, usd("239.97"));
    assert_eq!(summary.tax.amount, Decimal::from_str("23.997").unwrap());
    assert_eq!(summary.total.amount, Decimal::from_str("263.967").unwrap());
    assert_eq!(summary.tax.display(), "$24.00");
    assert_eq!(summary.total.display(), "$263.97");
}

#[test]
fn stale_entry_reappears_when_product_returns() {
    let mut cart = CartStore::new();
    cart.update_cart_quantity(&ProductId::new("X"), 2);
    cart.add_to_cart(&ProductId::new("A"));

    let without_x = Catalog::new(vec![product("A", "10", 10)]).unwrap();
    let summary = compute_summary(cart.snapshot(), &without_x);
    assert_eq!(summary.line_count(), 1);
    assert_eq!(summary.item_count, 3);
    assert_eq!(cart.quantity(&ProductId::new("X")), 2);

    let with_x = Catalog::new(vec![product("A", "10", 10), product("X", "3", 4)]).unwrap();
    let summary = compute_summary(cart.snapshot(), &with_x);
    assert_eq!(summary.line_count(), 2);
    assert_eq!(summary.line_items[0].product.id.as_str(), "X");
    assert_eq!(summary.subtotal, usd("16"));
}
