//! Demo products the storefront starts with.

use super::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: &str,
    price_cents: i64,
    quantity: i64,
    image: &str,
    description: &str,
    specification: &str,
    rating: f64,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: Money::from_minor(price_cents, Currency::USD),
        quantity,
        image: image.to_string(),
        description: description.to_string(),
        specification: specification.to_string(),
        rating,
    }
}

/// The four demo products.
pub fn default_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Wireless Headphones",
            "Electronics",
            7999,
            15,
            "/wireless-headphones.png",
            "Premium wireless headphones with active noise cancellation and superior sound quality. Perfect for music lovers and professionals.",
            "Bluetooth 5.0, 30-hour battery, ANC, Foldable design, Comfort padding",
            4.5,
        ),
        product(
            "2",
            "USB-C Cable",
            "Accessories",
            1299,
            50,
            "/usb-c-cable.jpg",
            "Durable USB-C charging cable with fast charging support. Compatible with most modern devices.",
            "2m length, 100W power delivery, Braided nylon, Fast charging",
            4.8,
        ),
        product(
            "3",
            "Portable Charger",
            "Electronics",
            3499,
            8,
            "/portable-charger-power-bank.jpg",
            "High-capacity portable charger with multiple ports for charging multiple devices simultaneously.",
            "20000mAh, Dual USB + USB-C, LED display, Compact design",
            4.3,
        ),
        product(
            "4",
            "Screen Protector",
            "Accessories",
            999,
            2,
            "/screen-protector-tempered-glass.jpg",
            "Tempered glass screen protector for maximum protection. Easy installation with bubble-free application.",
            "9H hardness, Anti-fingerprint coating, Easy installation, 2-pack",
            4.6,
        ),
    ]
}
