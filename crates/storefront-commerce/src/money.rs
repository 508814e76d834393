//! Money type for representing monetary values.
//!
//! Amounts are exact decimals. Rounding only happens when a value is
//! displayed, so a 10% tax on 239.97 stays 23.997 until it is printed.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

/// Currencies a catalog can be priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    JPY,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::JPY => "JPY",
        }
    }

    /// Prefix used when displaying amounts.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Minor units shown on display.
    pub fn decimal_places(&self) -> u32 {
        if *self == Currency::JPY {
            0
        } else {
            2
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        [Currency::USD, Currency::EUR, Currency::JPY]
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| format!("unsupported currency: {}", code))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Exact amount in major units (e.g., dollars).
    pub amount: Decimal,
    /// The currency.
    #[serde(default)]
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a Money value from minor units (e.g., cents).
    ///
    /// ```
    /// use storefront_commerce::money::{Currency, Money};
    /// let price = Money::from_minor(7999, Currency::USD);
    /// assert_eq!(price.display(), "$79.99");
    /// ```
    pub fn from_minor(minor: i64, currency: Currency) -> Self {
        Self::new(Decimal::new(minor, currency.decimal_places()), currency)
    }

    /// Parse a decimal string such as `"79.99"`.
    pub fn parse(amount: &str, currency: Currency) -> Option<Self> {
        Decimal::from_str(amount.trim())
            .ok()
            .map(|amount| Self::new(amount, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Round to the currency's display precision (midpoint away from zero).
    pub fn rounded(&self) -> Money {
        let places = self.currency.decimal_places();
        let mut amount = self
            .amount
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(places);
        Money::new(amount, self.currency)
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        self.rounded().amount.to_string()
    }

    /// Try to add another Money value, returning None if currencies don't match.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Add, saturating at the largest representable amount.
    ///
    /// Currencies are not checked; callers compare them first.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::new(self.amount.saturating_add(other.amount), self.currency)
    }

    /// Multiply by a quantity, saturating on overflow.
    pub fn multiply(&self, quantity: i64) -> Money {
        Money::new(
            self.amount.saturating_mul(Decimal::from(quantity)),
            self.currency,
        )
    }

    /// Multiply by a quantity, `None` on overflow.
    pub fn checked_multiply(&self, quantity: i64) -> Option<Money> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by an exact rate (e.g., `0.10` for 10% tax). No rounding.
    pub fn multiply_rate(&self, rate: Decimal) -> Money {
        Money::new(self.amount.saturating_mul(rate), self.currency)
    }

    /// Multiply by an exact rate, `None` on overflow.
    pub fn checked_multiply_rate(&self, rate: Decimal) -> Option<Money> {
        self.amount
            .checked_mul(rate)
            .map(|amount| Money::new(amount, self.currency))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, quantity: i64) -> Money {
        self.multiply(quantity)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(s: &str) -> Money {
        Money::parse(s, Currency::USD).unwrap()
    }

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(4999, Currency::USD);
        assert_eq!(m.amount, Decimal::new(4999, 2));

        let m = Money::from_minor(100, Currency::JPY);
        assert_eq!(m.amount, Decimal::from(100));
    }

    #[test]
    fn test_money_display_rounds() {
        assert_eq!(usd("23.997").display(), "$24.00");
        assert_eq!(usd("2.5").display(), "$2.50");
        assert_eq!(usd("0.005").display(), "$0.01");
        assert_eq!(Money::from_minor(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_money_multiply_is_exact() {
        let line = usd("79.99").multiply(3);
        assert_eq!(line, usd("239.97"));

        let tax = line.multiply_rate(Decimal::new(10, 2));
        assert_eq!(tax.amount, Decimal::from_str("23.997").unwrap());
    }

    #[test]
    fn test_money_try_add() {
        let a = usd("10.00");
        let b = usd("5.50");
        assert_eq!(a.try_add(&b), Some(usd("15.50")));

        let eur = Money::parse("1", Currency::EUR).unwrap();
        assert_eq!(a.try_add(&eur), None);
    }

    #[test]
    fn test_money_multiply_saturates_on_overflow() {
        let huge = Money::new(Decimal::MAX, Currency::USD);
        assert_eq!(huge.checked_multiply(2), None);
        assert_eq!(huge.multiply(2).amount, Decimal::MAX);
        assert_eq!(huge.saturating_add(&huge).amount, Decimal::MAX);

        assert_eq!(usd("79.99").checked_multiply(3), Some(usd("239.97")));
        assert_eq!(
            usd("239.97").checked_multiply_rate(Decimal::new(10, 2)).map(|m| m.amount),
            Some(Decimal::from_str("23.997").unwrap())
        );
    }

    #[test]
    fn test_money_parse_rejects_garbage() {
        assert!(Money::parse("abc", Currency::USD).is_none());
        assert_eq!(Money::parse(" 12.99 ", Currency::USD), Some(usd("12.99")));
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("USD".parse::<Currency>(), Ok(Currency::USD));
        assert_eq!(" eur".parse::<Currency>(), Ok(Currency::EUR));
        assert!("GBP".parse::<Currency>().is_err());
    }
}
