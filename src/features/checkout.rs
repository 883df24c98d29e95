use super::menu_item::format_price;
use crate::config::CheckoutConfig;
use rand::Rng;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use time::{macros::format_description, OffsetDateTime};

static ZIP_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}$").expect("zip pattern"));
static CARD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{16}$").expect("card number pattern"));
static EXPIRY_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").expect("expiry pattern"));
static CVC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3,4}$").expect("cvc pattern"));

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item_id: u32,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

impl fmt::Display for CartLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}  {}", self.name, self.quantity, format_price(self.line_total()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn add(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub tip_percent: u8,
    pub tip: f64,
    pub total: f64,
}

impl OrderSummary {
    pub fn new(cart: &Cart, delivery_fee: f64, tip_percent: u8) -> Self {
        let subtotal = cart.subtotal();
        let tip = subtotal * (f64::from(tip_percent) / 100.0);
        Self {
            subtotal,
            delivery_fee,
            tip_percent,
            tip,
            total: subtotal + delivery_fee + tip,
        }
    }

    pub fn place_order_label(&self) -> String {
        format!("Place Order - {}", format_price(self.total))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub card_name: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("checkout form has {} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),
    #[error("an order is already being placed")]
    AlreadyPlacing,
    #[error("tip of {0}% is not offered")]
    UnknownTip(u8),
}

fn min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

impl CheckoutForm {
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let checks: [(&'static str, bool, &'static str); 8] = [
            (
                "fullName",
                min_chars(&self.full_name, 2),
                "Full name must be at least 2 characters.",
            ),
            ("address", min_chars(&self.address, 5), "Please enter a valid address."),
            ("city", min_chars(&self.city, 2), "Please enter a city."),
            (
                "zipCode",
                ZIP_CODE.is_match(&self.zip_code),
                "Please enter a valid 5-digit zip code.",
            ),
            ("cardName", min_chars(&self.card_name, 2), "Name on card is required."),
            (
                "cardNumber",
                CARD_NUMBER.is_match(&self.card_number),
                "Please enter a valid 16-digit card number.",
            ),
            ("expiryDate", EXPIRY_DATE.is_match(&self.expiry_date), "Use MM/YY format."),
            ("cvc", CVC.is_match(&self.cvc), "Enter a valid CVC."),
        ];

        let errors: Vec<FieldError> = checks
            .into_iter()
            .filter(|(_, ok, _)| !ok)
            .map(|(field, _, message)| FieldError { field, message })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::Invalid(errors))
        }
    }
}

/// Tip choice restricted to the configured percentages.
pub fn check_tip(config: &CheckoutConfig, percent: u8) -> Result<u8, CheckoutError> {
    if config.tip_options.contains(&percent) {
        Ok(percent)
    } else {
        Err(CheckoutError::UnknownTip(percent))
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub number: String,
    pub placed_at: OffsetDateTime,
    pub summary: OrderSummary,
}

impl Order {
    pub fn new(summary: OrderSummary) -> Self {
        let mut rng = rand::thread_rng();
        let number = format!(
            "D{:05}-{:05}",
            rng.gen_range(0..100_000u32),
            rng.gen_range(0..100_000u32)
        );
        Self {
            number,
            placed_at: OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()),
            summary,
        }
    }

    pub fn placed_at_label(&self) -> String {
        self.placed_at
            .format(format_description!("[hour]:[minute]"))
            .unwrap_or_default()
    }
}
