use crate::error::{PaymentError, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Stored card details for a shopper.
#[derive(Debug, PartialEq, Eq)]
pub struct Card {
    pub number: &'static str,
    pub name: &'static str,
    pub expire_month: u32,
    pub expire_year: i32,
    pub cvv: u16,
}

impl Card {
    /// A card stays valid through the last day of its expiry month.
    pub fn is_expired_at(&self, today: NaiveDate) -> bool {
        (self.expire_year, self.expire_month) < (today.year(), today.month())
    }

    /// Copy of the card as sent to the gateway.
    pub fn snapshot(&self) -> CardSnapshot {
        CardSnapshot {
            number: self.number.to_string(),
            name: self.name.to_string(),
            expire_month: self.expire_month,
            expire_year: self.expire_year,
            cvv: self.cvv,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSnapshot {
    pub number: String,
    pub name: String,
    pub expire_month: u32,
    pub expire_year: i32,
    pub cvv: u16,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Shopper {
    pub id: u32,
    pub name: &'static str,
    pub card: Card,
}

impl Shopper {
    /// Name plus masked card number, e.g. `shopper 0 - ****-****-****-4444`.
    pub fn display(&self) -> String {
        format!("{} - {}", self.name, mask_card_number(self.card.number))
    }
}

/// Replaces every digit except the last four with `*`, keeping separators.
pub fn mask_card_number(number: &str) -> String {
    let digits = number.chars().filter(char::is_ascii_digit).count();
    let mut seen = 0;
    number
        .chars()
        .map(|c| {
            if !c.is_ascii_digit() {
                return c;
            }
            seen += 1;
            if seen + 4 > digits { c } else { '*' }
        })
        .collect()
}

static SHOPPERS: [Shopper; 5] = [
    Shopper {
        id: 0,
        name: "shopper 0",
        card: Card {
            number: "1111-2222-3333-4444",
            name: "shopper 0",
            expire_month: 10,
            expire_year: 2050,
            cvv: 123,
        },
    },
    Shopper {
        id: 1,
        name: "shopper 1",
        card: Card {
            number: "5555-6666-7777-8888",
            name: "shopper 1",
            expire_month: 10,
            expire_year: 2040,
            cvv: 456,
        },
    },
    Shopper {
        id: 2,
        name: "shopper 2",
        card: Card {
            number: "9999-1010-1111-1212",
            name: "shopper 2",
            expire_month: 3,
            expire_year: 2045,
            cvv: 789,
        },
    },
    Shopper {
        id: 4,
        name: "shopper 4",
        card: Card {
            number: "1313-1414-1515-1616",
            name: "shopper 5",
            expire_month: 1,
            expire_year: 2070,
            cvv: 987,
        },
    },
    Shopper {
        id: 5,
        name: "shopper 5",
        card: Card {
            number: "1717-1818-1919-2020",
            name: "shopper 5",
            expire_month: 1,
            expire_year: 2070,
            cvv: 987,
        },
    },
];

/// Read-only lookup over the fixed shopper table.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShopperDirectory;

impl ShopperDirectory {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, id: u32) -> Result<&'static Shopper> {
        SHOPPERS
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| PaymentError::NotFound(format!("shopper {id}")))
    }

    /// All shoppers in id order.
    pub fn all(&self) -> &'static [Shopper] {
        &SHOPPERS
    }
}
