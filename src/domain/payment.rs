use super::money::{Amount, Currency};
use super::shopper::{CardSnapshot, Shopper};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Validation method tag for operator-initiated payments.
pub const VALIDATION_METHOD: &str = "push";

/// Layout the gateway expects for `purchate_time`: UTC, milliseconds, no zone.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Body of a payment creation call. Built per submission, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: Currency,
    #[serde(rename = "purchate_time")]
    pub purchase_time: String,
    pub validation_method: String,
    pub card: CardSnapshot,
    pub metadata: String,
}

impl PaymentRequest {
    pub fn new(shopper: &Shopper, currency: Currency, amount: Amount, at: NaiveDateTime) -> Self {
        Self {
            amount: amount.value(),
            currency,
            purchase_time: at.format(TIMESTAMP_FORMAT).to_string(),
            validation_method: VALIDATION_METHOD.to_string(),
            card: shopper.card.snapshot(),
            metadata: shopper.name.to_string(),
        }
    }
}

/// Gateway answer to a creation call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentCreated {
    pub id: String,
    pub status: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub bank_message: Option<String>,
}

/// The two fields a status lookup may change on a submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub bank_message: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// A payment request the gateway accepted, as tracked in the ledger.
///
/// Only `status` and `bank_message` change after creation, and only through
/// [`Submission::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    id: String,
    shopper: String,
    currency: Currency,
    amount: Amount,
    status: String,
    bank_message: Option<String>,
    created_at: String,
}

impl Submission {
    pub fn new(
        created: PaymentCreated,
        shopper: &Shopper,
        currency: Currency,
        amount: Amount,
        created_at: String,
    ) -> Self {
        Self {
            id: created.id,
            shopper: shopper.display(),
            currency,
            amount,
            status: created.status,
            bank_message: created.bank_message,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shopper(&self) -> &str {
        &self.shopper
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn bank_message(&self) -> Option<&str> {
        self.bank_message.as_deref()
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn apply(&mut self, update: StatusUpdate) {
        self.status = update.status;
        self.bank_message = update.bank_message;
    }
}
