use crate::domain::payment::{StatusUpdate, Submission};
use crate::domain::ports::SubmissionLedger;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct LedgerState {
    order: VecDeque<String>,
    records: HashMap<String, Submission>,
}

/// A thread-safe in-memory ledger of submissions for the current session.
///
/// Records are keyed by payment id so a status update can only reach the entry it
/// names; a separate id list keeps the most-recent-first display order.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionLedger for InMemoryLedger {
    async fn prepend(&self, submission: Submission) -> Result<()> {
        let mut state = self.state.write().await;
        if state.records.contains_key(submission.id()) {
            return Err(PaymentError::Gateway(format!(
                "duplicate payment id {}",
                submission.id()
            )));
        }
        state.order.push_front(submission.id().to_string());
        state
            .records
            .insert(submission.id().to_string(), submission);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Submission>> {
        let state = self.state.read().await;
        Ok(state.records.get(id).cloned())
    }

    async fn update_status(&self, id: &str, update: StatusUpdate) -> Result<Submission> {
        let mut state = self.state.write().await;
        let record = state
            .records
            .get_mut(id)
            .ok_or_else(|| PaymentError::NotFound(format!("payment {id}")))?;
        record.apply(update);
        Ok(record.clone())
    }

    async fn entries(&self) -> Result<Vec<Submission>> {
        let state = self.state.read().await;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.records.get(id).cloned())
            .collect())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.state.read().await.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::{Amount, Currency};
    use crate::domain::payment::PaymentCreated;
    use crate::domain::shopper::ShopperDirectory;
    use rust_decimal_macros::dec;

    fn submission(id: &str) -> Submission {
        Submission::new(
            PaymentCreated {
                id: id.to_string(),
                status: "pending".to_string(),
                bank_message: None,
            },
            ShopperDirectory::new().resolve(0).unwrap(),
            Currency::Usd,
            Amount::new(dec!(10)).unwrap(),
            "2026-01-01T00:00:00.000".to_string(),
        )
    }

    #[tokio::test]
    async fn test_prepend_orders_most_recent_first() {
        let ledger = InMemoryLedger::new();
        for id in ["a", "b", "c"] {
            ledger.prepend(submission(id)).await.unwrap();
        }

        let ids: Vec<String> = ledger
            .entries()
            .await
            .unwrap()
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let ledger = InMemoryLedger::new();
        ledger.prepend(submission("a")).await.unwrap();

        let result = ledger.prepend(submission("a")).await;
        assert!(matches!(result, Err(PaymentError::Gateway(_))));
        assert_eq!(ledger.len().await.unwrap(), 1);
        assert_eq!(ledger.entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_status_targets_one_entry() {
        let ledger = InMemoryLedger::new();
        ledger.prepend(submission("a")).await.unwrap();
        ledger.prepend(submission("b")).await.unwrap();

        let updated = ledger
            .update_status(
                "a",
                StatusUpdate {
                    status: "approved".to_string(),
                    bank_message: Some("ok".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status(), "approved");

        let b = ledger.get("b").await.unwrap().unwrap();
        assert_eq!(b.status(), "pending");
        assert_eq!(b.bank_message(), None);
    }

    #[tokio::test]
    async fn test_update_status_missing_entry() {
        let ledger = InMemoryLedger::new();
        let result = ledger
            .update_status(
                "nope",
                StatusUpdate {
                    status: "approved".to_string(),
                    bank_message: None,
                },
            )
            .await;
        assert!(matches!(result, Err(PaymentError::NotFound(_))));
        assert!(ledger.is_empty().await.unwrap());
    }
}
