use super::payment::{PaymentCreated, PaymentRequest, StatusUpdate, Submission};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges operator credentials for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<String>;
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment(&self, token: &str, request: &PaymentRequest)
    -> Result<PaymentCreated>;
    async fn payment_status(&self, token: &str, payment_id: &str) -> Result<StatusUpdate>;
}

/// Ordered record of submissions, most recent first.
#[async_trait]
pub trait SubmissionLedger: Send + Sync {
    /// Inserts at position 0. Fails without changes if the id is already present.
    async fn prepend(&self, submission: Submission) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Submission>>;
    /// Overwrites status fields of one entry and returns the updated copy.
    async fn update_status(&self, id: &str, update: StatusUpdate) -> Result<Submission>;
    async fn entries(&self) -> Result<Vec<Submission>>;
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

pub type AuthServiceRef = Arc<dyn AuthService>;
pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
pub type SubmissionLedgerRef = Arc<dyn SubmissionLedger>;
