use super::session::SessionStore;
use crate::domain::money::{Amount, Currency};
use crate::domain::payment::{PaymentRequest, Submission};
use crate::domain::ports::{PaymentGatewayRef, SubmissionLedgerRef};
use crate::domain::shopper::ShopperDirectory;
use crate::error::{Result, ValidationError};
use chrono::Utc;

/// Turns the operator's payment form into a gateway request and records the result.
///
/// Nothing is sent until the form validates, and nothing is recorded unless the
/// gateway accepts the request. Accepted submissions go to the front of the ledger.
pub struct SubmissionEngine {
    directory: ShopperDirectory,
    session: SessionStore,
    gateway: PaymentGatewayRef,
    ledger: SubmissionLedgerRef,
}

impl SubmissionEngine {
    /// Creates a new `SubmissionEngine`.
    ///
    /// # Arguments
    ///
    /// * `directory` - Source of shopper card data.
    /// * `session` - Session whose credential authorizes each request.
    /// * `gateway` - Where payment requests are sent.
    /// * `ledger` - Where accepted submissions are recorded.
    pub fn new(
        directory: ShopperDirectory,
        session: SessionStore,
        gateway: PaymentGatewayRef,
        ledger: SubmissionLedgerRef,
    ) -> Self {
        Self {
            directory,
            session,
            gateway,
            ledger,
        }
    }

    /// Validates the form, submits the payment and prepends the new record.
    ///
    /// Checks run in order: shopper, amount, card expiry. The first failure is
    /// returned. The session is checked after the form so input mistakes surface
    /// first, but always before any network call.
    pub async fn submit(
        &self,
        shopper_id: Option<u32>,
        currency: Currency,
        amount_text: &str,
    ) -> Result<Submission> {
        let shopper = shopper_id
            .and_then(|id| self.directory.resolve(id).ok())
            .ok_or(ValidationError::NoShopperSelected)?;

        let amount = Amount::parse(amount_text).map_err(|rejection| {
            tracing::debug!(amount_text, %rejection, "amount rejected");
            ValidationError::InvalidAmount(rejection)
        })?;

        let now = Utc::now().naive_utc();
        if shopper.card.is_expired_at(now.date()) {
            return Err(ValidationError::CardExpired.into());
        }

        let token = self.session.current_credential().await?;

        let request = PaymentRequest::new(shopper, currency, amount, now);
        let created = match self.gateway.create_payment(&token, &request).await {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!(shopper = shopper.id, %currency, "payment request failed: {}", e);
                return Err(e);
            }
        };

        let submission = Submission::new(
            created,
            shopper,
            currency,
            amount,
            request.purchase_time.clone(),
        );
        self.ledger.prepend(submission.clone()).await?;

        tracing::info!(
            payment_id = submission.id(),
            status = submission.status(),
            %currency,
            %amount,
            "payment request accepted"
        );
        Ok(submission)
    }
}
