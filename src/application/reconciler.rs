use super::session::SessionStore;
use crate::domain::payment::StatusUpdate;
use crate::domain::ports::{PaymentGatewayRef, SubmissionLedgerRef};
use crate::error::{PaymentError, Result};

/// Re-fetches the gateway's view of a recorded payment on operator request.
pub struct StatusReconciler {
    session: SessionStore,
    gateway: PaymentGatewayRef,
    ledger: SubmissionLedgerRef,
}

impl StatusReconciler {
    pub fn new(
        session: SessionStore,
        gateway: PaymentGatewayRef,
        ledger: SubmissionLedgerRef,
    ) -> Self {
        Self {
            session,
            gateway,
            ledger,
        }
    }

    /// Looks up `payment_id` at the gateway and writes the answer into its ledger entry.
    ///
    /// Unknown ids fail with `NotFound` before anything is sent. On any failure the
    /// entry is left as it was.
    pub async fn refresh(&self, payment_id: &str) -> Result<StatusUpdate> {
        if self.ledger.get(payment_id).await?.is_none() {
            return Err(PaymentError::NotFound(format!("payment {payment_id}")));
        }

        let token = self.session.current_credential().await?;

        let update = match self.gateway.payment_status(&token, payment_id).await {
            Ok(update) => update,
            Err(e) => {
                tracing::warn!(payment_id, "status lookup failed: {}", e);
                return Err(e);
            }
        };

        self.ledger.update_status(payment_id, update.clone()).await?;
        tracing::info!(payment_id, status = %update.status, "payment status refreshed");
        Ok(update)
    }
}
