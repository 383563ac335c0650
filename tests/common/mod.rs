use merchant_console::application::engine::SubmissionEngine;
use merchant_console::application::reconciler::StatusReconciler;
use merchant_console::application::session::SessionStore;
use merchant_console::domain::shopper::ShopperDirectory;
use merchant_console::infrastructure::in_memory::InMemoryLedger;
use merchant_console::infrastructure::mock::MockGateway;
use std::sync::Arc;

/// Every core component wired to one scripted gateway and one ledger.
pub struct Harness {
    pub gateway: Arc<MockGateway>,
    pub ledger: Arc<InMemoryLedger>,
    pub session: SessionStore,
    pub engine: SubmissionEngine,
    pub reconciler: StatusReconciler,
}

pub fn harness() -> Harness {
    let gateway = Arc::new(MockGateway::new());
    let ledger = Arc::new(InMemoryLedger::new());
    let session = SessionStore::new(gateway.clone());
    let engine = SubmissionEngine::new(
        ShopperDirectory::new(),
        session.clone(),
        gateway.clone(),
        ledger.clone(),
    );
    let reconciler = StatusReconciler::new(session.clone(), gateway.clone(), ledger.clone());
    Harness {
        gateway,
        ledger,
        session,
        engine,
        reconciler,
    }
}

#[allow(dead_code)]
pub async fn logged_in_harness() -> Harness {
    let h = harness();
    h.gateway.accept_login("jwt-test");
    h.session
        .login("merchant1", "secret")
        .await
        .expect("scripted login should succeed");
    h
}
