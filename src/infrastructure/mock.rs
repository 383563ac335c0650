use crate::domain::payment::{PaymentCreated, PaymentRequest, StatusUpdate};
use crate::domain::ports::{AuthService, PaymentGateway};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scripted stand-in for the gateway.
///
/// Responses are queued ahead of time and handed out in order; status responses
/// are queued per payment id so concurrent lookups get their own answers. Every
/// call is counted and the token it carried is recorded.
#[derive(Default)]
pub struct MockGateway {
    login_calls: AtomicUsize,
    create_calls: AtomicUsize,
    status_calls: AtomicUsize,
    logins: Mutex<VecDeque<Result<String>>>,
    creations: Mutex<VecDeque<Result<PaymentCreated>>>,
    statuses: Mutex<HashMap<String, VecDeque<Result<StatusUpdate>>>>,
    requests: Mutex<Vec<PaymentRequest>>,
    tokens: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept_login(&self, token: &str) -> &Self {
        self.queue_login(Ok(token.to_string()))
    }

    pub fn queue_login(&self, result: Result<String>) -> &Self {
        lock(&self.logins).push_back(result);
        self
    }

    pub fn respond_created(&self, id: &str, status: &str, bank_message: Option<&str>) -> &Self {
        self.queue_created(Ok(PaymentCreated {
            id: id.to_string(),
            status: status.to_string(),
            bank_message: bank_message.map(str::to_string),
        }))
    }

    pub fn queue_created(&self, result: Result<PaymentCreated>) -> &Self {
        lock(&self.creations).push_back(result);
        self
    }

    pub fn respond_status(&self, id: &str, status: &str, bank_message: Option<&str>) -> &Self {
        self.queue_status(
            id,
            Ok(StatusUpdate {
                status: status.to_string(),
                bank_message: bank_message.map(str::to_string),
            }),
        )
    }

    pub fn queue_status(&self, id: &str, result: Result<StatusUpdate>) -> &Self {
        lock(&self.statuses)
            .entry(id.to_string())
            .or_default()
            .push_back(result);
        self
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    /// Every payment request received, oldest first.
    pub fn requests(&self) -> Vec<PaymentRequest> {
        lock(&self.requests).clone()
    }

    /// Bearer tokens attached to payment calls, oldest first.
    pub fn tokens(&self) -> Vec<String> {
        lock(&self.tokens).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn unscripted(call: &str) -> PaymentError {
    PaymentError::Gateway(format!("no scripted response for {call}"))
}

#[async_trait]
impl AuthService for MockGateway {
    async fn login(&self, _username: &str, _password: &str) -> Result<String> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.logins)
            .pop_front()
            .unwrap_or_else(|| Err(PaymentError::Auth("invalid credentials".to_string())))
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_payment(
        &self,
        token: &str,
        request: &PaymentRequest,
    ) -> Result<PaymentCreated> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.tokens).push(token.to_string());
        lock(&self.requests).push(request.clone());
        lock(&self.creations)
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("create_payment")))
    }

    async fn payment_status(&self, token: &str, payment_id: &str) -> Result<StatusUpdate> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.tokens).push(token.to_string());
        lock(&self.statuses)
            .get_mut(payment_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(unscripted("payment_status")))
    }
}
