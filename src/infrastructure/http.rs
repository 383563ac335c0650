use crate::config::GatewayConfig;
use crate::domain::payment::{PaymentCreated, PaymentRequest, StatusUpdate};
use crate::domain::ports::{AuthService, PaymentGateway};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// REST adapter for the payment gateway, covering both login and payments.
///
/// The underlying `reqwest::Client` is cheap to clone and pools connections, so one
/// `HttpGateway` can be shared by every component through an `Arc`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    /// `{base}/payment/{id}` with the id percent-encoded as a single path segment.
    fn payment_url(&self, payment_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.url("payment"))
            .map_err(|e| PaymentError::Gateway(format!("invalid gateway url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| PaymentError::Gateway("gateway url cannot hold a path".to_string()))?
            .push(payment_id);
        Ok(url)
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return match status {
                StatusCode::UNAUTHORIZED => Err(PaymentError::Auth(format!(
                    "credential rejected by gateway: {}",
                    text.trim()
                ))),
                _ => Err(PaymentError::Gateway(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    text.trim()
                ))),
            };
        }
        response
            .json()
            .await
            .map_err(|e| PaymentError::Gateway(format!("malformed response: {e}")))
    }
}

#[async_trait]
impl AuthService for HttpGateway {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let response = self
            .client
            .get(self.config.url("login"))
            .basic_auth(username, Some(password))
            .send()
            .await
            .map_err(|e| PaymentError::Auth(e.to_string()))?;

        // Any failure on this route is an authentication failure.
        let body: LoginResponse = Self::handle_response(response)
            .await
            .map_err(|e| match e {
                PaymentError::Gateway(msg) => PaymentError::Auth(msg),
                other => other,
            })?;
        Ok(body.token)
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn create_payment(
        &self,
        token: &str,
        request: &PaymentRequest,
    ) -> Result<PaymentCreated> {
        let response = self
            .client
            .post(self.config.url("payment"))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn payment_status(&self, token: &str, payment_id: &str) -> Result<StatusUpdate> {
        let response = self
            .client
            .get(self.payment_url(payment_id)?)
            .bearer_auth(token)
            .send()
            .await?;
        Self::handle_response(response).await
    }
}
