//! Decision service client.
//!
//! The wizard talks to the remote keuzegids service through the
//! [`DecisionService`] trait; [`HttpDecisionService`] is the reqwest-backed
//! implementation. The trait seam keeps the wizard testable without a
//! network.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::WizardConfig;
use crate::error::ServiceError;
use crate::model::{NextRequest, Node, PriceRequest, PriceResult, RawNode};

/// The three endpoints the wizard drives.
#[async_trait]
pub trait DecisionService: Send + Sync {
    /// `GET /start` — fetch the root node of the decision tree.
    async fn start(&self) -> Result<Node, ServiceError>;

    /// `POST /next` — submit a zero-based answer choice, get the next node.
    async fn next(&self, request: &NextRequest) -> Result<Node, ServiceError>;

    /// `POST /price` — request the computed price for a captured context.
    async fn price(&self, request: &PriceRequest) -> Result<PriceResult, ServiceError>;
}

/// HTTP implementation of [`DecisionService`].
pub struct HttpDecisionService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDecisionService {
    pub fn new(config: &WizardConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Check the status and decode the body, mapping failures onto the
    /// service error taxonomy.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        // Read the full body first so a parse failure can report it.
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ServiceError::MalformedPayload(format!("{e} (body: {})", truncate(&body, 200)))
        })
    }

    async fn fetch_node(&self, response: reqwest::Response) -> Result<Node, ServiceError> {
        let raw: RawNode = Self::decode(response).await?;
        Node::try_from(raw)
    }
}

#[async_trait]
impl DecisionService for HttpDecisionService {
    async fn start(&self) -> Result<Node, ServiceError> {
        tracing::debug!("GET /start");
        let response = self.client.get(self.url("start")).send().await?;
        self.fetch_node(response).await
    }

    async fn next(&self, request: &NextRequest) -> Result<Node, ServiceError> {
        tracing::debug!(node_id = %request.node_id, choice = request.choice, "POST /next");
        let response = self
            .client
            .post(self.url("next"))
            .json(request)
            .send()
            .await?;
        self.fetch_node(response).await
    }

    async fn price(&self, request: &PriceRequest) -> Result<PriceResult, ServiceError> {
        tracing::debug!(system = %request.system, "POST /price");
        let response = self
            .client
            .post(self.url("price"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
