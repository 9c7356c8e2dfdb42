//! Wire types for the decision service and the wizard's local input state.
//!
//! The service speaks a small JSON protocol: nodes with a string `type`
//! discriminator, a `/next` request carrying a zero-based choice index, and
//! a price request/result pair. Nodes are validated at the boundary into a
//! tagged [`NodeKind`] so the rest of the client never branches on strings.

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

// ── Node ────────────────────────────────────────────────────────────

/// Raw node as the service sends it:
/// `{node_id, text, type, answers?, system?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub node_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default)]
    pub system: Option<String>,
}

/// What kind of step a node represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Ordinary question; the user picks one of the answers.
    Question,
    /// End of the decision tree: a system was selected, numeric capture starts.
    System { system: String },
    /// Trade-off between multiple candidate systems. Rendered like a question.
    TradeOff,
}

/// One step in the server-driven decision tree.
///
/// Replaced wholesale on each transition; the client never mutates a node.
#[derive(Debug, Clone)]
pub struct Node {
    pub node_id: String,
    pub text: String,
    pub kind: NodeKind,
    pub answers: Vec<String>,
}

impl TryFrom<RawNode> for Node {
    type Error = ServiceError;

    fn try_from(raw: RawNode) -> Result<Self, ServiceError> {
        let kind = match raw.node_type.as_str() {
            "systeem" => {
                let system = raw.system.filter(|s| !s.is_empty()).ok_or_else(|| {
                    ServiceError::MalformedPayload(format!(
                        "node '{}' has type 'systeem' but no system field",
                        raw.node_id
                    ))
                })?;
                NodeKind::System { system }
            }
            "afw" => NodeKind::TradeOff,
            _ => NodeKind::Question,
        };

        Ok(Node {
            node_id: raw.node_id,
            text: raw.text,
            kind,
            answers: raw.answers,
        })
    }
}

// ── Requests ────────────────────────────────────────────────────────

/// Body for `POST /next`: the node the answer belongs to and the
/// zero-based index of the chosen answer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NextRequest {
    pub node_id: String,
    pub choice: usize,
}

/// Body for `POST /price`, sent once both numeric inputs are captured.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceRequest {
    pub system: String,
    #[serde(rename = "surfaceArea")]
    pub surface_area: f64,
    #[serde(rename = "roomCount")]
    pub room_count: u32,
}

// ── Price result ────────────────────────────────────────────────────

/// Server-computed price breakdown. Field names follow the service's
/// Dutch wire format. Rendered once, not retained.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PriceResult {
    pub systeem: String,
    pub oppervlakte: f64,
    pub ruimtes: u32,
    /// Pricing tier label, e.g. "50-70" or "300+".
    pub staffel: String,
    pub prijs_m2: f64,
    pub basis: f64,
}

// ── Input context ───────────────────────────────────────────────────

/// Accumulator for the two-stage numeric capture after a system is selected.
///
/// Invariant: room count is requested only once the surface area is present,
/// and a price request is issued only once both are.
#[derive(Debug, Clone, PartialEq)]
pub struct InputContext {
    pub system: String,
    pub surface_area: Option<f64>,
    pub room_count: Option<u32>,
}

impl InputContext {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            surface_area: None,
            room_count: None,
        }
    }

    /// Build the price request, if both inputs have been captured.
    pub fn price_request(&self) -> Option<PriceRequest> {
        Some(PriceRequest {
            system: self.system.clone(),
            surface_area: self.surface_area?,
            room_count: self.room_count?,
        })
    }
}
