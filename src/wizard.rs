//! Wizard controller — the node-traversal state machine.
//!
//! Owns the single current step of the walk through the decision tree:
//! `Start → Question* → AwaitSurfaceArea → AwaitRoomCount → PriceDisplay`.
//! There is no history stack and no backtracking; nodes are replaced
//! wholesale on each transition. A failed service call leaves the state
//! exactly as it was, so recovery is always a user re-submit.

use std::sync::Arc;

use crate::error::{InputError, Result};
use crate::model::{InputContext, NextRequest, Node, NodeKind, PriceRequest, PriceResult};
use crate::service::DecisionService;

/// What the front-end should render next.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    /// A question (or trade-off) node with selectable answers.
    Question { text: String, answers: Vec<String> },
    /// A system was selected; awaiting the surface area in m².
    SurfaceArea { system: String },
    /// Surface area captured; awaiting the number of rooms.
    RoomCount { system: String },
    /// The computed price. Terminal.
    Price(PriceResult),
    /// A node with no answers: display-only, ends the session.
    Finished { text: String },
}

enum State {
    Idle,
    /// A question/trade-off node is current; awaiting an answer choice.
    AtNode(Node),
    /// A system node was reached; collecting numeric input.
    Capturing(InputContext),
    Done,
}

/// Drives the decision-tree walk against a [`DecisionService`].
pub struct Wizard {
    service: Arc<dyn DecisionService>,
    state: State,
}

impl Wizard {
    pub fn new(service: Arc<dyn DecisionService>) -> Self {
        Self {
            service,
            state: State::Idle,
        }
    }

    /// Fetch the root node and (re)initialize the walk.
    ///
    /// Discards any in-progress state, so this doubles as a restart.
    pub async fn start(&mut self) -> Result<WizardStep> {
        self.state = State::Idle;
        let node = self.service.start().await?;
        Ok(self.apply(node))
    }

    /// Re-render the current step, e.g. after a transient failure.
    pub fn current_step(&self) -> Option<WizardStep> {
        match &self.state {
            State::Idle | State::Done => None,
            State::AtNode(node) => Some(WizardStep::Question {
                text: node.text.clone(),
                answers: node.answers.clone(),
            }),
            State::Capturing(ctx) => Some(if ctx.surface_area.is_none() {
                WizardStep::SurfaceArea {
                    system: ctx.system.clone(),
                }
            } else {
                WizardStep::RoomCount {
                    system: ctx.system.clone(),
                }
            }),
        }
    }

    /// Submit the zero-based index of an answer on the current node.
    ///
    /// The index is validated against the rendered answer count before
    /// anything is sent; the service never sees an out-of-range choice.
    pub async fn submit_choice(&mut self, choice: usize) -> Result<WizardStep> {
        let node = match &self.state {
            State::AtNode(node) => node,
            _ => return Err(InputError::NotAwaitingChoice.into()),
        };

        if choice >= node.answers.len() {
            return Err(InputError::ChoiceOutOfRange {
                choice: choice + 1,
                max: node.answers.len(),
            }
            .into());
        }

        let request = NextRequest {
            node_id: node.node_id.clone(),
            choice,
        };
        let next = self.service.next(&request).await?;
        Ok(self.apply(next))
    }

    /// Submit one line of numeric input during surface-area/room-count capture.
    ///
    /// Invalid input is rejected without advancing the stage; the price
    /// endpoint is only called once both values are present.
    pub async fn submit_input(&mut self, raw: &str) -> Result<WizardStep> {
        let ctx = match &mut self.state {
            State::Capturing(ctx) => ctx,
            _ => return Err(InputError::NotAwaitingInput.into()),
        };

        let surface_area = match ctx.surface_area {
            None => {
                ctx.surface_area = Some(parse_surface_area(raw)?);
                return Ok(WizardStep::RoomCount {
                    system: ctx.system.clone(),
                });
            }
            Some(value) => value,
        };

        // The room count is committed only if the price call succeeds, so a
        // transport failure leaves the stage open for re-entry.
        let request = PriceRequest {
            system: ctx.system.clone(),
            surface_area,
            room_count: parse_room_count(raw)?,
        };

        let result = self.service.price(&request).await?;
        self.state = State::Done;
        Ok(WizardStep::Price(result))
    }

    /// Classify a freshly received node and move to the matching state.
    fn apply(&mut self, node: Node) -> WizardStep {
        match node.kind {
            NodeKind::System { ref system } => {
                // Any previously captured input is discarded here.
                let system = system.clone();
                self.state = State::Capturing(InputContext::new(&system));
                WizardStep::SurfaceArea { system }
            }
            // Trade-off nodes render like ordinary questions.
            NodeKind::Question | NodeKind::TradeOff => {
                if node.answers.is_empty() {
                    let text = node.text.clone();
                    self.state = State::Done;
                    WizardStep::Finished { text }
                } else {
                    let step = WizardStep::Question {
                        text: node.text.clone(),
                        answers: node.answers.clone(),
                    };
                    self.state = State::AtNode(node);
                    step
                }
            }
        }
    }
}

fn parse_surface_area(raw: &str) -> std::result::Result<f64, InputError> {
    let trimmed = raw.trim();
    // The service tolerates comma decimals ("120,5").
    let normalized = trimmed.replace(',', ".");
    let invalid = || InputError::InvalidNumber {
        field: "oppervlakte",
        value: trimmed.to_string(),
    };

    let value: f64 = normalized.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

fn parse_room_count(raw: &str) -> std::result::Result<u32, InputError> {
    let trimmed = raw.trim();
    let invalid = || InputError::InvalidNumber {
        field: "aantal ruimtes",
        value: trimmed.to_string(),
    };

    let value: u32 = trimmed.parse().map_err(|_| invalid())?;
    if value == 0 {
        return Err(invalid());
    }
    Ok(value)
}
