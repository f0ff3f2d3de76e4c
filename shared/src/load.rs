use serde::Serialize;

use crate::style::StyleId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("style document is not a JSON object")]
    NotAnObject,
}

/// A style document as served. Passed to the engine untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleDocument(serde_json::Value);

impl StyleDocument {
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl TryFrom<serde_json::Value> for StyleDocument {
    type Error = FetchError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        if value.is_object() {
            Ok(Self(value))
        } else {
            Err(FetchError::NotAnObject)
        }
    }
}

/// What the basemap frame shows for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleLoad {
    Loading(StyleId),
    Ready(StyleId, StyleDocument),
    Failed(StyleId, FetchError),
}

impl StyleLoad {
    pub fn style(&self) -> StyleId {
        match self {
            Self::Loading(id) | Self::Ready(id, _) | Self::Failed(id, _) => *id,
        }
    }
}

/// Proof that a fetch was started; only the newest one may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    style: StyleId,
}

impl FetchTicket {
    pub fn style(&self) -> StyleId {
        self.style
    }
}

/// Last-write-wins bookkeeping for style fetches.
///
/// Every `begin` supersedes all earlier tickets, so a slow response for an
/// old selection can never overwrite the state for a newer one.
#[derive(Debug, Default)]
pub struct StyleRequests {
    generation: u64,
}

impl StyleRequests {
    pub fn begin(&mut self, style: StyleId) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        FetchTicket {
            generation: self.generation,
            style,
        }
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Supersede any in-flight ticket without starting a new fetch.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Turn a finished fetch into the state to show, or `None` if stale.
    pub fn complete(
        &self,
        ticket: FetchTicket,
        result: Result<StyleDocument, FetchError>,
    ) -> Option<StyleLoad> {
        if !self.is_current(ticket) {
            return None;
        }
        Some(match result {
            Ok(document) => StyleLoad::Ready(ticket.style, document),
            Err(err) => StyleLoad::Failed(ticket.style, err),
        })
    }
}
