//! Messages exchanged between the popup and the page script, and the channel
//! that carries them.
//!
//! Wire shape (JSON):
//! - `{"action":"highlight","keywords":[...],"colors":[...]}` → `{"matches":{"kw":n,...}}`
//! - `{"action":"clear"}` → `{"success":true}`

mod channel;

pub use crate::channel::{PageClient, PageRequest, Responder, page_channel};
pub use core_types::{MatchTally, RequestId};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ContentRequest {
    Highlight {
        keywords: Vec<String>,
        #[serde(default)]
        colors: Vec<String>,
    },
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentResponse {
    Matches { matches: MatchTally },
    Cleared { success: bool },
}

impl ContentResponse {
    pub fn cleared() -> Self {
        ContentResponse::Cleared { success: true }
    }
}

#[derive(Debug, Error)]
pub enum BusError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("page script is gone")]
    Disconnected,
    #[error("request {0} was dropped without a response")]
    NoResponse(RequestId),
    #[error("response for request {0} already sent or nobody is waiting")]
    ReplyUndeliverable(RequestId),
}

pub fn encode_request(request: &ContentRequest) -> Result<String, BusError> {
    Ok(serde_json::to_string(request)?)
}

/// Decodes a request; unknown actions are reported as [`BusError::Malformed`].
pub fn decode_request(raw: &str) -> Result<ContentRequest, BusError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn encode_response(response: &ContentResponse) -> Result<String, BusError> {
    Ok(serde_json::to_string(response)?)
}

pub fn decode_response(raw: &str) -> Result<ContentResponse, BusError> {
    Ok(serde_json::from_str(raw)?)
}
