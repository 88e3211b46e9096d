//! Messages crossing the host boundary.
//!
//! The engine talks to a separate presentation process. Pushes and queries
//! are modelled as `action`-tagged JSON objects so any bridge (extension
//! messaging, a socket, a pipe) can carry them unchanged:
//!
//! ```json
//! {"action": "getVideoInfo", "data": { "sourceUrl": "...", ... }}
//! {"action": "getPageVideoInfo"}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::result::VideoInfo;

/// Outward push sent after every completed pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostMessage {
    GetVideoInfo { data: VideoInfo },
}

impl HostMessage {
    #[must_use]
    pub fn video_info(&self) -> &VideoInfo {
        match self {
            HostMessage::GetVideoInfo { data } => data,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Inbound pull query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostRequest {
    /// Current result of the page's engine.
    GetPageVideoInfo,
    /// Same answer, asked by a consumer that is not attached to a page.
    GetLatestVideoInfo,
}

impl HostRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Answer to a [`HostRequest`]: the held result, or `null` before the first run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostResponse {
    pub info: Option<VideoInfo>,
}

impl HostResponse {
    #[must_use]
    pub fn none_yet() -> Self {
        Self { info: None }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
