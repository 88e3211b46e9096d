//! Download request payload.
//!
//! The download service accepts a JSON body naming what to fetch. Building
//! it is the only part the engine owns; sending it is up to the host.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::result::{MirrorLink, VideoInfo};

pub const DEFAULT_QUALITY: &str = "best";
pub const DEFAULT_FORMAT: &str = "mp4";

fn default_quality() -> String {
    DEFAULT_QUALITY.to_string()
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub url: String,

    #[serde(default = "default_quality")]
    pub quality: String,

    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subfolder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl DownloadRequest {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            quality: default_quality(),
            format: default_format(),
            subfolder: None,
            title: None,
        }
    }

    /// Request for the page itself, titled after the result.
    #[must_use]
    pub fn from_video_info(info: &VideoInfo) -> Self {
        Self {
            title: Some(info.title.clone()),
            ..Self::new(info.source_url.clone())
        }
    }

    /// Request for one mirror, keeping the page title.
    ///
    /// Episodes of one series usually land in one folder, so the page domain
    /// becomes the default subfolder.
    #[must_use]
    pub fn from_mirror(info: &VideoInfo, mirror: &MirrorLink) -> Self {
        Self {
            title: Some(info.title.clone()),
            subfolder: Some(info.domain.clone()),
            ..Self::new(mirror.url.clone())
        }
    }

    #[must_use]
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    #[must_use]
    pub fn with_subfolder(mut self, subfolder: impl Into<String>) -> Self {
        self.subfolder = Some(subfolder.into());
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
