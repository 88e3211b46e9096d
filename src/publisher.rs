//! Result Publisher and Query Responder
//!
//! The publisher is a last-value cache: it holds the single current
//! [`VideoInfo`] and replaces it whole on every run. Two ways out:
//!
//! - **push**: every registered [`ResultSink`] gets a [`HostMessage`] per run,
//!   fire-and-forget. A failing sink is logged and skipped; the next run or a
//!   pull query is the recovery path.
//! - **pull**: [`Publisher::current`], a `watch` receiver from
//!   [`Publisher::subscribe`], or a spawned [`QueryResponder`] answering
//!   [`HostRequest`]s over a channel. None of them wait for a run.

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Error, Result};
use crate::message::{HostMessage, HostRequest, HostResponse};
use crate::result::VideoInfo;

/// Latest result, shared.
pub type Latest = Option<Arc<VideoInfo>>;

/// Receiver of outward pushes.
pub trait ResultSink: Send + Sync {
    fn deliver(&self, message: &HostMessage) -> Result<()>;
}

impl<F> ResultSink for F
where
    F: Fn(&HostMessage) -> Result<()> + Send + Sync,
{
    fn deliver(&self, message: &HostMessage) -> Result<()> {
        self(message)
    }
}

/// Unread pushes a [`ChannelSink`] holds before it starts dropping.
pub const DEFAULT_SINK_CAPACITY: usize = 4;

/// Sink forwarding pushes into a bounded channel.
///
/// Delivery never waits: once `capacity` pushes sit unread, further pushes
/// are dropped until the receiver catches up.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<HostMessage>,
}

impl ChannelSink {
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<HostMessage>) {
        Self::with_capacity(DEFAULT_SINK_CAPACITY)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<HostMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl ResultSink for ChannelSink {
    fn deliver(&self, message: &HostMessage) -> Result<()> {
        self.tx.try_send(message.clone()).map_err(|err| match err {
            TrySendError::Full(_) => Error::SinkFull,
            TrySendError::Closed(_) => Error::ChannelClosed,
        })
    }
}

/// Holder of the current result.
pub struct Publisher {
    latest: watch::Sender<Latest>,
    sinks: Vec<Arc<dyn ResultSink>>,
}

impl Publisher {
    #[must_use]
    pub fn new() -> Self {
        let (latest, _) = watch::channel(None);
        Self { latest, sinks: Vec::new() }
    }

    /// Register an outward sink.
    pub fn add_sink(&mut self, sink: Arc<dyn ResultSink>) {
        self.sinks.push(sink);
    }

    /// Replace the current result and push it to every sink.
    pub fn publish(&self, info: VideoInfo) -> Arc<VideoInfo> {
        let info = Arc::new(info);
        self.latest.send_replace(Some(Arc::clone(&info)));

        if !self.sinks.is_empty() {
            let message = HostMessage::GetVideoInfo { data: (*info).clone() };
            for sink in &self.sinks {
                if let Err(err) = sink.deliver(&message) {
                    debug!(%err, "dropping push to unavailable sink");
                }
            }
        }

        info
    }

    /// Current result, or `None` before the first run.
    #[must_use]
    pub fn current(&self) -> Latest {
        self.latest.borrow().clone()
    }

    /// Receiver that observes every replacement.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Latest> {
        self.latest.subscribe()
    }

    /// Answer a host request from the held value.
    #[must_use]
    pub fn respond(&self, request: HostRequest) -> HostResponse {
        respond_from(&self.latest.borrow(), request)
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new()
    }
}

fn respond_from(latest: &Latest, request: HostRequest) -> HostResponse {
    match request {
        HostRequest::GetPageVideoInfo | HostRequest::GetLatestVideoInfo => HostResponse {
            info: latest.as_deref().cloned(),
        },
    }
}

struct Query {
    request: HostRequest,
    reply: oneshot::Sender<HostResponse>,
}

/// Client side of a spawned [`QueryResponder`].
#[derive(Clone)]
pub struct QueryClient {
    tx: mpsc::Sender<Query>,
}

impl QueryClient {
    /// Send a request and wait for the answer.
    pub async fn request(&self, request: HostRequest) -> Result<HostResponse> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Query { request, reply })
            .await
            .map_err(|_| Error::ChannelClosed)?;
        rx.await.map_err(|_| Error::ChannelClosed)
    }
}

/// Task answering queries against a publisher's latest value.
pub struct QueryResponder {
    latest: watch::Receiver<Latest>,
    queries: mpsc::Receiver<Query>,
    shutdown: CancellationToken,
}

impl QueryResponder {
    /// Spawn a responder on the current runtime.
    #[must_use]
    pub fn spawn(publisher: &Publisher, shutdown: CancellationToken) -> QueryClient {
        let (tx, queries) = mpsc::channel(16);
        let responder = Self { latest: publisher.subscribe(), queries, shutdown };
        tokio::spawn(responder.run());
        QueryClient { tx }
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                () = self.shutdown.cancelled() => break,
                query = self.queries.recv() => {
                    let Some(query) = query else { break };
                    let response = respond_from(&self.latest.borrow(), query.request);
                    // The asker may have given up; nothing to do then.
                    let _ = query.reply.send(response);
                }
            }
        }
        debug!("query responder stopped");
    }
}
