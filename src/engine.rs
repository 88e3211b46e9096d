//! One extraction context per document.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::document::{DocumentHandle, Snapshot};
use crate::extract::extract_video_info;
use crate::message::{HostRequest, HostResponse};
use crate::options::Options;
use crate::publisher::{Latest, Publisher, QueryClient, QueryResponder, ResultSink};
use crate::result::VideoInfo;
use crate::watcher::{NavigationWatcher, WatcherHandle};

/// Binds a document handle, options and a publisher together.
///
/// ```no_run
/// use std::sync::Arc;
/// use tokio_util::sync::CancellationToken;
/// use vidinfo::{Engine, LiveDocument, Options};
///
/// # async fn demo() {
/// let document = Arc::new(LiveDocument::new("https://example.com/v/1", "<title>Clip</title>"));
/// let engine = Arc::new(Engine::new(document, Options::default()));
/// let watcher = engine.watch(CancellationToken::new());
/// // ... later
/// watcher.shutdown().await;
/// # }
/// ```
pub struct Engine {
    document: Arc<dyn DocumentHandle>,
    options: Options,
    publisher: Publisher,
    runs: AtomicU64,
}

impl Engine {
    #[must_use]
    pub fn new(document: Arc<dyn DocumentHandle>, options: Options) -> Self {
        Self {
            document,
            options,
            publisher: Publisher::new(),
            runs: AtomicU64::new(0),
        }
    }

    /// Add an outward sink that receives every published result.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.publisher.add_sink(sink);
        self
    }

    /// Run the pipeline once against the current document state and publish.
    pub fn run(&self) -> Arc<VideoInfo> {
        self.run_snapshot(&self.document.snapshot())
    }

    /// Like [`Engine::run`], but parses on tokio's blocking pool.
    ///
    /// The snapshot is taken on the calling task before the handoff; only the
    /// parse and extraction run on the pool. Returns `None` if the extraction
    /// task panicked.
    pub async fn run_blocking(self: &Arc<Self>) -> Option<Arc<VideoInfo>> {
        let snapshot = self.document.snapshot();
        let engine = Arc::clone(self);
        match tokio::task::spawn_blocking(move || engine.run_snapshot(&snapshot)).await {
            Ok(info) => Some(info),
            Err(err) => {
                warn!(%err, "extraction task failed");
                None
            }
        }
    }

    fn run_snapshot(&self, snapshot: &Snapshot) -> Arc<VideoInfo> {
        let info = extract_video_info(&snapshot.html, &snapshot.address, &self.options);
        let run = self.runs.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(run, address = %snapshot.address, mirrors = info.mirror_links.len(), "pipeline run complete");
        self.publisher.publish(info)
    }

    /// Number of completed pipeline runs.
    #[must_use]
    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    /// Latest published result.
    #[must_use]
    pub fn current(&self) -> Latest {
        self.publisher.current()
    }

    /// Answer a host query without waiting for a run.
    #[must_use]
    pub fn respond(&self, request: HostRequest) -> HostResponse {
        self.publisher.respond(request)
    }

    #[must_use]
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    #[must_use]
    pub fn document(&self) -> &Arc<dyn DocumentHandle> {
        &self.document
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Start the navigation watcher; it runs the pipeline once immediately.
    #[must_use]
    pub fn watch(self: &Arc<Self>, shutdown: CancellationToken) -> WatcherHandle {
        NavigationWatcher::spawn(Arc::clone(self), shutdown)
    }

    /// Spawn a query responder bound to this engine's publisher.
    #[must_use]
    pub fn serve_queries(&self, shutdown: CancellationToken) -> QueryClient {
        QueryResponder::spawn(&self.publisher, shutdown)
    }
}
