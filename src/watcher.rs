//! Navigation Watcher
//!
//! Single-page sites swap content without reloading. The watcher listens to
//! the document's mutation stream and, whenever the address differs from the
//! last one it saw, (re)arms a settle timer. Every further change resets the
//! timer, so a burst of navigations collapses into one run against the final
//! state once the document has been quiet for `settle_delay`.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::document::Mutation;
use crate::engine::Engine;

/// Running watcher task.
pub struct WatcherHandle {
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl WatcherHandle {
    /// Stop the watcher and wait for the task to exit.
    ///
    /// A pending settle timer is dropped without running.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(err) = self.task.await {
            debug!(%err, "watcher task ended abnormally");
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub struct NavigationWatcher;

impl NavigationWatcher {
    /// Subscribe to `engine`'s document and spawn the watch loop.
    #[must_use]
    pub fn spawn(engine: Arc<Engine>, shutdown: CancellationToken) -> WatcherHandle {
        // Subscribe before the task starts so no change after this call is missed.
        let mutations = engine.document().subscribe();
        let task = tokio::spawn(watch_loop(engine, mutations, shutdown.clone()));
        WatcherHandle { shutdown, task }
    }
}

async fn watch_loop(
    engine: Arc<Engine>,
    mut mutations: broadcast::Receiver<Mutation>,
    shutdown: CancellationToken,
) {
    let settle_delay = engine.options().settle_delay;

    let mut last_address = match engine.run_blocking().await {
        Some(published) => published.source_url.clone(),
        None => engine.document().address(),
    };
    info!(address = %last_address, "initial extraction published");

    let sleep = time::sleep(settle_delay);
    tokio::pin!(sleep);
    let mut armed = false;

    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,

            event = mutations.recv() => {
                let address = match event {
                    Ok(mutation) => mutation.address,
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "mutation stream lagged; re-reading address");
                        engine.document().address()
                    }
                    Err(RecvError::Closed) => break,
                };

                if address != last_address {
                    debug!(from = %last_address, to = %address, "address changed; arming settle timer");
                    last_address = address;
                    sleep.as_mut().reset(Instant::now() + settle_delay);
                    armed = true;
                }
            }

            () = &mut sleep, if armed => {
                armed = false;
                if let Some(published) = engine.run_blocking().await {
                    info!(
                        address = %published.source_url,
                        title = %published.title,
                        mirrors = published.mirror_links.len(),
                        "re-extracted after navigation"
                    );
                }
            }
        }
    }

    debug!("navigation watcher stopped");
}
