//! Live document abstraction.
//!
//! The engine does not own a browser. It reads a [`DocumentHandle`]: the
//! current address and serialized DOM, plus a stream of [`Mutation`]
//! notifications fired whenever the rendered tree changes. Hosts embedding
//! the engine implement the trait over their real document; [`LiveDocument`]
//! is an in-memory implementation for tests, the CLI and simple embedders.

use tokio::sync::{broadcast, watch};

/// Capacity of the mutation channel before slow watchers start lagging.
const MUTATION_CAPACITY: usize = 64;

/// One subtree change, tagged with the address at the time it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub address: String,
}

/// The document state one pipeline run reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub address: String,
    pub html: String,
}

/// Handle to a document that can change without reloading.
pub trait DocumentHandle: Send + Sync {
    /// Current address.
    fn address(&self) -> String;

    /// Current address and serialized markup, read together.
    fn snapshot(&self) -> Snapshot;

    /// Subscribe to subtree mutations.
    fn subscribe(&self) -> broadcast::Receiver<Mutation>;
}

/// In-memory document that emits a [`Mutation`] on every change.
#[derive(Debug)]
pub struct LiveDocument {
    state: watch::Sender<Snapshot>,
    mutations: broadcast::Sender<Mutation>,
}

impl LiveDocument {
    #[must_use]
    pub fn new(address: impl Into<String>, html: impl Into<String>) -> Self {
        let (state, _) = watch::channel(Snapshot { address: address.into(), html: html.into() });
        let (mutations, _) = broadcast::channel(MUTATION_CAPACITY);
        Self { state, mutations }
    }

    /// Re-render in place; the address stays the same.
    pub fn replace_content(&self, html: impl Into<String>) {
        let html = html.into();
        self.state.send_modify(|snapshot| snapshot.html = html);
        self.notify();
    }

    /// In-page navigation: new address and new markup, no reload.
    pub fn navigate(&self, address: impl Into<String>, html: impl Into<String>) {
        self.state.send_replace(Snapshot { address: address.into(), html: html.into() });
        self.notify();
    }

    /// Change only the address (history push without a re-render yet).
    pub fn set_address(&self, address: impl Into<String>) {
        let address = address.into();
        self.state.send_modify(|snapshot| snapshot.address = address);
        self.notify();
    }

    fn notify(&self) {
        let address = self.state.borrow().address.clone();
        // No subscribers is fine: nobody is watching yet.
        let _ = self.mutations.send(Mutation { address });
    }
}

impl DocumentHandle for LiveDocument {
    fn address(&self) -> String {
        self.state.borrow().address.clone()
    }

    fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<Mutation> {
        self.mutations.subscribe()
    }
}
