use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::AdviceGateway;
use crate::models::Transaction;

/// A running insights request.
pub(crate) struct InsightTask {
    id: u64,
    handle: JoinHandle<()>,
}

impl InsightTask {
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn cancel(&self) {
        self.handle.abort();
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

struct InsightResult {
    id: u64,
    text: String,
}

/// Runs insights requests off the UI thread. Starting a request aborts the
/// one before it, and only the result of the latest request is accepted.
pub(crate) struct InsightDispatcher {
    gateway: AdviceGateway,
    runtime: Handle,
    tx: mpsc::UnboundedSender<InsightResult>,
    rx: mpsc::UnboundedReceiver<InsightResult>,
    latest: u64,
    current: Option<InsightTask>,
}

impl InsightDispatcher {
    pub(crate) fn new(gateway: AdviceGateway, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            gateway,
            runtime,
            tx,
            rx,
            latest: 0,
            current: None,
        }
    }

    pub(crate) fn is_configured(&self) -> bool {
        self.gateway.is_configured()
    }

    /// Start a request over an owned copy of the ledger. Returns its id.
    pub(crate) fn request(&mut self, txns: Vec<Transaction>) -> u64 {
        if let Some(prev) = self.current.take() {
            debug!(id = prev.id(), "superseding insights request");
            prev.cancel();
        }
        self.latest += 1;
        let id = self.latest;
        let gateway = self.gateway.clone();
        let tx = self.tx.clone();
        debug!(id, transactions = txns.len(), "insights requested");
        let handle = self.runtime.spawn(async move {
            let text = gateway.request_insights(txns).await;
            let _ = tx.send(InsightResult { id, text });
        });
        self.current = Some(InsightTask { id, handle });
        id
    }

    /// Abort the pending request, if any. A result it already produced is
    /// discarded too.
    pub(crate) fn cancel(&mut self) -> bool {
        let Some(task) = self.current.take() else {
            return false;
        };
        task.cancel();
        self.latest += 1;
        debug!(id = task.id(), "insights request cancelled");
        true
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.current.is_some()
    }

    /// Collect finished results without blocking. Returns the text of the
    /// latest request once it has arrived; stale results are dropped.
    pub(crate) fn poll(&mut self) -> Option<String> {
        // A finished task has already sent, so the drain below sees it.
        let finished = self.current.as_ref().is_some_and(InsightTask::is_finished);
        let mut accepted = None;
        while let Ok(result) = self.rx.try_recv() {
            if result.id == self.latest {
                accepted = Some(result.text);
            } else {
                debug!(id = result.id, latest = self.latest, "dropping stale insights");
            }
        }
        if accepted.is_some() || finished {
            self.current = None;
        }
        accepted
    }
}
