//! Selection signal — how a preview card tells the controller it was activated.
//!
//! Every card holds a clone of one `SelectionSender`; the controller keeps the
//! only `SelectionReceiver`, so a single listener observes all cards.

use podcast_catalog::PodcastId;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSignal {
    pub podcast_id: PodcastId,
}

#[derive(Debug, Clone)]
pub struct SelectionSender {
    tx: mpsc::UnboundedSender<SelectionSignal>,
}

pub struct SelectionReceiver {
    rx: mpsc::UnboundedReceiver<SelectionSignal>,
}

pub fn selection_channel() -> (SelectionSender, SelectionReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SelectionSender { tx }, SelectionReceiver { rx })
}

impl SelectionSender {
    /// Returns `false` once the receiver is gone.
    pub fn emit(&self, podcast_id: PodcastId) -> bool {
        self.tx.send(SelectionSignal { podcast_id }).is_ok()
    }
}

impl SelectionReceiver {
    /// Next queued signal without waiting.
    pub fn try_next(&mut self) -> Option<SelectionSignal> {
        self.rx.try_recv().ok()
    }
}
