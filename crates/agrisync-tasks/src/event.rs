/*
[INPUT]:  Mutation outcomes from modals and session changes
[OUTPUT]: AppEvent notifications delivered over an mpsc channel
[POS]:    Event layer - explicit coupling between modals and the task list
[UPDATE]: When adding new cross-component notifications
*/

use agrisync_adapter::User;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Notifications flowing back into the task list controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The authoritative task list changed; refetch it
    TasksChanged,

    /// A different user is now active
    UserChanged(User),
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Handle given to a modal at construction so it can ask for a list refresh
#[derive(Debug, Clone)]
pub struct RefreshNotifier {
    tx: EventSender,
}

impl RefreshNotifier {
    pub fn new(tx: EventSender) -> Self {
        Self { tx }
    }

    pub fn notify(&self) {
        debug!("requesting task list refresh");
        if self.tx.send(AppEvent::TasksChanged).is_err() {
            warn!("refresh requested after event receiver was dropped");
        }
    }
}
