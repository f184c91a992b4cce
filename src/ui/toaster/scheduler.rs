// SPDX-License-Identifier: MPL-2.0
//! Auto-dismiss timers as abortable iced tasks.

use crate::snack::{Scheduler, SnackId};
use iced::task::Handle;
use iced::Task;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Turns each timer into a `Task` that sleeps and then yields the snack id.
///
/// Tasks accumulate until [`take_tasks`](Self::take_tasks) hands them to
/// the iced runtime. Cancelling aborts the task, whether or not it has been
/// taken yet.
#[derive(Default)]
pub struct IcedScheduler {
    handles: HashMap<SnackId, Handle>,
    pending: Vec<Task<SnackId>>,
}

impl fmt::Debug for IcedScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IcedScheduler")
            .field("timers", &self.handles.len())
            .field("untaken", &self.pending.len())
            .finish()
    }
}

impl IcedScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains the tasks created since the last call.
    pub fn take_tasks(&mut self) -> Task<SnackId> {
        Task::batch(self.pending.drain(..))
    }

    #[must_use]
    pub fn is_scheduled(&self, id: SnackId) -> bool {
        self.handles.contains_key(&id)
    }

    #[must_use]
    pub fn untaken(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for IcedScheduler {
    fn schedule(&mut self, id: SnackId, after: Duration) {
        // The sleep is created on first poll, inside the runtime.
        let sleep = async move { tokio::time::sleep(after).await };
        let (task, handle) = Task::perform(sleep, move |()| id).abortable();

        if let Some(previous) = self.handles.insert(id, handle) {
            previous.abort();
        }
        self.pending.push(task);
    }

    fn cancel(&mut self, id: SnackId) {
        if let Some(handle) = self.handles.remove(&id) {
            handle.abort();
        }
    }
}
