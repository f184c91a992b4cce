// SPDX-License-Identifier: MPL-2.0
//! Toast renderer for the snack queue.
//!
//! `Toaster` owns a [`SnackProvider`] whose store schedules auto-dismiss
//! timers as iced tasks. The host application forwards [`Message`]s to
//! [`Toaster::update`], layers [`Toaster::view`] over its own content, and
//! batches [`Toaster::flush`] into the task it returns after dispatching.
//!
//! # Usage
//!
//! ```ignore
//! let mut toaster = Toaster::new(Config::default());
//!
//! toaster.snackmate()?.success("Image saved", SnackOptions::new());
//! let task = toaster.flush().map(Message::Toaster);
//!
//! // In your view function
//! let overlay = toaster.view().map(Message::Toaster);
//! ```

mod scheduler;
mod toast;
mod transition;

pub use scheduler::IcedScheduler;
pub use toast::{accent_color, Toast, CLOSE_LABEL};
pub use transition::{Entry, Frame, Ghost, Transitions};

use crate::config::Config;
use crate::error::Result;
use crate::snack::{SnackId, SnackMate, SnackProvider, SnackStore};
use crate::ui::design_tokens::motion;
use iced::{event, keyboard, time, Element, Subscription, Task};
use std::time::Instant;

/// Messages for toast state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// The user pressed a toast's dismiss button.
    Close(SnackId),
    /// An auto-dismiss timer fired.
    Expired(SnackId),
    /// Escape was pressed and no other widget captured it.
    EscapePressed,
    /// Animation frame.
    Tick(Instant),
}

#[derive(Debug)]
pub struct Toaster {
    provider: SnackProvider<IcedScheduler>,
    transitions: Transitions,
    now: Instant,
}

impl Default for Toaster {
    fn default() -> Self {
        Self {
            provider: SnackProvider::new(),
            transitions: Transitions::default(),
            now: Instant::now(),
        }
    }
}

impl Toaster {
    /// Creates a toaster with a mounted provider.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut toaster = Self::default();
        toaster.mount(config);
        toaster
    }

    /// Mounts (or remounts) the provider with `config`.
    pub fn mount(&mut self, config: Config) {
        self.provider.mount(config, IcedScheduler::new());
        self.reconcile();
    }

    /// Unmounts the provider. Dispatching afterwards fails until remounted.
    pub fn unmount(&mut self) {
        self.provider.unmount();
        self.reconcile();
    }

    /// Dispatch surface of the mounted provider.
    pub fn snackmate(&mut self) -> Result<SnackMate<'_, IcedScheduler>> {
        self.provider.snackmate()
    }

    pub fn store(&self) -> Result<&SnackStore<IcedScheduler>> {
        self.provider.store()
    }

    pub fn store_mut(&mut self) -> Result<&mut SnackStore<IcedScheduler>> {
        self.provider.store_mut()
    }

    #[must_use]
    pub fn has_snacks(&self) -> bool {
        self.store().is_ok_and(|store| !store.is_empty())
    }

    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    /// Handles a toast message and returns follow-up timer tasks.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Close(id) => {
                if let Ok(store) = self.provider.store_mut() {
                    store.dismiss(id);
                }
            }
            Message::Expired(id) => {
                if let Ok(store) = self.provider.store_mut() {
                    store.expire(id);
                }
            }
            Message::EscapePressed => {
                if let Ok(store) = self.provider.store_mut() {
                    if let Some(id) = store.newest().map(|snack| snack.id()) {
                        store.dismiss(id);
                    }
                }
            }
            Message::Tick(now) => {
                self.now = now;
                self.transitions.prune(now);
            }
        }

        self.flush()
    }

    /// Starts transitions for queue changes made since the last call and
    /// hands over any newly scheduled timers.
    ///
    /// Call after dispatching through [`snackmate`](Self::snackmate).
    pub fn flush(&mut self) -> Task<Message> {
        self.reconcile();
        match self.provider.store_mut() {
            Ok(store) => store.scheduler_mut().take_tasks().map(Message::Expired),
            Err(_) => Task::none(),
        }
    }

    /// Renders the toast overlay.
    pub fn view(&self) -> Element<'_, Message> {
        match self.provider.store() {
            Ok(store) => Toast::view_overlay(store, &self.transitions, self.now),
            Err(_) => iced::widget::text("").into(),
        }
    }

    /// Escape handling while toasts are shown, animation frames while a
    /// transition runs.
    pub fn subscription(&self) -> Subscription<Message> {
        let escape = if self.has_snacks() {
            event::listen_with(|event, status, _window| match (event, status) {
                (
                    event::Event::Keyboard(keyboard::Event::KeyPressed {
                        key: keyboard::Key::Named(keyboard::key::Named::Escape),
                        ..
                    }),
                    event::Status::Ignored,
                ) => Some(Message::EscapePressed),
                _ => None,
            })
        } else {
            Subscription::none()
        };

        let frames = if self.transitions.is_animating() {
            time::every(motion::FRAME).map(Message::Tick)
        } else {
            Subscription::none()
        };

        Subscription::batch([escape, frames])
    }

    fn reconcile(&mut self) {
        let now = Instant::now();
        self.now = now;
        match self.provider.store() {
            Ok(store) => self.transitions.reconcile(store.snacks(), now),
            Err(_) => self.transitions.reconcile(std::iter::empty(), now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::snack::{Position, SnackOptions};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn toaster(max_snacks: usize) -> Toaster {
        Toaster::new(Config {
            default_position: Position::BottomRight,
            default_duration_ms: 5000,
            max_snacks,
        })
    }

    fn len(toaster: &Toaster) -> usize {
        toaster.store().map(SnackStore::len).unwrap_or_default()
    }

    #[test]
    fn unmounted_toaster_rejects_dispatch() {
        let mut toaster = Toaster::default();
        assert!(matches!(toaster.snackmate(), Err(Error::OutsideProvider)));
        assert!(!toaster.has_snacks());
        let _ = toaster.view();
    }

    #[test]
    fn close_message_dismisses_and_runs_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut toaster = toaster(5);
        let id = toaster.snackmate().unwrap().success(
            "saved",
            SnackOptions::new().on_close(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        let _ = toaster.flush();

        let _ = toaster.update(Message::Close(id));
        assert_eq!(len(&toaster), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn expired_message_removes_snack_and_stale_one_is_ignored() {
        let mut toaster = toaster(5);
        let id = toaster.snackmate().unwrap().info("tick", SnackOptions::new());

        let _ = toaster.update(Message::Expired(id));
        assert_eq!(len(&toaster), 0);

        let _ = toaster.update(Message::Expired(id));
        assert_eq!(len(&toaster), 0);
    }

    #[test]
    fn escape_dismisses_newest_snack() {
        let mut toaster = toaster(5);
        let mut snackmate = toaster.snackmate().unwrap();
        let older = snackmate.info("older", SnackOptions::new());
        let newer = snackmate.info("newer", SnackOptions::new());

        let _ = toaster.update(Message::EscapePressed);
        let store = toaster.store().unwrap();
        assert!(store.contains(older));
        assert!(!store.contains(newer));
    }

    #[test]
    fn escape_on_empty_queue_is_noop() {
        let mut toaster = toaster(5);
        let _ = toaster.update(Message::EscapePressed);
        assert_eq!(len(&toaster), 0);
    }

    #[test]
    fn flush_hands_over_timers_and_starts_transitions() {
        let mut toaster = toaster(5);
        let id = toaster.snackmate().unwrap().warning("careful", SnackOptions::new());

        assert_eq!(toaster.store().unwrap().scheduler().untaken(), 1);
        let _ = toaster.flush();
        assert_eq!(toaster.store().unwrap().scheduler().untaken(), 0);
        assert!(toaster.store().unwrap().scheduler().is_scheduled(id));
        assert!(toaster.transitions().is_animating());
    }

    #[test]
    fn sticky_snack_schedules_no_timer() {
        let mut toaster = toaster(5);
        let id = toaster
            .snackmate()
            .unwrap()
            .error("stays", SnackOptions::new().sticky());
        assert!(!toaster.store().unwrap().scheduler().is_scheduled(id));
    }

    #[test]
    fn eviction_and_clear_cancel_timers() {
        let mut toaster = toaster(1);
        let mut snackmate = toaster.snackmate().unwrap();
        let first = snackmate.info("first", SnackOptions::new());
        let second = snackmate.info("second", SnackOptions::new());

        let scheduler = toaster.store().unwrap().scheduler();
        assert!(!scheduler.is_scheduled(first));
        assert!(scheduler.is_scheduled(second));

        toaster.snackmate().unwrap().clear();
        assert!(!toaster.store().unwrap().scheduler().is_scheduled(second));
    }

    #[test]
    fn removed_snack_fades_out_as_ghost() {
        let mut toaster = toaster(5);
        let id = toaster.snackmate().unwrap().info("bye", SnackOptions::new());
        let _ = toaster.flush();

        let _ = toaster.update(Message::Close(id));
        assert_eq!(toaster.transitions().ghosts().count(), 1);

        let later = Instant::now() + motion::EXIT;
        let _ = toaster.update(Message::Tick(later));
        assert_eq!(toaster.transitions().ghosts().count(), 0);
    }

    #[test]
    fn view_renders_every_anchor() {
        let mut toaster = toaster(10);
        let mut snackmate = toaster.snackmate().unwrap();
        for position in Position::ALL {
            snackmate.info(position.as_str(), SnackOptions::new().position(position));
        }
        let _ = toaster.flush();
        let _ = toaster.view();
    }

    #[test]
    fn unmount_clears_queue() {
        let mut toaster = toaster(5);
        toaster.snackmate().unwrap().info("gone", SnackOptions::new());
        let _ = toaster.flush();
        toaster.unmount();
        assert!(toaster.store().is_err());
        assert_eq!(toaster.transitions().ghosts().count(), 1);
    }
}
