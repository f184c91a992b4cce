// SPDX-License-Identifier: MPL-2.0
//! Demo application: a window of buttons driving every snack entry point.
//!
//! The `App` struct owns a [`Toaster`] and translates button presses into
//! dispatch calls, batching the toaster's timer tasks into the returned task.

mod message;
mod view;

pub use message::{Flags, Message};

use crate::config::Config;
use crate::error::Result;
use crate::snack::{Position, SnackMate, SnackOptions};
use crate::ui::toaster::{IcedScheduler, Toaster};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 640;

/// Root Iced application state.
pub struct App {
    toaster: Toaster,
    /// Number of snacks shown so far, used to label them.
    sent: u32,
    dark: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("sent", &self.sent)
            .field("dark", &self.dark)
            .finish()
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            toaster: Toaster::new(Config::default()),
            sent: 0,
            dark: true,
        }
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state from the CLI flags.
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = flags.resolve_config();
        let mut app = Self {
            toaster: Toaster::new(config),
            sent: 0,
            dark: true,
        };

        let task = app.show(|snackmate, _| {
            snackmate.info("SnackMate ready", SnackOptions::new());
        });
        (app, task)
    }

    fn title(&self) -> String {
        match self.toaster.store() {
            Ok(store) if !store.is_empty() => format!("SnackMate ({})", store.len()),
            _ => "SnackMate".to_string(),
        }
    }

    fn theme(&self) -> Theme {
        if self.dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        self.toaster.subscription().map(Message::Toaster)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Show(severity) => self.show(|snackmate, n| {
                snackmate.show(
                    format!("{} #{n}", capitalize(severity.as_str())),
                    Some(severity),
                    SnackOptions::new(),
                );
            }),
            Message::ShowSticky => self.show(|snackmate, n| {
                snackmate.error(
                    format!("Sticky error #{n}: close me"),
                    SnackOptions::new().sticky().on_close(move || {
                        tracing::info!(n, "sticky snack closed");
                    }),
                );
            }),
            Message::ShowEverywhere => self.show(|snackmate, _| {
                for position in Position::ALL {
                    snackmate.info(position.as_str(), SnackOptions::new().position(position));
                }
            }),
            Message::RemoveOldest => self.dispatch(|snackmate| {
                let oldest = snackmate.store().snacks().next().map(|snack| snack.id());
                if let Some(id) = oldest {
                    snackmate.remove(id);
                }
            }),
            Message::ClearAll => self.dispatch(|snackmate| snackmate.clear()),
            Message::ToggleTheme => {
                self.dark = !self.dark;
                Task::none()
            }
            Message::Toaster(message) => self.toaster.update(message).map(Message::Toaster),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            toaster: &self.toaster,
            sent: self.sent,
        })
    }

    /// Runs a show call numbered with the next `sent` value.
    fn show(&mut self, f: impl FnOnce(&mut SnackMate<'_, IcedScheduler>, u32)) -> Task<Message> {
        self.sent += 1;
        let sent = self.sent;
        self.dispatch(|snackmate| f(snackmate, sent))
    }

    /// Runs `f` against the dispatch surface and returns the timer tasks it
    /// scheduled.
    fn dispatch(&mut self, f: impl FnOnce(&mut SnackMate<'_, IcedScheduler>)) -> Task<Message> {
        if let Err(err) = self.with_snackmate(f) {
            tracing::error!(%err, "cannot dispatch snack");
            return Task::none();
        }
        self.toaster.flush().map(Message::Toaster)
    }

    fn with_snackmate(
        &mut self,
        f: impl FnOnce(&mut SnackMate<'_, IcedScheduler>),
    ) -> Result<()> {
        let mut snackmate = self.toaster.snackmate()?;
        f(&mut snackmate);
        Ok(())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
