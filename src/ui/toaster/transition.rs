// SPDX-License-Identifier: MPL-2.0
//! Enter/exit transitions for toasts.
//!
//! Transitions are cosmetic: they live only in renderer state and never
//! touch the store. New snacks fade and slide in; removed snacks leave a
//! ghost copy that fades and slides out, then is dropped.

use crate::snack::{Position, Snack, SnackId};
use crate::ui::design_tokens::motion;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Visual state of a toast at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
    /// Horizontal displacement to the right, in pixels.
    pub offset: f32,
}

impl Frame {
    pub const SETTLED: Frame = Frame {
        opacity: 1.0,
        offset: 0.0,
    };

    fn at(visibility: f32) -> Self {
        Self {
            opacity: visibility,
            offset: (1.0 - visibility) * motion::SLIDE_DISTANCE,
        }
    }
}

/// A removed snack still fading out.
#[derive(Debug, Clone)]
pub struct Ghost {
    snack: Snack,
    /// Index in its anchor column when it was removed.
    slot: usize,
    started: Instant,
}

impl Ghost {
    pub fn snack(&self) -> &Snack {
        &self.snack
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn frame(&self, now: Instant) -> Frame {
        Frame::at(1.0 - ease_out(progress(self.started, now, motion::EXIT)))
    }
}

/// One row of a rendered anchor column.
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    Live(&'a Snack),
    Leaving(&'a Ghost),
}

#[derive(Debug, Default)]
pub struct Transitions {
    /// Snacks seen at the last reconcile, oldest first.
    known: Vec<Snack>,
    entering: HashMap<SnackId, Instant>,
    leaving: Vec<Ghost>,
}

impl Transitions {
    /// Starts enter transitions for new snacks and exit transitions for
    /// snacks that disappeared since the previous call.
    pub fn reconcile<'a>(&mut self, current: impl Iterator<Item = &'a Snack>, now: Instant) {
        let current: Vec<Snack> = current.cloned().collect();

        for snack in &current {
            if !self.known.iter().any(|known| known.id() == snack.id()) {
                self.entering.insert(snack.id(), now);
            }
        }

        let known = std::mem::take(&mut self.known);
        for (index, snack) in known.iter().enumerate() {
            if current.iter().any(|live| live.id() == snack.id()) {
                continue;
            }
            let slot = known[..index]
                .iter()
                .filter(|earlier| earlier.position() == snack.position())
                .count();
            self.entering.remove(&snack.id());
            self.leaving.push(Ghost {
                snack: snack.clone(),
                slot,
                started: now,
            });
        }

        self.known = current;
    }

    /// Drops transitions that completed by `now`.
    pub fn prune(&mut self, now: Instant) {
        self.entering
            .retain(|_, started| now.saturating_duration_since(*started) < motion::ENTER);
        self.leaving
            .retain(|ghost| now.saturating_duration_since(ghost.started) < motion::EXIT);
    }

    pub fn frame(&self, id: SnackId, now: Instant) -> Frame {
        match self.entering.get(&id) {
            Some(started) => Frame::at(ease_out(progress(*started, now, motion::ENTER))),
            None => Frame::SETTLED,
        }
    }

    pub fn ghosts(&self) -> impl Iterator<Item = &Ghost> {
        self.leaving.iter()
    }

    /// Orders one anchor column: live snacks in queue order with each ghost
    /// put back at the index it had before removal.
    pub fn column<'a>(
        &'a self,
        live: impl Iterator<Item = &'a Snack>,
        anchor: Position,
    ) -> Vec<Entry<'a>> {
        let mut entries: Vec<Entry<'a>> = live
            .filter(|snack| snack.position() == anchor)
            .map(Entry::Live)
            .collect();

        let mut ghosts: Vec<&Ghost> = self
            .leaving
            .iter()
            .filter(|ghost| ghost.snack.position() == anchor)
            .collect();
        ghosts.sort_by_key(|ghost| ghost.slot);
        for ghost in ghosts {
            let index = ghost.slot.min(entries.len());
            entries.insert(index, Entry::Leaving(ghost));
        }
        entries
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.entering.is_empty() || !self.leaving.is_empty()
    }
}

fn progress(started: Instant, now: Instant, length: Duration) -> f32 {
    let elapsed = now.saturating_duration_since(started);
    (elapsed.as_secs_f32() / length.as_secs_f32()).clamp(0.0, 1.0)
}

/// Cubic ease-out.
fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}
