// SPDX-License-Identifier: MPL-2.0
//! Id generation for snacks.

use super::record::SnackId;
use std::fmt;
use uuid::Uuid;

/// Source of fresh snack ids.
pub trait IdGenerator: fmt::Debug {
    fn next_id(&mut self) -> SnackId;
}

/// Monotonic counter; ids from one generator can never collide.
#[derive(Debug, Default)]
pub struct SequentialIds {
    issued: u128,
}

impl SequentialIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> SnackId {
        self.issued += 1;
        SnackId::from_u128(self.issued)
    }
}

/// Random v4 UUIDs, for embedders that mix ids from several stores.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> SnackId {
        SnackId::from_uuid(Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sequential_ids_are_unique_and_increasing() {
        let mut ids = SequentialIds::new();
        let first = ids.next_id();
        let second = ids.next_id();
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn uuid_ids_do_not_repeat() {
        let mut ids = UuidIds;
        let seen: HashSet<_> = (0..256).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 256);
    }
}
