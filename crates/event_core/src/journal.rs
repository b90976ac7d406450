use crate::{EventEnvelope, EventResult};
use bevy::prelude::*;
use std::collections::VecDeque;

/// One reduced event and what the handlers made of it.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub event: EventEnvelope,
    pub result: EventResult,
    pub frame_processed: u64,
}

/// Bounded history of reduced events. The oldest entry is dropped once `capacity` is reached;
/// a capacity of 0 records nothing.
#[derive(Resource, Debug)]
pub struct EventJournal {
    entries: VecDeque<JournalEntry>,
    capacity: usize,
}

impl EventJournal {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity.min(1024)), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record(&mut self, entry: JournalEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&JournalEntry> {
        self.entries.back()
    }

    /// Entries whose handling failed during `frame`.
    pub fn errors_in_frame(&self, frame: u64) -> impl Iterator<Item = &JournalEntry> {
        self.entries
            .iter()
            .filter(move |j| j.frame_processed == frame && j.result.is_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventPayload, EventSourceTag, GameEvent};

    fn entry(frame: u64, result: EventResult) -> JournalEntry {
        JournalEntry {
            event: EventEnvelope::new(EventPayload::Game(GameEvent::StartSession), EventSourceTag::Test, frame),
            result,
            frame_processed: frame,
        }
    }

    #[test]
    fn oldest_entry_falls_off() {
        let mut j = EventJournal::with_capacity(2);
        j.record(entry(1, EventResult::Handled));
        j.record(entry(2, EventResult::Ignored));
        j.record(entry(3, EventResult::Handled));
        let frames: Vec<_> = j.iter().map(|e| e.frame_processed).collect();
        assert_eq!(frames, vec![2, 3]);
    }

    #[test]
    fn errors_are_looked_up_by_frame() {
        let mut j = EventJournal::with_capacity(8);
        j.record(entry(4, EventResult::Error("a".into())));
        j.record(entry(5, EventResult::Handled));
        j.record(entry(5, EventResult::Error("b".into())));
        assert_eq!(j.errors_in_frame(5).count(), 1);
        assert_eq!(j.errors_in_frame(6).count(), 0);
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut j = EventJournal::with_capacity(0);
        j.record(entry(1, EventResult::Error("x".into())));
        assert!(j.is_empty());
        assert_eq!(j.errors_in_frame(1).count(), 0);
    }
}
