//! Bounded newest-first record of past best trades.

use crate::models::TradeSummary;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct TradeHistory {
    entries: VecDeque<TradeSummary>,
    capacity: usize,
}

impl TradeHistory {
    /// A zero capacity is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front, evicting the oldest entry when full.
    pub fn push(&mut self, trade: TradeSummary) {
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(trade);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TradeSummary> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<TradeSummary> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&TradeSummary> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
