use std::collections::{HashSet, VecDeque};

/// Bounded memory of recently issued question keys.
///
/// Below `soft_cap` entries, a key already present is refused. At or above
/// it everything is accepted so generation cannot stall on a small pool.
/// Reaching `hard_cap` drops the oldest entries until `soft_cap` remain.
#[derive(Debug)]
pub struct RecentQuestions {
    order: VecDeque<String>,
    keys: HashSet<String>,
    soft_cap: usize,
    hard_cap: usize,
}

impl RecentQuestions {
    pub fn new(soft_cap: usize, hard_cap: usize) -> Self {
        let hard_cap = hard_cap.max(soft_cap).max(1);
        Self {
            order: VecDeque::with_capacity(hard_cap),
            keys: HashSet::with_capacity(hard_cap),
            soft_cap,
            hard_cap,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn accepts(&self, key: &str) -> bool {
        self.len() >= self.soft_cap || !self.contains(key)
    }

    /// Record `key` as the most recent entry.
    pub fn insert(&mut self, key: String) {
        if self.keys.contains(&key) {
            self.order.retain(|k| k != &key);
        } else {
            self.keys.insert(key.clone());
        }
        self.order.push_back(key);

        if self.order.len() >= self.hard_cap {
            while self.order.len() > self.soft_cap {
                if let Some(old) = self.order.pop_front() {
                    self.keys.remove(&old);
                }
            }
        }
    }
}
