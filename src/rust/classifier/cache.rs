use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

/// The exact request tuple a prediction is memoized under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredictionKey {
    pub year: i32,
    pub author: String,
    pub headline: String,
    pub description: String,
}

impl PredictionKey {
    pub fn new(year: i32, author: &str, headline: &str, description: &str) -> Self {
        Self {
            year,
            author: author.to_string(),
            headline: headline.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct CacheState {
    labels: HashMap<PredictionKey, String>,
    insertion_order: VecDeque<PredictionKey>,
}

/// Bounded, thread-safe memo of predicted labels keyed by the raw input.
///
/// The oldest entry is evicted once `capacity` is reached. Stored labels are
/// exactly what the pipeline produced for the key, so a hit is
/// indistinguishable from recomputing.
#[derive(Debug)]
pub struct PredictionCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl PredictionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, key: &PredictionKey) -> Option<String> {
        self.state.lock().labels.get(key).cloned()
    }

    pub fn insert(&self, key: PredictionKey, label: String) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.state.lock();
        if state.labels.contains_key(&key) {
            return;
        }
        while state.labels.len() >= self.capacity {
            match state.insertion_order.pop_front() {
                Some(oldest) => {
                    state.labels.remove(&oldest);
                }
                None => break,
            }
        }
        state.insertion_order.push_back(key.clone());
        state.labels.insert(key, label);
    }

    pub fn len(&self) -> usize {
        self.state.lock().labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.labels.clear();
        state.insertion_order.clear();
    }
}
