//! Bounded buffer of validated records awaiting insertion

use crate::models::TripRecord;

/// Collects records until `capacity` is reached, then hands the whole batch
/// out and starts over empty.
#[derive(Debug)]
pub struct BatchAccumulator {
    buffer: Vec<TripRecord>,
    capacity: usize,
}

impl BatchAccumulator {
    /// # Panics
    ///
    /// Panics if `capacity` is zero; configuration validation rejects that
    /// before a pipeline is built.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "batch capacity must be positive");
        Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Add a record. Returns the full batch once capacity is reached.
    pub fn push(&mut self, record: TripRecord) -> Option<Vec<TripRecord>> {
        self.buffer.push(record);
        if self.buffer.len() >= self.capacity {
            Some(self.take())
        } else {
            None
        }
    }

    /// Hand out whatever is left, if anything
    pub fn drain(&mut self) -> Option<Vec<TripRecord>> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.take())
        }
    }

    fn take(&mut self) -> Vec<TripRecord> {
        std::mem::replace(&mut self.buffer, Vec::with_capacity(self.capacity))
    }
}
