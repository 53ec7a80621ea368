//! Result sinks and the capped inspection history.

use std::collections::VecDeque;
use std::path::Path;

use tracing::debug;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::locator::LocatorData;
use crate::result::PinpointResult;

/// Receiver of finished inspection records
pub trait LocatorSink {
    /// Accept one record
    fn receive(&mut self, data: LocatorData);
}

impl LocatorSink for Vec<LocatorData> {
    fn receive(&mut self, data: LocatorData) {
        self.push(data);
    }
}

/// In-memory history holding at most `limit` records
///
/// Adding past capacity evicts the oldest record. Listing is newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorHistory {
    entries: VecDeque<LocatorData>,
    limit: usize,
}

impl Default for LocatorHistory {
    fn default() -> Self {
        Self::new(EngineConfig::default().history_limit)
    }
}

impl LocatorHistory {
    /// Create an empty history; a zero limit is raised to one
    #[must_use]
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Capacity
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records, newest first
    pub fn entries(&self) -> impl Iterator<Item = &LocatorData> {
        self.entries.iter()
    }

    /// Most recent record
    #[must_use]
    pub fn latest(&self) -> Option<&LocatorData> {
        self.entries.front()
    }

    /// Record by id
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&LocatorData> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Add a record, evicting the oldest past capacity
    pub fn push(&mut self, data: LocatorData) {
        self.entries.push_front(data);
        while self.entries.len() > self.limit {
            if let Some(evicted) = self.entries.pop_back() {
                debug!(id = %evicted.id, "history full, evicted oldest record");
            }
        }
    }

    /// Remove a record by id, returning it
    pub fn remove(&mut self, id: Uuid) -> Option<LocatorData> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        self.entries.remove(index)
    }

    /// Drop all records
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serialize records, newest first, as a JSON array
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> PinpointResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Restore from a JSON array written by [`Self::to_json`]
    ///
    /// Only the newest `limit` records are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str, limit: usize) -> PinpointResult<Self> {
        let records: Vec<LocatorData> = serde_json::from_str(json)?;
        let mut history = Self::new(limit);
        for record in records.into_iter().rev() {
            history.push(record);
        }
        Ok(history)
    }

    /// Load from a JSON file, or start empty if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>, limit: usize) -> PinpointResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no history file, starting empty");
            return Ok(Self::new(limit));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, limit)
    }

    /// Write to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> PinpointResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl LocatorSink for LocatorHistory {
    fn receive(&mut self, data: LocatorData) {
        self.push(data);
    }
}
