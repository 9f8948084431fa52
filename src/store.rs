use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::model::Produce;

/// Errors returned by store mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A batch contained a record whose product code is malformed
    #[error("invalid product code detected")]
    InvalidProductCode { code: String },
}

/// Outcome of a successful upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpsertSummary {
    /// Number of records applied
    pub written: usize,
    /// Number of records that replaced an existing entry
    pub overwritten: usize,
}

/// In-memory produce inventory keyed by product code
///
/// Every operation takes the same exclusive lock for the shortest possible
/// span, so each call is atomic with respect to concurrent callers.
pub struct ProduceStore {
    inventory: Mutex<HashMap<String, Produce>>,
}

impl ProduceStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            inventory: Mutex::new(HashMap::new()),
        }
    }

    /// Create a store holding the initial inventory
    pub fn seeded() -> Self {
        let inventory = seed_inventory()
            .into_iter()
            .map(|item| (item.produce_code.clone(), item))
            .collect();
        Self {
            inventory: Mutex::new(inventory),
        }
    }

    // Critical sections only run infallible map operations, so a poisoned
    // lock still guards a consistent table.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Produce>> {
        self.inventory.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of records currently stored
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Snapshot of every record, sorted by name
    pub fn list(&self) -> Vec<Produce> {
        let mut produce: Vec<Produce> = self.lock().values().cloned().collect();

        // Sort outside the lock; ties on name fall back to the code
        produce.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.produce_code.cmp(&b.produce_code))
        });
        produce
    }

    /// Look up a record by its product code
    pub fn get(&self, code: &str) -> Option<Produce> {
        self.lock().get(code).cloned()
    }

    /// Insert or overwrite a batch of records
    ///
    /// The whole batch is rejected without side effects if any product code is
    /// malformed. Otherwise it is applied under a single lock acquisition;
    /// duplicate codes within the batch resolve in batch order.
    pub fn upsert(&self, batch: Vec<Produce>) -> Result<UpsertSummary, StoreError> {
        if let Some(invalid) = batch.iter().find(|item| !item.has_valid_code()) {
            return Err(StoreError::InvalidProductCode {
                code: invalid.produce_code.clone(),
            });
        }

        let mut summary = UpsertSummary::default();
        let mut inventory = self.lock();
        for item in batch {
            if inventory.insert(item.produce_code.clone(), item).is_some() {
                summary.overwritten += 1;
            }
            summary.written += 1;
        }
        Ok(summary)
    }

    /// Remove a record; removing an absent code is a no-op
    pub fn delete(&self, code: &str) {
        self.lock().remove(code);
    }
}

impl Default for ProduceStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Produce available when the process starts
fn seed_inventory() -> Vec<Produce> {
    vec![
        Produce::new("Lettuce", "A12T-4GH7-QPL9-3N4M", 3.46),
        Produce::new("Peach", "E5T6-9UI3-TH15-QR88", 2.99),
        Produce::new("Green Pepper", "YRT6-72AS-K736-L4AR", 0.79),
        Produce::new("Gala Apple", "TQ4C-VV6T-75ZX-1RMR", 3.59),
    ]
}
