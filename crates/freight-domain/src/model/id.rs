//! Vehicle id generation

use std::collections::HashSet;

use super::vehicle::VehicleId;

/// Source of fresh vehicle ids
pub trait IdGenerator {
    fn next_id(&mut self) -> VehicleId;
}

/// Short random ids: the first 8 hex characters of a v4 UUID
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> VehicleId {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        VehicleId::from_generated(uuid[..8].to_string())
    }
}

/// Deterministic ids: `{prefix}{n}` starting at 1
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Continue numbering after `last`
    pub fn starting_after(prefix: impl Into<String>, last: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: last + 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("V")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> VehicleId {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        VehicleId::from_generated(id)
    }
}

/// Wraps another generator and skips ids that are already taken
///
/// Every id handed out is added to the taken set, so ids stay unique
/// within one registry.
pub struct UnusedIds<'a> {
    inner: &'a mut dyn IdGenerator,
    taken: HashSet<VehicleId>,
}

impl<'a> UnusedIds<'a> {
    pub fn new(inner: &'a mut dyn IdGenerator, taken: impl IntoIterator<Item = VehicleId>) -> Self {
        Self {
            inner,
            taken: taken.into_iter().collect(),
        }
    }
}

impl IdGenerator for UnusedIds<'_> {
    fn next_id(&mut self) -> VehicleId {
        loop {
            let id = self.inner.next_id();
            if self.taken.insert(id.clone()) {
                return id;
            }
        }
    }
}
