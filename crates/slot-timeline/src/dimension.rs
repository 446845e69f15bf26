//! Result sets of dimension records (bookable resources) with their availability.
//!
//! After a resource query the caller attaches each dimension's availability
//! timeline to its record. A record whose timeline has no open interval cannot be
//! booked in the requested range, so it is dropped from the set.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::availability::{is_fully_closed, SlotStatus};
use crate::interval::Interval;
use crate::response::AvailabilityResponse;

#[derive(Debug, Clone, PartialEq)]
pub struct DimensionRecord {
    pub id: String,
    pub name: String,
    time_slots: Vec<Interval<SlotStatus>>,
}

impl DimensionRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            time_slots: Vec::new(),
        }
    }

    /// The attached availability timeline; empty until availability has been added.
    pub fn time_slots(&self) -> &[Interval<SlotStatus>] {
        &self.time_slots
    }

    pub fn is_closed(&self) -> bool {
        is_fully_closed(&self.time_slots)
    }
}

/// Dimension records keyed by id, in the order they were returned.
#[derive(Debug, Clone, Default)]
pub struct DimensionRecordSet {
    records: Vec<DimensionRecord>,
    /// Position of each record in `records`, by id.
    by_id: HashMap<String, usize>,
}

impl DimensionRecordSet {
    pub fn new(records: impl IntoIterator<Item = DimensionRecord>) -> Self {
        let mut set = Self::default();
        for record in records {
            match set.by_id.get(&record.id) {
                Some(&index) => set.records[index] = record,
                None => {
                    set.by_id.insert(record.id.clone(), set.records.len());
                    set.records.push(record);
                }
            }
        }
        set
    }

    /// Attach availability timelines and drop every record left fully closed.
    ///
    /// Responses for ids not in the set, or for records already dropped, are ignored.
    pub fn add_availability(&mut self, responses: &[AvailabilityResponse]) {
        let mut dropped = false;
        for response in responses {
            let Some(&index) = self.by_id.get(&response.dimension_id) else {
                warn!(dimension_id = %response.dimension_id, "availability for unknown dimension ignored");
                continue;
            };

            let record = &mut self.records[index];
            record.time_slots = response.time_slots.clone();
            if record.is_closed() {
                self.by_id.remove(&response.dimension_id);
                dropped = true;
                debug!(dimension_id = %response.dimension_id, "dropped fully closed dimension");
            }
        }

        if dropped {
            let by_id = &self.by_id;
            self.records.retain(|r| by_id.contains_key(&r.id));
            self.reindex();
        }
    }

    fn reindex(&mut self) {
        self.by_id = self
            .records
            .iter()
            .enumerate()
            .map(|(index, r)| (r.id.clone(), index))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn records(&self) -> &[DimensionRecord] {
        &self.records
    }

    /// Look a record up by id, falling back to its name.
    pub fn get(&self, id_or_name: &str) -> Option<&DimensionRecord> {
        self.by_id
            .get(id_or_name)
            .map(|&index| &self.records[index])
            .or_else(|| self.records.iter().find(|r| r.name == id_or_name))
    }

    /// Keep only the records whose id is in `allowed`.
    pub fn retain_ids(&mut self, allowed: &[&str]) {
        let allowed: HashSet<&str> = allowed.iter().copied().collect();
        self.records.retain(|r| allowed.contains(r.id.as_str()));
        self.reindex();
    }
}
