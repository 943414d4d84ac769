//! Per-user, per-location login breakdown
//!
//! Folds the enriched records into nested counts: one entry per user in
//! first-seen order, each holding one entry per distinct city. Iteration
//! order is deterministic for a fixed input order, which the JSON output
//! and the flattened formatter both rely on.

use crate::models::EnrichedRecord;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Login count for one (user, city) pair
///
/// Keyed by `city` alone; the first record seen for a city fixes its
/// country and region, later records only bump the count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationBreakdown {
    pub country: String,
    pub region: String,
    pub city: String,
    pub number_of_logins: usize,
}

/// Per-user login counts with the per-city breakdown
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserBreakdown {
    pub number_of_logins: usize,
    pub login_locations: Vec<LocationBreakdown>,
}

/// User id → breakdown mapping that iterates and serializes in
/// first-insertion order
#[derive(Debug, Default)]
pub struct UserMap {
    index: HashMap<String, usize>,
    entries: Vec<(String, UserBreakdown)>,
}

impl UserMap {
    /// Look up a user's breakdown, inserting an empty one on first sight
    fn entry_mut(&mut self, user_id: &str) -> &mut UserBreakdown {
        let pos = match self.index.get(user_id) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.index.insert(user_id.to_string(), pos);
                self.entries
                    .push((user_id.to_string(), UserBreakdown::default()));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    pub fn get(&self, user_id: &str) -> Option<&UserBreakdown> {
        self.index.get(user_id).map(|&pos| &self.entries[pos].1)
    }

    /// Iterate entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserBreakdown)> {
        self.entries
            .iter()
            .map(|(user_id, breakdown)| (user_id.as_str(), breakdown))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for UserMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (user_id, breakdown) in &self.entries {
            map.serialize_entry(user_id, breakdown)?;
        }
        map.end()
    }
}

/// The full per-user login summary for one run
#[derive(Debug, Serialize)]
pub struct Breakdown {
    pub total_number_of_logins: usize,
    pub user_info: UserMap,
}

impl Breakdown {
    /// Fold `records` into the nested per-user, per-city counts
    pub fn from_records(records: &[EnrichedRecord]) -> Self {
        let mut user_info = UserMap::default();

        for record in records {
            let user = user_info.entry_mut(&record.user_id);
            user.number_of_logins += 1;

            let pos = match user
                .login_locations
                .iter()
                .position(|location| location.city == record.city)
            {
                Some(pos) => pos,
                None => {
                    user.login_locations.push(LocationBreakdown {
                        country: record.country.clone(),
                        region: record.region.clone(),
                        city: record.city.clone(),
                        number_of_logins: 0,
                    });
                    user.login_locations.len() - 1
                }
            };
            user.login_locations[pos].number_of_logins += 1;
        }

        Breakdown {
            total_number_of_logins: records.len(),
            user_info,
        }
    }
}
