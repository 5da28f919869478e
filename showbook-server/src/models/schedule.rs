//! Upcoming/past partitioning and the venue directory grouping.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Anything with a start time
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
}

/// Split into `(upcoming, past)`.
///
/// Upcoming is strictly after `now`; a show starting exactly at `now` is past.
/// Relative order within each half is preserved.
pub fn partition_by_time<T: Scheduled>(items: Vec<T>, now: DateTime<Utc>) -> (Vec<T>, Vec<T>) {
    items.into_iter().partition(|item| item.start_time() > now)
}

/// Venues sharing one `(city, state)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area<T> {
    pub city: String,
    pub state: String,
    pub venues: Vec<T>,
}

/// Group rows by `(city, state)`, areas in first-seen order.
pub fn group_by_area<T>(rows: impl IntoIterator<Item = (String, String, T)>) -> Vec<Area<T>> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut areas: Vec<Area<T>> = Vec::new();

    for (city, state, venue) in rows {
        match index.get(&(city.clone(), state.clone())) {
            Some(&i) => areas[i].venues.push(venue),
            None => {
                index.insert((city.clone(), state.clone()), areas.len());
                areas.push(Area {
                    city,
                    state,
                    venues: vec![venue],
                });
            }
        }
    }

    areas
}
