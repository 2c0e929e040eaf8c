// Test fixtures - reusable test data
// Raw records, entities and normalized events shared across test files

#![allow(dead_code)]

use care_calendar::models::event::CalendarEvent;
use care_calendar::models::raw::{RawEntity, RawId, RawPerson, RawScheduleRecord};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Thursday Apr 10, 2025
    pub fn visit_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
        visit_day().and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Raw payloads as the REST layer returns them
pub mod raw {
    use super::*;

    pub fn person(first: &str, last: &str) -> RawPerson {
        RawPerson {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
        }
    }

    /// Visit on Apr 10, 2025 between two `HH:MM` times.
    pub fn visit(id: i64, start: &str, end: &str, worker: &str, client: &str) -> RawScheduleRecord {
        RawScheduleRecord {
            id: Some(RawId::from(id)),
            date: Some("2025-04-10".to_string()),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            user_id: Some(RawId::from(worker)),
            client_id: Some(RawId::from(client)),
            visit_type: Some("home_visit".to_string()),
            status: Some("confirmed".to_string()),
            user: Some(person("Sam", "Jones")),
            client: Some(person("Ada", "Lovelace")),
            ..Default::default()
        }
    }

    pub fn leave(id: i64, worker: &str) -> RawScheduleRecord {
        RawScheduleRecord {
            id: Some(RawId::from(id)),
            date: Some("2025-04-10".to_string()),
            user_id: Some(RawId::from(worker)),
            is_leave_event: Some(true),
            leave_type: Some("sick".to_string()),
            user: Some(person("Sam", "Jones")),
            ..Default::default()
        }
    }

    pub fn unallocated(id: i64, client: &str) -> RawScheduleRecord {
        RawScheduleRecord {
            id: Some(RawId::from(id)),
            date: Some("2025-04-10".to_string()),
            client_id: Some(RawId::from(client)),
            is_unallocated: Some(true),
            client: Some(person("Ada", "Lovelace")),
            ..Default::default()
        }
    }

    pub fn entity(id: &str, first: &str, last: &str) -> RawEntity {
        RawEntity {
            id: Some(RawId::from(id)),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            ..Default::default()
        }
    }
}

/// Normalized events for engine-level tests
pub mod events {
    use super::*;

    /// Visit starting at `start_minutes` past 07:00 lasting `length_minutes`.
    pub fn visit(
        id: usize,
        start_minutes: i64,
        length_minutes: i64,
        worker: &str,
        client: &str,
    ) -> CalendarEvent {
        let start = dates::at(7, 0) + Duration::minutes(start_minutes);
        CalendarEvent::builder()
            .id(format!("e{}", id))
            .title(format!("Visit {}", id))
            .start(start)
            .end(start + Duration::minutes(length_minutes))
            .resource_id(worker)
            .client_id(client)
            .build()
            .unwrap()
    }
}
