//! Event normalizer.
//!
//! Turns raw schedule records into [`CalendarEvent`]s with concrete local
//! start/end instants. Bad records are dropped and collected into a
//! [`NormalizeReport`] so the host can show one aggregated warning instead
//! of one per record.

mod parse;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashSet;
use thiserror::Error;

use crate::models::entity::{full_name, SelectableEntity};
use crate::models::event::{CalendarEvent, EventKind, EventStatus, LeaveType, VisitType};
use crate::models::raw::{RawEntity, RawId, RawPerson, RawScheduleRecord};

use parse::{parse_date, parse_date_time, parse_time};

/// Why a single record was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("record has no id")]
    MissingId,
    #[error("record {id} is a duplicate")]
    DuplicateId { id: String },
    #[error("record {id} has no date")]
    MissingDate { id: String },
    #[error("record {id} has an invalid date '{value}'")]
    InvalidDate { id: String, value: String },
    #[error("record {id} has an invalid time '{value}'")]
    InvalidTime { id: String, value: String },
    #[error("record {id} ends before it starts")]
    EndBeforeStart { id: String },
}

/// Outcome of one normalization pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    /// Number of records received
    pub total: usize,
    pub dropped: Vec<NormalizeError>,
}

impl NormalizeReport {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }

    /// Single aggregated message for the host page, `None` when nothing was dropped.
    pub fn warning(&self) -> Option<String> {
        let first = self.dropped.first()?;
        let count = self.dropped.len();
        let noun = if count == 1 { "record" } else { "records" };
        Some(format!(
            "Skipped {} of {} schedule {} with invalid data (first: {})",
            count, self.total, noun, first
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSchedule {
    pub events: Vec<CalendarEvent>,
    pub report: NormalizeReport,
}

/// Normalize a full data refresh. Order of the surviving records is preserved.
pub fn normalize_schedule(records: &[RawScheduleRecord]) -> NormalizedSchedule {
    let mut events = Vec::with_capacity(records.len());
    let mut report = NormalizeReport {
        total: records.len(),
        dropped: Vec::new(),
    };
    let mut seen_ids = HashSet::new();

    for record in records {
        match normalize_record(record) {
            Ok(event) => {
                if seen_ids.insert(event.id.clone()) {
                    events.push(event);
                } else {
                    report.dropped.push(NormalizeError::DuplicateId { id: event.id });
                }
            }
            Err(err) => report.dropped.push(err),
        }
    }

    if let Some(warning) = report.warning() {
        log::warn!("{}", warning);
    }
    log::info!(
        "Normalized {} of {} schedule records",
        events.len(),
        report.total
    );

    NormalizedSchedule { events, report }
}

/// Normalize one record.
pub fn normalize_record(record: &RawScheduleRecord) -> Result<CalendarEvent, NormalizeError> {
    let id = record
        .id
        .as_ref()
        .and_then(RawId::as_key)
        .ok_or(NormalizeError::MissingId)?;

    let (start, has_start_time) = resolve_start(record, &id)?;
    let end = resolve_end(record, &id, start)?;

    let resource_id = record.user_id.as_ref().and_then(RawId::as_key);
    let client_id = record.client_id.as_ref().and_then(RawId::as_key);
    let staff_name = person_name(record.user.as_ref());
    let client_name = person_name(record.client.as_ref());

    let visit_type = record
        .visit_type
        .as_deref()
        .and_then(VisitType::parse)
        .unwrap_or_default();

    let kind = if record.is_leave_event.unwrap_or(false) {
        EventKind::Leave {
            leave_type: record
                .leave_type
                .as_deref()
                .map(LeaveType::parse)
                .unwrap_or_default(),
        }
    } else if record.is_unallocated.unwrap_or(false) || resource_id.is_none() || !has_start_time {
        EventKind::Unallocated { visit_type }
    } else {
        EventKind::Visit { visit_type }
    };

    // Leave booked without times covers the whole day
    let end = if kind.is_leave() && !has_start_time && end == start {
        start + Duration::days(1)
    } else {
        end
    };

    let title = record
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_title(&kind, client_name.as_deref(), staff_name.as_deref()));

    let notes = record
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
        .map(str::to_string);

    Ok(CalendarEvent {
        id,
        title,
        start,
        end,
        resource_id,
        client_id,
        kind,
        status: record
            .status
            .as_deref()
            .map(EventStatus::parse)
            .unwrap_or_default(),
        notes,
        client_name,
        staff_name,
    })
}

/// Convert staff/client records into selectable entities, skipping records without an id.
pub fn normalize_entities(records: &[RawEntity]) -> Vec<SelectableEntity> {
    let mut seen = HashSet::new();
    let mut skipped = 0usize;
    let mut entities = Vec::with_capacity(records.len());

    for record in records {
        let Some(id) = record.id.as_ref().and_then(RawId::as_key) else {
            skipped += 1;
            continue;
        };
        if !seen.insert(id.clone()) {
            skipped += 1;
            continue;
        }

        let name = full_name(record.first_name.as_deref(), record.last_name.as_deref())
            .unwrap_or_else(|| format!("#{}", id));
        let mut entity = SelectableEntity::new(id, name);
        if let Some(color) = record.color.as_deref() {
            entity = entity.with_color(color);
        }
        if let Some(avatar) = record.avatar_url.as_deref().filter(|url| !url.trim().is_empty()) {
            entity = entity.with_avatar(avatar);
        }
        entities.push(entity);
    }

    if skipped > 0 {
        log::warn!("Skipped {} entity records without a usable id", skipped);
    }

    entities
}

/// Start instant plus whether the record actually carried a time of day.
fn resolve_start(
    record: &RawScheduleRecord,
    id: &str,
) -> Result<(NaiveDateTime, bool), NormalizeError> {
    if let Some(start) = non_blank(record.start.as_deref()) {
        let (date, time) = parse_date_time(start).ok_or_else(|| NormalizeError::InvalidDate {
            id: id.to_string(),
            value: start.to_string(),
        })?;
        let time = match non_blank(record.start_time.as_deref()) {
            Some(raw) => Some(time_or_err(raw, id)?),
            None => time,
        };
        return Ok(combine(date, time));
    }

    let raw_date = non_blank(record.date.as_deref()).ok_or_else(|| NormalizeError::MissingDate {
        id: id.to_string(),
    })?;
    let (date, embedded_time) =
        parse_date_time(raw_date).ok_or_else(|| NormalizeError::InvalidDate {
            id: id.to_string(),
            value: raw_date.to_string(),
        })?;

    let time = match non_blank(record.start_time.as_deref()) {
        Some(raw) => Some(time_or_err(raw, id)?),
        None => embedded_time,
    };

    Ok(combine(date, time))
}

fn resolve_end(
    record: &RawScheduleRecord,
    id: &str,
    start: NaiveDateTime,
) -> Result<NaiveDateTime, NormalizeError> {
    let end = if let Some(end) = non_blank(record.end.as_deref()) {
        let (date, time) = parse_date_time(end).ok_or_else(|| NormalizeError::InvalidDate {
            id: id.to_string(),
            value: end.to_string(),
        })?;
        let time = match non_blank(record.end_time.as_deref()) {
            Some(raw) => Some(time_or_err(raw, id)?),
            None => time,
        };
        combine(date, time).0
    } else if let Some(raw) = non_blank(record.end_time.as_deref()) {
        start.date().and_time(time_or_err(raw, id)?)
    } else {
        start
    };

    if end < start {
        return Err(NormalizeError::EndBeforeStart { id: id.to_string() });
    }
    Ok(end)
}

fn combine(date: NaiveDate, time: Option<NaiveTime>) -> (NaiveDateTime, bool) {
    match time {
        Some(time) => (date.and_time(time), true),
        None => (date.and_time(NaiveTime::MIN), false),
    }
}

fn time_or_err(raw: &str, id: &str) -> Result<NaiveTime, NormalizeError> {
    parse_time(raw).ok_or_else(|| NormalizeError::InvalidTime {
        id: id.to_string(),
        value: raw.to_string(),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn person_name(person: Option<&RawPerson>) -> Option<String> {
    person.and_then(|p| full_name(p.first_name.as_deref(), p.last_name.as_deref()))
}

fn default_title(kind: &EventKind, client: Option<&str>, staff: Option<&str>) -> String {
    match kind {
        EventKind::Leave { leave_type } => match staff {
            Some(staff) => format!("{} - {}", staff, leave_type.label()),
            None => leave_type.label().to_string(),
        },
        EventKind::Visit { .. } | EventKind::Unallocated { .. } => client
            .or(staff)
            .map(str::to_string)
            .unwrap_or_else(|| "Appointment".to_string()),
    }
}
