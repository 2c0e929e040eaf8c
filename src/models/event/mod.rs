// Event module
// Normalized calendar event plus the tagged kind/status enums

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

mod appearance;

pub use appearance::Appearance;

/// Category of a client visit. Only drives icon and color selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VisitType {
    HomeVisit,
    VideoCall,
    Hospital,
    AudioCall,
    #[default]
    InPerson,
}

impl VisitType {
    /// Parse the loosely formatted type tags found in schedule records
    /// ("home_visit", "Home Visit", "video-call", ...). Unknown tags yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_tag(raw).as_str() {
            "homevisit" | "home" => Some(Self::HomeVisit),
            "videocall" | "video" => Some(Self::VideoCall),
            "hospital" | "hospitalvisit" => Some(Self::Hospital),
            "audiocall" | "audio" | "phonecall" | "phone" => Some(Self::AudioCall),
            "inperson" | "office" | "appointment" => Some(Self::InPerson),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HomeVisit => "Home visit",
            Self::VideoCall => "Video call",
            Self::Hospital => "Hospital",
            Self::AudioCall => "Audio call",
            Self::InPerson => "In person",
        }
    }
}

/// Kind of staff leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Annual,
    Sick,
    Training,
    Unpaid,
    #[default]
    Other,
}

impl LeaveType {
    pub fn parse(raw: &str) -> Self {
        match normalize_tag(raw).as_str() {
            "annual" | "annualleave" | "holiday" | "vacation" => Self::Annual,
            "sick" | "sickleave" | "illness" => Self::Sick,
            "training" | "course" => Self::Training,
            "unpaid" | "unpaidleave" => Self::Unpaid,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Annual => "Annual leave",
            Self::Sick => "Sick leave",
            Self::Training => "Training",
            Self::Unpaid => "Unpaid leave",
            Self::Other => "Leave",
        }
    }
}

/// What an event represents. Visits and leave are laid out on the grids;
/// unallocated visits are listed separately until placed on a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    Visit { visit_type: VisitType },
    Leave { leave_type: LeaveType },
    Unallocated { visit_type: VisitType },
}

impl EventKind {
    pub fn is_scheduled(&self) -> bool {
        !matches!(self, Self::Unallocated { .. })
    }

    pub fn is_leave(&self) -> bool {
        matches!(self, Self::Leave { .. })
    }

    pub fn appearance(&self) -> Appearance {
        Appearance::for_kind(self)
    }
}

/// Lifecycle tag. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Canceled,
}

impl EventStatus {
    pub fn parse(raw: &str) -> Self {
        match normalize_tag(raw).as_str() {
            "confirmed" | "scheduled" | "booked" => Self::Confirmed,
            "completed" | "done" => Self::Completed,
            "canceled" | "cancelled" => Self::Canceled,
            _ => Self::Pending,
        }
    }
}

/// Normalized calendar event.
///
/// Times are local wall-clock values; no timezone conversion is ever applied
/// so the hour shown is the hour written in the source record. Values are
/// replaced wholesale on update, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Staff member the event is attached to
    pub resource_id: Option<String>,
    /// Client the event concerns
    pub client_id: Option<String>,
    pub kind: EventKind,
    pub status: EventStatus,
    pub notes: Option<String>,
    pub client_name: Option<String>,
    pub staff_name: Option<String>,
}

impl CalendarEvent {
    /// Create a pending in-person visit with the required fields.
    ///
    /// # Examples
    /// ```
    /// use care_calendar::models::event::CalendarEvent;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::minutes(90);
    /// let event = CalendarEvent::new("42", "Morning visit", start, end).unwrap();
    /// assert_eq!(event.duration(), chrono::Duration::minutes(90));
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, String> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            resource_id: None,
            client_id: None,
            kind: EventKind::Visit {
                visit_type: VisitType::default(),
            },
            status: EventStatus::default(),
            notes: None,
            client_name: None,
            staff_name: None,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn builder() -> CalendarEventBuilder {
        CalendarEventBuilder::default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Event id cannot be empty".to_string());
        }

        if self.end < self.start {
            return Err("Event end time cannot be before start time".to_string());
        }

        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn starts_on(&self, date: NaiveDate) -> bool {
        self.start.date() == date
    }

    /// Copy of this event moved to a new start, keeping every other field.
    pub fn rescheduled(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }
}

/// Builder for events with optional fields
#[derive(Default)]
pub struct CalendarEventBuilder {
    id: Option<String>,
    title: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    resource_id: Option<String>,
    client_id: Option<String>,
    kind: Option<EventKind>,
    status: EventStatus,
    notes: Option<String>,
    client_name: Option<String>,
    staff_name: Option<String>,
}

impl CalendarEventBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    pub fn staff_name(mut self, name: impl Into<String>) -> Self {
        self.staff_name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<CalendarEvent, String> {
        let id = self.id.ok_or("Event id is required")?;
        let start = self.start.ok_or("Event start time is required")?;
        let end = self.end.unwrap_or(start);

        let event = CalendarEvent {
            id,
            title: self.title.unwrap_or_default(),
            start,
            end,
            resource_id: self.resource_id,
            client_id: self.client_id,
            kind: self.kind.unwrap_or(EventKind::Visit {
                visit_type: VisitType::default(),
            }),
            status: self.status,
            notes: self.notes,
            client_name: self.client_name,
            staff_name: self.staff_name,
        };

        event.validate()?;
        Ok(event)
    }
}

fn normalize_tag(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
