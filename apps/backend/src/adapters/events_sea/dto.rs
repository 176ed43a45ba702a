//! DTOs for events_sea adapter.

use time::OffsetDateTime;

use crate::entities::events::EventStatus;

/// DTO for creating an event.
#[derive(Debug, Clone)]
pub struct EventCreate {
    pub id: String,
    pub name: String,
    pub status: EventStatus,
    pub options: Vec<String>,
    pub starts_at: OffsetDateTime,
}

impl EventCreate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, starts_at: OffsetDateTime) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: EventStatus::Upcoming,
            options: Vec::new(),
            starts_at,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }
}

/// DTO for recording a final result on an event.
#[derive(Debug, Clone)]
pub struct EventCompletion {
    pub id: String,
    pub winner: String,
    pub score: Option<String>,
}
