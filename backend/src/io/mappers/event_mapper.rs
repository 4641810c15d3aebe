//! Mappers for community events and RSVPs.

use shared::{Event, EventRow, EventRsvp, EventRsvpRow};

use super::EntityMapper;

pub struct EventMapper;

impl EntityMapper for EventMapper {
    type Row = EventRow;
    type Model = Event;

    const NAME: &'static str = "event";
    const DATE_FIELDS: &'static [&'static str] = &["startDate", "endDate", "createdAt"];
    const JSON_FIELDS: &'static [&'static str] = &["metadata"];
}

pub struct EventRsvpMapper;

impl EntityMapper for EventRsvpMapper {
    type Row = EventRsvpRow;
    type Model = EventRsvp;

    const NAME: &'static str = "event_rsvp";
    // respondedAt is not in the built-in list and has to be declared here.
    const DATE_FIELDS: &'static [&'static str] = &["respondedAt", "createdAt"];
}
