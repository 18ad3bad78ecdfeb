//! Minimal calendar model: enough to find "the event on a given day".
//!
//! Events are read in the Google Calendar item shape, where `start` holds
//! either `date` (all-day) or `dateTime` (RFC 3339 with the event's offset).
//! A bare string `start` is accepted too.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::Result;

/// When an event starts. Timed events keep their own offset so the day they
/// fall on is the day on the event's wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStart", into = "GoogleStart")]
pub enum EventStart {
  DateTime(DateTime<FixedOffset>),
  AllDay(NaiveDate),
}

impl EventStart {
  pub fn date(&self) -> NaiveDate {
    match self {
      Self::DateTime(at) => at.date_naive(),
      Self::AllDay(day) => *day,
    }
  }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleStart {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  date:      Option<NaiveDate>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  date_time: Option<DateTime<FixedOffset>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStart {
  DateTime(DateTime<FixedOffset>),
  AllDay(NaiveDate),
  Google(GoogleStart),
}

impl TryFrom<RawStart> for EventStart {
  type Error = &'static str;

  fn try_from(raw: RawStart) -> Result<Self, Self::Error> {
    match raw {
      RawStart::DateTime(at) => Ok(Self::DateTime(at)),
      RawStart::AllDay(day) => Ok(Self::AllDay(day)),
      RawStart::Google(GoogleStart { date_time: Some(at), .. }) => Ok(Self::DateTime(at)),
      RawStart::Google(GoogleStart { date: Some(day), .. }) => Ok(Self::AllDay(day)),
      RawStart::Google(_) => Err("event start has neither `date` nor `dateTime`"),
    }
  }
}

impl From<EventStart> for GoogleStart {
  fn from(start: EventStart) -> Self {
    match start {
      EventStart::DateTime(at) => Self { date: None, date_time: Some(at) },
      EventStart::AllDay(day) => Self { date: Some(day), date_time: None },
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
  #[serde(default)]
  pub summary: String,
  pub start:   EventStart,
}

/// Parse a JSON array of calendar events. Entries that are not readable
/// events (cancelled items without a start, say) are skipped with a warning;
/// only a document that is not an array at all is an error.
pub fn parse_events(json: &str) -> Result<Vec<CalendarEvent>> {
  let items: Vec<serde_json::Value> = serde_json::from_str(json)?;
  let events = items
    .into_iter()
    .enumerate()
    .filter_map(|(index, item)| match serde_json::from_value(item) {
      Ok(event) => Some(event),
      Err(error) => {
        tracing::warn!(index, %error, "skipping unreadable calendar event");
        None
      }
    })
    .collect();
  Ok(events)
}

/// First event (in list order) starting on `date`.
pub fn event_on(events: &[CalendarEvent], date: NaiveDate) -> Option<&CalendarEvent> {
  events.iter().find(|e| e.start.date() == date)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn event(summary: &str, start: EventStart) -> CalendarEvent {
    CalendarEvent { summary: summary.into(), start }
  }

  fn day(s: &str) -> NaiveDate { s.parse().unwrap() }

  fn at(s: &str) -> EventStart { EventStart::DateTime(DateTime::parse_from_rfc3339(s).unwrap()) }

  #[test]
  fn finds_first_event_on_day() {
    let events = vec![
      event("Yesterday", EventStart::AllDay(day("2024-06-11"))),
      event("Interview", at("2024-06-12T09:00:00Z")),
      event("Dinner date", EventStart::AllDay(day("2024-06-12"))),
    ];
    let found = event_on(&events, day("2024-06-12")).map(|e| e.summary.as_str());
    assert_eq!(found, Some("Interview"));
  }

  #[test]
  fn no_event_on_day() {
    let events = vec![event("Owambe", EventStart::AllDay(day("2024-06-15")))];
    assert!(event_on(&events, day("2024-06-12")).is_none());
    assert!(event_on(&[], day("2024-06-12")).is_none());
  }

  #[test]
  fn timed_event_belongs_to_its_own_local_day() {
    let events = vec![event("Final exam", at("2024-06-13T00:30:00+01:00"))];
    let found = event_on(&events, day("2024-06-13")).map(|e| e.summary.as_str());
    assert_eq!(found, Some("Final exam"));
    assert!(event_on(&events, day("2024-06-12")).is_none());

    let late = vec![event("Late show", at("2024-06-12T23:30:00-05:00"))];
    assert!(event_on(&late, day("2024-06-12")).is_some());
    assert!(event_on(&late, day("2024-06-13")).is_none());
  }

  #[test]
  fn reads_google_calendar_items() {
    let events = parse_events(
      r#"[
        {"id": "a1", "summary": "Owambe", "start": {"date": "2024-06-15"},
         "end": {"date": "2024-06-16"}},
        {"summary": "Final exam", "start": {"dateTime": "2024-06-13T00:30:00+01:00",
         "timeZone": "Africa/Lagos"}}
      ]"#,
    )
    .unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].start, EventStart::AllDay(day("2024-06-15")));
    assert_eq!(events[1].start.date(), day("2024-06-13"));
  }

  #[test]
  fn reads_bare_string_starts() {
    let events = parse_events(
      r#"[
        {"summary": "Lecture", "start": "2024-06-12T08:00:00Z"},
        {"summary": "Wedding", "start": "2024-06-15"}
      ]"#,
    )
    .unwrap();
    assert!(matches!(events[0].start, EventStart::DateTime(_)));
    assert_eq!(events[1].start, EventStart::AllDay(day("2024-06-15")));
  }

  #[test]
  fn unreadable_events_are_skipped() {
    let events = parse_events(
      r#"[
        {"summary": "Cancelled", "status": "cancelled"},
        {"summary": "No start", "start": {}},
        {"start": {"date": "2024-06-15"}}
      ]"#,
    )
    .unwrap();
    assert_eq!(events, [event("", EventStart::AllDay(day("2024-06-15")))]);
  }

  #[test]
  fn non_array_document_is_an_error() {
    assert!(parse_events(r#"{"items": []}"#).is_err());
    assert!(parse_events("not json").is_err());
  }

  #[test]
  fn start_serializes_in_google_shape() {
    let json = serde_json::to_value(event("Owambe", EventStart::AllDay(day("2024-06-15"))))
      .unwrap();
    assert_eq!(json["start"], serde_json::json!({ "date": "2024-06-15" }));
  }
}
