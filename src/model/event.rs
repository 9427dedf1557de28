//! Outbound events emitted by the calendar engine.

use chrono::NaiveDate;
use serde::Serialize;

use super::range::{DateRange, FocusedRange};

/// A notification for the embedding UI.
///
/// Handlers on `CalendarState` return the events they produced in order;
/// the caller dispatches them to its callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum CalendarEvent {
    /// The user asked to focus another range endpoint.
    FocusedRangeChange(FocusedRange),
    /// A drag committed; carries the full updated ranges.
    RangeCommit(Vec<DateRange>),
    /// A single date was picked.
    SingleDateCommit(NaiveDate),
    /// The focused (shown) month changed.
    ShownDateChange(NaiveDate),
    /// Hover preview changed; `None` clears it.
    PreviewChange(Option<NaiveDate>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_tag_and_value() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        let json = serde_json::to_string(&CalendarEvent::SingleDateCommit(date)).unwrap();
        assert_eq!(json, r#"{"event":"single_date_commit","value":"2024-02-14"}"#);

        let json = serde_json::to_string(&CalendarEvent::PreviewChange(None)).unwrap();
        assert_eq!(json, r#"{"event":"preview_change","value":null}"#);
    }
}
