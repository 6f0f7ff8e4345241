//! Event classifier: tags a parsed message as check-in / check-out / remote
//! and pulls out a time the sender typed into the message body.

use crate::chat::line::parse_chat_time;
use crate::chat::patterns::ChatPatterns;
use crate::models::raw_event::RawEvent;
use chrono::NaiveTime;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventTags {
    pub check_in: bool,
    pub check_out: bool,
    pub remote: bool,
    /// Check-in inferred from a remote-only message ("wfh today").
    pub implicit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEvent {
    pub event: RawEvent,
    pub tags: EventTags,
    pub stated_time: Option<NaiveTime>,
}

impl ClassifiedEvent {
    /// Time used for the shift: the one typed in the message wins over the envelope.
    /// The date bucket is always the envelope date.
    pub fn shift_time(&self) -> NaiveTime {
        self.stated_time.unwrap_or(self.event.time)
    }
}

pub fn classify(event: RawEvent, patterns: &ChatPatterns) -> ClassifiedEvent {
    let body = event.message.as_str();

    let mut tags = EventTags {
        check_in: patterns.check_in.is_match(body),
        check_out: patterns.check_out.is_match(body),
        remote: patterns.remote.is_match(body),
        implicit: false,
    };

    if tags.remote && !tags.check_in && !tags.check_out {
        tags.check_in = true;
        tags.implicit = true;
    }

    let stated_time = extract_stated_time(body, patterns);

    ClassifiedEvent {
        event,
        tags,
        stated_time,
    }
}

/// First time-like token in the body that actually parses.
pub fn extract_stated_time(body: &str, patterns: &ChatPatterns) -> Option<NaiveTime> {
    patterns
        .stated_time
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .find_map(|m| parse_chat_time(m.as_str()))
}
