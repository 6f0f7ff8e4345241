pub mod attendance;
pub mod daily_entry;
pub mod holiday;
pub mod leave;
pub mod person;
pub mod raw_event;
pub mod source_tag;
pub mod status;
pub mod summary;
pub mod unmatched;
