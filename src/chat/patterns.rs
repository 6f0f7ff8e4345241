//! Compiled regex tables for the chat pipeline.
//!
//! Built once per run and handed to the parser and classifier by reference.

use crate::errors::AppResult;
use regex::Regex;

/// `[date, time] sender: message` (brackets optional, `date, time - sender: message` too).
/// The whitespace before am/pm may be any Unicode space separator (NNBSP on recent exports).
const MESSAGE_SHAPE: &str = r"^\[?(\d{1,2}/\d{1,2}/\d{2,4}),?\s+(\d{1,2}:\d{2}(?::\d{2})?(?:[\s\p{Zs}]*[AaPp][Mm])?)\]?\s*-?\s*([^:]+):\s*(.*)$";

const CHECK_IN: &str = r"(?i)\b(in|check.?in|arrived|good\s*morning|gm|login|log.?in|logg.?in|present|punch.?in)\b";

const CHECK_OUT: &str = r"(?i)\b(out|check.?out|leaving|good\s*night|gn|logout|log.?out|logg.?out|punch.?out|bye|signing.?off|log.?off|logg.?off)\b";

const REMOTE: &str = r"(?i)\b(wfh|work\s*from\s*home|remote|working\s*from\s*home)\b";

const STATED_TIME: &str = r"(?i)(\d{1,2}[:.]\d{2}(?::\d{2})?(?:[\s\p{Zs}]*[AaPp][Mm])?)";

/// Sender substrings that mark membership/system notices rather than people.
pub const SYSTEM_MARKERS: [&str; 5] = ["added", "left", "changed", "security code", "created"];

#[derive(Debug, Clone)]
pub struct ChatPatterns {
    pub message: Regex,
    pub check_in: Regex,
    pub check_out: Regex,
    pub remote: Regex,
    pub stated_time: Regex,
}

impl ChatPatterns {
    pub fn compile() -> AppResult<Self> {
        Ok(Self {
            message: Regex::new(MESSAGE_SHAPE)?,
            check_in: Regex::new(CHECK_IN)?,
            check_out: Regex::new(CHECK_OUT)?,
            remote: Regex::new(REMOTE)?,
            stated_time: Regex::new(STATED_TIME)?,
        })
    }

    pub fn is_system_sender(&self, sender: &str) -> bool {
        SYSTEM_MARKERS.iter().any(|m| sender.contains(m))
    }
}
