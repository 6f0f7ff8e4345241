use serde::Serialize;

/// Who wrote an attendance record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    Ingested,
    Manual,
}

impl SourceTag {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SourceTag::Ingested => "ingested",
            SourceTag::Manual => "manual",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "ingested" => Some(SourceTag::Ingested),
            "manual" => Some(SourceTag::Manual),
            _ => None,
        }
    }

    pub fn is_ingested(&self) -> bool {
        matches!(self, SourceTag::Ingested)
    }
}
