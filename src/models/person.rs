use serde::Serialize;

/// A known member of the roster.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Person {
    pub id: i64,
    pub display_name: String,
    /// Name as it appears in the chat export, when it differs from the display name.
    pub chat_alias: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
}

impl Person {
    pub fn new(id: i64, display_name: &str) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            chat_alias: None,
            phone: None,
            email: None,
            is_active: true,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.chat_alias = Some(alias.to_string());
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub fn alias(&self) -> Option<&str> {
        self.chat_alias.as_deref().filter(|a| !a.trim().is_empty())
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.trim().is_empty())
    }
}
