use std::fmt::Display;

/// Human-readable status shown next to a panel, with an error flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

impl StatusLine {
    pub fn idle() -> Self {
        Self {
            text: String::new(),
            is_error: false,
        }
    }

    pub fn loading() -> Self {
        Self {
            text: "Loading...".to_owned(),
            is_error: false,
        }
    }

    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(reason: impl Display) -> Self {
        Self {
            text: format!("Error: {reason}"),
            is_error: true,
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::idle()
    }
}
