use serde_json::Value;

use crate::status::StatusLine;

pub const UNAVAILABLE_PLACEHOLDER: &str = "Unable to retrieve the backend response.";

/// Displays the backend's machine-info document without interpreting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineInfoPanel {
    status: StatusLine,
    output: String,
}

impl MachineInfoPanel {
    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Marks the panel as loading; the caller issues the actual request.
    pub fn begin_refresh(&mut self) {
        self.status = StatusLine::loading();
    }

    pub fn apply_loaded(&mut self, document: &Value) {
        self.output = pretty_json(document);
        self.status = StatusLine::ok("OK");
    }

    pub fn apply_failed(&mut self, reason: &str) {
        self.status = StatusLine::error(reason);
        self.output = UNAVAILABLE_PLACEHOLDER.to_owned();
    }
}

pub fn pretty_json(document: &Value) -> String {
    serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string())
}
