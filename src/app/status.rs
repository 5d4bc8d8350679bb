use std::fmt;

pub const READY_STATUS: &str = "Ready. Press Ctrl+S to save changes.";

/// The outcome of the last user action, as reported in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Ready,
    Editing(&'static str),
    Saved(Option<String>),
    Issues(usize),
    Failed { action: &'static str, reason: String },
    ConfirmExit,
    Note(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => f.write_str(READY_STATUS),
            Status::Editing(field) => write!(f, "Editing {field}"),
            Status::Saved(Some(id)) => write!(f, "Saved field {id}"),
            Status::Saved(None) => f.write_str("Saved"),
            Status::Issues(count) => write!(f, "{count} issue(s) remaining"),
            Status::Failed { action, reason } => write!(f, "{action} failed: {reason}"),
            Status::ConfirmExit => {
                f.write_str("Unsaved changes. Press Ctrl+Q again to quit without saving.")
            }
            Status::Note(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    status: Status,
    text: String,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            status: Status::Ready,
            text: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&mut self, status: Status) {
        self.text = status.to_string();
        self.status = status;
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.set(Status::Note(msg.into()));
    }

    pub fn ready(&mut self) {
        self.set(Status::Ready);
    }

    pub fn editing(&mut self, field: &'static str) {
        self.set(Status::Editing(field));
    }

    pub fn saved(&mut self, id: Option<&str>) {
        self.set(Status::Saved(id.map(str::to_string)));
    }

    pub fn issues_remaining(&mut self, count: usize) {
        self.set(Status::Issues(count));
    }

    pub fn request_failed(&mut self, action: &'static str, err: &dyn fmt::Display) {
        self.set(Status::Failed {
            action,
            reason: err.to_string(),
        });
    }

    pub fn pending_exit(&mut self) {
        self.set(Status::ConfirmExit);
    }

    /// Failures stay highlighted in the footer until the next action.
    pub fn is_failure(&self) -> bool {
        matches!(self.status, Status::Failed { .. })
    }

    pub fn message(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_name_the_action() {
        let mut status = StatusLine::new();
        status.request_failed("Save", &"403 - Forbidden");
        assert_eq!(status.message(), "Save failed: 403 - Forbidden");
        assert!(status.is_failure());

        status.ready();
        assert_eq!(status.message(), READY_STATUS);
        assert!(!status.is_failure());
    }
}
