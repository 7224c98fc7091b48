#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub severity: AlertSeverity,
}

/// Single-slot transient notification.
///
/// Posting replaces whatever is shown. Each post gets a new generation so an
/// expiry timer armed for an older alert cannot hide a newer one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlertChannel {
    current: Option<Alert>,
    generation: u64,
}

impl AlertChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `message` and returns the generation its expiry timer must carry.
    pub fn post(&mut self, message: impl Into<String>, severity: AlertSeverity) -> u64 {
        self.generation += 1;
        self.current = Some(Alert {
            message: message.into(),
            severity,
        });
        self.generation
    }

    /// Hides the alert if `generation` still names it. Returns whether it was hidden.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.current.is_some() {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
