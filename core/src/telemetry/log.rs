use log::info;

/// Records operator interaction events through the `log` facade, prefixed
/// with the owning component's scope.
pub struct EventLog {
    scope: &'static str,
}

impl EventLog {
    pub fn new(scope: &'static str) -> Self {
        Self { scope }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.scope, message);
    }
}
