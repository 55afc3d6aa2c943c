use tracing::{error, info};

/// Shows short, transient messages to the user.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);

    fn success(&self, _message: &str) {}
}

/// Writes notifications to the log. Used when there is no UI to show them in.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        error!(target: "notifications", "{message}");
    }

    fn success(&self, message: &str) {
        info!(target: "notifications", "{message}");
    }
}
