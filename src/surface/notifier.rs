use tracing::info;

/// How the editor talks back to the hosting page: blocking messages and data reloads.
pub trait Notifier {
    fn alert(&mut self, message: &str);
    fn reload(&mut self);
}

/// Sends alerts to the log. Used by the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&mut self, message: &str) {
        info!("{message}");
    }

    fn reload(&mut self) {
        info!("Reloading the transaction list");
    }
}

/// Keeps every alert and counts reloads.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct RecordingNotifier {
    pub alerts: Vec<String>,
    pub reloads: usize,
}

impl RecordingNotifier {
    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}
