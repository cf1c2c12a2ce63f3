//! Merchant-facing notices

use std::fmt;

/// Outcome surfaced to the merchant once an action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    CountdownCreated,
    CountdownUpdated,
    CountdownRemoved,
    AppConfigured,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::CountdownCreated => "Countdown created.",
            Notice::CountdownUpdated => "Countdown updated.",
            Notice::CountdownRemoved => "Countdown removed.",
            Notice::AppConfigured => "App configured.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Delivery channel for notices.
///
/// Handed to the services at construction so the embedding surface
/// decides where notices go; the server logs them, tests record them.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Logs each notice through tracing.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::info!("{}", notice.message());
    }
}
