//! Completion notifications.

use tracing::info;

use crate::error::NotifyError;
use crate::session::SessionKind;

/// Told once per finished interval, after the session has been logged.
///
/// Errors are reported back but the orchestrator only logs them; a broken
/// notifier never stops the timer.
pub trait Notifier {
    fn notify_completion(&mut self, kind: SessionKind) -> Result<(), NotifyError>;
}

/// Writes completions to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_completion(&mut self, kind: SessionKind) -> Result<(), NotifyError> {
        let next = kind.opposite();
        info!(%kind, %next, "session finished");
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify_completion(&mut self, kind: SessionKind) -> Result<(), NotifyError> {
        (**self).notify_completion(kind)
    }
}
