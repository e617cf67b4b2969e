//! Transient user notifications.
//!
//! A notification is a short success or error message with an identity.
//! [`NotificationTimer`] schedules its automatic dismissal; arming the timer
//! for a new notification aborts the previous countdown, so an older
//! notification's expiry can never dismiss a newer one.

mod renderer;

pub use renderer::NotificationRenderer;

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identity of a notification, unique within one [`App`](crate::state::App).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a notification reports success or failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

/// A message shown to the user for a limited time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Identity used to match the dismissal to this notification.
    pub id: NotificationId,
    /// Success or error.
    pub kind: NotificationKind,
    /// Text shown to the user.
    pub message: String,
}

impl Notification {
    /// Creates a success notification.
    pub fn success(id: NotificationId, message: impl Into<String>) -> Self {
        Self {
            id,
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// Creates an error notification.
    pub fn error(id: NotificationId, message: impl Into<String>) -> Self {
        Self {
            id,
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    /// Returns true if this notification reports a failure.
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Cancellable auto-dismiss timer.
///
/// At most one countdown is active. When it elapses, the id it was armed for
/// is sent on the channel returned by [`NotificationTimer::new`].
pub struct NotificationTimer {
    /// How long a notification stays visible.
    ttl: Duration,
    /// Channel on which expired ids are delivered.
    sender: mpsc::UnboundedSender<NotificationId>,
    /// The running countdown, if any.
    pending: Option<(NotificationId, JoinHandle<()>)>,
}

impl NotificationTimer {
    /// Creates a timer and the receiver for expired notification ids.
    pub fn new(ttl: Duration) -> (Self, mpsc::UnboundedReceiver<NotificationId>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let timer = Self {
            ttl,
            sender,
            pending: None,
        };
        (timer, receiver)
    }

    /// Returns the configured lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the id the active countdown was armed for.
    pub fn pending(&self) -> Option<NotificationId> {
        self.pending.as_ref().map(|(id, _)| *id)
    }

    /// Starts the countdown for `id`, superseding any running countdown.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, id: NotificationId) {
        self.cancel();

        let sender = self.sender.clone();
        let ttl = self.ttl;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            // The receiver may already be gone when the app shuts down.
            let _ = sender.send(id);
        });
        self.pending = Some((id, handle));
    }

    /// Aborts the running countdown, if any.
    pub fn cancel(&mut self) {
        if let Some((id, handle)) = self.pending.take() {
            handle.abort();
            tracing::trace!(notification = %id, "Cancelled notification timer");
        }
    }

    /// Forgets the countdown for `id` once it has fired.
    pub fn settle(&mut self, id: NotificationId) {
        if self.pending() == Some(id) {
            self.pending = None;
        }
    }
}

impl Drop for NotificationTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_constructors() {
        let ok = Notification::success(NotificationId(1), "Employee added successfully!");
        assert!(!ok.is_error());
        assert_eq!(ok.to_string(), "Employee added successfully!");

        let err = Notification::error(NotificationId(2), "Resource not found.");
        assert!(err.is_error());
        assert_eq!(err.id, NotificationId(2));
    }

    #[test]
    fn test_notification_id_display() {
        assert_eq!(NotificationId(42).to_string(), "#42");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_ttl() {
        let (mut timer, mut expired) = NotificationTimer::new(Duration::from_secs(3));
        timer.arm(NotificationId(1));
        assert_eq!(timer.pending(), Some(NotificationId(1)));

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(expired.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(expired.recv().await, Some(NotificationId(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearming_supersedes_previous_countdown() {
        let (mut timer, mut expired) = NotificationTimer::new(Duration::from_secs(3));
        timer.arm(NotificationId(1));
        tokio::time::sleep(Duration::from_secs(2)).await;
        timer.arm(NotificationId(2));

        // The first countdown would have fired here.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(expired.try_recv().is_err());

        assert_eq!(expired.recv().await, Some(NotificationId(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_countdown() {
        let (mut timer, mut expired) = NotificationTimer::new(Duration::from_secs(1));
        timer.arm(NotificationId(5));
        timer.cancel();
        assert_eq!(timer.pending(), None);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(expired.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_settle_only_clears_matching_id() {
        let (mut timer, _expired) = NotificationTimer::new(Duration::from_secs(60));
        timer.arm(NotificationId(3));
        timer.settle(NotificationId(2));
        assert_eq!(timer.pending(), Some(NotificationId(3)));
        timer.settle(NotificationId(3));
        assert_eq!(timer.pending(), None);
    }
}
