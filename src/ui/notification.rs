//! Toast notifications with auto-dismiss.

use std::sync::atomic::{
    AtomicU64,
    Ordering,
};
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};
use std::time::Duration;

use serde::Serialize;

use crate::config::I18nSettings;

/// Kind of a notification; decides its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Green.
    #[default]
    Success,
    /// Red.
    Error,
    /// Blue.
    Info,
}

impl NotificationKind {
    /// Background colour as a CSS hex value.
    #[must_use]
    pub const fn background(self) -> &'static str {
        match self {
            Self::Success => "#28a745",
            Self::Error => "#dc3545",
            Self::Info => "#17a2b8",
        }
    }
}

/// Identifies a shown notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NotificationId(u64);

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Identifier used by `dismiss`.
    pub id: NotificationId,
    /// Message text.
    pub message: String,
    /// Kind.
    pub kind: NotificationKind,
}

/// Currently visible notifications.
///
/// Each notification is removed after its duration unless dismissed
/// earlier. `show` spawns the timer, so it must run inside a Tokio runtime.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    /// 表示中の通知（表示順）
    active: Arc<Mutex<Vec<Notification>>>,
    /// 次に払い出す ID
    next_id: Arc<AtomicU64>,
    /// `show` で使う表示時間
    default_duration: Duration,
}

impl NotificationCenter {
    /// Center whose `show` uses `default_duration`.
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            active: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
            default_duration,
        }
    }

    /// `notificationDurationMs` を表示時間にして作成する
    #[must_use]
    pub fn from_settings(settings: &I18nSettings) -> Self {
        Self::new(settings.notification_duration())
    }

    /// 既定の表示時間で通知を表示する
    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        self.show_for(message, kind, self.default_duration)
    }

    /// Shows a notification for `duration`.
    pub fn show_for(
        &self,
        message: impl Into<String>,
        kind: NotificationKind,
        duration: Duration,
    ) -> NotificationId {
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let notification = Notification { id, message: message.into(), kind };
        tracing::debug!("Showing {:?} notification: {}", kind, notification.message);
        self.lock().push(notification);

        let center = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            center.dismiss(id);
        });

        id
    }

    /// Returns `true` if the notification was still visible.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let mut active = self.lock();
        let before = active.len();
        active.retain(|notification| notification.id != id);
        active.len() != before
    }

    /// Visible notifications in display order.
    #[must_use]
    pub fn active(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// 表示中リストのロック
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::from_settings(&I18nSettings::default())
    }
}
