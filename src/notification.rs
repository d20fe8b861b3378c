//! Short messages shown to the user after an action, e.g. "Transação cadastrada com sucesso!".
//!
//! Notifications are collected in a [Notifications] context that is created for each response,
//! so there is no state shared between requests. The context is rendered into the page's
//! alert container by [notification_stack].

use std::{fmt::Display, time::Duration};

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::texts;

/// How long a notification is shown before it is dismissed.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

/// The colour scheme of a notification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Blue, for general messages.
    #[default]
    Primary,
    /// Green, for completed actions.
    Success,
    /// Red, for errors.
    Danger,
    /// Yellow, for things that need attention.
    Warning,
    /// Cyan, for extra information.
    Info,
}

impl Variant {
    fn class(self) -> &'static str {
        match self {
            Variant::Primary => "bg-blue-500",
            Variant::Success => "bg-green-500",
            Variant::Danger => "bg-red-500",
            Variant::Warning => "bg-yellow-500",
            Variant::Info => "bg-cyan-500",
        }
    }
}

/// Where on the screen a notification is shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    /// The top left corner.
    TopLeft,
    /// The top right corner.
    TopRight,
    /// The bottom left corner.
    BottomLeft,
    /// The bottom right corner.
    #[default]
    BottomRight,
    /// The middle of the top edge.
    TopCenter,
    /// The middle of the bottom edge.
    BottomCenter,
}

impl Position {
    const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
        Position::TopCenter,
        Position::BottomCenter,
    ];

    fn container_class(self) -> &'static str {
        match self {
            Position::TopLeft => "fixed top-4 left-4 z-50 flex flex-col gap-2",
            Position::TopRight => "fixed top-4 right-4 z-50 flex flex-col gap-2",
            Position::BottomLeft => "fixed bottom-4 left-4 z-50 flex flex-col gap-2",
            Position::BottomRight => "fixed bottom-4 right-4 z-50 flex flex-col gap-2",
            Position::TopCenter => {
                "fixed top-4 left-1/2 -translate-x-1/2 z-50 flex flex-col gap-2"
            }
            Position::BottomCenter => {
                "fixed bottom-4 left-1/2 -translate-x-1/2 z-50 flex flex-col gap-2"
            }
        }
    }
}

/// Identifies a notification within its [Notifications] context, e.g. "notification-1".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationId(String);

impl NotificationId {
    /// The ID as used for the `id` attribute of the rendered notification.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The options for a notification that has not been added yet.
///
/// Start from [NewNotification::new] and override the defaults as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    /// The text to show.
    pub message: String,
    /// The colour scheme, primary by default.
    pub variant: Variant,
    /// Where on the screen to show it, bottom right by default.
    pub position: Position,
    /// How long until it is dismissed, three seconds by default.
    pub duration: Duration,
    /// Whether the user can dismiss it early, true by default.
    pub show_close_button: bool,
    /// Extra CSS classes.
    pub custom_class: Option<String>,
}

impl NewNotification {
    /// A notification with `message` and the default options.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: Variant::default(),
            position: Position::default(),
            duration: DEFAULT_DURATION,
            show_close_button: true,
            custom_class: None,
        }
    }

    /// Set the colour scheme.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set where the notification is shown.
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set how long the notification is shown for.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set whether the close button is shown.
    pub fn show_close_button(mut self, show_close_button: bool) -> Self {
        self.show_close_button = show_close_button;
        self
    }

    /// Add extra CSS classes.
    pub fn custom_class(mut self, custom_class: impl Into<String>) -> Self {
        self.custom_class = Some(custom_class.into());
        self
    }
}

/// A notification that has been added to a [Notifications] context.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// The ID given to the notification when it was added.
    pub id: NotificationId,
    /// The text to show.
    pub message: String,
    /// The colour scheme.
    pub variant: Variant,
    /// Where on the screen it is shown.
    pub position: Position,
    /// How long until it is dismissed.
    pub duration: Duration,
    /// Whether the user can dismiss it early.
    pub show_close_button: bool,
    /// Extra CSS classes.
    pub custom_class: Option<String>,
}

/// The notifications to show in a single response.
#[derive(Debug, Default, Clone)]
pub struct Notifications {
    last_id: u64,
    notifications: Vec<Notification>,
}

impl Notifications {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification and return its ID.
    ///
    /// IDs are "notification-1", "notification-2" and so on, and are never reused within the
    /// context, even after [Notifications::clear].
    pub fn add(&mut self, new_notification: NewNotification) -> NotificationId {
        self.last_id += 1;
        let id = NotificationId(format!("notification-{}", self.last_id));

        self.notifications.push(Notification {
            id: id.clone(),
            message: new_notification.message,
            variant: new_notification.variant,
            position: new_notification.position,
            duration: new_notification.duration,
            show_close_button: new_notification.show_close_button,
            custom_class: new_notification.custom_class,
        });

        id
    }

    /// Remove the notification with `id`, returning whether it was found.
    pub fn remove(&mut self, id: &NotificationId) -> bool {
        let len_before = self.notifications.len();
        self.notifications.retain(|notification| notification.id != *id);

        self.notifications.len() != len_before
    }

    /// Remove all notifications.
    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    /// Add a green notification.
    pub fn success(&mut self, message: impl Into<String>) -> NotificationId {
        self.add(NewNotification::new(message).variant(Variant::Success))
    }

    /// Add a red notification.
    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        self.add(NewNotification::new(message).variant(Variant::Danger))
    }

    /// Add a yellow notification.
    pub fn warning(&mut self, message: impl Into<String>) -> NotificationId {
        self.add(NewNotification::new(message).variant(Variant::Warning))
    }

    /// Add a cyan notification.
    pub fn info(&mut self, message: impl Into<String>) -> NotificationId {
        self.add(NewNotification::new(message).variant(Variant::Info))
    }

    /// Add a blue notification.
    pub fn primary(&mut self, message: impl Into<String>) -> NotificationId {
        self.add(NewNotification::new(message).variant(Variant::Primary))
    }

    /// The notifications in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// The number of notifications.
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Whether there are no notifications.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

/// Render the notifications grouped by position.
///
/// Each position with at least one notification gets its own fixed container.
pub fn notification_stack(notifications: &Notifications) -> Markup {
    html! {
        @for position in Position::ALL {
            @let in_position: Vec<&Notification> = notifications
                .iter()
                .filter(|notification| notification.position == position)
                .collect();

            @if !in_position.is_empty() {
                div class=(position.container_class())
                {
                    @for notification in in_position {
                        (notification_view(notification))
                    }
                }
            }
        }
    }
}

fn notification_view(notification: &Notification) -> Markup {
    let class = format!(
        "px-4 py-2 rounded shadow-lg text-white relative max-w-sm w-full {} {}",
        notification.variant.class(),
        notification.custom_class.as_deref().unwrap_or_default()
    );

    html! {
        div
            id=(notification.id)
            role="alert"
            data-notification
            data-duration=(notification.duration.as_millis())
            class=(class.trim_end())
        {
            span { (notification.message) }

            @if notification.show_close_button {
                button
                    type="button"
                    aria-label=(texts::notice::CLOSE_NOTIFICATION)
                    class="absolute top-1 right-2 text-white/80 hover:text-white"
                    onclick="this.closest('[data-notification]').remove()"
                {
                    "×"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use scraper::{Html, Selector};

    use crate::notification::{
        DEFAULT_DURATION, NewNotification, Notifications, Position, Variant, notification_stack,
    };

    #[test]
    fn adds_notification_with_defaults() {
        let mut notifications = Notifications::new();

        let id = notifications.add(NewNotification::new("Olá"));

        let notification = notifications.iter().next().expect("no notification added");
        assert_eq!(notification.id, id);
        assert_eq!(notification.message, "Olá");
        assert_eq!(notification.variant, Variant::Primary);
        assert_eq!(notification.position, Position::BottomRight);
        assert_eq!(notification.duration, DEFAULT_DURATION);
        assert!(notification.show_close_button);
    }

    #[test]
    fn ids_count_up_from_one() {
        let mut notifications = Notifications::new();

        let first = notifications.info("a");
        let second = notifications.info("b");

        assert_eq!(first.as_str(), "notification-1");
        assert_eq!(second.as_str(), "notification-2");
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut notifications = Notifications::new();
        notifications.info("a");
        notifications.clear();

        let id = notifications.info("b");

        assert!(notifications.len() == 1);
        assert_eq!(id.as_str(), "notification-2");
    }

    #[test]
    fn contexts_do_not_share_notifications() {
        let mut first = Notifications::new();
        let second = Notifications::new();

        first.success("a");

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn shortcuts_set_variant() {
        let mut notifications = Notifications::new();
        notifications.success("a");
        notifications.error("b");
        notifications.warning("c");
        notifications.info("d");
        notifications.primary("e");

        let variants: Vec<Variant> = notifications.iter().map(|n| n.variant).collect();

        assert_eq!(
            variants,
            vec![
                Variant::Success,
                Variant::Danger,
                Variant::Warning,
                Variant::Info,
                Variant::Primary
            ]
        );
    }

    #[test]
    fn removes_notification_by_id() {
        let mut notifications = Notifications::new();
        let first = notifications.info("a");
        notifications.info("b");

        assert!(notifications.remove(&first));
        assert!(!notifications.remove(&first));
        assert_eq!(notifications.len(), 1);
        assert_eq!(
            notifications.iter().next().map(|n| n.message.as_str()),
            Some("b")
        );
    }

    #[test]
    fn overrides_defaults() {
        let mut notifications = Notifications::new();

        notifications.add(
            NewNotification::new("a")
                .variant(Variant::Warning)
                .position(Position::TopCenter)
                .duration(Duration::from_secs(10))
                .show_close_button(false)
                .custom_class("font-bold"),
        );

        let notification = notifications.iter().next().unwrap();
        assert_eq!(notification.variant, Variant::Warning);
        assert_eq!(notification.position, Position::TopCenter);
        assert_eq!(notification.duration, Duration::from_secs(10));
        assert!(!notification.show_close_button);
        assert_eq!(notification.custom_class.as_deref(), Some("font-bold"));
    }

    #[test]
    fn renders_one_container_per_position() {
        let mut notifications = Notifications::new();
        notifications.add(NewNotification::new("a").position(Position::TopLeft));
        notifications.add(NewNotification::new("b").position(Position::TopLeft));
        notifications.add(NewNotification::new("c"));

        let html = Html::parse_fragment(&notification_stack(&notifications).into_string());

        let containers = html.select(&Selector::parse("div.fixed").unwrap()).count();
        let items = html
            .select(&Selector::parse("[data-notification]").unwrap())
            .count();
        assert_eq!(containers, 2, "want 2 containers, got {containers}");
        assert_eq!(items, 3, "want 3 notifications, got {items}");
    }

    #[test]
    fn renders_variant_class_and_close_button() {
        let mut notifications = Notifications::new();
        notifications.error("Falhou");

        let html = Html::parse_fragment(&notification_stack(&notifications).into_string());

        let notification = html
            .select(&Selector::parse("#notification-1").unwrap())
            .next()
            .expect("notification not rendered");
        let classes: Vec<&str> = notification.value().classes().collect();
        assert!(classes.contains(&"bg-red-500"), "got classes {classes:?}");
        assert_eq!(notification.value().attr("data-duration"), Some("3000"));

        let button = html
            .select(&Selector::parse("button").unwrap())
            .next()
            .expect("close button not rendered");
        assert_eq!(button.value().attr("aria-label"), Some("Fechar notificação"));
    }

    #[test]
    fn renders_nothing_when_empty() {
        let markup = notification_stack(&Notifications::new()).into_string();

        assert_eq!(markup, "");
    }
}
