//! The notification surface: a stack of transient, dismissible toasts.
//!
//! Toasts append in insertion order, expire on their own after a fixed
//! delay (pruned on each Tick), and the oldest can be dismissed manually.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::action::{Notification, NotificationLevel};
use crate::theme;

/// How long a toast lives before auto-dismissal.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Stack of live notifications, oldest first.
pub struct NotificationStack {
    items: Vec<(Notification, Instant)>,
    ttl: Duration,
}

impl NotificationStack {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            ttl: NOTIFICATION_TTL,
        }
    }

    #[cfg(test)]
    fn with_ttl(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
        }
    }

    /// Append a notification (insertion order is display order).
    pub fn push(&mut self, notification: Notification) {
        self.items.push((notification, Instant::now()));
    }

    /// Manually dismiss the oldest notification.
    pub fn dismiss_oldest(&mut self) {
        if !self.items.is_empty() {
            self.items.remove(0);
        }
    }

    /// Drop expired notifications. Called on every Tick.
    pub fn prune(&mut self) {
        let ttl = self.ttl;
        self.items.retain(|(_, born)| born.elapsed() < ttl);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Render the stack into the top-right corner of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.items.is_empty() {
            return;
        }

        let width = 46u16.min(area.width.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width + 1);
        let mut y = area.y + 1;

        for (notification, _) in &self.items {
            if y + 3 > area.y + area.height {
                break;
            }
            let toast_area = Rect::new(x, y, width, 3);

            let (color, tag) = match notification.level {
                NotificationLevel::Success => (theme::LEAF_GREEN, "ok"),
                NotificationLevel::Error => (theme::ALERT_RED, "error"),
                NotificationLevel::Warning => (theme::SIGNAL_YELLOW, "warn"),
                NotificationLevel::Info => (theme::SKY_BLUE, "info"),
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .title(Line::from(Span::styled(
                    format!(" {tag} "),
                    Style::default().fg(color),
                )));

            let inner = block.inner(toast_area);
            frame.render_widget(Clear, toast_area);
            frame.render_widget(block, toast_area);

            let max = inner.width.saturating_sub(1) as usize;
            let text: String = notification.message.chars().take(max).collect();
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(text, theme::row()),
                ])),
                inner,
            );

            y += 3;
        }
    }
}

impl Default for NotificationStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacks_in_insertion_order() {
        let mut stack = NotificationStack::new();
        stack.push(Notification::success("first"));
        stack.push(Notification::error("second"));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.items[0].0.message, "first");
        assert_eq!(stack.items[1].0.message, "second");
    }

    #[test]
    fn manual_dismissal_removes_the_oldest() {
        let mut stack = NotificationStack::new();
        stack.push(Notification::info("a"));
        stack.push(Notification::info("b"));
        stack.dismiss_oldest();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.items[0].0.message, "b");

        stack.dismiss_oldest();
        stack.dismiss_oldest(); // dismissing an empty stack is a no-op
        assert!(stack.is_empty());
    }

    #[test]
    fn prune_expires_old_toasts_and_keeps_fresh_ones() {
        let mut expired = NotificationStack::with_ttl(Duration::ZERO);
        expired.push(Notification::success("gone"));
        expired.prune();
        assert!(expired.is_empty());

        let mut fresh = NotificationStack::with_ttl(Duration::from_secs(3600));
        fresh.push(Notification::success("stays"));
        fresh.prune();
        assert_eq!(fresh.len(), 1);
    }
}
