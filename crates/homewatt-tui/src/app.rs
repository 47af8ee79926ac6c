//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use homewatt_core::{Dashboard, ViewState};

use crate::action::{Action, ConfirmAction, Mutation, Notification};
use crate::component::Component;
use crate::data_bridge::spawn_data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::kwh_fmt;
use crate::widgets::notifications::NotificationStack;

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Pending destructive action awaiting yes/no. While set, every key
    /// routes to the dialog; declining sends nothing over the network.
    pending_confirm: Option<ConfirmAction>,
    /// Live toast stack.
    notifications: NotificationStack,
    /// When the last refresh pass completed (status-bar age display).
    last_refresh: Option<DateTime<Utc>>,
    /// The controller everything runs against.
    dashboard: Dashboard,
    /// Cancels the data bridge on shutdown.
    data_cancel: CancellationToken,
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        Self {
            active_screen: ScreenId::Overview,
            screens,
            running: true,
            help_visible: false,
            pending_confirm: None,
            notifications: NotificationStack::new(),
            last_refresh: None,
            dashboard,
            data_cancel: CancellationToken::new(),
            action_tx,
            action_rx,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        // Background bridge: login, initial refresh, polling, slot changes.
        let bridge = tokio::spawn(spawn_data_bridge(
            self.dashboard.clone(),
            self.action_tx.clone(),
            self.data_cancel.clone(),
        ));

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        self.data_cancel.cancel();
        let _ = bridge.await;
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Overlays take priority, then global
    /// keys, then the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // A screen with an open form gets every key verbatim.
        if self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.capturing_input())
        {
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='4')) => {
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            // Esc dismisses the oldest toast, if any.
            (KeyModifiers::NONE, KeyCode::Esc) => {
                if !self.notifications.is_empty() {
                    return Ok(Some(Action::DismissNotification));
                }
            }

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action — update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(..) | Action::Render => {}

            Action::Tick => {
                self.notifications.prune();
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} -> {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            // Data updates go to ALL screens so they stay in sync
            Action::StatsUpdated(_)
            | Action::RoomsUpdated(_)
            | Action::HistoryUpdated(_)
            | Action::ReadingsUpdated(_)
            | Action::AlertsUpdated(_) => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::DataRefreshed(at) => {
                self.last_refresh = Some(*at);
            }

            // ── Mutation pipeline ─────────────────────────────────────
            Action::Submit(mutation) => {
                self.run_mutation(mutation.clone());
            }

            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.action_tx.send(Action::Submit(confirm.into_mutation()))?;
                }
            }

            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            // ── Notifications ─────────────────────────────────────────
            Action::Notify(notification) => {
                self.notifications.push(notification.clone());
            }

            Action::DismissNotification => {
                self.notifications.dismiss_oldest();
            }
        }

        Ok(())
    }

    /// Execute a mutation against the controller in the background.
    ///
    /// The controller re-fetches the affected views itself; all the app
    /// loop adds is the outcome toast.
    fn run_mutation(&self, mutation: Mutation) {
        let dashboard = self.dashboard.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = match mutation {
                Mutation::AddRoom { ref name } => dashboard.add_room(name).await,
                Mutation::RenameRoom { id, ref name } => dashboard.rename_room(id, name).await,
                Mutation::DeleteRoom { id } => dashboard.delete_room(id).await,
                Mutation::AddAppliance(ref new) => dashboard.add_appliance(new).await,
                Mutation::EditAppliance { id, ref update } => {
                    dashboard.edit_appliance(id, update).await
                }
                Mutation::ToggleAppliance { id, current } => {
                    dashboard.toggle_appliance(id, current).await
                }
                Mutation::DeleteAppliance { id } => dashboard.delete_appliance(id).await,
                Mutation::DeleteUsageLog { id } => dashboard.delete_usage_log(id).await,
                Mutation::SimulateData => dashboard.simulate_data().await,
                Mutation::SimulateAlerts => dashboard.simulate_alerts().await,
            };
            match result {
                Ok(ack) => {
                    let message = if ack.message.is_empty() {
                        "Done".to_string()
                    } else {
                        ack.message
                    };
                    let _ = tx.send(Action::Notify(Notification::success(message)));
                }
                Err(e) => {
                    warn!(error = %e, "mutation failed");
                    let _ = tx.send(Action::Notify(Notification::error(
                        e.notification_message(),
                    )));
                }
            }
        });
    }

    /// Whether any view has degraded to its login prompt.
    fn auth_degraded(&self) -> bool {
        let store = self.dashboard.store();
        matches!(store.stats(), ViewState::Unauthenticated)
            || matches!(store.rooms(), ViewState::Unauthenticated)
            || matches!(store.history(), ViewState::Unauthenticated)
            || matches!(store.readings(), ViewState::Unauthenticated)
            || matches!(store.alerts(), ViewState::Unauthenticated)
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays, innermost last: toasts, then dialogs on top.
        self.notifications.render(frame, layout[0]);

        if let Some(ref confirm) = self.pending_confirm {
            self.render_confirm_dialog(frame, area, confirm);
        }

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Render the bottom tab bar showing all four screens.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Render the bottom status bar: refresh age, auth state, key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let refresh_indicator = match self.last_refresh {
            Some(at) => {
                let secs = u64::try_from((Utc::now() - at).num_seconds()).unwrap_or(0);
                Span::styled(
                    format!("● {}", kwh_fmt::fmt_age(secs)),
                    Style::default().fg(theme::LEAF_GREEN),
                )
            }
            None => Span::styled("○ waiting for data", theme::key_hint()),
        };

        let mut parts = vec![Span::raw(" "), refresh_indicator];
        if self.auth_degraded() {
            parts.push(Span::styled(
                "  session expired",
                Style::default().fg(theme::SIGNAL_YELLOW),
            ));
        }
        parts.push(Span::styled(" │ ? help  q quit", theme::key_hint()));

        frame.render_widget(Paragraph::new(Line::from(parts)), area);
    }

    /// Render the yes/no dialog for a pending destructive action.
    fn render_confirm_dialog(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let width = 56u16.min(area.width.saturating_sub(4));
        let height = 5u16;

        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::SIGNAL_YELLOW));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!("  {confirm}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("delete    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Render the help overlay centered on the screen.
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 58u16.min(area.width.saturating_sub(4));
        let help_height = 20u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |label: &'static str| {
            Line::from(Span::styled(
                format!("  {label}"),
                Style::default().fg(theme::SKY_BLUE),
            ))
        };
        let entry = |keys: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            section("Navigation"),
            entry("1-4", "Jump to screen"),
            entry("Tab", "Next screen"),
            entry("j/k ↑/↓", "Move up/down"),
            entry("g/G", "Top / bottom"),
            Line::from(""),
            section("Rooms"),
            entry("a", "Add room"),
            entry("n", "Add appliance"),
            entry("e", "Edit selection"),
            entry("t", "Toggle appliance on/off"),
            entry("d", "Delete selection (with confirm)"),
            Line::from(""),
            section("Global"),
            entry("s / b", "Simulate data / alerts (Overview)"),
            entry("Esc", "Dismiss toast / close form"),
            entry("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "                        Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let dashboard =
            Dashboard::new(homewatt_core::DashboardConfig::default()).expect("dashboard");
        App::new(dashboard)
    }

    #[test]
    fn declined_confirmation_dispatches_nothing() {
        let mut app = test_app();
        app.process_action(&Action::ShowConfirm(ConfirmAction::DeleteRoom {
            id: 1,
            name: "Kitchen".into(),
        }))
        .expect("action");
        assert!(app.pending_confirm.is_some());

        app.process_action(&Action::ConfirmNo).expect("action");
        assert!(app.pending_confirm.is_none());
        // Nothing was queued for the mutation pipeline.
        assert!(app.action_rx.try_recv().is_err());
    }

    #[test]
    fn confirmation_queues_the_mutation() {
        let mut app = test_app();
        app.process_action(&Action::ShowConfirm(ConfirmAction::DeleteUsageLog { id: 9 }))
            .expect("action");
        app.process_action(&Action::ConfirmYes).expect("action");

        let queued = app.action_rx.try_recv().expect("queued action");
        assert!(matches!(
            queued,
            Action::Submit(Mutation::DeleteUsageLog { id: 9 })
        ));
    }

    #[test]
    fn confirm_dialog_swallows_other_keys() {
        let mut app = test_app();
        app.pending_confirm = Some(ConfirmAction::DeleteUsageLog { id: 3 });

        let key = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE);
        let action = app.handle_key_event(key).expect("key handling");
        assert!(action.is_none());

        let yes = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE);
        let action = app.handle_key_event(yes).expect("key handling");
        assert!(matches!(action, Some(Action::ConfirmYes)));
    }
}
