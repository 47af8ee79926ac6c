//! Modal input form for the add/edit mutations.
//!
//! A small stack of labeled text fields rendered as a centered popup.
//! Tab/Shift-Tab cycle focus, Enter submits, Esc cancels. Parsing of the
//! collected values into a request body is the owning screen's job.

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::theme;

/// What the form produced on a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum FormOutcome {
    /// Keep editing.
    Editing,
    /// Enter pressed: collect values and submit.
    Submitted,
    /// Esc pressed: close without submitting.
    Cancelled,
}

struct Field {
    label: &'static str,
    input: Input,
}

/// A modal form with a title and a fixed set of text fields.
pub struct Form {
    title: String,
    fields: Vec<Field>,
    focus: usize,
}

impl Form {
    /// Build a form from `(label, initial value)` pairs.
    pub fn new(title: impl Into<String>, fields: &[(&'static str, &str)]) -> Self {
        Self {
            title: title.into(),
            fields: fields
                .iter()
                .map(|(label, initial)| Field {
                    label,
                    input: Input::new((*initial).to_string()),
                })
                .collect(),
            focus: 0,
        }
    }

    /// Current field values, in declaration order.
    pub fn values(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| f.input.value().trim().to_string())
            .collect()
    }

    /// Route a key press: focus cycling and submit/cancel here, everything
    /// else into the focused text field.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => return FormOutcome::Cancelled,
            KeyCode::Enter => return FormOutcome::Submitted,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.fields.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
            }
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.input.handle_event(&CrosstermEvent::Key(key));
                }
            }
        }
        FormOutcome::Editing
    }

    /// Render the form as a centered popup over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let height = (self.fields.len() as u16) * 2 + 4;
        let width = 48u16.min(area.width.saturating_sub(4));
        let popup = centered(area, width, height);

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut constraints: Vec<Constraint> =
            self.fields.iter().flat_map(|_| [Constraint::Length(1); 2]).collect();
        constraints.push(Constraint::Min(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus;
            let label_style = if focused {
                Style::default().fg(theme::EMBER_ORANGE)
            } else {
                theme::key_hint()
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(field.label, label_style))),
                rows[i * 2],
            );

            let marker = if focused { "> " } else { "  " };
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(field.input.value().to_string(), theme::row()),
                ])),
                rows[i * 2 + 1],
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Enter submit · Esc cancel · Tab next field",
                theme::key_hint(),
            ))),
            rows[self.fields.len() * 2],
        );
    }
}

/// A `width`×`height` rect centered within `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_lands_in_the_focused_field() {
        let mut form = Form::new("Add Room", &[("Name", "")]);
        form.handle_key(key(KeyCode::Char('D')));
        form.handle_key(key(KeyCode::Char('e')));
        form.handle_key(key(KeyCode::Char('n')));
        assert_eq!(form.values(), vec!["Den".to_string()]);
    }

    #[test]
    fn tab_cycles_focus() {
        let mut form = Form::new("Add Appliance", &[("Name", ""), ("Quantity", "1")]);
        form.handle_key(key(KeyCode::Char('a')));
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Char('2')));
        assert_eq!(form.values(), vec!["a".to_string(), "12".to_string()]);
    }

    #[test]
    fn enter_submits_and_esc_cancels() {
        let mut form = Form::new("Add Room", &[("Name", "")]);
        assert_eq!(form.handle_key(key(KeyCode::Char('x'))), FormOutcome::Editing);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Submitted);
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormOutcome::Cancelled);
    }

    #[test]
    fn initial_values_prefill_edit_forms() {
        let form = Form::new("Edit Appliance", &[("Name", "Fridge"), ("Quantity", "2")]);
        assert_eq!(form.values(), vec!["Fridge".to_string(), "2".to_string()]);
    }
}
