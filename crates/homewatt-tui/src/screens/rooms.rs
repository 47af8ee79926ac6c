//! Rooms screen — room cards with nested appliances, plus all the
//! add/edit/delete/toggle mutation forms.
//!
//! Navigation walks a flattened list of room and appliance rows. Forms
//! open as modal popups; while one is open every key routes into it.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use homewatt_core::{ApplianceUpdate, NewAppliance, Room, ViewState};

use crate::action::{Action, ConfirmAction, Mutation};
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{Form, FormOutcome};
use crate::widgets::kwh_fmt;

use super::state_notice;

/// One selectable row in the flattened room/appliance listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowRef {
    Room(usize),
    Appliance(usize, usize),
}

/// Which mutation an open form feeds.
enum FormKind {
    AddRoom,
    RenameRoom { id: i64 },
    AddAppliance { room_id: i64 },
    EditAppliance { id: i64 },
}

/// Rooms screen state.
pub struct RoomsScreen {
    focused: bool,
    rooms: ViewState<Arc<Vec<Room>>>,
    selected: usize,
    form: Option<(FormKind, Form)>,
}

impl RoomsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            rooms: ViewState::Loading,
            selected: 0,
            form: None,
        }
    }

    fn rooms_data(&self) -> Option<&Arc<Vec<Room>>> {
        self.rooms.data()
    }

    /// Flatten rooms and their appliances into selectable rows.
    fn rows(&self) -> Vec<RowRef> {
        let mut rows = Vec::new();
        if let Some(rooms) = self.rooms_data() {
            for (ri, room) in rooms.iter().enumerate() {
                rows.push(RowRef::Room(ri));
                for ai in 0..room.appliances.len() {
                    rows.push(RowRef::Appliance(ri, ai));
                }
            }
        }
        rows
    }

    fn selected_row(&self) -> Option<RowRef> {
        self.rows().get(self.selected).copied()
    }

    /// The room a row belongs to (for "add appliance here").
    fn room_of(&self, row: RowRef) -> Option<&Room> {
        let rooms = self.rooms_data()?;
        match row {
            RowRef::Room(ri) | RowRef::Appliance(ri, _) => rooms.get(ri),
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.rows().len();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }

    // ── Key handling ─────────────────────────────────────────────────

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        let (kind, form) = self.form.as_mut()?;
        match form.handle_key(key) {
            FormOutcome::Editing => None,
            FormOutcome::Cancelled => {
                self.form = None;
                None
            }
            FormOutcome::Submitted => {
                let values = form.values();
                let mutation = match kind {
                    FormKind::AddRoom => Mutation::AddRoom {
                        name: values[0].clone(),
                    },
                    FormKind::RenameRoom { id } => Mutation::RenameRoom {
                        id: *id,
                        name: values[0].clone(),
                    },
                    FormKind::AddAppliance { room_id } => {
                        Mutation::AddAppliance(NewAppliance {
                            room_id: *room_id,
                            appliance_name: values[0].clone(),
                            quantity: values[1].parse().unwrap_or(1),
                            min_power_rating_watt: values[2].parse().unwrap_or(0.0),
                            max_power_rating_watt: values[3].parse().unwrap_or(0.0),
                        })
                    }
                    FormKind::EditAppliance { id } => Mutation::EditAppliance {
                        id: *id,
                        update: ApplianceUpdate {
                            appliance_name: values[0].clone(),
                            quantity: values[1].parse().unwrap_or(1),
                            min_power_rating_watt: values[2].parse().unwrap_or(0.0),
                            max_power_rating_watt: values[3].parse().unwrap_or(0.0),
                        },
                    },
                };
                self.form = None;
                Some(Action::Submit(mutation))
            }
        }
    }

    fn open_add_appliance_form(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let Some(room) = self.room_of(row) else {
            return;
        };
        let (room_id, room_name) = (room.id, room.name.clone());
        self.form = Some((
            FormKind::AddAppliance { room_id },
            Form::new(
                format!("Add Appliance to {room_name}"),
                &[
                    ("Name", ""),
                    ("Quantity", "1"),
                    ("Min power (W)", ""),
                    ("Max power (W)", ""),
                ],
            ),
        ));
    }

    fn open_edit_form(&mut self) {
        match self.selected_row() {
            Some(row @ RowRef::Room(_)) => {
                if let Some(room) = self.room_of(row) {
                    let (id, name) = (room.id, room.name.clone());
                    self.form = Some((
                        FormKind::RenameRoom { id },
                        Form::new("Rename Room", &[("Name", &name)]),
                    ));
                }
            }
            Some(RowRef::Appliance(ri, ai)) => {
                if let Some(appliance) = self
                    .rooms_data()
                    .and_then(|rooms| rooms.get(ri))
                    .and_then(|room| room.appliances.get(ai))
                {
                    let id = appliance.id;
                    let name = appliance.name.clone();
                    let quantity = appliance.quantity.to_string();
                    let min = format!("{:.0}", appliance.min_power_watts);
                    let max = format!("{:.0}", appliance.max_power_watts);
                    self.form = Some((
                        FormKind::EditAppliance { id },
                        Form::new(
                            "Edit Appliance",
                            &[
                                ("Name", &name),
                                ("Quantity", &quantity),
                                ("Min power (W)", &min),
                                ("Max power (W)", &max),
                            ],
                        ),
                    ));
                }
            }
            None => {}
        }
    }

    /// Destructive actions go through the confirm dialog, never straight
    /// to the network.
    fn request_delete(&self) -> Option<Action> {
        match self.selected_row()? {
            RowRef::Room(ri) => {
                let room = self.rooms_data()?.get(ri)?;
                Some(Action::ShowConfirm(ConfirmAction::DeleteRoom {
                    id: room.id,
                    name: room.name.clone(),
                }))
            }
            RowRef::Appliance(ri, ai) => {
                let appliance = self.rooms_data()?.get(ri)?.appliances.get(ai)?;
                Some(Action::ShowConfirm(ConfirmAction::DeleteAppliance {
                    id: appliance.id,
                    name: appliance.name.clone(),
                }))
            }
        }
    }

    fn request_toggle(&self) -> Option<Action> {
        if let RowRef::Appliance(ri, ai) = self.selected_row()? {
            let appliance = self.rooms_data()?.get(ri)?.appliances.get(ai)?;
            return Some(Action::Submit(Mutation::ToggleAppliance {
                id: appliance.id,
                current: appliance.status,
            }));
        }
        None
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn row_lines(&self, visible: usize) -> Vec<Line<'_>> {
        let Some(rooms) = self.rooms_data() else {
            return Vec::new();
        };

        let rows = self.rows();
        // Keep the selection on screen: scroll just far enough.
        let skip = self.selected.saturating_sub(visible.saturating_sub(1));
        rows.iter()
            .enumerate()
            .skip(skip)
            .take(visible)
            .map(|(idx, row)| {
                let selected = idx == self.selected;
                let base = if selected {
                    theme::row_selected()
                } else {
                    theme::row()
                };
                match *row {
                    RowRef::Room(ri) => {
                        let room = &rooms[ri];
                        Line::from(vec![
                            Span::styled(format!(" {} ", room.name), base),
                            Span::styled(
                                format!(
                                    "· {} · {} appliances",
                                    kwh_fmt::fmt_watts(room.total_power_watts),
                                    room.appliances.len()
                                ),
                                theme::key_hint(),
                            ),
                        ])
                    }
                    RowRef::Appliance(ri, ai) => {
                        let appliance = &rooms[ri].appliances[ai];
                        let badge = if appliance.status.is_on() {
                            theme::badge_on()
                        } else {
                            theme::badge_off()
                        };
                        Line::from(vec![
                            Span::styled(format!("   {:<16}", appliance.name), base),
                            Span::styled(format!("x{:<3}", appliance.quantity), theme::key_hint()),
                            Span::styled(
                                format!("{:<12}", appliance.rating_label()),
                                theme::key_hint(),
                            ),
                            Span::styled(
                                format!("{:>10} ", kwh_fmt::fmt_kwh(appliance.current_usage_kwh)),
                                base,
                            ),
                            Span::styled(format!("[{}]", appliance.status.label()), badge),
                        ])
                    }
                }
            })
            .collect()
    }
}

impl Component for RoomsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.form.is_some() {
            return Ok(self.handle_form_key(key));
        }

        let row_count = self.rows().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if row_count > 0 {
                    self.selected = (self.selected + 1).min(row_count - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::Char('G') => {
                self.selected = row_count.saturating_sub(1);
            }
            KeyCode::Char('a') => {
                self.form = Some((FormKind::AddRoom, Form::new("Add Room", &[("Name", "")])));
            }
            KeyCode::Char('n') => self.open_add_appliance_form(),
            KeyCode::Char('e') | KeyCode::Char('r') => self.open_edit_form(),
            KeyCode::Char('t') => return Ok(self.request_toggle()),
            KeyCode::Char('d') => return Ok(self.request_delete()),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::RoomsUpdated(state) = action {
            self.rooms = state.clone();
            self.clamp_selection();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Rooms ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(notice) = state_notice(&self.rooms) {
            frame.render_widget(Paragraph::new(notice), inner);
        } else if self.rooms_data().is_some_and(|rooms| rooms.is_empty()) {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  No rooms found -- press a to add one",
                    theme::placeholder(),
                ))),
                inner,
            );
        } else {
            let visible = inner.height.saturating_sub(1) as usize;
            let mut lines = self.row_lines(visible);
            lines.push(Line::from(Span::styled(
                " a add room  n add appliance  e edit  t toggle  d delete",
                theme::key_hint(),
            )));
            frame.render_widget(Paragraph::new(lines), inner);
        }

        if let Some((_, form)) = &self.form {
            form.render(frame, area);
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn capturing_input(&self) -> bool {
        self.form.is_some()
    }

    fn id(&self) -> &str {
        "Rooms"
    }
}
