//! Users screen — the add-user form above the users table.
//!
//! The form edits the [`UserForm`]'s draft directly (clones share the
//! same draft); submission and deletion are dispatched as actions so the
//! app can run them on spawned tasks while rendering continues. All form
//! controls are disabled while the externally driven loading flag is set.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState,
};
use tokio::sync::mpsc::UnboundedSender;

use roster_core::{DirectoryClient, FieldPatch, Gender, Role, User, UserForm};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

/// Which control receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Name,
    Email,
    Role,
    Gender,
    Submit,
    Table,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Role,
            Self::Role => Self::Gender,
            Self::Gender => Self::Submit,
            Self::Submit => Self::Table,
            Self::Table => Self::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Name => Self::Table,
            Self::Email => Self::Name,
            Self::Role => Self::Email,
            Self::Gender => Self::Role,
            Self::Submit => Self::Gender,
            Self::Table => Self::Submit,
        }
    }
}

pub struct UsersScreen {
    focused: bool,
    form: UserForm<DirectoryClient>,
    users: Arc<Vec<Arc<User>>>,
    loading: bool,
    focus: Focus,
    table_state: TableState,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl UsersScreen {
    pub fn new(form: UserForm<DirectoryClient>) -> Self {
        Self {
            focused: false,
            form,
            users: Arc::new(Vec::new()),
            loading: false,
            focus: Focus::default(),
            table_state: TableState::default(),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    // ── Editing helpers ─────────────────────────────────────────────

    fn edit_text(&self, code: KeyCode) {
        let draft = self.form.draft();
        let mut value = match self.focus {
            Focus::Name => draft.name,
            Focus::Email => draft.email,
            _ => return,
        };

        match code {
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => return,
        }

        let patch = match self.focus {
            Focus::Name => FieldPatch::Name(value),
            Focus::Email => FieldPatch::Email(value),
            _ => return,
        };
        self.form.update_field(patch);
    }

    fn cycle_selector(&self) {
        let draft = self.form.draft();
        match self.focus {
            // Both enums have two variants; any direction toggles.
            Focus::Role => {
                let next = match draft.role {
                    Role::User => Role::Admin,
                    Role::Admin => Role::User,
                };
                self.form.update_field(FieldPatch::Role(next));
            }
            Focus::Gender => {
                let next = match draft.gender {
                    Gender::Male => Gender::Female,
                    Gender::Female => Gender::Male,
                };
                self.form.update_field(FieldPatch::Gender(next));
            }
            _ => {}
        }
    }

    // ── Table helpers ───────────────────────────────────────────────

    fn selected_user(&self) -> Option<&Arc<User>> {
        self.table_state.selected().and_then(|i| self.users.get(i))
    }

    fn select_delta(&mut self, delta: i64) {
        if self.users.is_empty() {
            self.table_state.select(None);
            return;
        }
        let len = self.users.len() as i64;
        let current = self.table_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, len - 1);
        self.table_state.select(Some(next as usize));
    }

    fn clamp_selection(&mut self) {
        if self.users.is_empty() {
            self.table_state.select(None);
        } else {
            let max = self.users.len() - 1;
            let selected = self.table_state.selected().unwrap_or(0).min(max);
            self.table_state.select(Some(selected));
        }
    }

    // ── Key handling per focus ──────────────────────────────────────

    fn handle_table_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_delta(-1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_delta(1);
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => self
                .selected_user()
                .map(|user| Action::RequestDeleteUser(user.id.clone())),
            KeyCode::Char('r') => Some(Action::RefreshUsers),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char(c @ '1'..='2') => {
                ScreenId::from_number(c as u8 - b'0').map(Action::SwitchScreen)
            }
            _ => None,
        }
    }
}

impl Component for UsersScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Focus cycling works regardless of the loading flag.
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Ok(None);
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return Ok(None);
            }
            KeyCode::Esc if self.focus != Focus::Table => {
                self.focus = Focus::Table;
                return Ok(None);
            }
            _ => {}
        }

        if self.focus == Focus::Table {
            return Ok(self.handle_table_key(key));
        }

        // Form controls are disabled while the service is loading.
        if self.loading {
            return Ok(None);
        }

        match (self.focus, key.code) {
            // Enter anywhere in the form submits it.
            (_, KeyCode::Enter) => Ok(Some(Action::SubmitForm)),

            (Focus::Name | Focus::Email, KeyCode::Char(_) | KeyCode::Backspace) => {
                self.edit_text(key.code);
                Ok(None)
            }

            (
                Focus::Role | Focus::Gender,
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' '),
            ) => {
                self.cycle_selector();
                Ok(None)
            }

            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::UsersUpdated(users) => {
                self.users = Arc::clone(users);
                self.clamp_selection();
            }
            Action::LoadingChanged(loading) => {
                self.loading = *loading;
            }
            Action::Tick => {
                if self.loading {
                    self.throbber_state.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [form_area, table_area] =
            Layout::vertical([Constraint::Length(7), Constraint::Min(4)]).areas(area);

        self.render_form(frame, form_area);
        self.render_table(frame, table_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

// ── Rendering ───────────────────────────────────────────────────────

impl UsersScreen {
    fn input_style(&self, focus: Focus) -> Style {
        if self.loading {
            theme::input_disabled()
        } else if self.focus == focus {
            theme::input_focused()
        } else {
            theme::input_idle()
        }
    }

    fn text_line(&self, label: &'static str, value: &str, focus: Focus) -> Line<'_> {
        let mut value = value.to_owned();
        if self.focus == focus && !self.loading {
            value.push('▏');
        }
        Line::from(vec![
            Span::styled(format!(" {label:<8}"), theme::key_hint()),
            Span::styled(value, self.input_style(focus)),
        ])
    }

    fn selector_span(&self, label: &str, focus: Focus) -> Span<'_> {
        Span::styled(format!("◂ {label} ▸"), self.input_style(focus))
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focus == Focus::Table {
            theme::border_default()
        } else {
            theme::border_focused()
        };
        let block = Block::default()
            .title(Span::styled(" Add New User ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [name_row, email_row, selector_row, submit_row] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let draft = self.form.draft();

        frame.render_widget(
            Paragraph::new(self.text_line("Name", &draft.name, Focus::Name)),
            name_row,
        );
        frame.render_widget(
            Paragraph::new(self.text_line("Email", &draft.email, Focus::Email)),
            email_row,
        );

        let selectors = Line::from(vec![
            Span::styled(" Role    ", theme::key_hint()),
            self.selector_span(draft.role.label(), Focus::Role),
            Span::raw("      "),
            Span::styled("Gender  ", theme::key_hint()),
            self.selector_span(draft.gender.label(), Focus::Gender),
        ]);
        frame.render_widget(Paragraph::new(selectors), selector_row);

        if self.loading {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("Adding…")
                .style(theme::input_disabled())
                .throbber_style(Style::default().fg(theme::PERIWINKLE));
            frame.render_stateful_widget(throbber, submit_row, &mut self.throbber_state.clone());
        } else {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    " [ Add User ]",
                    self.input_style(Focus::Submit),
                ))),
                submit_row,
            );
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focus == Focus::Table {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let title = format!(" Users ({}) ", self.users.len());
        let block = Block::default()
            .title(Span::styled(title, theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);

        if self.users.is_empty() {
            let message = if self.loading {
                "Loading users…"
            } else {
                "No users yet — add one above."
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(message, theme::table_row())))
                    .block(block)
                    .centered(),
                area,
            );
            return;
        }

        let header = Row::new(vec!["NAME", "EMAIL", "ROLE", "GENDER"]).style(theme::table_header());

        let rows = self.users.iter().map(|user| {
            let role_style = match user.role {
                Role::Admin => Style::default().fg(theme::AMBER),
                Role::User => theme::table_row(),
            };
            Row::new(vec![
                Cell::from(user.name.clone()),
                Cell::from(user.email.clone()),
                Cell::from(user.role.label()).style(role_style),
                Cell::from(user.gender.label()),
            ])
            .style(theme::table_row())
        });

        let widths = [
            Constraint::Percentage(28),
            Constraint::Percentage(44),
            Constraint::Length(8),
            Constraint::Length(8),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(theme::table_selected())
            .highlight_symbol("▸ ")
            .column_spacing(1);

        frame.render_stateful_widget(table, area, &mut self.table_state.clone());
    }
}
