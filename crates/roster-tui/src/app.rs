//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use roster_core::{
    DataStore, DirectoryClient, Notification, NotificationLevel, Notifier, RefreshHandle,
    UserForm, UserList,
};

use crate::action::{Action, ConfirmRequest};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::gate::DialogGate;
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Terminal size for responsive layout.
    terminal_size: (u16, u16),
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Form controller; clones share the draft with the users screen.
    form: UserForm<DirectoryClient>,
    /// Listing coordinator with the dialog-backed confirmation gate.
    list: UserList<DirectoryClient, DialogGate>,
    /// Reactive store fed by the refresh worker.
    store: Arc<DataStore>,
    /// Cancellation token for the data bridge and refresh worker.
    cancel: CancellationToken,
    /// Pending confirmation dialog (captures all input while active).
    pending_confirm: Option<ConfirmRequest>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    /// Externally driven loading flag, mirrored for the header.
    loading: bool,
    /// Toast channel drained into the action loop on startup.
    notify_rx: Option<mpsc::UnboundedReceiver<Notification>>,
}

impl App {
    pub fn new(
        client: DirectoryClient,
        store: Arc<DataStore>,
        refresh: RefreshHandle,
        notifier: Notifier,
        notify_rx: mpsc::UnboundedReceiver<Notification>,
        cancel: CancellationToken,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let gate = DialogGate::new(action_tx.clone());
        let form = UserForm::new(client.clone(), refresh.clone(), notifier.clone());
        let list = UserList::new(client, gate, refresh, notifier);

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(form.clone()).into_iter().collect();

        Self {
            active_screen: ScreenId::Users,
            screens,
            running: true,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            form,
            list,
            store,
            cancel,
            pending_confirm: None,
            notification: None,
            loading: false,
            notify_rx: Some(notify_rx),
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
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        // Bridge store changes into the action loop
        {
            let store = Arc::clone(&self.store);
            let tx = self.action_tx.clone();
            let cancel = self.cancel.clone();
            tokio::spawn(async move {
                crate::data_bridge::run_data_bridge(store, tx, cancel).await;
            });
        }

        // Forward panel toasts into the action loop
        if let Some(mut notify_rx) = self.notify_rx.take() {
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                while let Some(notification) = notify_rx.recv().await {
                    if tx.send(Action::Notify(notification)).is_err() {
                        break;
                    }
                }
            });
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
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

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        // Stop the refresh worker and data bridge, then clean up
        self.cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. The confirmation dialog captures all
    /// input; the users screen (a form) captures everything else while
    /// active; global keys apply on the remaining screens.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        // The users screen owns text inputs, so every key belongs to it.
        if self.active_screen == ScreenId::Users {
            if let Some(screen) = self.screens.get_mut(&ScreenId::Users) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        // Global keybindings for the remaining screens
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='2')) => {
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
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

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::Tick => {
                // Auto-dismiss notifications after 3 seconds
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > Duration::from_secs(3) {
                        self.notification = None;
                    }
                }
                // Forward ticks for throbber animation
                for screen in self.screens.values_mut() {
                    let _ = screen.update(action);
                }
            }

            // Data updates go to ALL screens so they stay in sync
            Action::UsersUpdated(_) | Action::AnalyticsUpdated(_) => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::LoadingChanged(loading) => {
                self.loading = *loading;
                for screen in self.screens.values_mut() {
                    let _ = screen.update(action);
                }
            }

            // ── Panel operations → spawned core flows ──────────────
            Action::SubmitForm => {
                let form = self.form.clone();
                tokio::spawn(async move {
                    let _ = form.submit().await;
                });
            }

            Action::RequestDeleteUser(id) => {
                let list = self.list.clone();
                let id = id.clone();
                tokio::spawn(async move {
                    let _ = list.delete_user(&id).await;
                });
            }

            Action::RefreshUsers => {
                self.list.refresh();
            }

            // ── Confirmation dialog ────────────────────────────────
            Action::ShowConfirm(request) => {
                self.pending_confirm = Some(request.clone());
            }

            Action::ConfirmYes => {
                if let Some(request) = self.pending_confirm.take() {
                    request.answer(true);
                }
            }

            Action::ConfirmNo => {
                if let Some(request) = self.pending_confirm.take() {
                    request.answer(false);
                }
            }

            // ── Notifications ──────────────────────────────────────
            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }

            Action::Render => {}
        }

        Ok(())
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, body);
        }

        self.render_footer(frame, footer);

        if let Some((notification, _)) = &self.notification {
            self.render_notification(frame, area, notification);
        }

        if let Some(request) = &self.pending_confirm {
            self.render_confirm_dialog(frame, area, request);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(" roster ", theme::title_style())];
        for screen in ScreenId::ALL {
            let style = if screen == self.active_screen {
                theme::tab_active()
            } else {
                theme::tab_inactive()
            };
            spans.push(Span::styled(
                format!(" {} {} ", screen.number(), screen.label()),
                style,
            ));
        }
        if self.loading {
            spans.push(Span::styled("  ⟳ loading", theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hint = |key: &'static str, what: &'static str| {
            [
                Span::styled(key, theme::key_hint_key()),
                Span::styled(format!(" {what}  "), theme::key_hint()),
            ]
        };

        let mut spans = vec![Span::raw(" ")];
        match self.active_screen {
            ScreenId::Users => {
                spans.extend(hint("tab", "focus"));
                spans.extend(hint("enter", "add"));
                spans.extend(hint("d", "delete"));
                spans.extend(hint("r", "refresh"));
                spans.extend(hint("q", "quit"));
            }
            ScreenId::Analytics => {
                spans.extend(hint("1/2", "screen"));
                spans.extend(hint("r", "refresh"));
                spans.extend(hint("q", "quit"));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_confirm_dialog(&self, frame: &mut Frame, area: Rect, request: &ConfirmRequest) {
        let width = 50u16.min(area.width.saturating_sub(4));
        let height = 5u16;

        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_PANEL)),
            dialog_area,
        );

        let block = Block::default()
            .title(Span::styled(" Confirm ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::WARNING_GOLD));

        let text = vec![
            Line::from(request.prompt.clone()),
            Line::from(vec![
                Span::styled("y", theme::key_hint_key()),
                Span::styled(" yes   ", theme::key_hint()),
                Span::styled("n", theme::key_hint_key()),
                Span::styled(" no", theme::key_hint()),
            ]),
        ];

        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .wrap(Wrap { trim: true })
                .centered(),
            dialog_area,
        );
    }

    fn render_notification(&self, frame: &mut Frame, area: Rect, notification: &Notification) {
        let msg_len = notification.message.len() as u16;
        let width = (msg_len + 6).clamp(20, 60);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above footer
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notification.level {
            NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
            NotificationLevel::Error => (theme::ERROR_RED, "✗"),
            NotificationLevel::Warning => (theme::WARNING_GOLD, "!"),
            NotificationLevel::Info => (theme::PERIWINKLE, "·"),
        };

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_PANEL)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::raw(notification.message.clone()),
        ]);

        frame.render_widget(Paragraph::new(line).block(block), toast_area);
    }
}
