//! Application state and event handling.
//!
//! [`App`] is the whole session: task store, editor buffer, form, strategy
//! and rendered cards. User actions come in as [`Command`]s (or key events
//! mapped onto them) and return a list of [`Effect`]s for the main loop to
//! carry out. Nothing here touches the network or the terminal directly.

use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskpilot_proto::api::Endpoint;
use taskpilot_proto::codec;
use taskpilot_proto::strategy::SortStrategy;
use taskpilot_proto::task::Task;

use crate::editor::Editor;
use crate::form::TaskForm;
use crate::render::{TaskCard, render_sorted};
use crate::scoring::ScoringError;
use crate::store::TaskStore;

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Task entry form (default).
    Form,
    /// JSON editor.
    Editor,
    /// Rendered task cards.
    Cards,
}

/// Named user operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Build a task from the form and append it to the store.
    AddTask,
    /// Send the editor contents to the analyze endpoint.
    Analyze,
    /// Send the editor contents to the suggest endpoint.
    Suggest,
    /// Change the display order.
    ReSort(SortStrategy),
}

/// Side effects requested by the application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Post `tasks` to `endpoint`; report back with `request_id`.
    Submit {
        /// Id to pass back to [`App::apply_response`].
        request_id: u64,
        /// Target endpoint.
        endpoint: Endpoint,
        /// Request body, parsed from the editor.
        tasks: Vec<Task>,
    },
    /// Show an error to the user.
    Alert(String),
    /// The cards were rebuilt and the display should be refreshed.
    Render,
}

/// Main application state.
pub struct App {
    /// Authoritative task list.
    pub store: TaskStore,
    /// JSON buffer submitted to the backend.
    pub editor: Editor,
    /// Task entry form.
    pub form: TaskForm,
    /// Current display order.
    pub strategy: SortStrategy,
    /// Cards for the store in `strategy` order.
    pub cards: Vec<TaskCard>,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Most recent error shown to the user.
    pub alert: Option<String>,
    /// First visible card.
    pub card_scroll: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
    next_request_id: u64,
    latest_request: Option<u64>,
    in_flight: BTreeMap<u64, Endpoint>,
}

impl App {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: TaskStore::new(),
            editor: Editor::new(),
            form: TaskForm::new(),
            strategy: SortStrategy::default(),
            cards: Vec::new(),
            focus: PanelFocus::Form,
            alert: None,
            card_scroll: 0,
            should_quit: false,
            next_request_id: 1,
            latest_request: None,
            in_flight: BTreeMap::new(),
        }
    }

    /// Sets the initial sort strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: SortStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the maximum title length accepted by the form.
    #[must_use]
    pub fn with_max_title_len(mut self, max: usize) -> Self {
        self.form = self.form.with_max_title_len(max);
        self
    }

    /// Endpoints of requests still awaiting a response, oldest first.
    pub fn pending_requests(&self) -> impl Iterator<Item = Endpoint> + '_ {
        self.in_flight.values().copied()
    }

    /// Run a command against the current state.
    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::AddTask => self.add_task(),
            Command::Analyze => self.submit(Endpoint::Analyze),
            Command::Suggest => self.submit(Endpoint::Suggest),
            Command::ReSort(strategy) => self.resort(strategy),
        }
    }

    fn add_task(&mut self) -> Vec<Effect> {
        let task = match self.form.build_task() {
            Ok(task) => task,
            Err(e) => return vec![self.raise_alert(e.to_string())],
        };

        tracing::info!(title = %task.title, "task added");
        self.store.push(task);
        self.alert = None;
        let mut effects = self.sync_editor();
        self.form.clear();
        effects.push(self.refresh_cards());
        effects
    }

    fn submit(&mut self, endpoint: Endpoint) -> Vec<Effect> {
        let tasks = match codec::decode_task_array(&self.editor.text()) {
            Ok(tasks) => tasks,
            Err(e) => return vec![self.raise_alert(format!("Invalid JSON input: {e}"))],
        };

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_request = Some(request_id);
        self.in_flight.insert(request_id, endpoint);
        tracing::info!(request_id, %endpoint, count = tasks.len(), "submitting tasks");

        vec![Effect::Submit {
            request_id,
            endpoint,
            tasks,
        }]
    }

    fn resort(&mut self, strategy: SortStrategy) -> Vec<Effect> {
        self.strategy = strategy;
        self.card_scroll = 0;
        vec![self.refresh_cards()]
    }

    /// Apply the outcome of a request issued by a [`Effect::Submit`].
    ///
    /// Only the most recently issued request may change the store or raise
    /// an alert; outcomes of earlier requests are dropped.
    pub fn apply_response(
        &mut self,
        request_id: u64,
        endpoint: Endpoint,
        result: Result<Vec<Task>, ScoringError>,
    ) -> Vec<Effect> {
        self.in_flight.remove(&request_id);

        if self.latest_request != Some(request_id) {
            tracing::info!(request_id, %endpoint, "discarding superseded response");
            return Vec::new();
        }

        match result {
            Ok(tasks) => {
                tracing::info!(request_id, %endpoint, count = tasks.len(), "store replaced");
                self.store.replace(tasks);
                self.alert = None;
                let mut effects = self.sync_editor();
                effects.push(self.refresh_cards());
                effects
            }
            Err(e) => vec![self.raise_alert(e.to_string())],
        }
    }

    /// Records `message` as the current alert and returns the matching effect.
    pub fn raise_alert(&mut self, message: String) -> Effect {
        tracing::warn!(alert = %message, "user-visible error");
        self.alert = Some(message.clone());
        Effect::Alert(message)
    }

    /// Mirror the store into the editor as pretty-printed JSON.
    fn sync_editor(&mut self) -> Vec<Effect> {
        match codec::encode_pretty(self.store.as_slice()) {
            Ok(text) => {
                self.editor.set_text(&text);
                Vec::new()
            }
            Err(e) => vec![self.raise_alert(e.to_string())],
        }
    }

    /// Rebuild the cards from a strategy-ordered copy of the store.
    fn refresh_cards(&mut self) -> Effect {
        self.cards = render_sorted(self.store.as_slice(), self.strategy);
        self.card_scroll = self.card_scroll.min(self.cards.len().saturating_sub(1));
        Effect::Render
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Vec<Effect> {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return Vec::new();
            }
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => return self.dispatch(Command::Analyze),
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => return self.dispatch(Command::Suggest),
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                return self.dispatch(Command::ReSort(self.strategy.next()));
            }
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => {
                self.cycle_focus_backward();
                return Vec::new();
            }
            (KeyCode::Tab, _) => {
                self.cycle_focus_forward();
                return Vec::new();
            }
            (KeyCode::Char(_), m) if m.contains(KeyModifiers::CONTROL) => return Vec::new(),
            _ => {}
        }

        // Focus-specific shortcuts
        match self.focus {
            PanelFocus::Form => self.handle_form_key(key),
            PanelFocus::Editor => {
                self.handle_editor_key(key);
                Vec::new()
            }
            PanelFocus::Cards => {
                self.handle_cards_key(key);
                Vec::new()
            }
        }
    }

    /// Handle key event when the form is focused.
    fn handle_form_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter => return self.dispatch(Command::AddTask),
            KeyCode::Down => self.form.focus_next(),
            KeyCode::Up => self.form.focus_prev(),
            KeyCode::Char(c) => self.form.enter_char(c),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Left => self.form.move_cursor_left(),
            KeyCode::Right => self.form.move_cursor_right(),
            KeyCode::Home => self.form.move_cursor_home(),
            KeyCode::End => self.form.move_cursor_end(),
            _ => {}
        }
        Vec::new()
    }

    /// Handle key event when the editor is focused.
    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.editor.insert_newline(),
            KeyCode::Char(c) => self.editor.insert_char(c),
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Left => self.editor.move_left(),
            KeyCode::Right => self.editor.move_right(),
            KeyCode::Up => self.editor.move_up(),
            KeyCode::Down => self.editor.move_down(),
            KeyCode::Home => self.editor.move_home(),
            KeyCode::End => self.editor.move_end(),
            _ => {}
        }
    }

    /// Handle key event when the cards panel is focused.
    const fn handle_cards_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            _ => {}
        }
    }

    /// Cycle focus forward: Form -> Editor -> Cards -> Form.
    const fn cycle_focus_forward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Form => PanelFocus::Editor,
            PanelFocus::Editor => PanelFocus::Cards,
            PanelFocus::Cards => PanelFocus::Form,
        };
    }

    /// Cycle focus backward: Form -> Cards -> Editor -> Form.
    const fn cycle_focus_backward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Form => PanelFocus::Cards,
            PanelFocus::Cards => PanelFocus::Editor,
            PanelFocus::Editor => PanelFocus::Form,
        };
    }

    /// Scroll the cards up.
    const fn scroll_up(&mut self) {
        if self.card_scroll > 0 {
            self.card_scroll -= 1;
        }
    }

    /// Scroll the cards down.
    const fn scroll_down(&mut self) {
        if self.card_scroll < self.cards.len().saturating_sub(1) {
            self.card_scroll += 1;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
