//! App — component-based event loop for the podcast browser.
//!
//! Architecture:
//! - `App` owns the components, the browse controller and `AppState`
//!   (shared read-only data for components).
//! - A blocking task reads terminal events and forwards them over a
//!   `tokio::mpsc` channel.
//! - Each event is handled to completion: key/mouse routing, Action
//!   dispatch, selection pump, state sync. Only then is the next frame drawn.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use podcast_catalog::{Catalog, ViewState};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        card_grid::CardGrid, controls::ControlsBar, detail_overlay::DetailOverlay,
        help_overlay::HelpOverlay,
    },
    controller::BrowseController,
    widgets::status_bar::{self, InputMode},
};

/// Screen rects from the last draw, used for mouse routing.
#[derive(Debug, Clone, Copy, Default)]
struct PaneAreas {
    controls: Rect,
    grid: Rect,
}

pub struct App {
    state: AppState,
    controller: BrowseController,
    controls: ControlsBar,
    help: HelpOverlay,
    focus: ComponentId,
    pane_areas: PaneAreas,
    should_quit: bool,
}

impl App {
    /// `genre_input` is raw text (CLI flag or config); anything that is not
    /// a genre id leaves the genre unfiltered.
    pub fn new(
        catalog: Arc<Catalog>,
        initial_view: ViewState,
        genre_input: &str,
        status: Option<String>,
    ) -> Self {
        let controls = ControlsBar::new(&initial_view.search_term);
        let mut controller = BrowseController::new(
            catalog.clone(),
            initial_view.clone(),
            CardGrid::new(),
            DetailOverlay::new(),
        );
        if !genre_input.trim().is_empty() {
            controller.set_genre_input(genre_input);
        }
        let mut state = AppState::new(catalog, controller.view_state().clone());
        state.status = status;

        let mut app = Self {
            state,
            controller,
            controls,
            help: HelpOverlay::new(),
            focus: ComponentId::CardGrid,
            pane_areas: PaneAreas::default(),
            should_quit: false,
        };
        app.sync_state();
        app
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<Event>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        // Polls with a timeout so the thread notices when the loop has gone.
        tokio::task::spawn_blocking(move || {
            while !tx.is_closed() {
                match event::poll(Duration::from_millis(200)) {
                    Ok(true) => match event::read() {
                        Ok(ev) => {
                            if tx.blocking_send(ev).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!("terminal event read failed: {}", e);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        warn!("terminal event poll failed: {}", e);
                        break;
                    }
                }
            }
        });

        let result = self.event_loop(&mut terminal, &mut rx).await;
        drop(rx);

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("podcast browser exiting");

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        rx: &mut mpsc::Receiver<Event>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if self.should_quit {
                break;
            }

            let Some(ev) = rx.recv().await else {
                break;
            };
            self.handle_event(ev);

            // Drain whatever queued up while we were busy before redrawing.
            while !self.should_quit {
                match rx.try_recv() {
                    Ok(ev) => self.handle_event(ev),
                    Err(_) => break,
                }
            }
        }
        Ok(())
    }

    /// Route one terminal event and settle every consequence of it.
    fn handle_event(&mut self, ev: Event) {
        let actions = match ev {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => vec![Action::Resize(w, h)],
            _ => vec![],
        };
        for action in actions {
            self.dispatch(action);
        }
        let handled = self.controller.pump_signals();
        if handled > 0 {
            debug!("handled {} selection signal(s)", handled);
        }
        self.sync_state();
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        let s = &self.state;

        // Help overlay captures all keys when visible
        if self.help.visible {
            let actions = self.help.handle_key(key, s);
            if !actions.is_empty() {
                return actions;
            }
            // Any other key closes the overlay
            return vec![Action::ToggleHelp];
        }

        if self.controller.overlay().is_open() {
            return self.controller.overlay_mut().handle_key(key, s);
        }

        // Search field owns the keyboard while open; Tab closes it first.
        if self.controls.search_active() {
            return match key.code {
                KeyCode::Tab => vec![Action::CloseSearch, Action::FocusNext],
                KeyCode::BackTab => vec![Action::CloseSearch, Action::FocusPrev],
                _ => self.controls.handle_key(key, s),
            };
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Char('/') => return vec![Action::OpenSearch],
            KeyCode::Char('g') => return vec![Action::CycleGenre],
            KeyCode::Char('G') => return vec![Action::CycleGenreReverse],
            KeyCode::Char('s') => return vec![Action::CycleSort],
            KeyCode::Char('S') => return vec![Action::CycleSortReverse],
            KeyCode::Char('x') => return vec![Action::ClearFilters],
            _ => {}
        }

        match self.focus {
            ComponentId::Controls => self.controls.handle_key(key, s),
            _ => self.controller.grid_mut().handle_key(key, s),
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click {
            return vec![];
        }

        let s = &self.state;

        if self.help.visible {
            if let MouseEventKind::Down(MouseButton::Left) = event.kind {
                return vec![Action::ToggleHelp];
            }
            return vec![];
        }

        // The overlay covers the whole screen: it sorts clicks into close
        // button, content and backdrop by itself.
        if self.controller.overlay().is_open() {
            let area = self.pane_areas.grid;
            return self.controller.overlay_mut().handle_mouse(event, area, s);
        }

        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let areas = self.pane_areas;
        if hit(areas.controls, event.column, event.row) {
            let mut actions = self.controls.handle_mouse(event, areas.controls, s);
            if self.focus != self.controls.id() {
                actions.insert(0, Action::FocusPane(ComponentId::Controls));
            }
            return actions;
        }
        if hit(areas.grid, event.column, event.row) {
            return self.controller.grid_mut().handle_mouse(event, areas.grid, s);
        }
        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Components see the action first so their own state is in step
        // before the app applies it.
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.controls.on_action(&action, s));
            out.extend(self.help.on_action(&action, s));
            out
        };

        self.apply_action(action);

        // Secondary actions are applied one level deep only
        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        match action {
            Action::CycleGenre => self.controller.cycle_genre(true),
            Action::CycleGenreReverse => self.controller.cycle_genre(false),
            Action::CycleSort => self.controller.cycle_sort(true),
            Action::CycleSortReverse => self.controller.cycle_sort(false),
            Action::OpenSearch => self.focus = ComponentId::Controls,
            Action::CloseSearch => {}
            Action::SearchChanged(term) => self.controller.set_search(&term),
            Action::ClearFilters => {
                self.controller.clear_filters();
                self.state.status = Some("filters cleared".to_string());
            }
            Action::CloseDetail => self.controller.close_overlay(),

            Action::FocusNext | Action::FocusPrev => {
                self.focus = match self.focus {
                    ComponentId::Controls => ComponentId::CardGrid,
                    _ => ComponentId::Controls,
                };
            }
            Action::FocusPane(id @ (ComponentId::Controls | ComponentId::CardGrid)) => {
                self.focus = id;
            }
            Action::FocusPane(_) => {}

            // Component-owned; nothing to do at app level
            Action::ToggleHelp => {}

            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text
                        };
                        self.state.status = Some(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.state.status = Some(format!("clipboard error: {}", e));
                    }
                }
            }

            Action::Quit => self.should_quit = true,
            Action::Resize(w, h) => debug!("terminal resized to {}x{}", w, h),
        }
    }

    /// Mirror controller and component state into `AppState` for drawing.
    fn sync_state(&mut self) {
        self.state.view = self.controller.view_state().clone();
        self.state.visible_count = self.controller.grid().len();
        self.state.input_mode = if self.controller.overlay().is_open() {
            InputMode::Detail
        } else if self.controls.search_active() {
            InputMode::Search
        } else {
            InputMode::Normal
        };
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);
        self.pane_areas = PaneAreas {
            controls: rows[0],
            grid: rows[1],
        };

        let overlay_open = self.controller.overlay().is_open();
        let s = &self.state;
        self.controls
            .draw(frame, rows[0], self.focus == ComponentId::Controls && !overlay_open, s);
        self.controller.grid_mut().draw(
            frame,
            rows[1],
            self.focus == ComponentId::CardGrid && !overlay_open,
            s,
        );
        status_bar::draw_status_bar(
            frame,
            rows[2],
            s.input_mode,
            s.visible_count,
            s.catalog.len(),
            s.status.as_deref(),
        );

        self.controller.overlay_mut().draw(frame, area, true, s);
        self.help.draw(frame, area, true, s);
    }
}
