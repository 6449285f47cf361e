//! Main TUI application state and logic

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::browser::open_browser;
use crate::core::project::ProjectContext;
use crate::error::{Result, TagsError};
use crate::sentry::tag::{Tag, TagsApi, TAGS_DOCS_URL};
use crate::tui::event::{is_back_key, is_quit_key, AppEvent, EventHandler};
use crate::tui::screens::tags::{TagsCommand, TagsView};
use crate::tui::ui;

/// Message type for async operation results
#[derive(Debug)]
pub enum AsyncMessage {
    /// Tags loaded successfully
    TagsLoaded(Vec<Tag>),
    /// Tags load failed
    TagsError(String),
    /// Tag deleted successfully
    TagDeleted { key: String },
    /// Tag deletion failed
    TagDeleteError { key: String, message: String },
}

/// List selection state
#[derive(Debug, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total items in the list
    pub total: usize,
}

impl ListState {
    pub fn new(total: usize) -> Self {
        Self { selected: 0, total }
    }

    pub fn next(&mut self) {
        if self.total > 0 {
            self.selected = (self.selected + 1) % self.total;
        }
    }

    pub fn previous(&mut self) {
        if self.total > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.total - 1);
        }
    }

    /// Update the item count, keeping the selection in range
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.selected = self.selected.min(total.saturating_sub(1));
    }
}

/// Main TUI application
pub struct App<C: TagsApi> {
    /// Whether the app is running
    pub running: bool,
    /// Whether to show the help overlay
    pub show_help: bool,
    /// Tags screen state
    pub tags: TagsView,
    /// Tick counter for spinner animation
    pub tick_counter: u64,
    /// Backend the screen's requests go to
    client: Arc<C>,
    /// Sender for async operation results
    async_tx: mpsc::Sender<AsyncMessage>,
    /// Receiver for async operation results
    async_rx: mpsc::Receiver<AsyncMessage>,
}

impl<C: TagsApi> App<C> {
    pub fn new(client: Arc<C>, project: ProjectContext) -> Self {
        let (async_tx, async_rx) = mpsc::channel(32);

        Self {
            running: true,
            show_help: false,
            tags: TagsView::new(project),
            tick_counter: 0,
            client,
            async_tx,
            async_rx,
        }
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| TagsError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| TagsError::Terminal(e.to_string()))?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| TagsError::Terminal(e.to_string()))?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| TagsError::Terminal(e.to_string()))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| TagsError::Terminal(e.to_string()))?;
        terminal
            .show_cursor()
            .map_err(|e| TagsError::Terminal(e.to_string()))?;
        Ok(())
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        Self::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        let mut events = EventHandler::new(Duration::from_millis(250));
        self.start();

        while self.running {
            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|e| TagsError::Terminal(e.to_string()))?;

            // Check for async messages (non-blocking)
            while let Ok(msg) = self.async_rx.try_recv() {
                self.handle_async_message(msg);
            }

            match events.next().await {
                Some(AppEvent::Key(key)) => self.handle_key_event(key),
                Some(AppEvent::Resize(_, _)) => {
                    // Terminal resize is handled automatically by ratatui
                }
                Some(AppEvent::Tick) => {
                    self.tick_counter = self.tick_counter.wrapping_add(1);
                }
                None => self.running = false,
            }
        }

        Ok(())
    }

    /// Enter the tags screen: load its resources
    pub fn start(&mut self) {
        for endpoint in self.tags.endpoints() {
            tracing::debug!(state = endpoint.state_key, path = %endpoint.path, "loading");
        }
        if let Some(cmd) = self.tags.begin_fetch() {
            self.dispatch(cmd);
        }
    }

    /// Handle async message from background tasks
    pub fn handle_async_message(&mut self, msg: AsyncMessage) {
        match msg {
            AsyncMessage::TagsLoaded(tags) => self.tags.on_tags_loaded(tags),
            AsyncMessage::TagsError(err) => self.tags.on_tags_error(err),
            AsyncMessage::TagDeleted { key } => self.tags.on_tag_deleted(&key),
            AsyncMessage::TagDeleteError { key, message } => {
                self.tags.on_tag_delete_error(&key, message)
            }
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // If help is shown, any key dismisses it
        if self.show_help {
            self.show_help = false;
            return;
        }

        // The confirmation dialog owns every key while open
        if self.tags.is_confirming() {
            if let Some(cmd) = self.tags.handle_key(key) {
                self.dispatch(cmd);
            }
            return;
        }

        if key.code == KeyCode::Char('?') {
            self.show_help = true;
            return;
        }

        if is_quit_key(&key) || is_back_key(&key) {
            self.quit();
            return;
        }

        if let Some(cmd) = self.tags.handle_key(key) {
            self.dispatch(cmd);
        }
    }

    /// Run a screen command
    fn dispatch(&mut self, cmd: TagsCommand) {
        match cmd {
            TagsCommand::OpenDocs => {
                if !open_browser(TAGS_DOCS_URL) {
                    self.tags.status_message = Some(format!("Open {} in your browser", TAGS_DOCS_URL));
                }
            }
            cmd => {
                spawn_command(
                    Arc::clone(&self.client),
                    self.tags.project.clone(),
                    cmd,
                    self.async_tx.clone(),
                );
            }
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }
}

/// Spawn a task performing a network command and reporting its outcome
pub fn spawn_command<C: TagsApi>(
    client: Arc<C>,
    project: ProjectContext,
    cmd: TagsCommand,
    tx: mpsc::Sender<AsyncMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let msg = match cmd {
            TagsCommand::Fetch => match client.list_tags(&project).await {
                Ok(tags) => AsyncMessage::TagsLoaded(tags),
                Err(e) => {
                    tracing::error!("Tag list failed: {:?}", e);
                    AsyncMessage::TagsError(e.to_string())
                }
            },
            TagsCommand::Delete { key } => match client.delete_tag(&project, &key).await {
                Ok(()) => AsyncMessage::TagDeleted { key },
                Err(e) => {
                    tracing::error!("Tag deletion failed: {:?}", e);
                    AsyncMessage::TagDeleteError {
                        key,
                        message: e.to_string(),
                    }
                }
            },
            TagsCommand::OpenDocs => return,
        };

        let _ = tx.send(msg).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentry::testing::FakeTagsApi;
    use crate::tui::screens::tags::TagsBody;
    use crossterm::event::KeyModifiers;

    fn project() -> ProjectContext {
        ProjectContext::new("acme", "backend")
    }

    fn press(app: &mut App<FakeTagsApi>, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    /// Wait for one background completion and apply it
    async fn settle(app: &mut App<FakeTagsApi>) {
        let msg = app.async_rx.recv().await.expect("channel closed");
        app.handle_async_message(msg);
    }

    fn row_keys(app: &App<FakeTagsApi>) -> Vec<String> {
        match app.tags.render_body() {
            TagsBody::Rows(rows) => rows.into_iter().map(|r| r.key).collect(),
            _ => vec![],
        }
    }

    #[test]
    fn test_list_state_set_total_clamps() {
        let mut state = ListState::new(3);
        state.next();
        state.next();
        assert_eq!(state.selected, 2);

        state.set_total(2);
        assert_eq!(state.selected, 1);

        state.set_total(0);
        assert_eq!(state.selected, 0);
    }

    #[tokio::test]
    async fn test_start_loads_tags() {
        let api = Arc::new(FakeTagsApi::with_scenario_tags());
        let mut app = App::new(Arc::clone(&api), project());

        app.start();
        assert!(app.tags.tags.is_loading());

        settle(&mut app).await;
        assert_eq!(row_keys(&app), vec!["env", "level"]);
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_list_failure_shows_error() {
        let api = Arc::new(FakeTagsApi::with_scenario_tags().failing_list());
        let mut app = App::new(Arc::clone(&api), project());

        app.start();
        settle(&mut app).await;

        assert!(matches!(app.tags.render_body(), TagsBody::Error(_)));
    }

    #[tokio::test]
    async fn test_confirmed_delete_round_trip() {
        let api = Arc::new(FakeTagsApi::with_scenario_tags());
        let mut app = App::new(Arc::clone(&api), project());
        app.start();
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('d'));
        assert!(app.tags.is_confirming());
        // q inside the dialog cancels instead of quitting
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert!(!app.tags.is_confirming());

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        settle(&mut app).await;

        assert_eq!(api.deleted_keys(), vec!["env".to_string()]);
        assert_eq!(row_keys(&app), vec!["level"]);
        // no re-fetch after a successful delete
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_rows_and_errors() {
        let api = Arc::new(FakeTagsApi::with_scenario_tags().failing_delete());
        let mut app = App::new(Arc::clone(&api), project());
        app.start();
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(api.deleted_keys(), vec!["env".to_string()]);
        assert!(matches!(app.tags.render_body(), TagsBody::Error(_)));
        // the fake still holds both tags: nothing was removed server side
        assert_eq!(api.remaining_keys(), vec!["env", "level"]);
    }

    #[tokio::test]
    async fn test_protected_tag_sends_nothing() {
        let api = Arc::new(FakeTagsApi::with_scenario_tags());
        let mut app = App::new(Arc::clone(&api), project());
        app.start();
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));

        tokio::task::yield_now().await;
        assert!(api.deleted_keys().is_empty());
        assert!(app.async_rx.try_recv().is_err());
        assert_eq!(row_keys(&app), vec!["env", "level"]);
    }

    #[tokio::test]
    async fn test_spawn_command_reports_outcome() {
        let api = Arc::new(FakeTagsApi::with_scenario_tags());
        let (tx, mut rx) = mpsc::channel(4);

        spawn_command(
            Arc::clone(&api),
            project(),
            TagsCommand::Delete {
                key: "env".to_string(),
            },
            tx,
        )
        .await
        .unwrap();

        assert!(matches!(
            rx.recv().await,
            Some(AsyncMessage::TagDeleted { key }) if key == "env"
        ));
    }

    #[test]
    fn test_quit_and_help_keys() {
        let api = Arc::new(FakeTagsApi::default());
        let mut app = App::new(api, project());

        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }
}
