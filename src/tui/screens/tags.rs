//! Project tags screen
//!
//! Lists the tag keys of a project and removes them behind a confirmation
//! dialog. The screen never talks to the network itself: it hands
//! [`TagsCommand`]s to the app, which runs them and reports back through
//! the `on_*` completion handlers.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::core::project::ProjectContext;
use crate::core::resource::Resource;
use crate::sentry::tag::{Tag, TAGS_DOCS_URL};
use crate::tui::app::ListState;
use crate::tui::theme::Theme;

pub const PAGE_TITLE: &str = "Tags";
pub const PAGE_DESCRIPTION: &str = "Each event in Sentry may be annotated with various tags \
     (key and value pairs). Learn how to add custom tags.";
pub const EMPTY_MESSAGE: &str = "There are no tags, learn to add tags";
pub const CONFIRM_TITLE: &str = "Remove tag?";
pub const CONFIRM_MESSAGE: &str = "Are you sure you want to remove this tag?";
pub const PROTECTED_TOOLTIP: &str = "This tag cannot be deleted.";

/// A resource the screen loads, keyed by the state slot it fills
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub state_key: &'static str,
    pub path: String,
}

/// Work the screen asks the app to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagsCommand {
    /// GET the tag collection
    Fetch,
    /// DELETE one tag key
    Delete { key: String },
    /// Open the documentation link
    OpenDocs,
}

/// Delete action attached to a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAffordance {
    pub key: String,
    pub enabled: bool,
    /// Explanation shown next to a disabled action
    pub tooltip: Option<&'static str>,
    /// A delete for this key is in flight
    pub pending: bool,
}

/// One rendered tag row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRow {
    pub name: String,
    pub key: String,
    pub delete: DeleteAffordance,
}

/// What the body of the screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagsBody {
    Loading,
    Error(String),
    Empty {
        message: &'static str,
        docs_url: &'static str,
    },
    Rows(Vec<TagRow>),
}

/// Tag awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub key: String,
    pub name: String,
}

/// State of the tags screen
#[derive(Debug)]
pub struct TagsView {
    pub project: ProjectContext,
    pub tags: Resource<Vec<Tag>>,
    pub selection: ListState,
    /// Open confirmation dialog
    pub confirm: Option<PendingDelete>,
    /// Keys with a delete request in flight
    pub deleting: HashSet<String>,
    pub status_message: Option<String>,
}

impl TagsView {
    pub fn new(project: ProjectContext) -> Self {
        Self {
            project,
            tags: Resource::Idle,
            selection: ListState::default(),
            confirm: None,
            deleting: HashSet::new(),
            status_message: None,
        }
    }

    /// Resources this screen loads on entry
    pub fn endpoints(&self) -> Vec<Endpoint> {
        vec![Endpoint {
            state_key: "tags",
            path: self.project.tags_path(),
        }]
    }

    /// Start loading the tag collection unless a load is already running
    pub fn begin_fetch(&mut self) -> Option<TagsCommand> {
        if !self.tags.start() {
            return None;
        }
        self.status_message = Some("Loading tags...".to_string());
        Some(TagsCommand::Fetch)
    }

    /// Drop current state and load again
    pub fn reload(&mut self) -> Option<TagsCommand> {
        if self.tags.is_loading() {
            return None;
        }
        self.confirm = None;
        self.tags.reset();
        self.begin_fetch()
    }

    pub fn on_tags_loaded(&mut self, tags: Vec<Tag>) {
        self.selection = ListState::new(tags.len());
        self.status_message = Some(format!("Loaded {} tags", tags.len()));
        self.tags.finish(Ok::<_, String>(tags));
    }

    pub fn on_tags_error(&mut self, message: String) {
        self.status_message = Some("Failed to load tags".to_string());
        self.tags.fail(message);
    }

    /// Issue a delete for `key`
    ///
    /// Refused when the key is unknown, protected, or already being deleted.
    pub fn on_delete(&mut self, key: &str) -> Option<TagsCommand> {
        let tag = self.tags.data()?.iter().find(|t| t.key == key)?;
        if !tag.can_delete {
            self.status_message = Some(PROTECTED_TOOLTIP.to_string());
            return None;
        }
        if !self.deleting.insert(key.to_string()) {
            return None;
        }

        self.status_message = Some(format!("Removing tag {}...", key));
        Some(TagsCommand::Delete {
            key: key.to_string(),
        })
    }

    /// Completion of a successful delete
    ///
    /// Removes by key against the current collection, so completions arriving
    /// out of order still remove the right row.
    pub fn on_tag_deleted(&mut self, key: &str) {
        self.deleting.remove(key);

        if let Some(tags) = self.tags.data_mut() {
            let before = tags.len();
            tags.retain(|t| t.key != key);
            if tags.len() != before {
                self.selection.set_total(tags.len());
                self.status_message = Some(format!("Deleted tag: {}", key));
            }
        }
    }

    /// Completion of a failed delete: the screen switches to its error state
    pub fn on_tag_delete_error(&mut self, key: &str, message: String) {
        self.deleting.remove(key);
        self.confirm = None;
        self.status_message = Some(format!("Failed to remove tag {}", key));
        self.tags.fail(message);
    }

    /// Delete action for one tag
    pub fn render_link(&self, tag: &Tag) -> DeleteAffordance {
        DeleteAffordance {
            key: tag.key.clone(),
            enabled: tag.can_delete,
            tooltip: (!tag.can_delete).then_some(PROTECTED_TOOLTIP),
            pending: self.deleting.contains(&tag.key),
        }
    }

    /// Pure view of the current state
    pub fn render_body(&self) -> TagsBody {
        match &self.tags {
            Resource::Loading => TagsBody::Loading,
            Resource::Failed(err) => TagsBody::Error(err.clone()),
            Resource::Idle => Self::empty_body(),
            Resource::Loaded(tags) if tags.is_empty() => Self::empty_body(),
            Resource::Loaded(tags) => TagsBody::Rows(
                tags.iter()
                    .map(|tag| TagRow {
                        name: tag.name.clone(),
                        key: tag.key.clone(),
                        delete: self.render_link(tag),
                    })
                    .collect(),
            ),
        }
    }

    fn empty_body() -> TagsBody {
        TagsBody::Empty {
            message: EMPTY_MESSAGE,
            docs_url: TAGS_DOCS_URL,
        }
    }

    pub fn selected_tag(&self) -> Option<&Tag> {
        self.tags.data()?.get(self.selection.selected)
    }

    pub fn is_confirming(&self) -> bool {
        self.confirm.is_some()
    }

    /// Open the confirmation dialog for the selected tag
    ///
    /// Protected tags only show their tooltip.
    pub fn request_delete_selected(&mut self) {
        let Some(tag) = self.selected_tag() else {
            return;
        };

        if !tag.can_delete {
            self.status_message = Some(PROTECTED_TOOLTIP.to_string());
            return;
        }

        self.confirm = Some(PendingDelete {
            key: tag.key.clone(),
            name: tag.name.clone(),
        });
    }

    /// Accept the open confirmation dialog
    pub fn confirm_delete(&mut self) -> Option<TagsCommand> {
        let pending = self.confirm.take()?;
        self.on_delete(&pending.key)
    }

    pub fn cancel_delete(&mut self) {
        if self.confirm.take().is_some() {
            self.status_message = Some("Cancelled".to_string());
        }
    }

    /// Handle key events on the tags screen
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<TagsCommand> {
        if self.is_confirming() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Esc | KeyCode::Char('q') => {
                    self.cancel_delete();
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selection.next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selection.previous();
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.request_delete_selected();
                None
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('o') => Some(TagsCommand::OpenDocs),
            _ => None,
        }
    }
}

/// Render this screen
pub fn render(frame: &mut Frame, area: Rect, view: &TagsView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Description
            Constraint::Min(0),    // Tag panel
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    let description = Paragraph::new(vec![
        Line::from(format!(" {}", PAGE_DESCRIPTION)),
        Line::from(vec![Span::raw(" "), Span::styled(TAGS_DOCS_URL, Theme::link())]),
    ])
    .wrap(Wrap { trim: false });
    frame.render_widget(description, chunks[0]);

    let items: Vec<ListItem> = match view.render_body() {
        TagsBody::Loading => vec![ListItem::new("  Loading tags...")],
        TagsBody::Error(err) => vec![
            ListItem::new(format!("  Error: {}", err)).style(Theme::error()),
            ListItem::new(""),
            ListItem::new("  Press [r] to reload"),
        ],
        TagsBody::Empty { message, docs_url } => vec![
            ListItem::new(format!("  {}", message)),
            ListItem::new(Line::from(vec![
                Span::raw("  "),
                Span::styled(docs_url, Theme::link()),
            ])),
        ],
        TagsBody::Rows(rows) => rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let selected = i == view.selection.selected;
                let item = ListItem::new(render_row(&row, selected));
                if selected {
                    item.style(Theme::selected())
                } else {
                    item
                }
            })
            .collect(),
    };

    let count = view.tags.data().map(Vec::len).unwrap_or(0);
    let list = List::new(items).block(
        Block::default()
            .title(format!(" {} ({}) ", PAGE_TITLE, count))
            .borders(Borders::ALL)
            .border_style(Theme::normal()),
    );
    frame.render_widget(list, chunks[1]);

    let help = Paragraph::new(" [d] Delete  [r] Reload  [o] Docs  [j/k] Navigate  [q] Quit")
        .style(Theme::muted());
    frame.render_widget(help, chunks[2]);
}

fn render_row(row: &TagRow, selected: bool) -> Line<'static> {
    let mut spans = vec![
        Span::raw(format!("  {}  ", row.name)),
        Span::styled(row.key.clone(), Theme::muted()),
        Span::raw("  "),
    ];

    if row.delete.pending {
        spans.push(Span::styled("[removing...]", Theme::muted()));
    } else if row.delete.enabled {
        spans.push(Span::raw("[d] remove"));
    } else {
        spans.push(Span::styled("[locked]", Theme::muted()));
        if selected {
            if let Some(tooltip) = row.delete.tooltip {
                spans.push(Span::raw(format!("  {}", tooltip)));
            }
        }
    }

    Line::from(spans)
}
