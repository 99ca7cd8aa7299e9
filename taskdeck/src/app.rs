//! Application state and event handling.
//!
//! [`App`] owns the view parameters, the three modal workflows, and a
//! read-only snapshot of the store's collection. Key handling is fully
//! synchronous; anything that needs the network is returned as a
//! [`StoreCommand`] for the main loop to dispatch, so the event loop
//! keeps a single suspension point per user action.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck_proto::{Task, TaskStatus};

use crate::modal::{AddModal, EditModal, RemoveModal};
use crate::view::{SortField, ViewState};

/// A store operation requested by a key press, dispatched by the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCommand {
    /// Reload the collection from the server.
    Load,
    /// Confirm the add modal's draft.
    ConfirmAdd,
    /// Immediately commit a status change for the task under edit.
    CommitStatus(TaskStatus),
    /// Submit the edit modal's description draft.
    SubmitDescription,
    /// Confirm the remove modal.
    ConfirmRemove,
}

/// Which field of the add form is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddField {
    /// Title input (default focus).
    #[default]
    Title,
    /// Description input.
    Description,
}

/// Main application state.
pub struct App {
    /// Snapshot of the store's canonical collection, refreshed after
    /// every dispatched command.
    pub tasks: Vec<Task>,
    /// Sort, page, and expansion parameters.
    pub view: ViewState,
    /// Cursor row within the current page.
    pub selected: usize,
    /// Add-task workflow.
    pub add_modal: AddModal,
    /// Edit-task workflow.
    pub edit_modal: EditModal,
    /// Remove-task workflow.
    pub remove_modal: RemoveModal,
    /// Focused field of the add form.
    pub add_focus: AddField,
    /// One-line status message shown in the status bar.
    pub status_line: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app with an empty snapshot and all modals closed.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            tasks: Vec::new(),
            view: ViewState::new(page_size),
            selected: 0,
            add_modal: AddModal::new(),
            edit_modal: EditModal::new(),
            remove_modal: RemoveModal::new(),
            add_focus: AddField::Title,
            status_line: String::new(),
            should_quit: false,
        }
    }

    /// Refreshes the snapshot from the store's collection and pulls the
    /// view parameters back into range.
    pub fn sync_tasks(&mut self, tasks: &[Task]) {
        self.tasks = tasks.to_vec();
        self.view.clamp_page(self.tasks.len());
        if let Some(id) = self.view.expanded
            && !self.tasks.iter().any(|t| t.id == id)
        {
            self.view.expanded = None;
        }
        self.clamp_selected();
    }

    /// Sets the status bar message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_line = message.into();
    }

    /// The task under the cursor on the current page, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<Task> {
        self.view.current_page(&self.tasks).get(self.selected).cloned()
    }

    /// Handle a key event, returning a command for the main loop when
    /// the action needs the store.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        if self.add_modal.is_open() {
            return self.handle_add_key(key);
        }
        if self.edit_modal.is_open() {
            return self.handle_edit_key(key);
        }
        if self.remove_modal.is_open() {
            return self.handle_remove_key(key);
        }
        self.handle_browse_key(key)
    }

    /// Key handling for the task table (no modal open).
    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q') | KeyCode::Esc, _) => {
                self.should_quit = true;
                None
            }
            (KeyCode::Char('r'), _) => Some(StoreCommand::Load),
            (KeyCode::Char('a'), _) => {
                self.add_modal.open();
                self.add_focus = AddField::Title;
                None
            }
            (KeyCode::Char('e'), _) => {
                if let Some(task) = self.selected_task() {
                    self.edit_modal.open(&task);
                }
                None
            }
            (KeyCode::Char('d'), _) => {
                if let Some(task) = self.selected_task() {
                    self.remove_modal.open(&task);
                }
                None
            }
            (KeyCode::Char('1'), _) => self.sort_by(SortField::Id),
            (KeyCode::Char('2'), _) => self.sort_by(SortField::Title),
            (KeyCode::Char('3'), _) => self.sort_by(SortField::Description),
            (KeyCode::Char('4'), _) => self.sort_by(SortField::Status),
            (KeyCode::Left | KeyCode::Char('h'), _) => {
                self.view.prev_page();
                self.clamp_selected();
                None
            }
            (KeyCode::Right | KeyCode::Char('l'), _) => {
                self.view.next_page(self.tasks.len());
                self.clamp_selected();
                None
            }
            (KeyCode::Up | KeyCode::Char('k'), _) => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            (KeyCode::Down | KeyCode::Char('j'), _) => {
                self.selected += 1;
                self.clamp_selected();
                None
            }
            (KeyCode::Enter | KeyCode::Char(' '), _) => {
                if let Some(task) = self.selected_task() {
                    self.view.toggle_expanded(task.id);
                }
                None
            }
            _ => None,
        }
    }

    /// Key handling while the add modal is open.
    fn handle_add_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Esc => {
                self.add_modal.close();
                None
            }
            KeyCode::Tab => {
                self.add_focus = match self.add_focus {
                    AddField::Title => AddField::Description,
                    AddField::Description => AddField::Title,
                };
                None
            }
            KeyCode::Enter => Some(StoreCommand::ConfirmAdd),
            KeyCode::Char(c) => {
                if let Some(draft) = self.add_modal.draft_mut() {
                    match self.add_focus {
                        AddField::Title => draft.title.push(c),
                        AddField::Description => draft.description.push(c),
                    }
                }
                None
            }
            KeyCode::Backspace => {
                if let Some(draft) = self.add_modal.draft_mut() {
                    match self.add_focus {
                        AddField::Title => {
                            draft.title.pop();
                        }
                        AddField::Description => {
                            draft.description.pop();
                        }
                    }
                }
                None
            }
            _ => None,
        }
    }

    /// Key handling while the edit modal is open.
    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Esc => {
                self.edit_modal.close();
                None
            }
            // Status changes commit to the server immediately, without
            // closing the modal.
            KeyCode::Char('s') => {
                let next = self.edit_modal.snapshot()?.draft.status.cycle();
                Some(StoreCommand::CommitStatus(next))
            }
            KeyCode::Char('u') => {
                self.edit_modal.toggle_description_editable();
                None
            }
            KeyCode::Enter => Some(StoreCommand::SubmitDescription),
            KeyCode::Char(c) => {
                self.type_description(|text| text.push(c));
                None
            }
            KeyCode::Backspace => {
                self.type_description(|text| {
                    text.pop();
                });
                None
            }
            _ => None,
        }
    }

    /// Key handling while the remove modal is open.
    fn handle_remove_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => Some(StoreCommand::ConfirmRemove),
            KeyCode::Esc | KeyCode::Char('n') => {
                self.remove_modal.close();
                None
            }
            _ => None,
        }
    }

    /// Applies `edit` to the draft description through the modal's form
    /// capability; ignored while the field is locked.
    fn type_description(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(snapshot) = self.edit_modal.snapshot() {
            let mut text = snapshot.draft.description.clone();
            edit(&mut text);
            self.edit_modal.edit_description(&text);
        }
    }

    fn sort_by(&mut self, field: SortField) -> Option<StoreCommand> {
        self.view.toggle_sort(field);
        self.clamp_selected();
        None
    }

    /// Keeps the cursor inside the current page.
    fn clamp_selected(&mut self) {
        let page_len = self.view.current_page(&self.tasks).len();
        self.selected = self.selected.min(page_len.saturating_sub(1));
    }
}
