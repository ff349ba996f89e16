use super::model::{Todo, TodoId, TodoPatch, TodoValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMode {
    Read,
    Edit {
        draft_title: String,
        draft_description: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    BeginEdit,
    CancelEdit,
    Save,
    ToggleDone,
    Delete,
}

/// What an item asks its list to do after handling an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemIntent {
    Nothing,
    Update { id: TodoId, patch: TodoPatch },
    ConfirmDelete { id: TodoId, title: String },
    Rejected(TodoValidationError),
}

/// View-model for one rendered todo. Rebuilt from server data on every reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    todo: Todo,
    mode: ItemMode,
}

impl TodoItem {
    pub fn new(todo: Todo) -> Self {
        Self {
            todo,
            mode: ItemMode::Read,
        }
    }

    pub fn todo(&self) -> &Todo {
        &self.todo
    }

    pub fn mode(&self) -> &ItemMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, ItemMode::Edit { .. })
    }

    /// Mutable drafts for the edit fields; `None` in read mode.
    pub fn drafts_mut(&mut self) -> Option<(&mut String, &mut String)> {
        match &mut self.mode {
            ItemMode::Read => None,
            ItemMode::Edit {
                draft_title,
                draft_description,
            } => Some((draft_title, draft_description)),
        }
    }

    pub fn handle(&mut self, action: ItemAction) -> ItemIntent {
        match action {
            ItemAction::BeginEdit => {
                self.mode = ItemMode::Edit {
                    draft_title: self.todo.title.clone(),
                    draft_description: self.todo.description.clone().unwrap_or_default(),
                };
                ItemIntent::Nothing
            }
            ItemAction::CancelEdit => {
                self.mode = ItemMode::Read;
                ItemIntent::Nothing
            }
            ItemAction::Save => match &self.mode {
                ItemMode::Read => ItemIntent::Nothing,
                // Stays in edit mode; the reload after a successful update replaces this item.
                ItemMode::Edit {
                    draft_title,
                    draft_description,
                } => match TodoPatch::content(draft_title, draft_description) {
                    Ok(patch) => ItemIntent::Update {
                        id: self.todo.id.clone(),
                        patch,
                    },
                    Err(error) => ItemIntent::Rejected(error),
                },
            },
            ItemAction::ToggleDone => match self.mode {
                ItemMode::Read => ItemIntent::Update {
                    id: self.todo.id.clone(),
                    patch: TodoPatch::done(!self.todo.done),
                },
                ItemMode::Edit { .. } => ItemIntent::Nothing,
            },
            ItemAction::Delete => ItemIntent::ConfirmDelete {
                id: self.todo.id.clone(),
                title: self.todo.title.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemAction, ItemIntent, ItemMode, TodoItem};
    use crate::todos::model::{Todo, TodoId, TodoPatch, TodoValidationError};

    fn todo(done: bool) -> Todo {
        Todo {
            id: TodoId::from("42"),
            title: "Write report".to_owned(),
            description: Some("quarterly".to_owned()),
            done,
        }
    }

    #[test]
    fn items_start_in_read_mode() {
        let item = TodoItem::new(todo(false));
        assert_eq!(item.mode(), &ItemMode::Read);
        assert!(!item.is_editing());
    }

    #[test]
    fn begin_edit_seeds_drafts_from_record_and_discards_previous_drafts() {
        let mut item = TodoItem::new(todo(false));

        item.handle(ItemAction::BeginEdit);
        {
            let (title, description) = item.drafts_mut().expect("edit mode has drafts");
            title.push_str(" (draft)");
            description.clear();
        }
        item.handle(ItemAction::CancelEdit);
        assert_eq!(item.mode(), &ItemMode::Read);

        item.handle(ItemAction::BeginEdit);
        assert_eq!(
            item.mode(),
            &ItemMode::Edit {
                draft_title: "Write report".to_owned(),
                draft_description: "quarterly".to_owned(),
            }
        );

        if let Some((title, _)) = item.drafts_mut() {
            title.push('!');
        }
        item.handle(ItemAction::BeginEdit);
        assert_eq!(
            item.mode(),
            &ItemMode::Edit {
                draft_title: "Write report".to_owned(),
                draft_description: "quarterly".to_owned(),
            }
        );
    }

    #[test]
    fn cancel_sends_nothing() {
        let mut item = TodoItem::new(todo(false));
        item.handle(ItemAction::BeginEdit);
        assert_eq!(item.handle(ItemAction::CancelEdit), ItemIntent::Nothing);
        assert!(item.drafts_mut().is_none());
    }

    #[test]
    fn save_with_valid_title_requests_content_update_and_stays_in_edit() {
        let mut item = TodoItem::new(todo(false));
        item.handle(ItemAction::BeginEdit);
        if let Some((title, description)) = item.drafts_mut() {
            *title = "  Final report ".to_owned();
            *description = String::new();
        }

        let intent = item.handle(ItemAction::Save);
        assert_eq!(
            intent,
            ItemIntent::Update {
                id: TodoId::from("42"),
                patch: TodoPatch {
                    title: Some("Final report".to_owned()),
                    description: Some(None),
                    done: None,
                },
            }
        );
        assert!(item.is_editing());
    }

    #[test]
    fn save_with_blank_title_is_rejected_locally() {
        let mut item = TodoItem::new(todo(false));
        item.handle(ItemAction::BeginEdit);
        if let Some((title, _)) = item.drafts_mut() {
            *title = "   ".to_owned();
        }

        assert_eq!(
            item.handle(ItemAction::Save),
            ItemIntent::Rejected(TodoValidationError::EmptyTitle)
        );
        assert!(item.is_editing());
    }

    #[test]
    fn save_in_read_mode_is_ignored() {
        let mut item = TodoItem::new(todo(false));
        assert_eq!(item.handle(ItemAction::Save), ItemIntent::Nothing);
    }

    #[test]
    fn toggle_negates_done_only_in_read_mode() {
        let mut open = TodoItem::new(todo(false));
        assert_eq!(
            open.handle(ItemAction::ToggleDone),
            ItemIntent::Update {
                id: TodoId::from("42"),
                patch: TodoPatch::done(true),
            }
        );

        let mut finished = TodoItem::new(todo(true));
        assert_eq!(
            finished.handle(ItemAction::ToggleDone),
            ItemIntent::Update {
                id: TodoId::from("42"),
                patch: TodoPatch::done(false),
            }
        );

        finished.handle(ItemAction::BeginEdit);
        assert_eq!(finished.handle(ItemAction::ToggleDone), ItemIntent::Nothing);
    }

    #[test]
    fn delete_asks_for_confirmation_in_either_mode() {
        let mut item = TodoItem::new(todo(false));
        let expected = ItemIntent::ConfirmDelete {
            id: TodoId::from("42"),
            title: "Write report".to_owned(),
        };
        assert_eq!(item.handle(ItemAction::Delete), expected);

        item.handle(ItemAction::BeginEdit);
        assert_eq!(item.handle(ItemAction::Delete), expected);
        assert!(item.is_editing());
    }
}
