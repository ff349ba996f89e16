use tracing::debug;

use super::item::{ItemAction, ItemIntent, TodoItem};
use super::model::{NewTodo, Todo, TodoId, TodoPatch};
use crate::status::StatusLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoCommand {
    Reload,
    Create(NewTodo),
    Update { id: TodoId, patch: TodoPatch },
    Delete { id: TodoId },
}

impl TodoCommand {
    pub fn mutation_kind(&self) -> Option<MutationKind> {
        match self {
            Self::Reload => None,
            Self::Create(_) => Some(MutationKind::Create),
            Self::Update { .. } => Some(MutationKind::Update),
            Self::Delete { .. } => Some(MutationKind::Delete),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: TodoId,
    pub title: String,
}

/// The rendered todo list. Every load replaces the items wholesale; there is
/// no identity-based reconciliation and no optimistic update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoBoard {
    items: Vec<TodoItem>,
    status: StatusLine,
    pending_delete: Option<PendingDelete>,
    pub create_form: CreateForm,
}

impl TodoBoard {
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [TodoItem] {
        &mut self.items
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    pub fn reload(&mut self) -> TodoCommand {
        self.status = StatusLine::loading();
        TodoCommand::Reload
    }

    pub fn submit_create(&mut self) -> Option<TodoCommand> {
        match NewTodo::from_input(&self.create_form.title, &self.create_form.description) {
            Ok(todo) => Some(TodoCommand::Create(todo)),
            Err(error) => {
                debug!(error = %error, "create form rejected");
                self.status = StatusLine::error(error);
                None
            }
        }
    }

    pub fn handle_item(&mut self, index: usize, action: ItemAction) -> Option<TodoCommand> {
        let item = self.items.get_mut(index)?;
        match item.handle(action) {
            ItemIntent::Nothing => None,
            ItemIntent::Update { id, patch } => Some(TodoCommand::Update { id, patch }),
            ItemIntent::ConfirmDelete { id, title } => {
                self.pending_delete = Some(PendingDelete { id, title });
                None
            }
            ItemIntent::Rejected(error) => {
                self.status = StatusLine::error(error);
                None
            }
        }
    }

    pub fn confirm_delete(&mut self) -> Option<TodoCommand> {
        self.pending_delete
            .take()
            .map(|pending| TodoCommand::Delete { id: pending.id })
    }

    pub fn decline_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn apply_loaded(&mut self, todos: Vec<Todo>) {
        self.items = todos.into_iter().map(TodoItem::new).collect();
        self.status = StatusLine::ok(format!("OK ({})", self.items.len()));
    }

    pub fn apply_load_failed(&mut self, reason: &str) {
        self.items.clear();
        self.status = StatusLine::error(reason);
    }

    /// A successful mutation is only made visible through a full reload.
    pub fn apply_mutation_succeeded(&mut self, kind: MutationKind) -> TodoCommand {
        if kind == MutationKind::Create {
            self.create_form = CreateForm::default();
        }
        self.reload()
    }

    pub fn apply_mutation_failed(&mut self, kind: MutationKind, reason: &str) {
        self.status = StatusLine::error(format!("{} failed: {reason}", kind.label()));
    }
}
