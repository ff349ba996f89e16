use serde_json::Value;

use crate::todos::{MutationKind, Todo, TodoCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    RefreshMachineInfo,
    Todos(TodoCommand),
    Shutdown,
}

impl From<TodoCommand> for ConsoleCommand {
    fn from(command: TodoCommand) -> Self {
        Self::Todos(command)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    MachineInfoLoaded {
        document: Value,
    },
    MachineInfoFailed {
        error: String,
    },
    TodosLoaded {
        todos: Vec<Todo>,
    },
    TodosFailed {
        error: String,
    },
    MutationSucceeded {
        kind: MutationKind,
    },
    MutationFailed {
        kind: MutationKind,
        error: String,
    },
}
