pub mod board;
pub mod item;
pub mod model;

pub use self::board::{CreateForm, MutationKind, PendingDelete, TodoBoard, TodoCommand};
pub use self::item::{ItemAction, ItemIntent, ItemMode, TodoItem};
pub use self::model::{
    DESCRIPTION_MAX_CHARS, NewTodo, TITLE_MAX_CHARS, Todo, TodoId, TodoPatch, TodoValidationError,
};
