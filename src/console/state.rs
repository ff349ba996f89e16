use super::events::{ConsoleCommand, ConsoleEvent};
use crate::machine_info::MachineInfoPanel;
use crate::todos::TodoBoard;

/// Everything the console window shows, updated only from the UI thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleState {
    pub machine_info: MachineInfoPanel,
    pub board: TodoBoard,
}

impl ConsoleState {
    pub fn startup_commands(&mut self) -> Vec<ConsoleCommand> {
        vec![self.refresh_machine_info(), self.board.reload().into()]
    }

    pub fn refresh_machine_info(&mut self) -> ConsoleCommand {
        self.machine_info.begin_refresh();
        ConsoleCommand::RefreshMachineInfo
    }

    /// Applies a worker event and returns the follow-up command, if any.
    pub fn apply_event(&mut self, event: ConsoleEvent) -> Option<ConsoleCommand> {
        match event {
            ConsoleEvent::MachineInfoLoaded { document } => {
                self.machine_info.apply_loaded(&document);
                None
            }
            ConsoleEvent::MachineInfoFailed { error } => {
                self.machine_info.apply_failed(&error);
                None
            }
            ConsoleEvent::TodosLoaded { todos } => {
                self.board.apply_loaded(todos);
                None
            }
            ConsoleEvent::TodosFailed { error } => {
                self.board.apply_load_failed(&error);
                None
            }
            ConsoleEvent::MutationSucceeded { kind } => {
                Some(self.board.apply_mutation_succeeded(kind).into())
            }
            ConsoleEvent::MutationFailed { kind, error } => {
                self.board.apply_mutation_failed(kind, &error);
                None
            }
        }
    }
}
