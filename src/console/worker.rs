use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use super::events::{ConsoleCommand, ConsoleEvent};
use crate::api::ApiClient;
use crate::todos::TodoCommand;

/// Runs commands from the UI against the backend.
///
/// Each command gets its own task, so overlapping requests race and their
/// events arrive in completion order. Nothing is cancelled once sent.
pub fn spawn_console_worker(
    handle: &Handle,
    client: ApiClient,
    mut command_rx: UnboundedReceiver<ConsoleCommand>,
    event_tx: UnboundedSender<ConsoleEvent>,
) {
    let task_handle = handle.clone();
    let _task = handle.spawn(async move {
        while let Some(command) = command_rx.recv().await {
            if command == ConsoleCommand::Shutdown {
                debug!("console worker received shutdown");
                break;
            }
            if event_tx.is_closed() {
                warn!("console event receiver dropped; stopping worker");
                break;
            }

            let client = client.clone();
            let event_tx = event_tx.clone();
            let _request = task_handle.spawn(async move {
                if let Some(event) = execute_command(&client, command).await {
                    let _ = event_tx.send(event);
                }
            });
        }
    });
}

pub async fn execute_command(client: &ApiClient, command: ConsoleCommand) -> Option<ConsoleEvent> {
    let event = match command {
        ConsoleCommand::RefreshMachineInfo => match client.fetch_machine_info().await {
            Ok(document) => ConsoleEvent::MachineInfoLoaded { document },
            Err(error) => {
                warn!(
                    status = error.status().map(|status| status.as_u16()),
                    error = %error,
                    "machine info request failed"
                );
                ConsoleEvent::MachineInfoFailed {
                    error: error.to_string(),
                }
            }
        },
        ConsoleCommand::Todos(TodoCommand::Reload) => match client.list_todos().await {
            Ok(todos) => {
                info!(count = todos.len(), "todos loaded");
                ConsoleEvent::TodosLoaded { todos }
            }
            Err(error) => {
                warn!(
                    status = error.status().map(|status| status.as_u16()),
                    error = %error,
                    "todo list request failed"
                );
                ConsoleEvent::TodosFailed {
                    error: error.to_string(),
                }
            }
        },
        ConsoleCommand::Todos(command) => {
            let kind = command.mutation_kind()?;
            let result = match &command {
                TodoCommand::Create(todo) => client.create_todo(todo).await,
                TodoCommand::Update { id, patch } => client.update_todo(id, patch).await,
                TodoCommand::Delete { id } => client.delete_todo(id).await,
                TodoCommand::Reload => return None,
            };
            match result {
                Ok(()) => {
                    info!(mutation = kind.label(), "todo mutation succeeded");
                    ConsoleEvent::MutationSucceeded { kind }
                }
                Err(error) => {
                    warn!(
                        mutation = kind.label(),
                        status = error.status().map(|status| status.as_u16()),
                        error = %error,
                        "todo mutation failed"
                    );
                    ConsoleEvent::MutationFailed {
                        kind,
                        error: error.to_string(),
                    }
                }
            }
        }
        ConsoleCommand::Shutdown => return None,
    };

    Some(event)
}
