use std::time::Duration;

use anyhow::{Context, Result};
use eframe::egui;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::ClientSettings;
use crate::status::StatusLine;
use crate::todos::{DESCRIPTION_MAX_CHARS, ItemAction, TITLE_MAX_CHARS, TodoCommand, TodoItem};

pub mod events;
pub mod state;
pub mod worker;

use self::events::{ConsoleCommand, ConsoleEvent};
use self::state::ConsoleState;
use self::worker::spawn_console_worker;

const APP_TITLE: &str = "todo_desk";
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(173, 33, 33);
const OK_COLOR: egui::Color32 = egui::Color32::from_rgb(26, 103, 64);
const NO_DESCRIPTION_PLACEHOLDER: &str = "(no description)";

pub fn run_console(settings: &ClientSettings) -> Result<()> {
    let runtime_handle =
        tokio::runtime::Handle::try_current().context("console requires a tokio runtime")?;

    let (command_tx, command_rx) = unbounded_channel::<ConsoleCommand>();
    let (event_tx, event_rx) = unbounded_channel::<ConsoleEvent>();
    let client = ApiClient::from_settings(settings);
    let api_base = client.endpoints().base().to_owned();

    spawn_console_worker(&runtime_handle, client, command_rx, event_tx);
    info!(
        api_base = %api_base,
        page_origin = %settings.page_origin,
        "starting native console"
    );

    let page_origin = settings.page_origin.clone();
    eframe::run_native(
        APP_TITLE,
        eframe::NativeOptions::default(),
        Box::new(move |_cc| {
            Ok(Box::new(ConsoleApp::new(
                api_base,
                page_origin,
                command_tx,
                event_rx,
            )))
        }),
    )
    .map_err(|error| anyhow::anyhow!("console UI exited with error: {error}"))
}

struct ConsoleApp {
    api_base: String,
    page_origin: String,
    command_tx: UnboundedSender<ConsoleCommand>,
    event_rx: UnboundedReceiver<ConsoleEvent>,
    state: ConsoleState,
    runtime_disconnected: bool,
}

impl ConsoleApp {
    fn new(
        api_base: String,
        page_origin: String,
        command_tx: UnboundedSender<ConsoleCommand>,
        event_rx: UnboundedReceiver<ConsoleEvent>,
    ) -> Self {
        let mut app = Self {
            api_base,
            page_origin,
            command_tx,
            event_rx,
            state: ConsoleState::default(),
            runtime_disconnected: false,
        };
        for command in app.state.startup_commands() {
            app.send(command);
        }
        app
    }

    fn send(&mut self, command: ConsoleCommand) {
        if self.runtime_disconnected {
            return;
        }
        if let Err(error) = self.command_tx.send(command) {
            warn!(error = %error, "failed to submit command to console worker");
            self.runtime_disconnected = true;
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    if let Some(follow_up) = self.state.apply_event(event) {
                        self.send(follow_up);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.runtime_disconnected {
                        warn!("console runtime worker disconnected");
                    }
                    self.runtime_disconnected = true;
                    break;
                }
            }
        }
    }

    fn render_machine_info_pane(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Machine info");
            if ui
                .add_enabled(!self.runtime_disconnected, egui::Button::new("Refresh"))
                .clicked()
            {
                let command = self.state.refresh_machine_info();
                self.send(command);
            }
        });
        let base = if self.api_base.is_empty() {
            format!("{} (same origin)", self.page_origin)
        } else {
            self.api_base.clone()
        };
        ui.label(format!("Backend: {base}"));
        render_status(ui, self.state.machine_info.status());

        egui::ScrollArea::vertical()
            .id_salt("machine_info_output")
            .max_height(220.0)
            .show(ui, |ui| {
                ui.label(egui::RichText::new(self.state.machine_info.output()).monospace());
            });

        if self.runtime_disconnected {
            ui.colored_label(ERROR_COLOR, "Runtime worker is disconnected.");
        }
    }

    fn render_todos_pane(&mut self, ui: &mut egui::Ui) {
        let mut commands: Vec<TodoCommand> = Vec::new();

        ui.horizontal(|ui| {
            ui.heading("Todos");
            if ui.button("Reload").clicked() {
                commands.push(self.state.board.reload());
            }
        });
        render_status(ui, self.state.board.status());
        ui.separator();

        ui.label(egui::RichText::new("New todo").strong());
        ui.add(
            egui::TextEdit::singleline(&mut self.state.board.create_form.title)
                .hint_text("Title (required)")
                .char_limit(TITLE_MAX_CHARS),
        );
        ui.add(
            egui::TextEdit::multiline(&mut self.state.board.create_form.description)
                .hint_text("Description (optional)")
                .char_limit(DESCRIPTION_MAX_CHARS)
                .desired_rows(2),
        );
        if ui.button("Add").clicked()
            && let Some(command) = self.state.board.submit_create()
        {
            commands.push(command);
        }
        ui.separator();

        let mut actions: Vec<(usize, ItemAction)> = Vec::new();
        egui::ScrollArea::vertical()
            .id_salt("todo_list")
            .show(ui, |ui| {
                if self.state.board.items().is_empty() {
                    ui.label("No todos.");
                    return;
                }

                for (index, item) in self.state.board.items_mut().iter_mut().enumerate() {
                    ui.push_id(index, |ui| {
                        ui.group(|ui| {
                            if let Some(action) = render_item(ui, item) {
                                actions.push((index, action));
                            }
                        });
                    });
                    ui.add_space(4.0);
                }
            });

        for (index, action) in actions {
            if let Some(command) = self.state.board.handle_item(index, action) {
                commands.push(command);
            }
        }
        for command in commands {
            self.send(command.into());
        }
    }

    fn render_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.state.board.pending_delete().cloned() else {
            return;
        };

        let mut confirmed = false;
        let mut declined = false;
        egui::Window::new("Delete todo")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!("Delete \"{}\"?", pending.title));
                ui.horizontal(|ui| {
                    confirmed = ui.button("Delete").clicked();
                    declined = ui.button("Keep").clicked();
                });
            });

        if confirmed {
            if let Some(command) = self.state.board.confirm_delete() {
                self.send(command.into());
            }
        } else if declined {
            self.state.board.decline_delete();
        }
    }
}

fn render_item(ui: &mut egui::Ui, item: &mut TodoItem) -> Option<ItemAction> {
    let mut action = None;

    if item.is_editing() {
        if let Some((draft_title, draft_description)) = item.drafts_mut() {
            ui.add(
                egui::TextEdit::singleline(draft_title)
                    .hint_text("Title (required)")
                    .char_limit(TITLE_MAX_CHARS),
            );
            ui.add(
                egui::TextEdit::multiline(draft_description)
                    .hint_text("Description (optional)")
                    .char_limit(DESCRIPTION_MAX_CHARS)
                    .desired_rows(2),
            );
        }
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                action = Some(ItemAction::Save);
            }
            if ui.button("Cancel").clicked() {
                action = Some(ItemAction::CancelEdit);
            }
            if ui.button("Delete").clicked() {
                action = Some(ItemAction::Delete);
            }
        });
        return action;
    }

    let todo = item.todo();
    ui.horizontal(|ui| {
        let mut done = todo.done;
        if ui.checkbox(&mut done, "").changed() {
            action = Some(ItemAction::ToggleDone);
        }

        let title = egui::RichText::new(&todo.title).strong();
        let title = if todo.done {
            title.strikethrough().weak()
        } else {
            title
        };
        ui.label(title);
    });
    match todo.visible_description() {
        Some(description) => {
            ui.label(description);
        }
        None => {
            ui.label(egui::RichText::new(NO_DESCRIPTION_PLACEHOLDER).italics().weak());
        }
    }
    ui.horizontal(|ui| {
        if ui.button("Edit").clicked() {
            action = Some(ItemAction::BeginEdit);
        }
        if ui.button("Delete").clicked() {
            action = Some(ItemAction::Delete);
        }
    });

    action
}

fn render_status(ui: &mut egui::Ui, status: &StatusLine) {
    if status.text.is_empty() {
        return;
    }
    let color = if status.is_error { ERROR_COLOR } else { OK_COLOR };
    ui.colored_label(color, status.text.as_str());
}

impl Drop for ConsoleApp {
    fn drop(&mut self) {
        let _ = self.command_tx.send(ConsoleCommand::Shutdown);
    }
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::TopBottomPanel::top("machine_info_pane")
            .resizable(true)
            .show(ctx, |ui| self.render_machine_info_pane(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.render_todos_pane(ui));

        self.render_delete_confirmation(ctx);

        ctx.request_repaint_after(Duration::from_millis(120));
    }
}
