use anyhow::{Context, Result, bail};
use tracing::info;

use crate::api::ApiClient;
use crate::machine_info::pretty_json;
use crate::todos::{NewTodo, Todo, TodoId, TodoPatch};

pub async fn print_machine_info(client: &ApiClient) -> Result<()> {
    let document = client
        .fetch_machine_info()
        .await
        .context("failed to fetch machine info")?;
    println!("{}", pretty_json(&document));
    Ok(())
}

pub async fn print_todos(client: &ApiClient) -> Result<()> {
    let todos = client.list_todos().await.context("failed to load todos")?;
    if todos.is_empty() {
        println!("No todos.");
    }
    for todo in &todos {
        println!("{}", format_todo_line(todo));
    }
    Ok(())
}

pub async fn add_todo(client: &ApiClient, title: &str, description: Option<&str>) -> Result<()> {
    let todo = NewTodo::from_input(title, description.unwrap_or_default())
        .context("invalid todo")?;
    client
        .create_todo(&todo)
        .await
        .context("failed to create todo")?;
    info!(title = %todo.title, "todo created");
    print_todos(client).await
}

pub async fn set_done(client: &ApiClient, id: &str, done: bool) -> Result<()> {
    let id = TodoId::from(id);
    client
        .update_todo(&id, &TodoPatch::done(done))
        .await
        .with_context(|| format!("failed to update todo {id}"))?;
    print_todos(client).await
}

pub async fn edit_todo(
    client: &ApiClient,
    id: &str,
    title: &str,
    description: Option<&str>,
) -> Result<()> {
    let id = TodoId::from(id);
    let patch = TodoPatch::content(title, description.unwrap_or_default())
        .context("invalid todo")?;
    client
        .update_todo(&id, &patch)
        .await
        .with_context(|| format!("failed to update todo {id}"))?;
    print_todos(client).await
}

/// Deletes only when `confirmed`; otherwise nothing is sent.
pub async fn delete_todo(client: &ApiClient, id: &str, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("refusing to delete todo {id} without --yes");
    }

    let id = TodoId::from(id);
    client
        .delete_todo(&id)
        .await
        .with_context(|| format!("failed to delete todo {id}"))?;
    print_todos(client).await
}

pub fn format_todo_line(todo: &Todo) -> String {
    let mark = if todo.done { "[x]" } else { "[ ]" };
    match todo.visible_description() {
        Some(description) => format!("{mark} {} {} - {description}", todo.id, todo.title),
        None => format!("{mark} {} {}", todo.id, todo.title),
    }
}
