use std::io::{self, BufRead, Write};

use anyhow::{Context, anyhow, bail};
use chrono::Utc;
use todo_shared::TodoId;
use tracing::{debug, info};

use crate::cli::Command;
use crate::datetime::parse_due_input;
use crate::editor::{ItemEditor, SubmitError};
use crate::gateway::{Gateway, Transport};
use crate::list::{ListOrchestrator, LoadOutcome};
use crate::render::Renderer;

#[tracing::instrument(skip(gateway, list, renderer, out, confirm))]
pub async fn dispatch<T, W>(
    gateway: &Gateway<T>,
    list: &mut ListOrchestrator,
    renderer: &Renderer,
    out: &mut W,
    command: Command,
    confirm: impl FnOnce(TodoId) -> bool,
) -> anyhow::Result<()>
where
    T: Transport,
    W: Write,
{
    let result = match command {
        Command::List => {
            let outcome = list.refresh(gateway).await;
            show_page(list, renderer, out, outcome)
        }
        Command::Show { id } => {
            let todo = gateway
                .fetch_by_id(id)
                .await
                .with_context(|| format!("failed to fetch todo {id}"))?;
            renderer.write_todo_info(&mut *out, &todo, Utc::now())
        }
        Command::Add {
            title,
            description,
            due,
        } => {
            let mut editor = ItemEditor::create();
            editor.set_title(title);
            editor.set_description(description);
            editor.set_due(due);
            submit(gateway, list, renderer, out, editor).await
        }
        Command::Edit {
            id,
            title,
            description,
            due,
            completed,
        } => {
            let todo = gateway
                .fetch_by_id(id)
                .await
                .with_context(|| format!("failed to fetch todo {id}"))?;
            let mut editor = ItemEditor::edit(todo);
            if let Some(title) = title {
                editor.set_title(title);
            }
            if let Some(description) = description {
                editor.set_description(description);
            }
            if let Some(due) = due {
                editor.set_due(due);
            }
            if let Some(completed) = completed {
                editor.set_completed(completed);
            }
            submit(gateway, list, renderer, out, editor).await
        }
        Command::Toggle { id } => match list.toggle_completion(gateway, id).await {
            Ok(outcome) => show_page(list, renderer, out, outcome),
            Err(err) => Err(anyhow::Error::new(err).context(format!("failed to toggle todo {id}"))),
        },
        Command::Delete { id, yes } => match list.delete(gateway, id, |id| yes || confirm(id)).await {
            Ok(Some(outcome)) => show_page(list, renderer, out, outcome),
            Ok(None) => {
                writeln!(out, "Delete cancelled.")?;
                Ok(())
            }
            Err(err) => Err(anyhow::Error::new(err).context(format!("failed to delete todo {id}"))),
        },
        Command::Due { date } => {
            let due = parse_due_input(&date).ok_or_else(|| anyhow!("invalid date: {date}"))?;
            let page = gateway
                .fetch_by_due_date(due)
                .await
                .context("failed to fetch todos by due date")?;
            debug!(count = page.count, "todos due");
            renderer.write_todo_table(&mut *out, &page.items, Utc::now())?;
            writeln!(out, "{} due", page.count)?;
            Ok(())
        }
    };

    for notice in list.take_notices() {
        renderer.print_notice(&notice);
    }
    result
}

async fn submit<T: Transport, W: Write>(
    gateway: &Gateway<T>,
    list: &mut ListOrchestrator,
    renderer: &Renderer,
    out: &mut W,
    mut editor: ItemEditor,
) -> anyhow::Result<()> {
    match list.submit_editor(gateway, &mut editor).await {
        Ok(outcome) => show_page(list, renderer, out, outcome),
        Err(SubmitError::Invalid(errors)) => {
            for err in errors.iter() {
                eprintln!("{err}");
            }
            bail!("todo not saved: form is invalid")
        }
        Err(err) => Err(anyhow::Error::new(err).context("todo not saved")),
    }
}

fn show_page<W: Write>(
    list: &ListOrchestrator,
    renderer: &Renderer,
    out: &mut W,
    outcome: LoadOutcome,
) -> anyhow::Result<()> {
    if outcome == LoadOutcome::Failed {
        bail!("failed to load todos");
    }
    renderer.write_page(&mut *out, list, Utc::now())
}

/// Asks on stderr and reads the answer from stdin. Anything but y/yes declines.
pub fn confirm_on_stdin(id: TodoId) -> bool {
    eprint!("Are you sure you want to delete todo {id}? [y/N] ");
    if io::stderr().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    let confirmed = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
    info!(id, confirmed, "delete confirmation answered");
    confirmed
}
