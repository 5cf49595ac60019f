/*
[INPUT]:  Loaded controller for the configured session
[OUTPUT]: Plain task table on stdout
[POS]:    CLI non-interactive listing
[UPDATE]: When task columns change
*/

use std::io::Write;

use anyhow::{Result, bail};
use console::style;

use agrisync_adapter::Task;
use agrisync_tasks::form::DATE_FORMAT;
use agrisync_tasks::task_list::EMPTY_MESSAGE;
use agrisync_tasks::{TaskListController, TaskListView};

const UNASSIGNED: &str = "Unassigned";

pub async fn run_list(mut controller: TaskListController, out: &mut impl Write) -> Result<()> {
    controller.fetch_tasks().await;
    match controller.view() {
        TaskListView::Error(message) => bail!("{message}"),
        TaskListView::Empty | TaskListView::Loading => writeln!(out, "{EMPTY_MESSAGE}")?,
        TaskListView::Table(tasks) => write_table(out, tasks)?,
    }
    Ok(())
}

fn write_table(out: &mut impl Write, tasks: &[Task]) -> Result<()> {
    let title_width = tasks
        .iter()
        .map(|task| task.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("Title".len());
    let assignee_width = tasks
        .iter()
        .map(|task| task.assignee_name().unwrap_or(UNASSIGNED).chars().count())
        .max()
        .unwrap_or(0)
        .max("Assigned To".len());

    writeln!(
        out,
        "{}",
        style(format!(
            "{:>5}  {:<title_width$}  {:<assignee_width$}  {:<10}  Status",
            "ID", "Title", "Assigned To", "Due Date"
        ))
        .bold()
    )?;
    for task in tasks {
        writeln!(
            out,
            "{:>5}  {:<title_width$}  {:<assignee_width$}  {:<10}  {}",
            task.id,
            task.title,
            task.assignee_name().unwrap_or(UNASSIGNED),
            task.due_date.format(DATE_FORMAT).to_string(),
            task.status.label()
        )?;
    }
    Ok(())
}
