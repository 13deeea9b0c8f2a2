//! Farm task command handlers.

use anyhow::Result;
use herdlink_core::api::ApiClient;
use herdlink_core::ops::tasks;

pub async fn list(client: &ApiClient, page: u32, page_size: u32) -> Result<()> {
    let page_of_tasks = super::surface(tasks::list(client, page, page_size).await)?;
    if page_of_tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    for task in &page_of_tasks.items {
        let mark = if task.completed { "x" } else { " " };
        let due = task
            .due_date
            .as_deref()
            .map_or_else(String::new, |d| format!("  due {d}"));
        println!("[{mark}] {}  {}{due}", task.id, task.title);
    }
    Ok(())
}

pub async fn complete(client: &ApiClient, id: i64) -> Result<()> {
    let task = super::surface(tasks::complete(client, id).await)?;
    println!("Completed task {}: {}", task.id, task.title);
    Ok(())
}
