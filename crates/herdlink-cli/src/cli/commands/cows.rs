//! Herd registry command handlers.

use anyhow::Result;
use herdlink_core::api::ApiClient;
use herdlink_core::ops::herd;

pub async fn list(client: &ApiClient, page: u32, page_size: u32) -> Result<()> {
    let cows = super::surface(herd::list_cows(client, page, page_size).await)?;
    if cows.is_empty() {
        println!("No cows found.");
        return Ok(());
    }

    for cow in &cows.items {
        let pen = cow
            .pen_id
            .map_or_else(|| "unassigned".to_string(), |id| format!("pen {id}"));
        println!("{}  {}  {}  {}", cow.id, cow.tag_code, cow.name, pen);
    }
    println!("page {} of {} cows", cows.page, cows.total);
    Ok(())
}

pub async fn show(client: &ApiClient, id: i64) -> Result<()> {
    let cow = super::surface(herd::get_cow(client, id).await)?;
    println!("{}  {}  {}", cow.id, cow.tag_code, cow.name);
    if let Some(dob) = &cow.date_of_birth {
        println!("born       {dob}");
    }
    if let Some(status) = &cow.status {
        println!("status     {status}");
    }
    if let Some(pen_id) = cow.pen_id {
        println!("pen        {pen_id}");
    }
    Ok(())
}
