//! In-app notifications.

use herdlink_types::{Notice, Page};

use crate::api::{ApiClient, ApiRequest, ApiResult};

pub async fn list(client: &ApiClient, page: u32, page_size: u32) -> ApiResult<Page<Notice>> {
    client
        .send_as(&ApiRequest::get(format!(
            "/notifications?page={page}&pageSize={page_size}"
        )))
        .await
}

pub async fn mark_read(client: &ApiClient, id: i64) -> ApiResult<()> {
    client
        .send_unit(&ApiRequest::put(format!("/notifications/{id}/read")))
        .await
}
