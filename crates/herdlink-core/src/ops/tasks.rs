//! Farm tasks.

use herdlink_types::{FarmTask, Page};

use crate::api::{ApiClient, ApiRequest, ApiResult};

pub async fn list(client: &ApiClient, page: u32, page_size: u32) -> ApiResult<Page<FarmTask>> {
    client
        .send_as(&ApiRequest::get(format!(
            "/tasks?page={page}&pageSize={page_size}"
        )))
        .await
}

pub async fn complete(client: &ApiClient, id: i64) -> ApiResult<FarmTask> {
    client
        .send_as(&ApiRequest::put(format!("/tasks/{id}/complete")))
        .await
}
