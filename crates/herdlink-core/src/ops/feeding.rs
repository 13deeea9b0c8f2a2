//! Feeding plans.

use herdlink_types::{FeedingPlan, Page};

use crate::api::{ApiClient, ApiRequest, ApiResult};

pub async fn list(client: &ApiClient, page: u32, page_size: u32) -> ApiResult<Page<FeedingPlan>> {
    client
        .send_as(&ApiRequest::get(format!(
            "/feeding-plans?page={page}&pageSize={page_size}"
        )))
        .await
}
