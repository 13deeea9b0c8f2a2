//! Veterinary/health records.

use herdlink_types::{HealthRecord, NewHealthRecord, Page};

use crate::api::{ApiClient, ApiError, ApiRequest, ApiResult};

pub async fn list_for_cow(
    client: &ApiClient,
    cow_id: i64,
    page: u32,
    page_size: u32,
) -> ApiResult<Page<HealthRecord>> {
    client
        .send_as(&ApiRequest::get(format!(
            "/cows/{cow_id}/health-records?page={page}&pageSize={page_size}"
        )))
        .await
}

pub async fn create(client: &ApiClient, record: &NewHealthRecord) -> ApiResult<HealthRecord> {
    let body = serde_json::to_value(record)
        .map_err(|e| ApiError::decode(format!("serialize health record: {e}")))?;
    client
        .send_as(&ApiRequest::post("/health-records").with_body(body))
        .await
}
