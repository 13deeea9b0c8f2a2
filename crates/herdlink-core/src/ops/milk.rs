//! Milk batch records.

use herdlink_types::{MilkBatch, NewMilkBatch, Page};

use crate::api::{ApiClient, ApiError, ApiRequest, ApiResult};

pub async fn list(client: &ApiClient, page: u32, page_size: u32) -> ApiResult<Page<MilkBatch>> {
    client
        .send_as(&ApiRequest::get(format!(
            "/milk-batches?page={page}&pageSize={page_size}"
        )))
        .await
}

pub async fn get(client: &ApiClient, id: i64) -> ApiResult<MilkBatch> {
    client
        .send_as(&ApiRequest::get(format!("/milk-batches/{id}")))
        .await
}

pub async fn record(client: &ApiClient, batch: &NewMilkBatch) -> ApiResult<MilkBatch> {
    let body = serde_json::to_value(batch)
        .map_err(|e| ApiError::decode(format!("serialize milk batch: {e}")))?;
    client
        .send_as(&ApiRequest::post("/milk-batches").with_body(body))
        .await
}
