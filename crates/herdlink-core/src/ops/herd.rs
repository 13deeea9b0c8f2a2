//! Herd registry: cows, pens, areas.

use serde_json::Value;

use herdlink_types::{Area, CowRecord, Page, Pen};

use crate::api::{ApiClient, ApiRequest, ApiResult};

pub async fn list_cows(client: &ApiClient, page: u32, page_size: u32) -> ApiResult<Page<CowRecord>> {
    client
        .send_as(&ApiRequest::get(format!(
            "/cows?page={page}&pageSize={page_size}"
        )))
        .await
}

pub async fn get_cow(client: &ApiClient, id: i64) -> ApiResult<CowRecord> {
    client.send_as(&ApiRequest::get(format!("/cows/{id}"))).await
}

pub async fn create_cow(client: &ApiClient, cow: &Value) -> ApiResult<CowRecord> {
    client
        .send_as(&ApiRequest::post("/cows").with_body(cow.clone()))
        .await
}

pub async fn update_cow(client: &ApiClient, id: i64, cow: &Value) -> ApiResult<CowRecord> {
    client
        .send_as(&ApiRequest::put(format!("/cows/{id}")).with_body(cow.clone()))
        .await
}

pub async fn delete_cow(client: &ApiClient, id: i64) -> ApiResult<()> {
    client
        .send_unit(&ApiRequest::delete(format!("/cows/{id}")))
        .await
}

pub async fn list_pens(client: &ApiClient, page: u32, page_size: u32) -> ApiResult<Page<Pen>> {
    client
        .send_as(&ApiRequest::get(format!(
            "/pens?page={page}&pageSize={page_size}"
        )))
        .await
}

pub async fn list_areas(client: &ApiClient, page: u32, page_size: u32) -> ApiResult<Page<Area>> {
    client
        .send_as(&ApiRequest::get(format!(
            "/areas?page={page}&pageSize={page_size}"
        )))
        .await
}
