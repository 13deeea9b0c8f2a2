//! Shared wire types for the herdlink farm-management backend.
//!
//! Everything here mirrors the backend's JSON (camelCase) exactly; no
//! behavior lives in this crate.

use serde::{Deserialize, Serialize};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Identity attributes returned by a successful login.
///
/// Display-only; the client never makes authorization decisions from
/// these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: i64,
    pub full_name: String,
    pub role_name: String,
}

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A cow in the herd registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CowRecord {
    pub id: i64,
    pub name: String,
    /// Ear-tag code, unique per farm.
    pub tag_code: String,
    pub pen_id: Option<i64>,
    pub date_of_birth: Option<String>,
    pub status: Option<String>,
}

/// A pen (group housing unit) inside an area.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pen {
    pub id: i64,
    pub name: String,
    pub area_id: Option<i64>,
    pub capacity: Option<u32>,
}

/// A physical area of the farm grouping pens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A recorded milk batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilkBatch {
    pub id: i64,
    /// Collection date, backend-formatted (`YYYY-MM-DD`).
    pub date: String,
    pub volume_liters: f64,
    pub pen_id: Option<i64>,
    pub quality_grade: Option<String>,
}

/// Body for recording a new milk batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMilkBatch {
    pub date: String,
    pub volume_liters: f64,
    pub pen_id: Option<i64>,
}

/// A health/veterinary record attached to a cow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub id: i64,
    pub cow_id: i64,
    pub date: String,
    pub diagnosis: String,
    pub treatment: Option<String>,
    pub vet_name: Option<String>,
}

/// Body for creating a health record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHealthRecord {
    pub cow_id: i64,
    pub date: String,
    pub diagnosis: String,
    pub treatment: Option<String>,
}

/// A farm task (feeding round, inspection, maintenance, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmTask {
    pub id: i64,
    pub title: String,
    pub assignee_id: Option<i64>,
    pub due_date: Option<String>,
    pub completed: bool,
}

/// A feeding plan for a pen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingPlan {
    pub id: i64,
    pub pen_id: i64,
    pub feed_type: String,
    pub daily_amount_kg: f64,
}

/// An in-app notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: i64,
    pub title: String,
    pub body: Option<String>,
    pub created_at: String,
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cow_record_uses_camel_case_wire_names() {
        let json = serde_json::json!({
            "id": 7,
            "name": "Bella",
            "tagCode": "NL-0007",
            "penId": 3,
            "dateOfBirth": "2022-04-01",
            "status": "lactating",
        });
        let cow: CowRecord = serde_json::from_value(json).unwrap();
        assert_eq!(cow.tag_code, "NL-0007");
        assert_eq!(cow.pen_id, Some(3));
    }

    #[test]
    fn page_tolerates_missing_optionals_in_items() {
        let json = serde_json::json!({
            "items": [{"id": 1, "name": "Barn A", "description": null}],
            "total": 1,
            "page": 1,
            "pageSize": 20,
        });
        let page: Page<Area> = serde_json::from_value(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.page_size, 20);
        assert!(!page.is_empty());
    }
}
