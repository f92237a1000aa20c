use serde::Deserialize;

use platformd_core::{NewPlatform, Platform};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreatePlatformRequest {
    pub name: String,
    pub publisher: String,
    pub cost: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlatformRequest {
    pub name: String,
    pub publisher: String,
    pub cost: String,
}

// -------------------------
// Entity <-> view projections
// -------------------------

pub fn create_request_to_draft(req: CreatePlatformRequest) -> NewPlatform {
    NewPlatform {
        name: req.name,
        publisher: req.publisher,
        cost: req.cost,
    }
}

/// Copy the input view onto an existing entity; the id stays untouched.
pub fn apply_update(req: UpdatePlatformRequest, platform: &mut Platform) {
    platform.name = req.name;
    platform.publisher = req.publisher;
    platform.cost = req.cost;
}

pub fn platform_to_json(platform: &Platform) -> serde_json::Value {
    serde_json::json!({
        "id": platform.id,
        "name": platform.name,
        "publisher": platform.publisher,
        "cost": platform.cost,
    })
}
