use spin_sdk::http::Response;

use crate::core::db::{KvStore, PARKS};
use crate::core::errors::ApiError;
use crate::core::helpers::{
    body_object, from_object, json_response, no_content, remove_blanks, require_ownership,
};
use crate::models::park::{Park, ParkInput, ParkPatch};

fn find_park(store: &impl KvStore, id: &str) -> Result<Park, ApiError> {
    PARKS.find_by_id(store, id)?.ok_or(ApiError::NotFound)
}

// GET /parks
pub fn index_parks(store: &impl KvStore) -> Result<Response, ApiError> {
    let parks: Vec<Park> = PARKS.find_all(store)?;
    Ok(json_response(200, &serde_json::json!({ "parks": parks }))?)
}

// GET /parks/:id
pub fn show_park(store: &impl KvStore, id: &str) -> Result<Response, ApiError> {
    let park = find_park(store, id)?;
    Ok(json_response(200, &serde_json::json!({ "park": park }))?)
}

// POST /parks
pub fn create_park(store: &impl KvStore, body: &[u8]) -> Result<Response, ApiError> {
    let input: ParkInput = from_object(body_object(body, "park")?)?;
    let park = Park::create(input)?;

    PARKS.insert(store, &park.id, &park)?;
    tracing::info!(park_id = %park.id, name = %park.name, "park created");

    Ok(json_response(201, &serde_json::json!({ "park": park }))?)
}

// PATCH /parks/:id
pub fn update_park(store: &impl KvStore, id: &str, body: &[u8]) -> Result<Response, ApiError> {
    let mut fields = body_object(body, "park")?;
    remove_blanks(&mut fields);
    // Clients may never reassign ownership
    fields.remove("owner");
    let patch: ParkPatch = from_object(fields)?;

    let mut park = find_park(store, id)?;
    // No caller identity reaches the router, so this only guards owned documents
    require_ownership(None, park.owner())?;

    park.apply(patch);
    PARKS.save(store, &park.id, &park)?;
    tracing::info!(park_id = %park.id, "park updated");

    Ok(no_content())
}

// DELETE /parks/:id
pub fn delete_park(store: &impl KvStore, id: &str) -> Result<Response, ApiError> {
    let park = find_park(store, id)?;
    require_ownership(None, park.owner())?;

    // Visits referencing this park are left in place
    PARKS.remove(store, &park.id)?;
    tracing::info!(park_id = %park.id, "park deleted");

    Ok(no_content())
}
