use spin_sdk::http::Response;

use crate::config::nickname_key;
use crate::core::db::{KvStore, USERS};
use crate::core::errors::ApiError;
use crate::core::helpers::{body_object, from_object, json_response, no_content};
use crate::models::user::{User, UserInput, VisitToggle};

fn find_by_nickname(store: &impl KvStore, nickname: &str) -> Result<User, ApiError> {
    let id: String = store
        .get_json(&nickname_key(nickname))?
        .ok_or(ApiError::NotFound)?;
    USERS.find_by_id(store, &id)?.ok_or(ApiError::NotFound)
}

// POST /users
pub fn create_user(store: &impl KvStore, body: &[u8]) -> Result<Response, ApiError> {
    let input: UserInput = from_object(body_object(body, "user")?)?;
    let user = User::create(input)?;

    let index_key = nickname_key(&user.nickname);
    if store.get(&index_key)?.is_some() {
        return Err(ApiError::Validation(format!(
            "User validation failed: nickname: `{}` is already taken.",
            user.nickname
        )));
    }

    store.set_json(&index_key, &user.id)?;
    USERS.insert(store, &user.id, &user)?;
    tracing::info!(user_id = %user.id, nickname = %user.nickname, "user created");

    Ok(json_response(201, &serde_json::json!({ "user": user }))?)
}

// GET /users
pub fn index_users(store: &impl KvStore) -> Result<Response, ApiError> {
    let users: Vec<User> = USERS.find_all(store)?;
    Ok(json_response(200, &serde_json::json!({ "users": users }))?)
}

// GET /users/:nickname
pub fn show_user(store: &impl KvStore, nickname: &str) -> Result<Response, ApiError> {
    let user = find_by_nickname(store, nickname)?;
    Ok(json_response(200, &serde_json::json!({ "user": user }))?)
}

// PATCH /users/:nickname
//
// Read, flip, write: two concurrent toggles of the same park can lose an
// update or leave a duplicate entry behind.
pub fn toggle_visit(store: &impl KvStore, nickname: &str, body: &[u8]) -> Result<Response, ApiError> {
    let toggle: VisitToggle = from_object(body_object(body, "user")?)?;
    let park_ref = toggle.park_ref()?;

    let mut user = find_by_nickname(store, nickname)?;
    let visit = user.toggle_visit(&park_ref);
    USERS.save(store, &user.id, &user)?;
    tracing::info!(nickname = %user.nickname, park = %park_ref, ?visit, "visit toggled");

    Ok(no_content())
}

// DELETE /users/:id
pub fn delete_user(store: &impl KvStore, id: &str) -> Result<Response, ApiError> {
    let user: User = USERS.find_by_id(store, id)?.ok_or(ApiError::NotFound)?;

    store.delete(&nickname_key(&user.nickname))?;
    USERS.remove(store, &user.id)?;
    tracing::info!(user_id = %user.id, "user deleted");

    Ok(no_content())
}
