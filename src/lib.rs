pub mod config;
pub mod core;
pub mod models;
pub mod parks;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod users;

use spin_sdk::http::{Method, Request, Response};
use tracing::Level;

use crate::core::db::KvStore;
use crate::core::errors::ApiError;
use crate::core::helpers::decode_segment;

/// Routes one request to its handler and renders any failure.
pub fn handle_request(store: &impl KvStore, req: &Request) -> Response {
    match route(store, req) {
        Ok(resp) => resp,
        Err(err) => {
            let level = log_level(&err);
            if level == Level::ERROR {
                tracing::error!(path = %req.path(), error = %err, "request failed");
            } else if level == Level::WARN {
                tracing::warn!(path = %req.path(), error = %err, "validation failed");
            } else {
                tracing::debug!(path = %req.path(), status = err.status(), "request rejected");
            }
            err.into()
        }
    }
}

fn log_level(err: &ApiError) -> Level {
    match err {
        ApiError::Internal(_) => Level::ERROR,
        ApiError::Validation(_) => Level::WARN,
        _ => Level::DEBUG,
    }
}

fn route(store: &impl KvStore, req: &Request) -> Result<Response, ApiError> {
    let path = req.path();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let body = req.body();

    match (req.method(), segments.as_slice()) {
        (Method::Get, ["parks"]) => parks::index_parks(store),
        (Method::Post, ["parks"]) => parks::create_park(store, body),
        (Method::Get, ["parks", id]) => parks::show_park(store, &decode_segment(id)?),
        (Method::Patch, ["parks", id]) => parks::update_park(store, &decode_segment(id)?, body),
        (Method::Delete, ["parks", id]) => parks::delete_park(store, &decode_segment(id)?),
        (Method::Post, ["users"]) => users::create_user(store, body),
        (Method::Get, ["users"]) => users::index_users(store),
        (Method::Get, ["users", nickname]) => users::show_user(store, &decode_segment(nickname)?),
        (Method::Patch, ["users", nickname]) => {
            users::toggle_visit(store, &decode_segment(nickname)?, body)
        }
        (Method::Delete, ["users", id]) => users::delete_user(store, &decode_segment(id)?),
        _ => Err(ApiError::NotFound),
    }
}

// === Spin component entrypoint ===
#[cfg(target_arch = "wasm32")]
#[spin_sdk::http_component]
fn handle(req: Request) -> anyhow::Result<Response> {
    let store = spin_sdk::key_value::Store::open_default()?;
    Ok(handle_request(&store, &req))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::MemoryStore;
    use serde_json::json;

    fn request(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request {
        let mut builder = Request::builder();
        builder.method(method).uri(uri);
        if let Some(body) = body {
            builder
                .header("Content-Type", "application/json")
                .body(body.to_string().into_bytes());
        }
        builder.build()
    }

    #[test]
    fn unknown_route_is_not_found() {
        let store = MemoryStore::new();
        let resp = handle_request(&store, &request(Method::Get, "/trails", None));
        assert_eq!(*resp.status(), 404);

        let resp = handle_request(&store, &request(Method::Put, "/parks/abc", None));
        assert_eq!(*resp.status(), 404);
    }

    #[test]
    fn nickname_segments_are_percent_decoded() {
        let store = MemoryStore::new();
        let create = request(
            Method::Post,
            "/users",
            Some(json!({"user": {"nickname": "trail mix"}})),
        );
        assert_eq!(*handle_request(&store, &create).status(), 201);

        let show = request(Method::Get, "/users/trail%20mix", None);
        let resp = handle_request(&store, &show);
        assert_eq!(*resp.status(), 200);

        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["user"]["nickname"], "trail mix");
    }

    #[test]
    fn validation_failures_log_as_warnings() {
        assert_eq!(log_level(&ApiError::Validation("nickname".into())), Level::WARN);
        assert_eq!(log_level(&ApiError::Internal("disk".into())), Level::ERROR);
        assert_eq!(log_level(&ApiError::NotFound), Level::DEBUG);
        assert_eq!(log_level(&ApiError::BadRequest("json".into())), Level::DEBUG);
    }

    #[test]
    fn malformed_body_is_a_bad_request() {
        let store = MemoryStore::new();
        let mut builder = Request::builder();
        builder.method(Method::Post).uri("/parks").body(b"{".to_vec());

        let resp = handle_request(&store, &builder.build());
        assert_eq!(*resp.status(), 400);
    }
}
