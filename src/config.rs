// Store layout
pub const PARKS_LIST_KEY: &str = "parks_list";
pub const USERS_LIST_KEY: &str = "users_list";

pub fn park_key(id: &str) -> String {
    format!("park:{}", id)
}

pub fn user_key(id: &str) -> String {
    format!("user:{}", id)
}

pub fn nickname_key(nickname: &str) -> String {
    format!("nickname:{}", nickname)
}

// Native server
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

pub fn bind_addr() -> String {
    std::env::var("PARKS_BIND_ADDR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

pub fn seed_on_start() -> bool {
    std::env::var("PARKS_SEED_DATA")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false)
}
