use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get bearer token from localStorage
pub fn get_auth_token(key: &str) -> Option<String> {
    get_local_storage()?
        .get_item(key)
        .ok()?
        .filter(|token| !token.trim().is_empty())
}

/// Save bearer token to localStorage
pub fn save_auth_token(key: &str, token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(key, token);
    }
}

/// Clear bearer token
pub fn clear_auth_token(key: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(key);
    }
}
