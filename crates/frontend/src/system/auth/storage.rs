use web_sys::window;

const SESSION_TOKEN_KEY: &str = "auth_session_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Session token left behind by the hosted sign-in page.
pub fn get_session_token() -> Option<String> {
    get_local_storage()?.get_item(SESSION_TOKEN_KEY).ok()?
}

/// Clear the stored session, ending sign-in on next load.
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(SESSION_TOKEN_KEY);
    }
}
