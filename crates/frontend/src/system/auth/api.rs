use crate::shared::api_utils::api_url;
use contracts::system::auth::UserInfo;
use gloo_net::http::Request;

/// Validates a session token against the identity provider and returns the
/// signed-in user.
pub async fn current_user(token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&api_url("/api/auth/me"))
        .header("Authorization", &format!("Bearer {token}"))
        .send()
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<UserInfo>()
        .await
        .map_err(|e| format!("Failed to parse response: {e}"))
}
