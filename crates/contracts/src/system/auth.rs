use serde::{Deserialize, Serialize};

pub const PROVIDER_GOOGLE: &str = "google.com";
pub const PROVIDER_PHONE: &str = "phone";

/// Identity exposed by the external auth provider. Consumed as a signed-in
/// gate and as a source of default contact values; never written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub uid: String,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    /// Provider ids the session was established with.
    #[serde(default)]
    pub providers: Vec<String>,
}

impl UserInfo {
    pub fn is_google(&self) -> bool {
        self.providers.iter().any(|p| p == PROVIDER_GOOGLE)
    }

    pub fn is_phone(&self) -> bool {
        self.providers.iter().any(|p| p == PROVIDER_PHONE)
    }

    /// Author identity recorded on submitted records: email when known,
    /// uid otherwise.
    pub fn author(&self) -> String {
        self.email.clone().unwrap_or_else(|| self.uid.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_checks() {
        let user = UserInfo {
            uid: "uid-1".into(),
            providers: vec![PROVIDER_GOOGLE.into()],
            ..Default::default()
        };
        assert!(user.is_google());
        assert!(!user.is_phone());
    }

    #[test]
    fn author_prefers_email() {
        let mut user = UserInfo {
            uid: "uid-1".into(),
            ..Default::default()
        };
        assert_eq!(user.author(), "uid-1");
        user.email = Some("p@ex.com".into());
        assert_eq!(user.author(), "p@ex.com");
    }
}
