use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Par de tokens devuelto por register/login/refresh
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct TokenPair {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    #[serde(default)]
    pub data: Option<TokenPair>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    /// Tokens utilizables (access token no vacío)
    pub fn tokens(&self) -> Option<&TokenPair> {
        self.data.as_ref().filter(|t| !t.access_token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_tokens_requires_access_token() {
        let ok: AuthResponse = serde_json::from_str(
            r#"{"data":{"access_token":"a","refresh_token":"r"},"message":"ok"}"#,
        ).unwrap();
        assert_eq!(ok.tokens().map(|t| t.access_token.as_str()), Some("a"));

        let empty: AuthResponse = serde_json::from_str(r#"{"data":{"access_token":""}}"#).unwrap();
        assert!(empty.tokens().is_none());

        let missing: AuthResponse = serde_json::from_str(r#"{"message":"x"}"#).unwrap();
        assert!(missing.tokens().is_none());
    }
}
