//! Login models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// OAuth2 password-flow form posted to `/auth/token`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TokenForm {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_form_requires_credentials() {
        let form = TokenForm {
            username: String::new(),
            password: "Sid1310@".to_string(),
            grant_type: None,
            scope: None,
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_bearer_token_type() {
        let response = TokenResponse::bearer("abc".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["access_token"], "abc");
    }
}
