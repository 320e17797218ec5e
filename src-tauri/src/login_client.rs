use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::{backend_config, AuthenticatedUser};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LoginError {
    #[error("ID and password are required")]
    MissingCredentials,
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("login request failed: {0}")]
    Transport(String),
    #[error("login endpoint answered with HTTP {0}")]
    UnexpectedStatus(u16),
    #[error("login response could not be parsed: {0}")]
    MalformedResponse(String),
    #[error("{0}")]
    InvalidBackendUrl(String),
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    id: &'a str,
    pw: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginUserPayload {
    #[serde(default, alias = "UID")]
    uid: Option<i64>,
    id: String,
    name: String,
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    user: Option<LoginUserPayload>,
    #[serde(default)]
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: String,
}

pub(crate) fn validate_credentials<'a>(
    login_id: &'a str,
    password: &'a str,
) -> Result<(&'a str, &'a str), LoginError> {
    let login_id = login_id.trim();
    if login_id.is_empty() || password.is_empty() {
        return Err(LoginError::MissingCredentials);
    }
    Ok((login_id, password))
}

/// Maps the backend's answer onto the login outcome. A successful answer that names
/// no user yields `Ok(None)`; the bootstrapper decides what that means.
pub(crate) fn interpret_login_response(
    status: u16,
    body: &str,
) -> Result<Option<AuthenticatedUser>, LoginError> {
    match status {
        200..=299 => {
            let response: LoginResponse = serde_json::from_str(body)
                .map_err(|error| LoginError::MalformedResponse(error.to_string()))?;
            if let Some(status) = response.status.as_deref() {
                if status != "success" {
                    return Err(LoginError::InvalidCredentials(status.to_string()));
                }
            }
            Ok(response.user.map(|user| AuthenticatedUser {
                uid: user.uid,
                id: user.id,
                name: user.name,
                role: user.role,
                access_token: response.access_token,
            }))
        }
        401 | 403 => {
            let detail = serde_json::from_str::<ErrorResponse>(body)
                .map(|error| error.detail)
                .unwrap_or_else(|_| "rejected".to_string());
            Err(LoginError::InvalidCredentials(detail))
        }
        other => Err(LoginError::UnexpectedStatus(other)),
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LoginClient {
    http: reqwest::Client,
    login_url: Url,
}

impl LoginClient {
    pub(crate) fn new(backend_url: &str, timeout: Duration) -> Result<Self, LoginError> {
        let login_url =
            backend_config::login_endpoint(backend_url).map_err(LoginError::InvalidBackendUrl)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| LoginError::Transport(error.to_string()))?;
        Ok(Self { http, login_url })
    }

    pub(crate) fn login_url(&self) -> &Url {
        &self.login_url
    }

    pub(crate) async fn login(
        &self,
        login_id: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>, LoginError> {
        let (login_id, password) = validate_credentials(login_id, password)?;
        let response = self
            .http
            .post(self.login_url.clone())
            .json(&LoginRequest {
                id: login_id,
                pw: password,
            })
            .send()
            .await
            .map_err(|error| LoginError::Transport(error.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| LoginError::Transport(error.to_string()))?;
        interpret_login_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_credentials_trims_id_but_not_password() {
        assert_eq!(validate_credentials("  kim ", " pw "), Ok(("kim", " pw ")));
        assert_eq!(
            validate_credentials("   ", "pw"),
            Err(LoginError::MissingCredentials)
        );
        assert_eq!(
            validate_credentials("kim", ""),
            Err(LoginError::MissingCredentials)
        );
    }

    #[test]
    fn success_response_yields_user_with_token() {
        let body = r#"{
            "status": "success",
            "user": {"uid": 3, "id": "kim", "name": "Kim Minji", "role": "staff"},
            "access_token": "jwt-token"
        }"#;
        let user = interpret_login_response(200, body).unwrap().unwrap();
        assert_eq!(user.uid, Some(3));
        assert_eq!(user.id, "kim");
        assert_eq!(user.name, "Kim Minji");
        assert_eq!(user.role.as_deref(), Some("staff"));
        assert_eq!(user.access_token.as_deref(), Some("jwt-token"));
    }

    #[test]
    fn success_response_without_user_yields_none() {
        let body = r#"{"status": "success", "message": "ok"}"#;
        assert_eq!(interpret_login_response(200, body), Ok(None));
    }

    #[test]
    fn non_success_status_field_is_rejected() {
        let body = r#"{"status": "fail"}"#;
        assert_eq!(
            interpret_login_response(200, body),
            Err(LoginError::InvalidCredentials("fail".to_string()))
        );
    }

    #[test]
    fn unauthorized_response_carries_detail() {
        let body = r#"{"detail": "wrong password"}"#;
        assert_eq!(
            interpret_login_response(401, body),
            Err(LoginError::InvalidCredentials("wrong password".to_string()))
        );
        assert_eq!(
            interpret_login_response(403, "<html>"),
            Err(LoginError::InvalidCredentials("rejected".to_string()))
        );
    }

    #[test]
    fn other_statuses_and_garbage_are_errors() {
        assert_eq!(
            interpret_login_response(500, "{}"),
            Err(LoginError::UnexpectedStatus(500))
        );
        assert!(matches!(
            interpret_login_response(200, "not json"),
            Err(LoginError::MalformedResponse(_))
        ));
    }

    #[test]
    fn client_targets_login_endpoint_under_backend() {
        let client = LoginClient::new("http://127.0.0.1:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.login_url().as_str(), "http://127.0.0.1:8000/api/login");
        assert!(matches!(
            LoginClient::new("nonsense", Duration::from_secs(1)),
            Err(LoginError::InvalidBackendUrl(_))
        ));
    }
}
