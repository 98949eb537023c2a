use tracing::info;
use web_common::{LoginRequest, LoginResponse, SignupRequest, UserDto};

use super::ApiClient;
use crate::errors::ApiError;
use crate::transport::{ApiRequest, HttpTransport};

impl<T: HttpTransport> ApiClient<T> {
    /// `POST /auth/login`. On success the token is stored in the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let credentials = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let body = serde_json::to_value(&credentials).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response: LoginResponse = self
            .execute_public(ApiRequest::post("/auth/login").json(body), "Login failed")
            .await?;

        if response.token.trim().is_empty() {
            return Err(ApiError::Decode("login response carried no token".to_string()));
        }
        self.session().sign_in(response.token.clone(), response.user.clone());
        info!(email = %credentials.email, "signed in");
        Ok(response)
    }

    /// `POST /auth/signup`. Does not sign the new user in.
    pub async fn signup(&self, form: &SignupRequest) -> Result<UserDto, ApiError> {
        let body = serde_json::to_value(form).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.execute_public(ApiRequest::post("/auth/signup").json(body), "Signup failed")
            .await
    }

    /// Drops the local credential. The backend keeps no session to revoke.
    pub fn logout(&self) {
        if self.session().sign_out() {
            info!("signed out");
        }
    }
}
