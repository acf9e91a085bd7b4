//! API client
//!
//! Thin reqwest wrapper around the backend endpoints. Every call runs
//! through the [`AuthInterceptor`]; login stores the issued token in
//! the [`SessionStore`] and logout clears it.

use crate::claims::decode_role_hint;
use crate::interceptor::AuthInterceptor;
use crate::session::SessionStore;
use medtrack_shared::types::{
    DoctorMeasurement, DoctorSummary, ErrorBody, LoginRequest, MeasurementResponse,
    NewMeasurementRequest, PatientProfile, RegisterRequest, Role, RosterEntry, TokenResponse,
    UpdateMeasurementRequest, UpdatePatientRequest,
};
use reqwest::{Response, StatusCode};
use thiserror::Error;
use uuid::Uuid;

/// Client-side error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
}

/// Initial dashboard payload, branched on the local role hint
///
/// Which variant gets loaded is a UI decision only; the server applies
/// its own role filter to both calls.
#[derive(Debug)]
pub enum DashboardData {
    Patient(Vec<MeasurementResponse>),
    Doctor(Vec<DoctorMeasurement>),
}

/// API client bound to a base URL and a session
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
    interceptor: AuthInterceptor,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        let interceptor = AuthInterceptor::new(session.clone());
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session,
            interceptor,
        }
    }

    /// The session this client reads its token from
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "Unexpected failure".to_string());
            Err(ClientError::Api { status, message })
        }
    }

    /// Log in and store the issued token in the session
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        let tokens: TokenResponse = Self::parse(response).await?;
        self.session.save(&tokens.token);
        Ok(())
    }

    /// Register a new patient account
    pub async fn register(&self, req: &RegisterRequest) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(req)
            .send()
            .await?;

        // Only the status matters; the body is a confirmation message
        let _: serde_json::Value = Self::parse(response).await?;
        Ok(())
    }

    /// Log out: drop the stored token. Purely client-side; the token
    /// simply stops being sent.
    pub fn logout(&self) {
        self.session.clear();
    }

    /// The locally decoded role, if a token is present
    ///
    /// Non-authoritative; used only to branch data loading.
    pub fn role_hint(&self) -> Option<Role> {
        self.session
            .get()
            .and_then(|token| decode_role_hint(&token))
            .map(|hint| hint.role)
    }

    /// Load the initial dashboard data for the current session,
    /// branching on the local role hint
    pub async fn load_dashboard(&self) -> Result<DashboardData, ClientError> {
        match self.role_hint() {
            Some(Role::Doctor) => Ok(DashboardData::Doctor(self.doctor_measurements().await?)),
            // An unreadable hint falls through to the patient call;
            // the server rejects it if the token is bad anyway
            _ => Ok(DashboardData::Patient(self.my_measurements().await?)),
        }
    }

    /// Public doctor list for the registration form
    pub async fn doctors(&self) -> Result<Vec<DoctorSummary>, ClientError> {
        let response = self.http.get(self.url("/api/doctors")).send().await?;
        Self::parse(response).await
    }

    /// The caller's own profile
    pub async fn my_profile(&self) -> Result<PatientProfile, ClientError> {
        let response = self
            .interceptor
            .intercept(self.http.get(self.url("/api/patients/me")))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Update the caller's profile
    pub async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdatePatientRequest,
    ) -> Result<PatientProfile, ClientError> {
        let response = self
            .interceptor
            .intercept(self.http.put(self.url(&format!("/api/patients/{}", id))))
            .json(req)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Delete the caller's profile and log out
    pub async fn delete_profile(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .interceptor
            .intercept(self.http.delete(self.url(&format!("/api/patients/{}", id))))
            .send()
            .await?;
        let _: serde_json::Value = Self::parse(response).await?;
        self.session.clear();
        Ok(())
    }

    /// The authenticated doctor's patient roster
    pub async fn roster(&self) -> Result<Vec<RosterEntry>, ClientError> {
        let response = self
            .interceptor
            .intercept(self.http.get(self.url("/api/patients/doctor")))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// The caller's own measurements
    pub async fn my_measurements(&self) -> Result<Vec<MeasurementResponse>, ClientError> {
        let response = self
            .interceptor
            .intercept(self.http.get(self.url("/api/measurements")))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Aggregate measurements across the doctor's patients
    pub async fn doctor_measurements(&self) -> Result<Vec<DoctorMeasurement>, ClientError> {
        let response = self
            .interceptor
            .intercept(self.http.get(self.url("/api/measurements/doctor")))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Record a new measurement for the caller
    pub async fn create_measurement(
        &self,
        req: &NewMeasurementRequest,
    ) -> Result<MeasurementResponse, ClientError> {
        let response = self
            .interceptor
            .intercept(self.http.post(self.url("/api/measurements")))
            .json(req)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Update an owned measurement
    pub async fn update_measurement(
        &self,
        id: Uuid,
        req: &UpdateMeasurementRequest,
    ) -> Result<MeasurementResponse, ClientError> {
        let response = self
            .interceptor
            .intercept(self.http.put(self.url(&format!("/api/measurements/{}", id))))
            .json(req)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Delete an owned measurement
    pub async fn delete_measurement(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .interceptor
            .intercept(self.http.delete(self.url(&format!("/api/measurements/{}", id))))
            .send()
            .await?;
        let _: serde_json::Value = Self::parse(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_hint_none_without_token() {
        let client = ApiClient::new("http://localhost:8080", SessionStore::new());
        assert!(client.role_hint().is_none());
    }

    #[test]
    fn test_role_hint_none_for_garbage_token() {
        let session = SessionStore::new();
        session.save("garbage");
        let client = ApiClient::new("http://localhost:8080", session);
        assert!(client.role_hint().is_none());
    }

    #[test]
    fn test_logout_clears_session() {
        let session = SessionStore::new();
        session.save("some-token");
        let client = ApiClient::new("http://localhost:8080", session.clone());

        client.logout();
        assert!(!session.is_authenticated());

        // Idempotent
        client.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("http://localhost:8080", SessionStore::new());
        assert_eq!(client.url("/api/doctors"), "http://localhost:8080/api/doctors");
    }
}
