//! REST client for the school server.
//!
//! Every call takes the credentials from the session the client was built
//! with; nothing is read from ambient state. The server signals failure two
//! ways (a non-2xx status, or a 200 body carrying `{"error": ...}`), so all
//! response handling funnels through `decode`/`expect_success`, which check
//! both.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::CoreConfig;
use crate::error::ApiError;
use crate::models::{Activity, Grade, IdPlusName, LoginResponse, Message, Person, Report, User};
use crate::session::Session;

/// Server collections a view can bulk-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Info,
    Messages,
    Activities,
    Reports,
    People,
    Grades,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::Info => "info",
            Resource::Messages => "messages",
            Resource::Activities => "activities",
            Resource::Reports => "reports",
            Resource::People => "people",
            Resource::Grades => "grades",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(&body) {
        return Err(ApiError::Application(error));
    }
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    Ok(serde_json::from_str(&body)?)
}

async fn expect_success(response: reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(&body) {
        return Err(ApiError::Application(error));
    }
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMessageRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    pub files: Vec<IdPlusName>,
    pub receiver: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewActivityRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub delivery: String,
    pub expiration: i64,
    pub files: Vec<IdPlusName>,
    pub receiver: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReportRequest {
    pub title: String,
    pub file: IdPlusName,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEditRequest {
    pub name: String,
    pub password: String,
    pub current_password: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    domain: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &CoreConfig, session: Session) -> Self {
        Self {
            http: reqwest::Client::new(),
            domain: config.domain.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.domain, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.url(path))
            .header("Authorization", &self.session.token)
            .header("School", &self.session.school)
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header("Authorization", &self.session.token)
            .header("School", &self.session.school)
    }

    // ===== Login (sessionless) =====

    pub async fn login(
        config: &CoreConfig,
        id: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let response = reqwest::Client::new()
            .post(format!("{}/login", config.domain.trim_end_matches('/')))
            .json(&serde_json::json!({ "id": id, "password": password }))
            .send()
            .await?;
        decode(response).await
    }

    /// Refresh a saved token, returning a fresh one plus the school list.
    pub async fn login_by_token(
        config: &CoreConfig,
        token: &str,
    ) -> Result<LoginResponse, ApiError> {
        let response = reqwest::Client::new()
            .post(format!("{}/loginByToken", config.domain.trim_end_matches('/')))
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await?;
        decode(response).await
    }

    // ===== Bulk fetches =====

    pub async fn fetch_info(&self) -> Result<User, ApiError> {
        decode(self.get("info").send().await?).await
    }

    pub async fn fetch_messages(&self) -> Result<Vec<Message>, ApiError> {
        decode(self.get("messages").send().await?).await
    }

    pub async fn fetch_activities(&self) -> Result<Vec<Activity>, ApiError> {
        decode(self.get("activities").send().await?).await
    }

    pub async fn fetch_reports(&self) -> Result<Vec<Report>, ApiError> {
        decode(self.get("reports").send().await?).await
    }

    pub async fn fetch_people(&self) -> Result<Vec<Person>, ApiError> {
        decode(self.get("people").send().await?).await
    }

    pub async fn fetch_grades(&self) -> Result<Vec<Grade>, ApiError> {
        decode(self.get("grades").send().await?).await
    }

    /// Grade sheet of one student; administrators only.
    pub async fn fetch_grades_for(&self, student_id: &str) -> Result<Vec<Grade>, ApiError> {
        decode(self.get(&format!("grades/{student_id}")).send().await?).await
    }

    // ===== Messages =====

    pub async fn create_message(&self, request: &NewMessageRequest) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::POST, "messages")
            .json(request)
            .send()
            .await?;
        expect_success(response).await
    }

    pub async fn edit_message(
        &self,
        id: &str,
        request: &NewMessageRequest,
    ) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("messages/{id}"))
            .json(request)
            .send()
            .await?;
        expect_success(response).await
    }

    pub async fn delete_message(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("messages/{id}"))
            .send()
            .await?;
        expect_success(response).await
    }

    // ===== Activities =====

    pub async fn create_activity(&self, request: &NewActivityRequest) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::POST, "activities")
            .json(request)
            .send()
            .await?;
        expect_success(response).await
    }

    pub async fn edit_activity(
        &self,
        id: &str,
        request: &NewActivityRequest,
    ) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("activities/{id}"))
            .json(request)
            .send()
            .await?;
        expect_success(response).await
    }

    pub async fn delete_activity(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("activities/{id}"))
            .send()
            .await?;
        expect_success(response).await
    }

    /// Hand in work for an activity (student side).
    pub async fn deliver_activity(
        &self,
        id: &str,
        files: &[IdPlusName],
        comments: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::POST, &format!("activities/deliver/{id}"))
            .json(&serde_json::json!({ "files": files, "comments": comments }))
            .send()
            .await?;
        expect_success(response).await
    }

    /// Grade one student's hand-in (teacher side).
    pub async fn grade_activity(
        &self,
        id: &str,
        student_id: &str,
        result: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("activities/result/{id}/{student_id}"),
            )
            .json(&serde_json::json!({ "result": result }))
            .send()
            .await?;
        expect_success(response).await
    }

    // ===== Reports =====

    pub async fn create_report(&self, request: &NewReportRequest) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::POST, "reports")
            .json(request)
            .send()
            .await?;
        expect_success(response).await
    }

    pub async fn retitle_report(&self, id: &str, new_title: &str) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("reports/{id}"))
            .json(&serde_json::json!({ "newTitle": new_title }))
            .send()
            .await?;
        expect_success(response).await
    }

    pub async fn delete_report(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("reports/{id}"))
            .send()
            .await?;
        expect_success(response).await
    }

    // ===== Grades and profile =====

    pub async fn submit_grades(&self, grades: &[Grade]) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::POST, "grades")
            .json(&grades)
            .send()
            .await?;
        expect_success(response).await
    }

    pub async fn edit_profile(&self, request: &ProfileEditRequest) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::PATCH, "people")
            .json(request)
            .send()
            .await?;
        expect_success(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_wins_over_success_status() {
        // A 200 body carrying {"error"} must be treated as failure.
        let body = r#"{"error": "Not allowed"}"#;
        let parsed: Result<ErrorBody, _> = serde_json::from_str(body);
        assert_eq!(parsed.unwrap().error, "Not allowed");
    }

    #[test]
    fn test_array_body_is_not_an_error() {
        let body = r#"[{"id": "1"}]"#;
        assert!(serde_json::from_str::<ErrorBody>(body).is_err());
    }

    #[test]
    fn test_new_message_request_omits_absent_pdf() {
        let request = NewMessageRequest {
            title: "T".to_string(),
            content: "C".to_string(),
            pdf: None,
            files: vec![],
            receiver: vec!["s1".to_string()],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("pdf").is_none());
        assert_eq!(json["receiver"][0], "s1");
    }

    #[test]
    fn test_activity_request_uses_wire_field_names() {
        let request = NewActivityRequest {
            title: "T".to_string(),
            description: String::new(),
            kind: "Homework".to_string(),
            delivery: "Online".to_string(),
            expiration: 100,
            files: vec![],
            receiver: vec![],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "Homework");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_profile_edit_uses_camel_case() {
        let request = ProfileEditRequest {
            name: "N".to_string(),
            password: "p".to_string(),
            current_password: "c".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["currentPassword"], "c");
    }
}
