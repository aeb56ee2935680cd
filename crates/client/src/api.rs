//! One method per backend endpoint.

use crate::http::ApiClient;
use crate::store::SessionProvider;
use serde_json::Value;
use shared_types::*;
use urlencoding::encode;
use validator::Validate;

impl ApiClient {
    // --- Auth ---

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;
        let response: AuthResponse = self.post_json("/auth/register", request).await?;
        self.store_sign_in(&response, request.email.clone());
        Ok(response)
    }

    pub async fn login(
        &self,
        portal: LoginPortal,
        request: &LoginRequest,
    ) -> Result<AuthResponse, AppError> {
        request.validate()?;
        let response: AuthResponse = self.post_json(portal.path(), request).await?;
        self.store_sign_in(&response, None);
        Ok(response)
    }

    fn store_sign_in(&self, response: &AuthResponse, email: Option<String>) {
        let session = self.session();
        session.set_tokens(&response.access_token, &response.refresh_token);
        session.set_user(&response.user_info(email));
        tracing::info!(
            username = %response.username,
            role = %response.role,
            "signed in"
        );
    }

    /// Revoke the refresh token server-side (best effort) and clear the session.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.session().refresh_token() {
            let body = RefreshRequest { refresh_token };
            if let Err(e) = self.post_json::<_, Value>("/auth/logout", &body).await {
                tracing::debug!(error = %e, "logout request failed; clearing locally");
            }
        }
        self.session().clear();
        tracing::info!("signed out");
    }

    // --- Admin ---

    pub async fn list_roles(&self) -> Result<Vec<RoleRecord>, AppError> {
        self.get_json("/admin/roles", &[]).await
    }

    pub async fn create_role(&self, request: &CreateRoleRequest) -> Result<RoleRecord, AppError> {
        request.validate()?;
        self.post_json("/admin/roles", request).await
    }

    pub async fn list_users(&self) -> Result<Vec<AdminUser>, AppError> {
        self.get_json("/admin/users", &[]).await
    }

    pub async fn assign_user_role(&self, user_id: &str, role_name: &str) -> Result<Value, AppError> {
        let body = AssignRoleRequest {
            user_id: user_id.to_string(),
            role_name: role_name.to_string(),
        };
        self.post_json("/admin/users/assign-role", &body).await
    }

    // --- Chat ---

    pub async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.post_json("/chat", request).await
    }

    pub async fn send_conversational(
        &self,
        request: &ConversationalRequest,
    ) -> Result<ChatResponse, AppError> {
        self.post_json("/chat/conversational", request).await
    }

    pub async fn get_history(&self, session_id: &str) -> Result<ChatHistory, AppError> {
        self.get_json(&format!("/chat/history/{}", encode(session_id)), &[])
            .await
    }

    pub async fn get_sessions(&self, user_id: &str) -> Result<SessionList, AppError> {
        self.get_json("/chat/sessions", &[("user_id", user_id.to_string())])
            .await
    }

    pub async fn get_conversation_summary(
        &self,
        session_id: &str,
        user_id: &str,
    ) -> Result<ConversationSummary, AppError> {
        self.get_json(
            &format!("/chat/conversation-summary/{}", encode(session_id)),
            &[("user_id", user_id.to_string())],
        )
        .await
    }

    /// Every user's exchanges, for the psychologist reports.
    pub async fn get_all_users_history(&self) -> Result<Vec<UserHistoryEntry>, AppError> {
        self.get_json("/chat/history/all", &[]).await
    }

    // --- Symptoms ---

    pub async fn get_system_status(&self) -> Result<SystemStatus, AppError> {
        self.get_json("/symptoms/system-status", &[]).await
    }

    pub async fn get_symptom_trends(
        &self,
        user_id: &str,
        days: u32,
        include_effectiveness: bool,
    ) -> Result<SymptomTrends, AppError> {
        self.get_json(
            &format!("/symptoms/trends/{}", encode(user_id)),
            &[
                ("days", days.to_string()),
                (
                    "include_recommendations_effectiveness",
                    include_effectiveness.to_string(),
                ),
            ],
        )
        .await
    }

    // --- Ingest ---

    pub async fn upload_document(
        &self,
        user_id: &str,
        title: Option<&str>,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, AppError> {
        if bytes.is_empty() {
            return Err(AppError::bad_request("El archivo seleccionado está vacío"));
        }
        tracing::info!(filename, size = bytes.len(), "uploading document");
        self.post_multipart("/ingest/upload", || {
            let part = reqwest::multipart::Part::bytes(bytes.clone()).file_name(filename.to_string());
            let form = reqwest::multipart::Form::new()
                .part("file", part)
                .text("user_id", user_id.to_string());
            match title {
                Some(title) => form.text("title", title.to_string()),
                None => form,
            }
        })
        .await
    }

    pub async fn extract_keywords(
        &self,
        request: &KeywordExtractionRequest,
    ) -> Result<Value, AppError> {
        self.post_json("/ingest/keywords/extract", request).await
    }

    pub async fn list_documents(
        &self,
        limit: u32,
        offset: u32,
        user_id: Option<&str>,
    ) -> Result<Vec<DocumentSummary>, AppError> {
        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(user_id) = user_id {
            query.push(("user_id", user_id.to_string()));
        }
        self.get_json("/ingest/documents", &query).await
    }

    pub async fn get_document(&self, document_id: &str) -> Result<DocumentDetail, AppError> {
        self.get_json(&format!("/ingest/documents/{}", encode(document_id)), &[])
            .await
    }

    pub async fn upsert_symptom_keywords(
        &self,
        items: Vec<SymptomKeywordInput>,
    ) -> Result<UpsertResult, AppError> {
        self.post_json("/ingest/keywords/symptoms/upsert", &UpsertKeywordsRequest { items })
            .await
    }

    pub async fn list_symptom_keywords(
        &self,
        symptom_type: Option<&str>,
    ) -> Result<SymptomKeywordList, AppError> {
        let query: Vec<(&str, String)> = symptom_type
            .filter(|s| !s.is_empty())
            .map(|s| vec![("symptom_type", s.to_string())])
            .unwrap_or_default();
        self.get_json("/ingest/keywords/symptoms", &query).await
    }

    pub async fn delete_symptom_keyword(&self, keyword_id: &str) -> Result<Value, AppError> {
        self.delete_json(&format!("/ingest/keywords/symptoms/{}", encode(keyword_id)))
            .await
    }
}
