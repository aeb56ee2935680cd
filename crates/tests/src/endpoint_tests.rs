use axum::{
    extract::{Multipart, Path, Query},
    http::HeaderMap,
    routing::{delete, get, post},
    Json, Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shared_types::{
    ChatRequest, ConversationTurn, ConversationalRequest, KeywordExtractionRequest, KeywordOrigin,
    Role, SymptomKeywordInput, TrendTag, UrgencyLevel,
};
use std::collections::HashMap;

use crate::common;

fn chat_backend() -> Router {
    Router::new()
        .route(
            "/chat",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                Json(json!({
                    "session_id": if common::bearer(&headers).is_some() { "auth-session" } else { "guest-session" },
                    "response": format!("eco: {}", body["message"].as_str().unwrap_or_default()),
                    "timestamp": "2024-05-01T10:00:00",
                    "urgency_level": "high",
                }))
            }),
        )
        .route(
            "/chat/conversational",
            post(|Json(body): Json<Value>| async move {
                let turns = body["conversation_history"].as_array().map(Vec::len).unwrap_or(0);
                Json(json!({
                    "session_id": "conv-1",
                    "response": format!("turnos previos: {turns}"),
                    "timestamp": "2024-05-01T10:00:01",
                    "urgency_level": "critical",
                    "conversation_state": "crisis",
                    "detected_symptoms": [{"symptom_type": "depression", "severity": "severe", "indicators": ["tristeza"]}]
                }))
            }),
        )
        .route(
            "/chat/sessions",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                Json(json!({"sessions": [{"session_id": format!("s-{}", q["user_id"]), "message_count": 4}]}))
            }),
        )
        .route(
            "/chat/history/{session_id}",
            get(|Path(session_id): Path<String>| async move {
                Json(json!({"session_id": session_id, "messages": [{"role": "user", "content": "hola", "timestamp": "2024-05-01T09:00:00"}]}))
            }),
        )
        .route(
            "/symptoms/trends/{user_id}",
            get(
                |Path(user_id): Path<String>, Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({
                        "symptom_progression": {"anxiety": [{"date": "2024-05-01", "severity": "moderate"}]},
                        "severity_trends": {"anxiety": "mejorando"},
                        "improvement_indicators": [format!("{}:{}:{}", user_id, q["days"], q["include_recommendations_effectiveness"])]
                    }))
                },
            ),
        )
}

fn ingest_backend() -> Router {
    Router::new()
        .route(
            "/ingest/upload",
            post(|mut multipart: Multipart| async move {
                let mut fields = serde_json::Map::new();
                while let Some(field) = multipart.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_string();
                    let filename = field.file_name().map(str::to_string);
                    let text = field.text().await.unwrap();
                    fields.insert(name.clone(), json!(text));
                    if let Some(filename) = filename {
                        fields.insert(format!("{name}_filename"), json!(filename));
                    }
                }
                Json(json!({
                    "document_id": 31,
                    "filename": fields["file_filename"],
                    "title": format!(
                        "{}|{}|{}",
                        fields.get("title").and_then(Value::as_str).unwrap_or("-"),
                        fields["user_id"].as_str().unwrap_or_default(),
                        fields["file"].as_str().unwrap_or_default()
                    )
                }))
            }),
        )
        .route(
            "/ingest/keywords/extract",
            post(|Json(body): Json<Value>| async move { Json(json!({"received": body})) }),
        )
        .route(
            "/ingest/keywords/symptoms/upsert",
            post(|Json(body): Json<Value>| async move {
                let count = body["items"].as_array().map(Vec::len).unwrap_or(0);
                Json(json!({"inserted": count, "updated": 0}))
            }),
        )
        .route(
            "/ingest/keywords/symptoms",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let filter = q.get("symptom_type").cloned().unwrap_or_else(|| "all".into());
                Json(json!({"items": [{"id": 1, "symptom_type": filter, "keyword": "insomnio", "weight": 0.8, "source": "doc", "active": true}]}))
            }),
        )
        .route(
            "/ingest/keywords/symptoms/{id}",
            delete(|Path(id): Path<String>| async move { Json(json!({"deleted": id})) }),
        )
}

#[tokio::test]
async fn test_send_message_as_guest_has_no_bearer() {
    let base = common::spawn_backend(chat_backend()).await;
    let (client, _store) = common::test_client(&base);

    let request = ChatRequest {
        message: "me siento mal".into(),
        user_id: "guest".into(),
        session_id: None,
    };
    let response = client.send_message(&request).await.unwrap();

    assert_eq!(response.session_id, "guest-session");
    assert_eq!(response.response, "eco: me siento mal");
    assert_eq!(response.urgency_level, UrgencyLevel::High);
    assert!(!response.is_crisis());
}

#[tokio::test]
async fn test_conversational_sends_history_and_flags_crisis() {
    let base = common::spawn_backend(chat_backend()).await;
    let (client, _store) = common::test_client(&base);

    let request = ConversationalRequest {
        message: "no puedo más".into(),
        user_id: "1".into(),
        session_id: Some("conv-1".into()),
        conversation_history: vec![
            ConversationTurn {
                role: "user".into(),
                content: "hola".into(),
                timestamp: "2024-05-01T09:59:00".into(),
            },
            ConversationTurn {
                role: "assistant".into(),
                content: "hola, ¿cómo estás?".into(),
                timestamp: "2024-05-01T09:59:01".into(),
            },
        ],
    };
    let response = client.send_conversational(&request).await.unwrap();

    assert_eq!(response.response, "turnos previos: 2");
    assert!(response.is_crisis());
    assert_eq!(response.detected_symptoms[0].indicators, vec!["tristeza".to_string()]);
}

#[tokio::test]
async fn test_history_endpoints_pass_ids() {
    let base = common::spawn_backend(chat_backend()).await;
    let (client, store) = common::test_client(&base);
    common::seed_session(&store, "acc", "ref", "ana", Role::User);

    let sessions = client.get_sessions("ana-7").await.unwrap();
    assert_eq!(sessions.sessions[0].session_id, "s-ana-7");
    assert_eq!(sessions.sessions[0].message_count, 4);

    let history = client.get_history("sesión 1").await.unwrap();
    assert_eq!(history.session_id, "sesión 1");
    assert_eq!(history.messages.len(), 1);
}

#[tokio::test]
async fn test_trends_forward_window_and_flag() {
    let base = common::spawn_backend(chat_backend()).await;
    let (client, _store) = common::test_client(&base);

    let trends = client.get_symptom_trends("u1", 7, true).await.unwrap();

    assert_eq!(trends.improvement_indicators, vec!["u1:7:true".to_string()]);
    assert_eq!(trends.severity_trends["anxiety"], TrendTag::Improving);
    assert_eq!(trends.symptom_progression["anxiety"][0].severity.score(), 3.0);
}

#[tokio::test]
async fn test_upload_document_sends_multipart_fields() {
    let base = common::spawn_backend(ingest_backend()).await;
    let (client, _store) = common::test_client(&base);

    let uploaded = client
        .upload_document("u1", Some("Guía de sueño"), "guia.txt", b"dormir bien".to_vec())
        .await
        .unwrap();

    assert_eq!(uploaded.document_id, "31");
    assert_eq!(uploaded.filename.as_deref(), Some("guia.txt"));
    assert_eq!(uploaded.title.as_deref(), Some("Guía de sueño|u1|dormir bien"));
}

#[tokio::test]
async fn test_upload_without_title_omits_field() {
    let base = common::spawn_backend(ingest_backend()).await;
    let (client, _store) = common::test_client(&base);

    let uploaded = client
        .upload_document("u2", None, "notas.md", b"# notas".to_vec())
        .await
        .unwrap();

    assert_eq!(uploaded.title.as_deref(), Some("-|u2|# notas"));
}

#[tokio::test]
async fn test_upload_rejects_empty_file_locally() {
    let (client, _store) = common::test_client("http://127.0.0.1:9/api/v1");
    let err = client.upload_document("u1", None, "vacío.txt", Vec::new()).await.unwrap_err();
    assert_eq!(err.kind, shared_types::AppErrorKind::BadRequest);
    assert_eq!(err.friendly_message(), "El archivo seleccionado está vacío");
}

#[tokio::test]
async fn test_extract_keywords_body_shape() {
    let base = common::spawn_backend(ingest_backend()).await;
    let (client, _store) = common::test_client(&base);

    let echo = client
        .extract_keywords(&KeywordExtractionRequest::from_document("31", 80))
        .await
        .unwrap();

    assert_eq!(echo["received"], json!({"document_id": "31", "top_k": 80}));
}

#[tokio::test]
async fn test_lexicon_roundtrip() {
    let base = common::spawn_backend(ingest_backend()).await;
    let (client, _store) = common::test_client(&base);

    let result = client
        .upsert_symptom_keywords(vec![SymptomKeywordInput {
            keyword: "insomnio".into(),
            symptom_type: "insomnia".into(),
            weight: 0.96,
            source: KeywordOrigin::Doc,
            active: true,
        }])
        .await
        .unwrap();
    assert_eq!(result.inserted, 1);

    let filtered = client.list_symptom_keywords(Some("insomnia")).await.unwrap();
    assert_eq!(filtered.items[0].symptom_type, "insomnia");
    assert_eq!(filtered.items[0].id, "1");

    let unfiltered = client.list_symptom_keywords(None).await.unwrap();
    assert_eq!(unfiltered.items[0].symptom_type, "all");

    let deleted = client.delete_symptom_keyword("1").await.unwrap();
    assert_eq!(deleted["deleted"], "1");
}
