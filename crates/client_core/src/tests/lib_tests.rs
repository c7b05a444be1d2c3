use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

fn sample_contact(id: &str, name: &str) -> Contact {
    Contact {
        id: ContactId::from(id),
        name: name.to_string(),
        email: format!("{name}@example.com").to_lowercase(),
        phone: "555-0100".to_string(),
        message: None,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

async fn spawn_contact_service(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[derive(Clone)]
struct CreateCapture {
    tx: Arc<Mutex<Option<oneshot::Sender<NewContact>>>>,
}

async fn handle_create(
    State(state): State<CreateCapture>,
    Json(draft): Json<NewContact>,
) -> (StatusCode, Json<Contact>) {
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(draft.clone());
    }
    let message = if draft.message.is_empty() {
        None
    } else {
        Some(draft.message)
    };
    let created = Contact {
        id: ContactId::from("1"),
        name: draft.name,
        email: draft.email,
        phone: draft.phone,
        message,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    };
    (StatusCode::CREATED, Json(created))
}

#[derive(Clone)]
struct DeleteCapture {
    tx: Arc<Mutex<Option<oneshot::Sender<String>>>>,
}

async fn handle_delete(
    Path(id): Path<String>,
    State(state): State<DeleteCapture>,
) -> StatusCode {
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(id);
    }
    StatusCode::OK
}

#[tokio::test]
async fn list_contacts_parses_typed_contacts() {
    let contacts = vec![sample_contact("1", "Ada"), sample_contact("2", "Grace")];
    let payload = contacts.clone();
    let app = Router::new().route("/contacts", get(move || async move { Json(payload) }));
    let base = spawn_contact_service(app).await;

    let listed = ContactClient::new(base)
        .list_contacts()
        .await
        .expect("list contacts");

    assert_eq!(listed, contacts);
}

#[tokio::test]
async fn list_contacts_treats_non_array_body_as_malformed() {
    let app = Router::new().route(
        "/contacts",
        get(|| async { Json(serde_json::json!({ "contacts": [] })) }),
    );
    let base = spawn_contact_service(app).await;

    let err = ContactClient::new(base)
        .list_contacts()
        .await
        .expect_err("object body must not parse");

    match err {
        ClientError::MalformedResponse(reason) => {
            assert!(reason.contains("an object"), "unexpected reason: {reason}")
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn list_contacts_surfaces_http_status() {
    let app = Router::new().route(
        "/contacts",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn_contact_service(app).await;

    let err = ContactClient::new(base)
        .list_contacts()
        .await
        .expect_err("5xx must fail");

    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, None);
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn create_contact_round_trips_draft_and_reply() {
    let (tx, rx) = oneshot::channel();
    let state = CreateCapture {
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/contacts", post(handle_create))
        .with_state(state);
    let base = spawn_contact_service(app).await;

    let draft = NewContact {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "555-0100".to_string(),
        message: String::new(),
    };
    let created = ContactClient::new(base)
        .create_contact(&draft)
        .await
        .expect("create contact");

    let posted = rx.await.expect("captured create payload");
    assert_eq!(posted, draft);
    assert_eq!(created.id, ContactId::from("1"));
    assert_eq!(created.name, "Ada Lovelace");
    assert_eq!(created.message_text(), None);
}

#[tokio::test]
async fn create_contact_preserves_server_error_verbatim() {
    let app = Router::new().route(
        "/contacts",
        post(|| async {
            (
                StatusCode::CONFLICT,
                Json(serde_json::json!({ "error": "Email already exists" })),
            )
        }),
    );
    let base = spawn_contact_service(app).await;

    let draft = NewContact {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        phone: "555-0100".to_string(),
        message: String::new(),
    };
    let err = ContactClient::new(base)
        .create_contact(&draft)
        .await
        .expect_err("conflict must fail");

    assert_eq!(err.server_message(), Some("Email already exists"));
}

#[tokio::test]
async fn create_contact_without_error_field_yields_no_message() {
    let app = Router::new().route(
        "/contacts",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({})),
            )
        }),
    );
    let base = spawn_contact_service(app).await;

    let draft = NewContact {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        phone: "555-0100".to_string(),
        message: String::new(),
    };
    let err = ContactClient::new(base)
        .create_contact(&draft)
        .await
        .expect_err("5xx must fail");

    assert_eq!(err.server_message(), None);
    match err {
        ClientError::Status { status, .. } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_contact_targets_the_id_path() {
    let (tx, rx) = oneshot::channel();
    let state = DeleteCapture {
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/contacts/:id", delete(handle_delete))
        .with_state(state);
    let base = spawn_contact_service(app).await;

    ContactClient::new(base)
        .delete_contact(&ContactId::from("64b1"))
        .await
        .expect("delete contact");

    assert_eq!(rx.await.expect("captured path id"), "64b1");
}

#[tokio::test]
async fn delete_contact_maps_rejection_to_status_error() {
    let app = Router::new().route(
        "/contacts/:id",
        delete(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "Contact not found" })),
            )
        }),
    );
    let base = spawn_contact_service(app).await;

    let err = ContactClient::new(base)
        .delete_contact(&ContactId::from("missing"))
        .await
        .expect_err("404 must fail");

    assert_eq!(err.server_message(), Some("Contact not found"));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let err = ContactClient::new(format!("http://{addr}"))
        .list_contacts()
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err, ClientError::Transport(_)));
}

#[test]
fn constructor_trims_trailing_slashes() {
    let client = ContactClient::new("http://localhost:5000/api/");
    assert_eq!(client.api_url(), "http://localhost:5000/api");
}

#[test]
fn normalize_api_url_accepts_http_and_strips_slash() {
    assert_eq!(
        normalize_api_url(" http://localhost:5000/api/ ").expect("valid url"),
        "http://localhost:5000/api"
    );
}

#[test]
fn normalize_api_url_rejects_garbage_and_odd_schemes() {
    assert!(normalize_api_url("not a url").is_err());
    assert!(normalize_api_url("ftp://example.com/api").is_err());
}
