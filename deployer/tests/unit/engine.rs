//! In-process stand-in for the engine's deployment endpoint

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;

#[derive(Debug, Clone)]
pub struct CapturedField {
    pub name: String,
    pub file_name: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub fields: Vec<CapturedField>,
}

impl CapturedRequest {
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn field(&self, name: &str) -> Option<&CapturedField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

#[derive(Clone)]
struct EngineState {
    captured: Captured,
    status: StatusCode,
    body: String,
}

async fn create_deployment(
    State(state): State<EngineState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let value = field.text().await.unwrap();
        fields.push(CapturedField {
            name,
            file_name,
            value,
        });
    }

    state
        .captured
        .lock()
        .unwrap()
        .push(CapturedRequest { headers, fields });

    (state.status, state.body.clone())
}

/// Start an engine answering every deployment with `status` and `body`.
///
/// Returns the engine REST base URL and the captured requests.
pub async fn spawn_engine(status: StatusCode, body: &str) -> (String, Captured) {
    let captured = Captured::default();
    let state = EngineState {
        captured: captured.clone(),
        status,
        body: body.to_string(),
    };

    let app = Router::new()
        .route("/engine-rest/deployment/create", post(create_deployment))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/engine-rest", addr), captured)
}

/// A response with one new process and one updated decision
pub const MIXED_RESPONSE: &str = r#"{
    "id": "0b7d6c2e-1a2b-11ef-8c3d-0242ac120002",
    "name": "invoice",
    "deploymentTime": "2024-05-20T10:00:00.000+0000",
    "deployedProcessDefinitions": {
        "invoice:1:0b80": {
            "key": "invoice",
            "resource": "models/invoice.bpmn",
            "version": 1,
            "versionTag": null
        }
    },
    "deployedCaseDefinitions": null,
    "deployedDecisionDefinitions": {
        "approver:3:0b81": {
            "key": "approver",
            "resource": "models/approver.dmn",
            "version": 3,
            "versionTag": "v3"
        }
    },
    "deployedDecisionRequirementsDefinitions": null
}"#;
