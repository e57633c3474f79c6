//! End-to-end run tests

use std::fs;

use axum::http::StatusCode;
use camunda_deploy::app::options::AppOptions;
use camunda_deploy::app::run::run;
use camunda_deploy::app::settings::Settings;

use crate::engine::{spawn_engine, MIXED_RESPONSE};

fn settings(url: &str) -> Settings {
    Settings {
        camunda_endpoint_url: Some(url.to_string()),
        deployment_name: Some("invoice".to_string()),
        bpmn_model_folder: Some("models".to_string()),
        bpmn_file_pattern: Some("*.bpmn|*.dmn".to_string()),
        deploy_changed_only: Some("true".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_run_deploys_discovered_models() {
    let (url, captured) = spawn_engine(StatusCode::OK, MIXED_RESPONSE).await;

    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("models")).unwrap();
    fs::write(dir.path().join("models/invoice.bpmn"), "<bpmn/>").unwrap();
    fs::write(dir.path().join("models/approver.dmn"), "<dmn/>").unwrap();
    fs::write(dir.path().join("models/notes.txt"), "skip me").unwrap();

    let options = AppOptions {
        working_dir: dir.path().to_path_buf(),
        settings: settings(&url),
        annotate: false,
    };

    let summary = run(&options).await.unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.updated, 1);

    let requests = captured.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].field_names(),
        vec![
            "deployment-name",
            "deploy-changed-only",
            "models/approver.dmn",
            "models/invoice.bpmn",
        ]
    );
}

#[tokio::test]
async fn test_run_without_url_fails_before_any_request() {
    let (_url, captured) = spawn_engine(StatusCode::OK, "{}").await;

    let options = AppOptions {
        settings: Settings {
            camunda_endpoint_url: None,
            ..settings("")
        },
        ..Default::default()
    };

    let err = run(&options).await.unwrap_err();
    assert!(err.is_configuration_error());
    assert!(captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_run_rejects_unknown_auth_type() {
    let (url, captured) = spawn_engine(StatusCode::OK, "{}").await;

    let options = AppOptions {
        settings: Settings {
            camunda_auth_type: Some("ntlm".to_string()),
            ..settings(&url)
        },
        ..Default::default()
    };

    let err = run(&options).await.unwrap_err();
    assert!(err.is_configuration_error());
    assert!(captured.lock().unwrap().is_empty());
}
