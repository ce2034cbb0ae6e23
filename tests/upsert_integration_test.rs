use cdf_extpipes::{
    ClientConfig, CogniteExtPipes, Credentials, ExtractionPipeline, UpsertMode,
};
use httpmock::prelude::*;
use serde_json::json;

fn client_for(server: &MockServer, mode: UpsertMode) -> CogniteExtPipes {
    let config = ClientConfig::new("test-project", Credentials::ApiKey("secret".into()))
        .with_base_url(server.base_url())
        .with_upsert_mode(mode);
    CogniteExtPipes::new(config).unwrap()
}

fn pipeline(external_id: &str, name: &str) -> ExtractionPipeline {
    ExtractionPipeline {
        external_id: Some(external_id.to_string()),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn upsert_creates_new_pipelines_in_one_call() {
    let server = MockServer::start();

    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes")
            .header("api-key", "secret")
            .json_body(json!({
                "items": [
                    {"externalId": "ep-1", "name": "One"},
                    {"externalId": "ep-2", "name": "Two"}
                ]
            }));
        then.status(200).json_body(json!({
            "items": [
                {"id": 1, "externalId": "ep-1", "name": "One", "createdTime": 1700000000000i64},
                {"id": 2, "externalId": "ep-2", "name": "Two", "createdTime": 1700000000000i64}
            ]
        }));
    });

    let pipelines = client_for(&server, UpsertMode::Update).extraction_pipelines();
    let out = pipelines
        .upsert(&[pipeline("ep-1", "One"), pipeline("ep-2", "Two")])
        .await
        .unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].id, Some(1));
    create.assert();
}

#[tokio::test]
async fn upsert_reroutes_duplicates_to_update() {
    let server = MockServer::start();

    // first create attempt carries both items and is rejected for ep-1
    let create_all = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes")
            .json_body(json!({
                "items": [
                    {"externalId": "ep-1", "name": "One"},
                    {"externalId": "ep-2", "name": "Two"}
                ]
            }));
        then.status(409).json_body(json!({
            "error": {
                "code": 409,
                "message": "Resource already exists",
                "duplicated": [{"externalId": "ep-1"}]
            }
        }));
    });
    // retry creates only ep-2
    let create_retry = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes")
            .json_body(json!({
                "items": [{"externalId": "ep-2", "name": "Two"}]
            }));
        then.status(200).json_body(json!({
            "items": [{"id": 2, "externalId": "ep-2", "name": "Two"}]
        }));
    });
    // ep-1 becomes a patch
    let update = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/update")
            .json_body(json!({
                "items": [
                    {"externalId": "ep-1", "update": {"name": {"set": "One"}}}
                ]
            }));
        then.status(200).json_body(json!({
            "items": [{"id": 1, "externalId": "ep-1", "name": "One"}]
        }));
    });

    let pipelines = client_for(&server, UpsertMode::Update).extraction_pipelines();
    let out = pipelines
        .upsert(&[pipeline("ep-1", "One"), pipeline("ep-2", "Two")])
        .await
        .unwrap();

    // created items first, then updated
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].external_id.as_deref(), Some("ep-2"));
    assert_eq!(out[1].external_id.as_deref(), Some("ep-1"));
    create_all.assert();
    create_retry.assert();
    update.assert();
}

#[tokio::test]
async fn replace_mode_nulls_unset_fields_on_update() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes")
            .json_body(json!({
                "items": [{"externalId": "ep-1", "name": "One"}]
            }));
        then.status(409).json_body(json!({
            "error": {
                "code": 409,
                "message": "Resource already exists",
                "duplicated": [{"externalId": "ep-1"}]
            }
        }));
    });
    let update = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/update")
            .json_body_partial(
                r#"{"items": [{"externalId": "ep-1",
                    "update": {"name": {"set": "One"}, "schedule": {"setNull": true}}}]}"#,
            );
        then.status(200).json_body(json!({
            "items": [{"id": 1, "externalId": "ep-1", "name": "One"}]
        }));
    });

    let pipelines = client_for(&server, UpsertMode::Replace).extraction_pipelines();
    let out = pipelines.upsert(&[pipeline("ep-1", "One")]).await.unwrap();
    assert_eq!(out.len(), 1);
    update.assert();
}

#[tokio::test]
async fn id_only_pipelines_go_straight_to_update() {
    let server = MockServer::start();

    let update = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/update")
            .json_body(json!({
                "items": [
                    {"id": 7, "update": {"description": {"set": "patched"}}}
                ]
            }));
        then.status(200).json_body(json!({
            "items": [{"id": 7, "externalId": "ep-7", "description": "patched"}]
        }));
    });

    let input = ExtractionPipeline {
        id: Some(7),
        description: Some("patched".to_string()),
        ..Default::default()
    };
    let pipelines = client_for(&server, UpsertMode::Update).extraction_pipelines();
    let out = pipelines.upsert(&[input]).await.unwrap();
    assert_eq!(out[0].id, Some(7));
    update.assert();
}
