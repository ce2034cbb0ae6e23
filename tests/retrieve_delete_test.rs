use cdf_extpipes::{ClientConfig, CogniteExtPipes, Credentials, ExtPipesError, Item};
use httpmock::prelude::*;
use serde_json::json;

fn client_for(server: &MockServer) -> CogniteExtPipes {
    let config = ClientConfig::new("test-project", Credentials::Token("jwt".into()))
        .with_base_url(server.base_url());
    CogniteExtPipes::new(config).unwrap()
}

#[tokio::test]
async fn retrieve_mixes_ids_and_external_ids() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/byids")
            .header("authorization", "Bearer jwt")
            .json_body(json!({
                "items": [{"id": 7}, {"externalId": "ep-1"}],
                "ignoreUnknownIds": false
            }));
        then.status(200).json_body(json!({
            "items": [
                {"id": 7, "externalId": "ep-7", "name": "Seven"},
                {"id": 1, "externalId": "ep-1", "name": "One"}
            ]
        }));
    });

    let pipelines = client_for(&server).extraction_pipelines();
    let found = pipelines
        .retrieve(&[Item::id(7), Item::external_id("ep-1")], false)
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].id, Some(7));
    mock.assert();
}

#[tokio::test]
async fn retrieve_passes_ignore_unknown_ids() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/byids")
            .json_body(json!({
                "items": [{"externalId": "missing"}],
                "ignoreUnknownIds": true
            }));
        then.status(200).json_body(json!({"items": []}));
    });

    let pipelines = client_for(&server).extraction_pipelines();
    let found = pipelines
        .retrieve(&[Item::external_id("missing")], true)
        .await
        .unwrap();
    assert!(found.is_empty());
    mock.assert();
}

#[tokio::test]
async fn retrieve_with_no_items_makes_no_request() {
    let server = MockServer::start();
    let pipelines = client_for(&server).extraction_pipelines();
    let found = pipelines.retrieve(&[], false).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn delete_echoes_the_deleted_items() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/delete")
            .json_body(json!({
                "items": [{"externalId": "ep-1"}, {"id": 2}],
                "ignoreUnknownIds": true
            }));
        then.status(200).json_body(json!({}));
    });

    let pipelines = client_for(&server).extraction_pipelines();
    let deleted = pipelines
        .delete(&[Item::external_id("ep-1"), Item::id(2)], true)
        .await
        .unwrap();
    assert_eq!(deleted, vec![Item::external_id("ep-1"), Item::id(2)]);
    mock.assert();
}

#[tokio::test]
async fn missing_items_surface_as_api_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/byids");
        then.status(400).json_body(json!({
            "error": {
                "code": 400,
                "message": "Not found",
                "missing": [{"externalId": "nope"}]
            }
        }));
    });

    let pipelines = client_for(&server).extraction_pipelines();
    let err = pipelines
        .retrieve(&[Item::external_id("nope")], false)
        .await
        .unwrap_err();
    match err {
        ExtPipesError::Api {
            code,
            message,
            missing,
            ..
        } => {
            assert_eq!(code, 400);
            assert_eq!(message, "Not found");
            assert_eq!(missing, vec![Item::external_id("nope")]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
