use cdf_extpipes::{ClientConfig, CogniteExtPipes, Credentials, ExtractionPipelineFilter};
use httpmock::prelude::*;
use serde_json::json;

fn client_for(server: &MockServer) -> CogniteExtPipes {
    let config = ClientConfig::new("test-project", Credentials::ApiKey("secret".into()))
        .with_base_url(server.base_url())
        .with_list_limit(2);
    CogniteExtPipes::new(config).unwrap()
}

#[tokio::test]
async fn list_pages_through_cursors_until_exhausted() {
    let server = MockServer::start();

    let page1 = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/list")
            .json_body(json!({"filter": {}, "limit": 2}));
        then.status(200).json_body(json!({
            "items": [
                {"externalId": "ep-1", "name": "One"},
                {"externalId": "ep-2", "name": "Two"}
            ],
            "nextCursor": "c1"
        }));
    });
    let page2 = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/list")
            .json_body(json!({"filter": {}, "limit": 2, "cursor": "c1"}));
        then.status(200).json_body(json!({
            "items": [
                {"externalId": "ep-3", "name": "Three"}
            ]
        }));
    });

    let pipelines = client_for(&server).extraction_pipelines();
    let mut pager = pipelines.list(ExtractionPipelineFilter::default()).unwrap();

    let first = pager.next_page().await.unwrap().unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].external_id.as_deref(), Some("ep-1"));

    let second = pager.next_page().await.unwrap().unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].external_id.as_deref(), Some("ep-3"));

    // no cursor on the last page terminates the pager
    assert!(pager.next_page().await.unwrap().is_none());
    assert!(pager.next_page().await.unwrap().is_none());

    page1.assert();
    page2.assert();
}

#[tokio::test]
async fn list_all_buffers_every_page() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/list")
            .json_body(json!({"filter": {}, "limit": 2}));
        then.status(200).json_body(json!({
            "items": [{"externalId": "ep-1"}, {"externalId": "ep-2"}],
            "nextCursor": "c1"
        }));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/list")
            .json_body(json!({"filter": {}, "limit": 2, "cursor": "c1"}));
        then.status(200)
            .json_body(json!({"items": [{"externalId": "ep-3"}]}));
    });

    let pipelines = client_for(&server).extraction_pipelines();
    let all = pipelines
        .list_all(ExtractionPipelineFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn filter_fields_are_sent_in_camel_case() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/list")
            .json_body(json!({
                "filter": {
                    "externalIdPrefix": "ep-sap",
                    "dataSetIds": [42]
                },
                "limit": 2
            }));
        then.status(200).json_body(json!({"items": []}));
    });

    let filter = ExtractionPipelineFilter {
        external_id_prefix: Some("ep-sap".to_string()),
        data_set_ids: Some(vec![42]),
        ..Default::default()
    };
    let pipelines = client_for(&server).extraction_pipelines();
    let all = pipelines.list_all(filter).await.unwrap();
    assert!(all.is_empty());
    mock.assert();
}

#[tokio::test]
async fn empty_first_page_yields_no_pages() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/projects/test-project/extpipes/list");
        then.status(200).json_body(json!({"items": []}));
    });

    let pipelines = client_for(&server).extraction_pipelines();
    let mut pager = pipelines.list(ExtractionPipelineFilter::default()).unwrap();
    assert!(pager.next_page().await.unwrap().is_none());
}
