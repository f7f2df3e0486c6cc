#![cfg(feature = "async")]

use hubspot::{ClientConfig, HubSpot, OperationRequest};
use mockito::{Matcher, Server};
use serde_json::json;

#[test]
fn test_execute_async_yields_one_result() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/owners/v2/owners/7")
        .match_query(Matcher::UrlEncoded("hapikey".into(), "demo".into()))
        .with_status(200)
        .with_body(r#"{"ownerId": 7}"#)
        .create();
    let missing_owner = server
        .mock("GET", "/owners/v2/owners/8")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"status": "error", "message": "Owner not found"}"#)
        .create();

    let config = ClientConfig::with_api_key("demo").with_base_url(server.url());
    let client = HubSpot::new(config).unwrap();
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let response = runtime
        .block_on(client.execute_async(OperationRequest::get("owners/v2/owners/7")))
        .expect("owner fetched");
    let missing = runtime.block_on(client.call_async(|client| client.owners().get_by_id(8)));

    mock.assert();
    missing_owner.assert();
    assert_eq!(response.get("ownerId"), Some(&json!(7)));

    let err = missing.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.api_error().unwrap().message, "Owner not found");
}
