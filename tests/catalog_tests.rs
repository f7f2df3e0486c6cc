use hubspot::catalog::contacts::DEFAULT_BATCH_PROPERTIES;
use hubspot::{ClientConfig, HubSpot, HubSpotError};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

fn client(server: &ServerGuard, config: ClientConfig) -> HubSpot {
    HubSpot::new(config.with_base_url(server.url())).expect("valid config")
}

#[test]
fn test_get_by_id_batch_merges_default_properties() {
    let mut server = Server::new();

    // Defaults first, caller duplicates dropped, every value under a repeated key
    let properties: Vec<String> = DEFAULT_BATCH_PROPERTIES
        .iter()
        .chain(["website"].iter())
        .map(|name| format!("property={}", name))
        .collect();
    let query = format!("{}&vid=51&vid=52&hapikey=demo", properties.join("&"));

    let mock = server
        .mock("GET", "/contacts/v1/contact/vids/batch")
        .match_query(Matcher::Exact(query))
        .with_status(200)
        .with_body(r#"{"51": {"vid": 51}, "52": {"vid": 52}}"#)
        .create();

    let response = client(&server, ClientConfig::with_api_key("demo"))
        .contacts()
        .get_by_id_batch(&[51, 52], json!({"property": ["email", "website"]}))
        .expect("batch succeeds");

    mock.assert();
    assert_eq!(response.get("52/vid"), Some(&json!(52)));
}

#[test]
fn test_whitelist_drops_unknown_parameters() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/owners/v2/owners")
        .match_query(Matcher::Exact("email=o%40example.com&hapikey=demo".into()))
        .with_status(200)
        .with_body("[]")
        .create();

    client(&server, ClientConfig::with_api_key("demo"))
        .owners()
        .get(json!({"email": "o@example.com", "limit": 5, "verbose": true}))
        .expect("owners listed");

    mock.assert();
}

#[test]
fn test_path_variables_are_encoded() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/contacts/v1/contact/createOrUpdate/email/new%2Buser%40example.com")
        .match_query(Matcher::Any)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "properties": [{"property": "firstname", "value": "Nova"}]
        })))
        .with_status(200)
        .with_body(r#"{"vid": 61, "isNew": true}"#)
        .create();

    let response = client(&server, ClientConfig::with_access_token("T1"))
        .contacts()
        .create_or_update(
            "new+user@example.com",
            json!({"properties": [{"property": "firstname", "value": "Nova"}]}),
        )
        .expect("upsert succeeds");

    mock.assert();
    assert_eq!(response.get("isNew"), Some(&json!(true)));
}

#[test]
fn test_deal_association_keeps_template_query() {
    let mut server = Server::new();
    let mock = server
        .mock("PUT", "/deals/v1/deal/7/associations/CONTACT")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), "51".into()),
            Matcher::UrlEncoded("hapikey".into(), "demo".into()),
        ]))
        .with_status(204)
        .create();

    client(&server, ClientConfig::with_api_key("demo"))
        .deals()
        .associate(7, "CONTACT", 51)
        .expect("association succeeds");

    mock.assert();
}

#[test]
fn test_list_membership_body() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/contacts/v1/lists/3/add")
        .match_query(Matcher::UrlEncoded("hapikey".into(), "demo".into()))
        .match_body(Matcher::Json(json!({"vids": [51], "emails": ["a@example.com"]})))
        .with_status(200)
        .with_body(r#"{"updated": [51], "discarded": [], "invalidVids": [], "invalidEmails": []}"#)
        .create();

    let response = client(&server, ClientConfig::with_api_key("demo"))
        .lists()
        .add_contacts(3, &[51], &["a@example.com"])
        .expect("contacts added");

    mock.assert();
    assert_eq!(response.get("updated/0"), Some(&json!(51)));
}

#[test]
fn test_timeline_event_defaults_and_refresh() {
    let mut server = Server::new();
    let rejected = server
        .mock("PUT", "/integrations/v1/777/timeline/event")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer T1")
        .with_status(401)
        .with_body(r#"{"status": "error", "message": "expired"}"#)
        .expect(1)
        .create();
    let refresh = server
        .mock("POST", "/oauth/v1/token")
        .match_query(Matcher::Any)
        .match_body(Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()))
        .with_status(200)
        .with_body(r#"{"access_token": "T2", "refresh_token": "R2"}"#)
        .expect(1)
        .create();
    let accepted = server
        .mock("PUT", "/integrations/v1/777/timeline/event")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer T2")
        .match_header("content-type", "application/json")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"eventTypeId": 4242, "email": "bh@example.com"})),
            Matcher::Regex(r#""id":"[0-9a-f-]{36}""#.into()),
            Matcher::Regex(r#""timestamp":\d{13}"#.into()),
        ]))
        .with_status(204)
        .expect(1)
        .create();

    let config = ClientConfig::with_access_token("T1")
        .refresh_token("R1")
        .client_credentials("id", "secret")
        .application_id("777");
    let client = client(&server, config);
    client
        .timelines()
        .create_event(4242, json!({"email": "bh@example.com"}))
        .expect("event created after refresh");

    rejected.assert();
    refresh.assert();
    accepted.assert();
    assert_eq!(client.access_token().as_deref(), Some("T2"));
}

#[test]
fn test_timeline_event_keeps_caller_id() {
    let mut server = Server::new();
    let mock = server
        .mock("PUT", "/integrations/v1/777/timeline/event")
        .match_query(Matcher::UrlEncoded("hapikey".into(), "demo".into()))
        .match_body(Matcher::PartialJson(json!({"id": "evt-1", "timestamp": 1597242491747_i64})))
        .with_status(204)
        .create();

    let config = ClientConfig::with_api_key("demo").application_id("777");
    client(&server, config)
        .timelines()
        .create_event(1, json!({"id": "evt-1", "timestamp": 1597242491747_i64, "objectId": 51}))
        .expect("event created");

    mock.assert();
}

#[test]
fn test_app_scoped_operations_need_application_id() {
    let client = HubSpot::new(ClientConfig::with_api_key("demo")).unwrap();

    let err = client.settings().get(1).unwrap_err();
    assert!(matches!(err, HubSpotError::Config(_)));
    assert!(client.timelines().create_event(1, json!({})).is_err());
}

#[test]
fn test_settings_update_sends_json() {
    let mut server = Server::new();
    let mock = server
        .mock("PUT", "/integrations/v1/777/settings")
        .match_query(Matcher::UrlEncoded("userId".into(), "12".into()))
        .match_body(Matcher::Json(json!({"enabled": true})))
        .with_status(200)
        .with_body(r#"{"enabled": true}"#)
        .create();

    let config = ClientConfig::with_access_token("T1").application_id("777");
    client(&server, config)
        .settings()
        .update(12, json!({"enabled": true}))
        .expect("settings updated");

    mock.assert();
}

#[test]
fn test_exchange_code_stores_tokens() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/oauth/v1/token")
        .match_query(Matcher::Any)
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            Matcher::UrlEncoded("code".into(), "abc".into()),
            Matcher::UrlEncoded("redirect_uri".into(), "https://app.example.com/cb".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"access_token": "T9", "refresh_token": "R9", "expires_in": 1800}"#)
        .create();

    let config = ClientConfig::with_access_token("placeholder")
        .client_credentials("id", "secret")
        .redirect_uri("https://app.example.com/cb");
    let client = client(&server, config);
    let token = client.oauth().exchange_code("abc").expect("code exchanged");

    mock.assert();
    assert_eq!(token.access_token, "T9");
    assert_eq!(client.access_token().as_deref(), Some("T9"));
    assert_eq!(client.refresh_token().as_deref(), Some("R9"));
}
