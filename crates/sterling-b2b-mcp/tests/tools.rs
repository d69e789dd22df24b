use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use serde_json::{json, Value};
use sterling_b2b::{ConnectionProfile, SterlingB2bClient};
use sterling_b2b_mcp::{GetTradingPartnerByIdParams, SterlingB2bServer};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRADING_PARTNERS: &str = "/B2BAPIs/svc/tradingpartners/";
const COMMUNITIES: &str = "/B2BAPIs/svc/communities/";

fn server_for(mock: &MockServer) -> SterlingB2bServer {
    let profile = ConnectionProfile::new(mock.uri(), "admin", "secret").unwrap();
    SterlingB2bServer::new(SterlingB2bClient::new(profile).unwrap())
}

fn first_text_content(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .find_map(|c| c.as_text().map(|t| t.text.to_string()))
        .unwrap_or_default()
}

fn tool_json(result: &CallToolResult) -> Value {
    assert_ne!(result.is_error, Some(true));
    serde_json::from_str(&first_text_content(result)).unwrap()
}

fn by_id(id: &str) -> Parameters<GetTradingPartnerByIdParams> {
    Parameters(GetTradingPartnerByIdParams {
        trading_partner_id: id.to_string(),
    })
}

#[tokio::test]
async fn test_get_trading_partners_returns_ids() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TRADING_PARTNERS))
        .and(query_param("_range", "0-100"))
        .and(query_param("_include", "community"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "ACME-01", "community": "C1"},
            {"_id": "GLOBEX", "community": "C2"}
        ])))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let result = server.get_trading_partners().await.unwrap();
    assert_eq!(tool_json(&result), json!(["ACME-01", "GLOBEX"]));
}

#[tokio::test]
async fn test_get_trading_partners_with_details() {
    let mock = MockServer::start().await;
    let partners = json!([
        {
            "_id": "ACME-01",
            "community": "C1",
            "emailAddress": "ops@acme.test",
            "username": "acme",
            "phone": "1234567891"
        },
        {"_id": "GLOBEX", "community": "C2"}
    ]);
    Mock::given(method("GET"))
        .and(path(TRADING_PARTNERS))
        .and(query_param("_range", "0-100"))
        .and(query_param("_include", "community,emailAddress,username,phone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(partners.clone()))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let result = server.get_trading_partners_with_details().await.unwrap();
    assert_eq!(tool_json(&result), partners);
}

#[tokio::test]
async fn test_get_trading_partner_by_id() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/B2BAPIs/svc/tradingpartners/ACME-01"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"_id": "ACME-01", "community": "C1"})),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let result = server.get_trading_partner_by_id(by_id("ACME-01")).await.unwrap();
    assert_eq!(tool_json(&result), json!({"_id": "ACME-01", "community": "C1"}));
}

#[tokio::test]
async fn test_get_trading_partner_by_id_not_found_is_null() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/B2BAPIs/svc/tradingpartners/NOPE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/B2BAPIs/svc/tradingpartners/EMPTY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    for id in ["NOPE", "EMPTY"] {
        let result = server.get_trading_partner_by_id(by_id(id)).await.unwrap();
        assert_eq!(tool_json(&result), Value::Null);
    }
}

#[tokio::test]
async fn test_get_trading_partner_by_id_rejects_traversal_without_request() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"_id": "C1"}])))
        .expect(0)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let result = server
        .get_trading_partner_by_id(by_id("../communities/"))
        .await
        .unwrap();
    assert_eq!(tool_json(&result), Value::Null);
    assert!(mock.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_communities_is_idempotent() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COMMUNITIES))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"_id": "C1"}, {"_id": "C2"}])),
        )
        .expect(2)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let first = tool_json(&server.get_communities().await.unwrap());
    let second = tool_json(&server.get_communities().await.unwrap());
    assert_eq!(first, json!(["C1", "C2"]));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_remote_failure_degrades_every_tool() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    assert_eq!(
        tool_json(&server.get_trading_partners().await.unwrap()),
        json!([])
    );
    assert_eq!(
        tool_json(&server.get_trading_partners_with_details().await.unwrap()),
        json!([])
    );
    assert_eq!(
        tool_json(&server.get_trading_partner_by_id(by_id("ACME-01")).await.unwrap()),
        Value::Null
    );
    assert_eq!(tool_json(&server.get_communities().await.unwrap()), json!([]));
}

#[tokio::test]
async fn test_unauthorized_degrades_to_empty() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COMMUNITIES))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    assert!(server.community_ids().await.is_empty());
}
