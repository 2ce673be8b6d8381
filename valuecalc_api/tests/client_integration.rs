use std::time::Duration;

use valuecalc_api::{Client, Error};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_quote_record_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("quote_summary_full.json");

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .and(query_param(
            "modules",
            "financialData,defaultKeyStatistics,summaryDetail,price",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let record = client.get_quote_record("TCS.NS").await.unwrap();

    assert_eq!(record.number(&["currentPrice"]), Some(3500.5));
    assert_eq!(record.number(&["freeCashflow"]), Some(420000000000.0));
}

#[tokio::test]
async fn get_quote_record_provider_not_found() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("quote_summary_not_found.json");

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/NOPE.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_quote_record("NOPE.NS").await;
    assert!(matches!(result, Err(Error::NotFound(t)) if t == "NOPE.NS"));
}

#[tokio::test]
async fn get_quote_record_http_404() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("quote_summary_not_found.json");

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/NOPE.NS"))
        .respond_with(ResponseTemplate::new(404).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_quote_record("NOPE.NS").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn get_quote_record_other_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "quoteSummary": {
                "result": null,
                "error": {"code": "Unauthorized", "description": "Invalid Crumb"}
            }
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_quote_record("TCS.NS").await;
    match result {
        Err(Error::Provider { code, description }) => {
            assert_eq!(code, "Unauthorized");
            assert_eq!(description, "Invalid Crumb");
        }
        other => panic!("expected provider error, got {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn get_quote_record_empty_result_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "quoteSummary": {"result": [], "error": null}
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_quote_record("TCS.NS").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn get_quote_record_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_quote_record("TCS.NS").await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected HTTP status error, got {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn get_quote_record_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_quote_record("TCS.NS").await;
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[tokio::test]
async fn get_quote_record_times_out() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("quote_summary_full.json");

    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(&body)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client =
        Client::with_base_url(&mock_server.uri()).with_timeout(Duration::from_millis(200));
    let result = client.get_quote_record("TCS.NS").await;
    assert!(matches!(result, Err(Error::Timeout(d)) if d == Duration::from_millis(200)));
}

#[tokio::test]
async fn get_quote_record_connection_refused() {
    // Reserve a free port, then release it so nothing is listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = Client::with_base_url(&format!("http://127.0.0.1:{}", port))
        .with_timeout(Duration::from_secs(2));
    let result = client.get_quote_record("TCS.NS").await;
    assert!(matches!(result, Err(Error::RequestFailed)), "got {:?}", result);
}

#[tokio::test]
async fn get_quote_record_unauthorized_is_http_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TCS.NS"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"finance":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#,
        ))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_quote_record("TCS.NS").await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid Crumb"));
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}
