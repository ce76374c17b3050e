use reqcall_core::{ClientConfig, Error, RequestExecutor, RequestSpec, Requester};
use serde::Deserialize;
use std::sync::Arc;
use std::thread;
use tests::{CannedClient, FailingClient};

#[derive(Debug, Default, Deserialize, PartialEq)]
struct Message {
    #[serde(default)]
    status_code: u16,
    message: String,
}

fn params() -> RequestSpec {
    RequestSpec::new("GET", "http://127.0.0.1:8080")
        .query("param1", "value1")
        .header("header1", "value1")
}

fn requester(client: &Arc<CannedClient>) -> Requester {
    Requester::new(Some(client.clone()), None, false).expect("injected client never fails")
}

#[test]
fn test_url_parse_failure_sends_nothing() {
    let client = Arc::new(CannedClient::new(200, ""));
    let err = requester(&client)
        .execute(RequestSpec::new("POST", "://"), 200, None, None)
        .unwrap_err();

    assert!(matches!(err, Error::MalformedUrl(_)));
    assert_eq!(err.to_string(), url_error_text("://"));
    assert_eq!(client.calls(), 0);
}

fn url_error_text(input: &str) -> String {
    match RequestSpec::new("GET", input).into_request() {
        Err(Error::MalformedUrl(e)) => e.to_string(),
        other => panic!("expected a URL error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_transport_failure_is_returned_unchanged() {
    let requester = Requester::from_client(FailingClient::new("connection reset by peer"));
    let err = requester.execute(params(), 200, None, None).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(err.to_string(), "connection reset by peer");
}

#[test]
fn test_submitted_request_carries_query_and_headers() {
    let client = Arc::new(CannedClient::new(200, ""));
    let spec = RequestSpec::new("POST", "http://127.0.0.1:8080/items?param1=old&other=x")
        .query("param1", "value1")
        .header("Content-Type", "text/plain")
        .header("content-type", "application/json")
        .header("Accept", "application/json")
        .body_bytes(r#"{"name": "widget"}"#);
    requester(&client).execute(spec, 200, None, None).unwrap();

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    let sent = &requests[0];
    assert_eq!(sent.method, "POST");
    assert_eq!(sent.url, "http://127.0.0.1:8080/items?other=x&param1=value1");
    let content_types: Vec<_> = sent
        .headers
        .iter()
        .filter(|(k, _)| k == "content-type")
        .collect();
    assert_eq!(content_types.len(), 1);
    assert_eq!(sent.header("accept"), Some("application/json"));
    assert_eq!(sent.body, br#"{"name": "widget"}"#);
}

#[test]
fn test_status_mismatch_without_error_target() {
    let client = Arc::new(CannedClient::new(400, r#"{"message": "hello world"}"#));
    let err = requester(&client).execute(params(), 200, None, None).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"{"status_code": 400, "body": "{"message": "hello world"}"}"#
    );
}

#[test]
fn test_status_mismatch_with_invalid_error_body() {
    let client = Arc::new(CannedClient::new(400, ""));
    let mut body_error = Message {
        status_code: 400,
        message: "hello world".to_string(),
    };
    let err = requester(&client)
        .execute(params(), 200, None, Some(&mut body_error))
        .unwrap_err();

    assert!(matches!(err, Error::ErrorBodyDecode { .. }));
    let text = err.to_string();
    assert!(text.starts_with(r#"{"status_code": 400, "body": "", "error": ""#));
    assert!(text.contains("EOF while parsing"));
}

#[test]
fn test_status_mismatch_with_valid_error_body() {
    let client = Arc::new(CannedClient::new(400, r#"{"message": "hello world"}"#));
    let mut body_error = Message::default();
    let err = requester(&client)
        .execute(params(), 200, None, Some(&mut body_error))
        .unwrap_err();

    assert!(matches!(err, Error::UnexpectedStatus { status: 400, .. }));
    assert_eq!(
        err.to_string(),
        r#"{"status_code": 400, "body": "{"message": "hello world"}"}"#
    );
    assert_eq!(body_error.message, "hello world");
}

#[test]
fn test_status_match_with_invalid_body() {
    let client = Arc::new(CannedClient::new(200, ""));
    let mut body = Message::default();
    let err = requester(&client)
        .execute(params(), 200, Some(&mut body), None)
        .unwrap_err();

    assert!(matches!(err, Error::SuccessBodyDecode { status: 200, .. }));
    assert!(err.to_string().contains("EOF while parsing"));
}

#[test]
fn test_status_match_with_valid_body() {
    let client = Arc::new(CannedClient::new(
        200,
        r#"{"status_code": 200, "message": "hello world"}"#,
    ));
    let mut body = Message::default();
    let message = requester(&client)
        .execute(params(), 200, Some(&mut body), None)
        .unwrap();

    assert_eq!(
        message,
        r#"{"status_code": 200, "body": "{"status_code": 200, "message": "hello world"}"}"#
    );
    assert_eq!(
        body,
        Message {
            status_code: 200,
            message: "hello world".to_string(),
        }
    );
}

#[test]
fn test_identical_calls_give_identical_results() {
    let client = Arc::new(CannedClient::new(409, "conflict"));
    let requester = requester(&client);

    let first = requester.execute(params(), 200, None, None).unwrap_err().to_string();
    let second = requester.execute(params(), 200, None, None).unwrap_err().to_string();
    assert_eq!(first, second);

    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
}

#[test]
fn test_concurrent_calls_share_one_handle() {
    let client = Arc::new(CannedClient::new(200, r#"{"message": "hi"}"#));
    let requester = requester(&client);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let requester = requester.clone();
            thread::spawn(move || {
                let mut body = Message::default();
                let spec = RequestSpec::new("GET", "http://127.0.0.1:8080/")
                    .query("worker", i.to_string());
                requester.execute(spec, 200, Some(&mut body), None).map(|_| body)
            })
        })
        .collect();

    for handle in handles {
        let body = handle.join().unwrap().unwrap();
        assert_eq!(body.message, "hi");
    }

    let mut urls: Vec<_> = client.requests().into_iter().map(|r| r.url).collect();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), 8);
}

#[test]
fn test_executor_trait_object_can_be_substituted() {
    struct Fixed;

    impl RequestExecutor for Fixed {
        fn execute(
            &self,
            _spec: RequestSpec,
            expected_status: u16,
            _body: Option<&mut dyn reqcall_core::DecodeTarget>,
            _body_error: Option<&mut dyn reqcall_core::DecodeTarget>,
        ) -> reqcall_core::Result<String> {
            Ok(format!(r#"{{"status_code": {}, "body": ""}}"#, expected_status))
        }
    }

    fn call(executor: &dyn RequestExecutor) -> String {
        executor.execute(params(), 204, None, None).unwrap()
    }

    assert_eq!(call(&Fixed), r#"{"status_code": 204, "body": ""}"#);

    let client = Arc::new(CannedClient::new(204, ""));
    assert_eq!(call(&requester(&client)), r#"{"status_code": 204, "body": ""}"#);
}

#[test]
fn test_factory_flags_ignored_for_injected_client() {
    let client = Arc::new(CannedClient::new(200, "{}"));
    let requester = ClientConfig::new()
        .with_timeout(std::time::Duration::from_nanos(1))
        .with_skip_tls_verify(true)
        .with_client(client.clone())
        .build()
        .unwrap();
    requester.execute(params(), 200, None, None).unwrap();
    assert_eq!(client.calls(), 1);
}
