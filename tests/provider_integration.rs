//! Integration tests for the generic node provider
//!
//! A recording fetcher stands in for the network so the tests can check
//! both what the provider asked for and what it made of the answer.

use eyre::Result;
use generic_node_provider::{
    ConfigurationError, FetchedBody, Fetcher, GenericNodeProvider, InitOptions, Node,
    ProviderOptions, RequestOptions, ResponseFormatError,
};
use serde_json::{Value, json};
use std::sync::Mutex;

const TARGET_URL: &str = "https://example.com";

/// Fetcher returning a canned body and recording each request
struct RecordingFetcher {
    body: FetchedBody,
    requests: Mutex<Vec<(String, RequestOptions)>>,
}

impl RecordingFetcher {
    fn new(body: impl Into<FetchedBody>) -> Self {
        Self {
            body: body.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<(String, RequestOptions)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetcher for RecordingFetcher {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<FetchedBody> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), options.clone()));
        Ok(self.body.clone())
    }
}

struct FailingFetcher;

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
struct ConnectionRefused;

impl Fetcher for FailingFetcher {
    async fn fetch(&self, _url: &str, _options: &RequestOptions) -> Result<FetchedBody> {
        Err(ConnectionRefused.into())
    }
}

fn provider_options() -> ProviderOptions {
    ProviderOptions::new()
        .with("foo", "bar")
        .with("propertyPathId", "node.uuid")
        .with("propertyPathIpPrivate", "node.ips.0")
        .with("propertyPathIpPublic", "node.ips.1")
}

fn init_options() -> InitOptions {
    match json!({"bar": "foo", "world": "hello"}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn request_options() -> RequestOptions {
    RequestOptions::default()
        .header("headerName", "headerValue")
        .reject_unauthorized(false)
}

fn response_node_data() -> Value {
    json!([
        {
            "foo": "bar",
            "node": {
                "uuid": "b10b5485-d6f1-47c2-9153-831dda8e1467",
                "ips": ["192.168.0.140", "10.10.0.10"]
            }
        },
        {
            "hello": "world",
            "node": {
                "uuid": "4cd3e814-09b1-4ea6-88f5-9524d45c1eda",
                "ips": ["192.168.0.141", "11.11.0.11"]
            }
        }
    ])
}

fn expected_nodes() -> Value {
    json!([
        {
            "id": "b10b5485-d6f1-47c2-9153-831dda8e1467",
            "ip": {"public": "10.10.0.10", "private": "192.168.0.140"}
        },
        {
            "id": "4cd3e814-09b1-4ea6-88f5-9524d45c1eda",
            "ip": {"public": "11.11.0.11", "private": "192.168.0.141"}
        }
    ])
}

async fn fetch_nodes(provider: &GenericNodeProvider<RecordingFetcher>) -> Result<Vec<Node>> {
    let nodes = provider
        .get_nodes_from_uri(TARGET_URL, &request_options())
        .await?;

    let requests = provider.fetcher().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, TARGET_URL);
    assert_eq!(requests[0].1, request_options());
    Ok(nodes)
}

#[test]
fn test_missing_provider_options() {
    let mut provider = GenericNodeProvider::new(RecordingFetcher::new("[]"));

    let err = provider
        .initialize(ProviderOptions::new(), None)
        .unwrap_err();
    assert!(
        err.to_string()
            .contains("ProviderOptions.propertyPathId required")
    );

    let err = provider
        .initialize(ProviderOptions::new().with("propertyPathId", "foo"), None)
        .unwrap_err();
    assert!(
        err.to_string()
            .contains("ProviderOptions.propertyPathIpPrivate required")
    );
    assert!(!provider.is_initialized());
}

#[test]
fn test_provider_and_init_options_are_stored() {
    let mut provider = GenericNodeProvider::new(RecordingFetcher::new("[]"));
    provider
        .initialize(provider_options(), Some(init_options()))
        .unwrap();

    assert_eq!(provider.provider_options(), Some(&provider_options()));
    assert_eq!(provider.init_options(), Some(&init_options()));

    let paths = provider.property_paths().unwrap();
    assert_eq!(paths.id.tokens(), ["node", "uuid"]);
    assert_eq!(paths.ip_private.tokens(), ["node", "ips", "0"]);
    assert_eq!(paths.ip_public.tokens(), ["node", "ips", "1"]);
}

#[test]
fn test_property_path_no_ip_public() {
    let mut options = provider_options();
    options.remove("propertyPathIpPublic");

    let mut provider = GenericNodeProvider::new(RecordingFetcher::new("[]"));
    provider.initialize(options.clone(), None).unwrap();

    assert_eq!(provider.provider_options(), Some(&options));
    let paths = provider.property_paths().unwrap();
    assert_eq!(paths.id.tokens(), ["node", "uuid"]);
    assert_eq!(paths.ip_private.tokens(), ["node", "ips", "0"]);
    assert!(paths.ip_public.tokens().is_empty());
}

#[tokio::test]
async fn test_bad_json_string_response() {
    let provider = GenericNodeProvider::new(RecordingFetcher::new("foo"));

    let err = fetch_nodes(&provider).await.unwrap_err();
    assert!(err.to_string().contains("Data must parse to a JSON array"));
    assert!(matches!(
        err.downcast_ref::<ResponseFormatError>(),
        Some(ResponseFormatError::Unparseable(_))
    ));
}

#[tokio::test]
async fn test_bad_json_array_response() {
    let provider = GenericNodeProvider::new(RecordingFetcher::new(json!({})));

    let err = fetch_nodes(&provider).await.unwrap_err();
    assert!(err.to_string().contains("Data must be a JSON array"));
}

#[tokio::test]
async fn test_format_error_leaves_provider_usable() {
    let mut provider = GenericNodeProvider::new(RecordingFetcher::new("{}"));
    provider.initialize(provider_options(), None).unwrap();

    assert!(fetch_nodes(&provider).await.is_err());
    assert!(provider.is_initialized());
    assert_eq!(provider.property_paths().unwrap().id.to_string(), "node.uuid");
}

#[tokio::test]
async fn test_records_without_paths_yield_empty_nodes() {
    let mut provider =
        GenericNodeProvider::new(RecordingFetcher::new(json!([{"foo": "bar"}]).to_string()));
    provider.initialize(provider_options(), None).unwrap();

    let nodes = fetch_nodes(&provider).await.unwrap();
    assert_eq!(nodes, vec![Node::default()]);
    assert!(!nodes[0].is_complete());
    assert_eq!(serde_json::to_value(&nodes).unwrap(), json!([{"ip": {}}]));
}

#[tokio::test]
async fn test_json_string_nodes() {
    let mut provider =
        GenericNodeProvider::new(RecordingFetcher::new(response_node_data().to_string()));
    provider.initialize(provider_options(), None).unwrap();

    let nodes = fetch_nodes(&provider).await.unwrap();
    assert_eq!(serde_json::to_value(&nodes).unwrap(), expected_nodes());
}

#[tokio::test]
async fn test_json_array_nodes() {
    let mut provider = GenericNodeProvider::new(RecordingFetcher::new(response_node_data()));
    provider.initialize(provider_options(), None).unwrap();

    let nodes = fetch_nodes(&provider).await.unwrap();
    assert_eq!(serde_json::to_value(&nodes).unwrap(), expected_nodes());
}

#[tokio::test]
async fn test_text_and_parsed_bodies_agree() {
    let records = json!([
        {"node": {"uuid": 1, "ips": ["10.0.0.1"]}},
        {"node": {"uuid": null}},
        "bare-string",
        [1, 2, 3],
        {"node": {"uuid": {"nested": true}, "ips": {"0": "a", "1": "b"}}}
    ]);

    let mut text = GenericNodeProvider::new(RecordingFetcher::new(records.to_string()));
    let mut parsed = GenericNodeProvider::new(RecordingFetcher::new(records));
    text.initialize(provider_options(), None).unwrap();
    parsed.initialize(provider_options(), None).unwrap();

    let from_text = fetch_nodes(&text).await.unwrap();
    let from_parsed = fetch_nodes(&parsed).await.unwrap();
    assert_eq!(from_text, from_parsed);
    assert_eq!(from_text.len(), 5);
}

#[tokio::test]
async fn test_top_level_json() {
    let mut provider = GenericNodeProvider::new(RecordingFetcher::new(response_node_data()));
    provider
        .initialize(provider_options().with("propertyPathId", ""), None)
        .unwrap();

    let nodes = fetch_nodes(&provider).await.unwrap();
    let records = response_node_data();
    let records = records.as_array().unwrap();

    assert_eq!(nodes.len(), 2);
    for (node, record) in nodes.iter().zip(records) {
        assert_eq!(node.id.as_ref(), Some(record));
    }
    assert_eq!(nodes[0].ip.public, Some(json!("10.10.0.10")));
    assert_eq!(nodes[1].ip.private, Some(json!("192.168.0.141")));
}

#[tokio::test]
async fn test_absent_public_path_resolves_whole_record() {
    let mut options = provider_options();
    options.remove("propertyPathIpPublic");

    let mut provider = GenericNodeProvider::new(RecordingFetcher::new(response_node_data()));
    provider.initialize(options, None).unwrap();

    let nodes = fetch_nodes(&provider).await.unwrap();
    assert_eq!(nodes[0].ip.public.as_ref(), response_node_data().get(0));
}

#[tokio::test]
async fn test_fetch_errors_propagate_unchanged() {
    let mut provider = GenericNodeProvider::new(FailingFetcher);
    provider.initialize(provider_options(), None).unwrap();

    let err = provider
        .get_nodes_from_uri(TARGET_URL, &request_options())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "connection refused");
    assert!(err.downcast_ref::<ConnectionRefused>().is_some());
}

#[tokio::test]
async fn test_uninitialized_provider_with_valid_body() {
    let provider = GenericNodeProvider::new(RecordingFetcher::new(response_node_data()));

    let err = fetch_nodes(&provider).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigurationError>(),
        Some(&ConfigurationError::NotInitialized)
    );
}

#[tokio::test]
async fn test_concurrent_calls_share_paths() {
    let mut provider = GenericNodeProvider::new(RecordingFetcher::new(response_node_data()));
    provider.initialize(provider_options(), None).unwrap();

    let options = request_options();
    let (a, b) = tokio::join!(
        provider.get_nodes_from_uri(TARGET_URL, &options),
        provider.get_nodes_from_uri(TARGET_URL, &options)
    );

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(provider.fetcher().requests().len(), 2);
}
