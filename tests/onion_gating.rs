//! Tests for hidden-service gating in the dispatcher.
//!
//! A recording transport stands in for the network so the tests can assert
//! whether a connection attempt would have happened.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use onion_client::transport::{RawResponse, Transport};
use onion_client::{
    Client, ClientConfig, ErrorClassifier, ErrorType, RequestDescriptor, SendError,
    TransportError, ValidationError,
};

const V2_ONION: &str = "http://3g2upl4pq6kufc4m.onion/";
const V3_ONION: &str =
    "http://pg6mmjiyjmcrsslvykfwnntlaru7p5svn6y2ymmju6nubxndf4pscryd.onion/search?q=x";

#[derive(Default)]
struct RecordingTransport {
    calls: AtomicUsize,
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, _request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RawResponse {
            status_code: 200,
            status: "200 OK".to_string(),
            headers: Vec::new(),
            body: String::new(),
        })
    }

    fn is_proxied(&self) -> bool {
        true
    }
}

fn client(proxy_enabled: bool) -> (Client, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let config = ClientConfig {
        proxy_enabled,
        ..Default::default()
    };
    (Client::with_transport(config, transport.clone()), transport)
}

#[tokio::test]
async fn test_onion_without_proxy_makes_no_connection() {
    let (client, transport) = client(false);

    for url in [V2_ONION, V3_ONION] {
        let err = client
            .send(&RequestDescriptor::new("GET", url))
            .await
            .unwrap_err();
        assert!(matches!(err, SendError::OnionRequiresProxy), "url {url}");
    }
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_onion_without_proxy_diagnosis() {
    let (client, _) = client(false);
    let err = client
        .send(&RequestDescriptor::new("GET", V3_ONION))
        .await
        .unwrap_err();

    let diagnosis = ErrorClassifier::default().classify(err, V3_ONION);
    assert_eq!(diagnosis.error_type, ErrorType::Tor);
    assert!(diagnosis.message.contains("require Tor"));
}

#[tokio::test]
async fn test_onion_with_proxy_is_sent() {
    let (client, transport) = client(true);
    let response = client
        .send(&RequestDescriptor::new("GET", V3_ONION))
        .await
        .unwrap();
    assert!(response.is_success());
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_onion_with_bad_scheme_rejected() {
    let (client, transport) = client(true);
    let url = "ftp://3g2upl4pq6kufc4m.onion/";
    let err = client
        .send(&RequestDescriptor::new("GET", url))
        .await
        .unwrap_err();

    match &err {
        SendError::InvalidOnion(ValidationError::UnsupportedScheme(scheme)) => {
            assert_eq!(scheme, "ftp")
        }
        other => panic!("expected InvalidOnion, got {other:?}"),
    }
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);

    let diagnosis = ErrorClassifier::default().classify(err, url);
    assert_eq!(diagnosis.error_type, ErrorType::Validation);
}

#[tokio::test]
async fn test_clearnet_without_proxy_is_sent() {
    let (client, transport) = client(false);
    client
        .send(&RequestDescriptor::new("GET", "https://example.com/"))
        .await
        .unwrap();
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_lookalike_hosts_are_not_gated() {
    let (client, transport) = client(false);
    for url in [
        "http://3G2UPL4PQ6KUFC4M.onion/",
        "http://short.onion/",
        "http://3g2upl4pq6kufc4m.onion.example.com/",
    ] {
        client
            .send(&RequestDescriptor::new("GET", url))
            .await
            .unwrap();
    }
    assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_concurrent_sends_share_client() {
    let (client, transport) = client(true);
    let client = Arc::new(client);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client
                    .send(&RequestDescriptor::new("GET", V3_ONION))
                    .await
                    .map(|r| r.status_code())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 200);
    }
    assert_eq!(transport.calls.load(Ordering::SeqCst), 8);
}
