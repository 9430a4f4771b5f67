// Integration tests for `HostapdClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use wifitriggers_adapter_hostapd::{HostapdClient, HostapdConfig, HostapdError};
use wifitriggers_app::aggregator::StationAggregator;
use wifitriggers_app::ports::{ApReader, StationSocket};
use wifitriggers_domain::error::WifiTriggersError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HostapdClient) {
    let server = MockServer::start().await;
    let client = HostapdClient::new(&HostapdConfig {
        url: server.uri(),
        request_timeout_secs: 5,
    })
    .unwrap();
    (server, client)
}

async fn mount_sockets(server: &MockServer, names: &[&str]) {
    let sockets: Vec<_> = names.iter().map(|name| json!({ "name": name })).collect();
    Mock::given(method("GET"))
        .and(path("/sockets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sockets": sockets })))
        .mount(server)
        .await;
}

async fn mount_clients(server: &MockServer, socket: &str, addrs: &[&str]) {
    let clients: Vec<_> = addrs.iter().map(|addr| json!({ "addr": addr })).collect();
    Mock::given(method("GET"))
        .and(path(format!("/sockets/{socket}/clients")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "clients": clients })))
        .mount(server)
        .await;
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn should_list_sockets() {
    let (server, client) = setup().await;
    mount_sockets(&server, &["wlan0", "wlan1"]).await;

    let sockets = client.sockets(&CancellationToken::new()).await.unwrap();

    assert_eq!(
        sockets,
        [StationSocket::new("wlan0"), StationSocket::new("wlan1")]
    );
}

#[tokio::test]
async fn should_list_stations_of_one_socket() {
    let (server, client) = setup().await;
    mount_clients(&server, "wlan0", &["AA:BB:CC:DD:EE:01", "aa:bb:cc:dd:ee:02"]).await;

    let stations = client
        .stations(&CancellationToken::new(), &StationSocket::new("wlan0"))
        .await
        .unwrap();

    assert_eq!(stations, ["AA:BB:CC:DD:EE:01", "aa:bb:cc:dd:ee:02"]);
}

#[tokio::test]
async fn should_aggregate_clients_across_sockets() {
    let (server, client) = setup().await;
    mount_sockets(&server, &["wlan0", "wlan1"]).await;
    mount_clients(&server, "wlan0", &["aa:bb:cc:dd:ee:01", "aa:bb:cc:dd:ee:02"]).await;
    mount_clients(&server, "wlan1", &["AA:BB:CC:DD:EE:02", "aa:bb:cc:dd:ee:03"]).await;

    let aggregator = StationAggregator::new(client);
    let clients = aggregator
        .connected_clients(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        clients.to_string(),
        "{aa:bb:cc:dd:ee:01, aa:bb:cc:dd:ee:02, aa:bb:cc:dd:ee:03}"
    );
}

#[tokio::test]
async fn should_return_empty_list_for_backend_without_sockets() {
    let (server, client) = setup().await;
    mount_sockets(&server, &[]).await;

    let sockets = client.sockets(&CancellationToken::new()).await.unwrap();

    assert!(sockets.is_empty());
}

// ── Error-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn should_fail_on_server_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/sockets"))
        .respond_with(ResponseTemplate::new(500).set_body_string("hostapd not running"))
        .mount(&server)
        .await;

    let err = client.sockets(&CancellationToken::new()).await.unwrap_err();

    assert!(
        matches!(&err, HostapdError::Status { status: 500, body } if body == "hostapd not running"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn should_fail_on_malformed_body() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/sockets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "interfaces": [] })))
        .mount(&server)
        .await;

    let err = client.sockets(&CancellationToken::new()).await.unwrap_err();

    assert!(matches!(err, HostapdError::Decode(_)));
}

#[tokio::test]
async fn should_fail_whole_fetch_when_one_socket_errors() {
    let (server, client) = setup().await;
    mount_sockets(&server, &["wlan0", "wlan1"]).await;
    mount_clients(&server, "wlan0", &["aa:bb:cc:dd:ee:01"]).await;
    Mock::given(method("GET"))
        .and(path("/sockets/wlan1/clients"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let aggregator = StationAggregator::new(client);
    let err = aggregator
        .connected_clients(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, WifiTriggersError::Backend(_)));
}

#[tokio::test]
async fn should_abort_slow_request_when_canceled() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/sockets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "sockets": [] }))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = client.sockets(&cancel).await.unwrap_err();

    assert!(matches!(err, HostapdError::Canceled));
}
