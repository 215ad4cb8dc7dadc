//! Scripted responses replayed through the mock network.

use std::time::{Duration, Instant};

use netmock::http::{Headers, PayloadBuffer};
use netmock::{return_http_response, NetworkMock, NetworkResponse, RequestId, ScriptedResponse};

mod common;
use common::{fast_config, RecordingClient, WAIT};

fn headers() -> Headers {
    vec![
        ("content-type".to_string(), "application/json".to_string()),
        ("cache-control".to_string(), "max-age=60".to_string()),
    ]
}

#[tokio::test]
async fn test_data_callback_gets_offset_and_full_length() {
    fast_config();
    let network = NetworkMock::new();
    let id = RequestId::next();
    network.expect_send(return_http_response(
        NetworkResponse::new().with_status(206),
        "{\"k\":1}",
        headers(),
        Duration::from_millis(10),
        id,
        512,
    ));

    let (client, done) = RecordingClient::new();
    let outcome = client.send(&network, "https://example.com/range");
    assert_eq!(outcome.request_id(), id);
    done.wait_timeout(WAIT).await.unwrap();

    client.with_observed(|seen| {
        assert_eq!(seen.chunks, vec![(b"{\"k\":1}".to_vec(), 512, 7)]);
        assert_eq!(seen.headers, headers());
        assert_eq!(seen.responses.len(), 1);
        assert_eq!(seen.responses[0].status(), 206);
        assert_eq!(seen.responses[0].request_id(), id);
    });
}

#[tokio::test]
async fn test_payload_is_appended_and_rewound() {
    fast_config();
    let network = NetworkMock::new();
    let id = RequestId::next();
    network.expect_send(return_http_response(
        NetworkResponse::new().with_status(200),
        "-body",
        Headers::new(),
        Duration::ZERO,
        id,
        0,
    ));

    let buffer = PayloadBuffer::with_contents(b"prefix".to_vec());
    let (client, done) = RecordingClient::new();
    client.send_into(&network, "https://example.com/blob", buffer.payload());
    done.wait_timeout(WAIT).await.unwrap();

    assert_eq!(buffer.contents(), b"prefix-body");
    assert_eq!(buffer.position(), 0);
    client.with_observed(|seen| assert!(seen.chunks.is_empty()));
}

#[tokio::test]
async fn test_send_returns_before_delay_elapses() {
    fast_config();
    let network = NetworkMock::new();
    let delay = Duration::from_millis(150);
    network.expect_send(return_http_response(
        NetworkResponse::new().with_status(200),
        "late",
        Headers::new(),
        delay,
        RequestId::next(),
        0,
    ));

    let (client, done) = RecordingClient::new();
    let started = Instant::now();
    client.send(&network, "https://example.com/slow");
    assert!(started.elapsed() < delay);
    client.with_observed(|seen| assert!(seen.responses.is_empty()));

    done.wait_timeout(WAIT).await.unwrap();
    assert!(started.elapsed() >= delay);
}

#[tokio::test]
async fn test_default_send_serves_repeated_requests() {
    let config = fast_config();
    let network = NetworkMock::new();
    let id = RequestId::next();
    let scripted = ScriptedResponse::new(
        NetworkResponse::new().with_status(200),
        "ok",
        headers(),
        Duration::from_millis(1),
        id,
        0,
    )
    .with_config(&config);
    network.set_default_send(move || scripted.clone().into_action());

    for _ in 0..3 {
        let (client, done) = RecordingClient::new();
        assert_eq!(client.send(&network, "https://example.com/again").request_id(), id);
        done.wait_timeout(WAIT).await.unwrap();
        client.with_observed(|seen| assert_eq!(seen.responses[0].request_id(), id));
    }
    assert_eq!(network.send_count(), 3);
    assert_eq!(network.sent_requests()[2].url(), "https://example.com/again");
}

#[tokio::test]
async fn test_completion_fires_without_body_sink() {
    fast_config();
    let network = NetworkMock::new();
    let id = RequestId::next();
    network.expect_send(return_http_response(
        NetworkResponse::new().with_status(200),
        "dropped",
        headers(),
        Duration::ZERO,
        id,
        0,
    ));

    let (client, done) = RecordingClient::new();
    client.send_without_body_sink(&network, "https://example.com/nowhere");
    done.wait_timeout(WAIT).await.expect("completion never delivered");

    client.with_observed(|seen| {
        assert_eq!(seen.responses.len(), 1);
        assert_eq!(seen.responses[0].status(), 200);
        assert_eq!(seen.responses[0].request_id(), id);
        assert_eq!(seen.headers, headers());
        assert!(seen.chunks.is_empty());
    });
}
