// tests/relay_forwarding.rs

use simrun::exec::{DECODE_ERROR_PLACEHOLDER, RelayHandle};
use simrun_test_utils::sinks::{FailingSink, RecordingSink};
use simrun_test_utils::{init_tracing, wait_until, with_timeout};
use tokio::io::AsyncWriteExt;

#[tokio::test]
async fn forwards_lines_in_order_until_source_closes() {
    init_tracing();
    let (mut tx, rx) = tokio::io::duplex(1024);
    let sink = RecordingSink::new();
    let relay = RelayHandle::spawn(rx, sink.clone());

    tx.write_all(b"one\ntwo\nthree\n").await.unwrap();
    drop(tx);

    wait_until(|| sink.lines().len() == 3).await;
    with_timeout(relay.stop()).await;

    assert_eq!(sink.lines(), vec!["one\n", "two\n", "three\n"]);
    assert!(sink.flush_count() >= 3);
}

#[tokio::test]
async fn invalid_utf8_line_becomes_placeholder() {
    init_tracing();
    let (mut tx, rx) = tokio::io::duplex(1024);
    let sink = RecordingSink::new();
    let relay = RelayHandle::spawn(rx, sink.clone());

    tx.write_all(b"good line\n\xff\xfe bad\nafter\n").await.unwrap();
    drop(tx);

    wait_until(|| sink.lines().len() == 3).await;
    with_timeout(relay.stop()).await;

    assert_eq!(
        sink.lines(),
        vec!["good line\n", DECODE_ERROR_PLACEHOLDER, "after\n"]
    );
}

#[tokio::test]
async fn stop_waits_for_the_in_flight_read_then_returns() {
    init_tracing();
    let (mut tx, rx) = tokio::io::duplex(1024);
    let sink = RecordingSink::new();
    let relay = RelayHandle::spawn(rx, sink.clone());

    // Let the relay enter its blocking read before requesting a stop.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let stop = tokio::spawn(relay.stop());

    // The stop only takes effect at the next loop iteration, so the
    // relay still forwards the line that completes its in-flight read.
    tx.write_all(b"wake\n").await.unwrap();
    with_timeout(async { stop.await.unwrap() }).await;

    assert_eq!(sink.lines(), vec!["wake\n"]);
}

#[tokio::test]
async fn sibling_relays_do_not_interleave_within_lines() {
    init_tracing();
    let (mut tx_a, rx_a) = tokio::io::duplex(1024);
    let (mut tx_b, rx_b) = tokio::io::duplex(1024);
    let sink_a = RecordingSink::new();
    let sink_b = RecordingSink::new();
    let relay_a = RelayHandle::spawn(rx_a, sink_a.clone());
    let relay_b = RelayHandle::spawn(rx_b, sink_b.clone());

    for i in 0..50 {
        tx_a.write_all(format!("a{i}\n").as_bytes()).await.unwrap();
        tx_b.write_all(format!("b{i}\n").as_bytes()).await.unwrap();
    }
    drop(tx_a);
    drop(tx_b);

    wait_until(|| sink_a.lines().len() == 50 && sink_b.lines().len() == 50).await;
    with_timeout(relay_a.stop()).await;
    with_timeout(relay_b.stop()).await;

    for (i, line) in sink_a.lines().iter().enumerate() {
        assert_eq!(line, &format!("a{i}\n"));
    }
    for (i, line) in sink_b.lines().iter().enumerate() {
        assert_eq!(line, &format!("b{i}\n"));
    }
}

#[tokio::test]
async fn sink_write_failure_ends_the_relay_without_panicking() {
    init_tracing();
    let (mut tx, rx) = tokio::io::duplex(1024);
    let relay = RelayHandle::spawn(rx, FailingSink);

    tx.write_all(b"doomed\n").await.unwrap();
    drop(tx);

    // The relay logs the failure and exits; stop() must still join
    // cleanly.
    with_timeout(relay.stop()).await;
}
