use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use voxcart::audio::{CaptureSink, SpeechCapture, StdinCapture};
use voxcart::kernel::{CaptureEvent, LoopEvent, SessionId};

async fn next_event(rx: &mut mpsc::Receiver<LoopEvent>) -> (SessionId, CaptureEvent) {
    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("capture event in time")
        .expect("channel open");
    match event {
        LoopEvent::Capture { session, event } => (session, event),
        other => panic!("unexpected loop event {:?}", other),
    }
}

#[tokio::test]
async fn test_line_goes_to_session_active_when_read() {
    let (mut input, source) = tokio::io::duplex(64);
    let (tx, mut rx) = mpsc::channel(16);
    let mut capture = StdinCapture::with_reader(source, CancellationToken::new());

    let first = SessionId::new();
    capture.start(CaptureSink::new(first, tx.clone())).expect("first start");
    assert_eq!(next_event(&mut rx).await, (first, CaptureEvent::SessionStarted));
    // let the reader block on the pending line under the first session
    tokio::time::sleep(Duration::from_millis(20)).await;

    capture.stop();
    let second = SessionId::new();
    capture.start(CaptureSink::new(second, tx)).expect("second start");
    assert_eq!(next_event(&mut rx).await, (second, CaptureEvent::SessionStarted));

    input.write_all(b"take me home\n").await.expect("write line");

    assert_eq!(next_event(&mut rx).await, (second, CaptureEvent::Result("take me home".into())));
}

#[tokio::test]
async fn test_blank_lines_skipped_and_eof_cancels() {
    let (mut input, source) = tokio::io::duplex(64);
    let (tx, mut rx) = mpsc::channel(16);
    let shutdown = CancellationToken::new();
    let mut capture = StdinCapture::with_reader(source, shutdown.clone());

    let session = SessionId::new();
    capture.start(CaptureSink::new(session, tx)).expect("start");
    assert_eq!(next_event(&mut rx).await, (session, CaptureEvent::SessionStarted));

    input.write_all(b"   \ncheckout\n").await.expect("write lines");
    assert_eq!(next_event(&mut rx).await, (session, CaptureEvent::Result("checkout".into())));

    drop(input);
    tokio::time::timeout(Duration::from_secs(5), shutdown.cancelled())
        .await
        .expect("EOF cancels shutdown");
}
