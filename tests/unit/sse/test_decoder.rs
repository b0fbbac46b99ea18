// Unit and property tests for the event stream decoder

use hello_mcp::sse::{decode_sse_events, SseDecoder, SseEvent};
use proptest::prelude::*;

const STREAM: &str = "event: endpoint\ndata: http://localhost:8005/messages?session_id=abc\n\n\
: ping\n\n\
event: message\ndata: {\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{\"text\":\"Hello, Zoë!\"}}\n\n\
: ping\n\n";

#[test]
fn test_decodes_endpoint_then_message() {
    let events = decode_sse_events(STREAM);

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name(), "endpoint");
    assert_eq!(events[0].data, "http://localhost:8005/messages?session_id=abc");
    assert_eq!(events[1].name(), "message");
    assert!(events[1].data.contains("Zoë"));
}

#[test]
fn test_counts_keepalives() {
    let mut decoder = SseDecoder::new();
    decoder.push(STREAM.as_bytes());
    assert_eq!(decoder.comments_seen(), 2);
}

#[test]
fn test_ignores_unknown_fields() {
    let events = decode_sse_events("id: 4\nretry: 100\nfoo: bar\ndata: x\n\n");
    assert_eq!(
        events,
        vec![SseEvent {
            event: None,
            data: "x".to_string()
        }]
    );
}

#[test]
fn test_event_name_without_data_is_dropped() {
    let mut decoder = SseDecoder::new();
    assert!(decoder.push(b"event: endpoint\n\n").is_empty());
    // The stale name must not leak into the next event
    let events = decoder.push(b"data: y\n\n");
    assert_eq!(events[0].name(), "message");
}

proptest! {
    #[test]
    fn prop_chunking_does_not_change_events(cuts in proptest::collection::vec(0usize..STREAM.len(), 0..12)) {
        let bytes = STREAM.as_bytes();
        let mut cuts = cuts;
        cuts.sort_unstable();
        cuts.dedup();

        let mut decoder = SseDecoder::new();
        let mut events = Vec::new();
        let mut start = 0;
        for cut in cuts.into_iter().chain(std::iter::once(bytes.len())) {
            events.extend(decoder.push(&bytes[start..cut]));
            start = cut;
        }

        prop_assert_eq!(events, decode_sse_events(STREAM));
        prop_assert_eq!(decoder.comments_seen(), 2);
    }

    #[test]
    fn prop_single_line_data_round_trips(data in "[^\r\n]{1,64}") {
        let body = format!("data: {}\n\n", data);
        let events = decode_sse_events(&body);
        prop_assert_eq!(events.len(), 1);
        prop_assert_eq!(&events[0].data, &data);
    }
}
