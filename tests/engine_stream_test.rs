//! End-to-end test of the engine wrapper: spawn a real process and check
//! that its chunked, mixed-terminator output arrives as whole lines.

use ps_engine::{parse_line, Engine, EngineEvent};

#[tokio::test]
async fn engine_output_arrives_as_framed_lines() {
    let mut engine = Engine::new("sh");
    engine.arg("-c").arg(
        // Status lines with CR, properties with LF, split across writes.
        "printf 'ID_LENGTH=42.00\\n'; printf 'A:   1.0 V:   1.0\\r'; printf 'A:   2.0 V:   2.0\\r'; printf 'Exiting... (End of file)\\n'",
    );

    let mut handle = match engine.spawn() {
        Ok(h) => h,
        Err(_) => return, // minimal environments without sh
    };

    let mut events = Vec::new();
    while let Some(line) = handle.next_line().await {
        events.push(parse_line(&line));
    }
    let status = handle.wait().await.unwrap();
    assert!(status.success());

    assert_eq!(
        events,
        vec![
            EngineEvent::Property {
                name: "LENGTH".to_string(),
                value: "42.00".to_string(),
            },
            EngineEvent::Position(1.0),
            EngineEvent::Position(2.0),
            EngineEvent::EndOfFile,
        ]
    );
}
