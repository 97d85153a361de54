//! Typed view over engine status lines.
//!
//! The engine reports playback position on a rolling status line, announces
//! stream properties as `ID_NAME=value` pairs while loading, and answers
//! queried properties as `ANS_name=value`. Everything else passes through
//! as [`EngineEvent::Other`].

use std::sync::LazyLock;

use regex::Regex;

// Rolling status line, e.g. "A:  12.3 V:  12.3 A-V:  0.000 ..." or the
// audio-only "A:  12.3 (12.2) of 183.0 ..." form.
static STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[AV]: *([0-9]+\.[0-9]+)").expect("valid regex"));

/// One parsed line of engine output.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Periodic playback position report, in seconds.
    Position(f64),
    /// `ID_NAME=value` property announced while the stream loads.
    Property { name: String, value: String },
    /// `ANS_name=value` reply to a queried property.
    Answer { name: String, value: String },
    /// The engine reached the end of the stream.
    EndOfFile,
    /// Any line the shell does not interpret.
    Other(String),
}

/// Classify a single output line.
pub fn parse_line(line: &str) -> EngineEvent {
    if let Some(caps) = STATUS_RE.captures(line) {
        if let Some(secs) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
            return EngineEvent::Position(secs);
        }
    }

    if let Some(rest) = line.strip_prefix("ID_") {
        if let Some((name, value)) = rest.split_once('=') {
            return EngineEvent::Property {
                name: name.to_string(),
                value: value.to_string(),
            };
        }
    }

    if let Some(rest) = line.strip_prefix("ANS_") {
        if let Some((name, value)) = rest.split_once('=') {
            return EngineEvent::Answer {
                name: name.to_string(),
                value: value.to_string(),
            };
        }
    }

    if line.starts_with("Exiting... (End of file)") || line.starts_with("EOF code:") {
        return EngineEvent::EndOfFile;
    }

    EngineEvent::Other(line.to_string())
}
