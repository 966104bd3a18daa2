//! Serve command - JSON Lines front end for editors
//!
//! Each stdin line is one message; each stdout line is one reply. Analysis
//! runs on the engine's workers, so results can come back in a different
//! order than they were asked for. Callers match them up by `id`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::thread;
use tracing::{debug, info, warn};

use diction::config::AnalysisConfig;
use diction::engine::{AnalysisEngine, Reply};
use diction::models::{AnalysisRequest, AnalysisResponse};

/// Messages accepted on stdin
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Incoming {
    Analyze(AnalysisRequest),
    Ping,
}

/// Messages written to stdout
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Outgoing {
    Result(AnalysisResponse),
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
        kind: String,
        message: String,
    },
    Pong,
}

impl From<Reply> for Outgoing {
    fn from(reply: Reply) -> Self {
        match reply.result {
            Ok(response) => Outgoing::Result(response),
            Err(e) => Outgoing::Error {
                id: Some(reply.id),
                kind: e.kind().to_string(),
                message: e.to_string(),
            },
        }
    }
}

/// Run the serve loop until stdin closes
pub fn run(config: &AnalysisConfig) -> Result<()> {
    let engine = AnalysisEngine::start(config);
    info!("Serving with {} worker(s)", config.workers);

    let replies = engine.replies().clone();
    let writer = thread::spawn(move || {
        for reply in replies.iter() {
            if let Err(e) = write_message(&Outgoing::from(reply)) {
                warn!("Failed to write reply: {:#}", e);
                break;
            }
        }
    });

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if let Some(immediate) = handle_line(&line, &engine) {
            write_message(&immediate)?;
        }
    }

    debug!("stdin closed, draining outstanding requests");
    for reply in engine.shutdown() {
        write_message(&Outgoing::from(reply))?;
    }
    join_writer(writer);
    Ok(())
}

/// Wait for the reply writer; returns false if it panicked.
fn join_writer(writer: thread::JoinHandle<()>) -> bool {
    match writer.join() {
        Ok(()) => true,
        Err(_) => {
            warn!("Reply writer thread panicked; some replies may be missing");
            false
        }
    }
}

/// Handle one input line.
///
/// Analyze requests go to the engine and are answered later by the writer
/// thread; anything else is answered right away.
fn handle_line(line: &str, engine: &AnalysisEngine) -> Option<Outgoing> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match serde_json::from_str::<Incoming>(line) {
        Ok(Incoming::Ping) => Some(Outgoing::Pong),
        Ok(Incoming::Analyze(request)) => {
            let id = request.id;
            match engine.submit(request) {
                Ok(_) => None,
                Err(e) => Some(Outgoing::Error {
                    id,
                    kind: "EngineClosed".to_string(),
                    message: e.to_string(),
                }),
            }
        }
        Err(e) => {
            debug!("Rejected message: {}", e);
            Some(Outgoing::Error {
                id: None,
                kind: "InvalidMessage".to_string(),
                message: e.to_string(),
            })
        }
    }
}

fn write_message(message: &Outgoing) -> Result<()> {
    let json = serde_json::to_string(message)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AnalysisEngine {
        let config = AnalysisConfig {
            workers: 1,
            ..AnalysisConfig::default()
        };
        AnalysisEngine::start(&config)
    }

    fn to_json(message: &Outgoing) -> serde_json::Value {
        serde_json::to_value(message).unwrap()
    }

    #[test]
    fn test_ping() {
        let engine = engine();
        let reply = handle_line(r#"{"type":"ping"}"#, &engine).unwrap();
        assert_eq!(to_json(&reply), serde_json::json!({"type": "pong"}));
    }

    #[test]
    fn test_malformed_line() {
        let engine = engine();
        let reply = handle_line("{not json", &engine).unwrap();
        let value = to_json(&reply);
        assert_eq!(value["type"], "error");
        assert_eq!(value["kind"], "InvalidMessage");

        let reply = handle_line(r#"{"type":"rewrite"}"#, &engine).unwrap();
        assert_eq!(to_json(&reply)["kind"], "InvalidMessage");
    }

    #[test]
    fn test_writer_panic_reported() {
        assert!(join_writer(thread::spawn(|| {})));
        assert!(!join_writer(thread::spawn(|| panic!("stdout closed"))));
    }

    #[test]
    fn test_blank_line_ignored() {
        assert!(handle_line("   ", &engine()).is_none());
    }

    #[test]
    fn test_analyze_goes_to_engine() {
        let engine = engine();
        let line = r#"{"type":"analyze","id":7,"paragraphArray":["The cat sat.","A dog ran."],"keyArray":["a","b"]}"#;
        assert!(handle_line(line, &engine).is_none());

        let reply = engine.recv().unwrap();
        let value = to_json(&Outgoing::from(reply));
        assert_eq!(value["type"], "result");
        assert_eq!(value["id"], 7);
        assert_eq!(value["paragraphCount"], 2);
        assert_eq!(value["outlierStats"]["0"]["farthestKey"], "b");
    }

    #[test]
    fn test_analysis_error_reply() {
        let engine = engine();
        let line = r#"{"type":"analyze","id":3,"paragraph_array":["a","b"],"key_array":["k"]}"#;
        assert!(handle_line(line, &engine).is_none());

        let value = to_json(&Outgoing::from(engine.recv().unwrap()));
        assert_eq!(value["type"], "error");
        assert_eq!(value["id"], 3);
        assert_eq!(value["kind"], "MismatchedArrays");
    }
}
