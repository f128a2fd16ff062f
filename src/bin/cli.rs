//! Interactive console front end
//!
//! Reads one utterance per line from stdin and prints the assistant's reply.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use symptom_triage::config::TriageConfig;
use symptom_triage::model::ModelBundle;
use symptom_triage::prediction::PredictionEngine;
use symptom_triage::runtime::TriageRuntime;
use symptom_triage::session::MemorySessionStore;
use symptom_triage::state_machine::{replies, Event};
use symptom_triage::vocabulary::Vocabulary;

const CONSOLE_SESSION: &str = "console";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "symptom_triage=warn".into()),
        )
        .with_writer(io::stderr)
        .compact()
        .init();

    let config = TriageConfig::from_env();
    let bundle = ModelBundle::load(&config.model_path, &config.labels_path)?;
    let engine = Arc::new(PredictionEngine::new(Vocabulary::builtin(), bundle)?);
    let runtime = TriageRuntime::new(engine, MemorySessionStore::new(config.session_ttl()));

    let mut out = io::stdout().lock();
    writeln!(out, "{}", replies::to_plain_text(replies::GREETING))?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let reply = runtime.handle_turn(CONSOLE_SESSION, &line)?;
        writeln!(out, "{}", replies::to_plain_text(&reply.reply))?;
        out.flush()?;

        if Event::from_input(&line) == Event::Exit {
            break;
        }
    }

    Ok(())
}
