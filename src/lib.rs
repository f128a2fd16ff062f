//! Symptom triage assistant
//!
//! A multi-turn intake dialogue: symptoms are collected from free text,
//! screened for emergencies, and ranked against a trained classifier.

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod emergency;
pub mod extractor;
pub mod model;
pub mod prediction;
pub mod runtime;
pub mod session;
pub mod state_machine;
pub mod vocabulary;
