//! Test helper utilities for misstep unit tests
//!
//! Shared fixtures: a small custom enum tree, a logger that records what it
//! was asked to print, and a response sink that records what was written.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use crate::builder::{Builder, BuilderOptions};
use crate::catcher::{ResponseBody, ResponseSink};
use crate::core_types::enum_tree::{EnumNode, Status};
use crate::logger::{LogLevel, Logger};
use std::sync::{Arc, Mutex};

/// Custom `TEST` category: `TEST:DEFAULT:ERROR` resolves to 418.
pub fn test_enum() -> Vec<EnumNode> {
    vec![EnumNode::new("TEST", "Test error", Status::Code(418)).child(
        EnumNode::new("DEFAULT", "Default test error", Status::Inherit).child(EnumNode::new(
            "ERROR",
            "Uncategorized test error",
            Status::Inherit,
        )),
    )]
}

/// Builder over the defaults with a recording logger attached.
pub fn create_test_builder(options: BuilderOptions) -> (Builder, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::default());
    let builder = Builder::new(options.with_logger(logger.clone()))
        .expect("test builder options should be valid");
    (builder, logger)
}

/// Logger that keeps every message it receives.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn record(&self, level: LogLevel, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

impl Logger for RecordingLogger {
    fn error(&self, message: &str) {
        self.record(LogLevel::Error, message);
    }

    fn warn(&self, message: &str) {
        self.record(LogLevel::Warn, message);
    }

    fn info(&self, message: &str) {
        self.record(LogLevel::Info, message);
    }

    fn verbose(&self, message: &str) {
        self.record(LogLevel::Verbose, message);
    }

    fn debug(&self, message: &str) {
        self.record(LogLevel::Debug, message);
    }

    fn silly(&self, message: &str) {
        self.record(LogLevel::Silly, message);
    }
}

/// Response sink that records the status code and JSON body written to it.
#[derive(Debug, Default)]
pub struct RecordingResponse {
    pub status: Option<u16>,
    pub body: Option<ResponseBody>,
}

impl ResponseSink for RecordingResponse {
    fn status(&mut self, code: u16) -> &mut dyn ResponseSink {
        self.status = Some(code);
        self
    }

    fn json(&mut self, body: &ResponseBody) {
        self.body = Some(body.clone());
    }
}
