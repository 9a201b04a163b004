//! Request handling for the command-line shell.
//!
//! Turns each question into the text the user sees. Every request is
//! independent: an empty question gets a warning, a failure gets a single
//! inline error message, and the shell keeps accepting questions either way.

use tracing::debug;

use crate::error::Result;
use crate::output::{format_answer, format_error, OutputFormat, EMPTY_QUESTION_WARNING};
use crate::pipeline::{AnswerOutcome, Pipeline};

/// What the shell should show for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Generated SQL and its result, already formatted.
    Output(String),
    /// The question was empty.
    Warning(String),
    /// The request failed.
    Failure(String),
}

impl Reply {
    /// Returns the text to display.
    pub fn text(&self) -> &str {
        match self {
            Self::Output(text) | Self::Warning(text) | Self::Failure(text) => text,
        }
    }

    /// Returns true if the request failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// Command-line application state.
///
/// The pipeline may be unavailable (for example, no API key). The shell
/// still starts, and each question then reports the startup error.
#[derive(Debug)]
pub struct App {
    pipeline: Result<Pipeline>,
    format: OutputFormat,
}

impl App {
    /// Creates the application from a pipeline (or the error that prevented building one).
    pub fn new(pipeline: Result<Pipeline>, format: OutputFormat) -> Self {
        Self { pipeline, format }
    }

    /// Returns the startup error, if the pipeline could not be built.
    pub fn startup_error(&self) -> Option<String> {
        self.pipeline.as_ref().err().map(format_error)
    }

    /// Handles one question.
    pub async fn respond(&self, question: &str) -> Reply {
        if question.trim().is_empty() {
            return Reply::Warning(EMPTY_QUESTION_WARNING.to_string());
        }

        let pipeline = match &self.pipeline {
            Ok(pipeline) => pipeline,
            Err(e) => return Reply::Failure(format_error(e)),
        };

        match pipeline.answer(question).await {
            Ok(AnswerOutcome::Answered(answer)) => {
                Reply::Output(format_answer(&answer, self.format))
            }
            Ok(AnswerOutcome::EmptyQuestion) => {
                Reply::Warning(EMPTY_QUESTION_WARNING.to_string())
            }
            Err(e) => {
                debug!("{}: {}", e.category(), e);
                Reply::Failure(format_error(&e))
            }
        }
    }
}

/// Returns true if the line asks the interactive loop to stop.
pub fn is_exit_command(line: &str) -> bool {
    matches!(
        line.trim().to_lowercase().as_str(),
        "exit" | "quit" | "/exit" | "/quit"
    )
}
