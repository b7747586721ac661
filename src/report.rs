//! # Outcome Reporting
//!
//! The pipeline's reporting contract: each task emits at most one terminal
//! [`Outcome`] per feature attempt through a [`ReportSink`]. The sink is the
//! only coupling between the pipeline and its presentation; the CLI binds it
//! to a spinner, tests bind it to a [`MemorySink`] and assert on the stream.

/// Terminal result of one feature attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The feature was configured; the message names it.
    Done(String),
    /// The feature could not be configured (typically a config conflict);
    /// the message names the offending file or manifest field.
    Fail(String),
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Done(msg) | Outcome::Fail(msg) => msg,
        }
    }
}

/// Consumer of the pipeline's outcome stream.
pub trait ReportSink {
    fn report(&mut self, outcome: Outcome);
}

/// Sink that collects outcomes in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    outcomes: Vec<Outcome>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_done()).count()
    }
}

impl ReportSink for MemorySink {
    fn report(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }
}
