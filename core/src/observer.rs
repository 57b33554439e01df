//! Diagnostic events raised while answering a query.

use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent<'a> {
    /// An unknown query token was replaced by a vocabulary term.
    CorrectionApplied { from: &'a str, to: &'a str },
    /// Synonym expansion added terms to the query.
    QueryExpanded { before: &'a [String], after: &'a BTreeSet<String> },
    /// Nothing was left of the query after stop-word removal.
    EmptyQuery { query: &'a str },
}

/// Sink for [`SearchEvent`]s. Ranking never depends on whether one is attached.
pub trait SearchObserver: Send + Sync {
    fn on_event(&self, event: &SearchEvent<'_>);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_event(&self, event: &SearchEvent<'_>) {
        match event {
            SearchEvent::CorrectionApplied { from, to } => {
                tracing::info!(from, to, "did you mean");
            }
            SearchEvent::QueryExpanded { before, after } => {
                tracing::info!(?before, ?after, "expanded query");
            }
            SearchEvent::EmptyQuery { query } => {
                tracing::info!(query, "query has no searchable terms");
            }
        }
    }
}
