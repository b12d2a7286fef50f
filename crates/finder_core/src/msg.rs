use std::time::Instant;

use crate::{Movie, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The browsing surface was mounted; runs the first discover fetch.
    Started,
    /// User edited the search box (raw text, not yet debounced).
    SearchInputChanged { text: String, now: Instant },
    /// Clock tick that lets the search debouncer settle.
    Tick { now: Instant },
    /// User clicked Load More.
    LoadMoreClicked,
    /// A catalog request finished, successfully or not.
    FetchSettled {
        request_id: RequestId,
        outcome: FetchOutcome,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Result of a catalog request as seen by the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(Vec<Movie>),
    Failed { reason: String },
}
