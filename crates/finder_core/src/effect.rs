use crate::{FetchKind, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchDiscover { request_id: RequestId, page: u32 },
    FetchSearch { request_id: RequestId, term: String },
    LogFailure {
        request_id: RequestId,
        kind: FetchKind,
        reason: String,
    },
    /// A response arrived after a newer search and was not merged.
    LogDiscarded { request_id: RequestId, kind: FetchKind },
}
