use std::sync::Arc;

use finder_core::{Effect, FetchKind, FetchOutcome, Msg};
use finder_engine::{Catalog, EngineCommand, EngineError, EngineEvent, EngineHandle};
use finder_logging::{finder_debug, finder_info, finder_warn};

/// Executes coordinator effects and turns engine completions back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(catalog: Arc<dyn Catalog>) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(catalog)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchDiscover { request_id, page } => {
                    finder_info!("FetchDiscover request_id={} page={}", request_id, page);
                    self.engine.enqueue(EngineCommand::Discover { request_id, page });
                }
                Effect::FetchSearch { request_id, term } => {
                    finder_info!(
                        "FetchSearch request_id={} term_len={} term={:?}",
                        request_id,
                        term.len(),
                        term
                    );
                    self.engine.enqueue(EngineCommand::Search { request_id, term });
                }
                Effect::LogFailure {
                    request_id,
                    kind,
                    reason,
                } => {
                    finder_warn!(
                        "Request {} ({}) failed: {}",
                        request_id,
                        describe(&kind),
                        reason
                    );
                }
                Effect::LogDiscarded { request_id, kind } => {
                    finder_debug!(
                        "Request {} ({}) superseded; response discarded",
                        request_id,
                        describe(&kind)
                    );
                }
            }
        }
    }

    /// Collects every completion that has arrived since the last call.
    pub fn drain_events(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Completed { request_id, result } => {
            let outcome = match result {
                Ok(movies) => {
                    finder_info!("Request {} loaded {} movies", request_id, movies.len());
                    FetchOutcome::Loaded(movies)
                }
                Err(err) => FetchOutcome::Failed {
                    reason: err.to_string(),
                },
            };
            Msg::FetchSettled {
                request_id,
                outcome,
            }
        }
    }
}

fn describe(kind: &FetchKind) -> String {
    match kind {
        FetchKind::Discover { page } => format!("discover page {page}"),
        FetchKind::Search { term } => format!("search {term:?}"),
    }
}
