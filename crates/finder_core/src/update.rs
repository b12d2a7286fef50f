use crate::{AppState, Effect, FetchKind, FetchOutcome, Msg, RequestId};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if state.is_started() {
                return (state, Vec::new());
            }
            state.mark_started();
            let page = state.page();
            vec![start_discover(&mut state, page)]
        }
        Msg::SearchInputChanged { text, now } => {
            state.set_search_term(text, now);
            Vec::new()
        }
        Msg::Tick { now } => match state.settle_search_term(now) {
            // An empty term leaves the list exactly as it is.
            Some(term) if !term.is_empty() => {
                let request_id = state.begin_fetch(FetchKind::Search { term: term.clone() });
                vec![Effect::FetchSearch { request_id, term }]
            }
            _ => Vec::new(),
        },
        Msg::LoadMoreClicked => {
            if state.is_loading() {
                return (state, Vec::new());
            }
            let page = state.advance_page();
            vec![start_discover(&mut state, page)]
        }
        Msg::FetchSettled {
            request_id,
            outcome,
        } => settle(&mut state, request_id, outcome),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_discover(state: &mut AppState, page: u32) -> Effect {
    let request_id = state.begin_fetch(FetchKind::Discover { page });
    Effect::FetchDiscover { request_id, page }
}

fn settle(state: &mut AppState, request_id: RequestId, outcome: FetchOutcome) -> Vec<Effect> {
    let Some(kind) = state.settle_fetch(request_id) else {
        return Vec::new();
    };

    match outcome {
        FetchOutcome::Loaded(movies) => {
            if state.is_superseded(request_id) {
                return vec![Effect::LogDiscarded { request_id, kind }];
            }
            match kind {
                FetchKind::Discover { .. } => state.append_discover_page(movies),
                FetchKind::Search { .. } => state.apply_search_result(movies),
            }
            Vec::new()
        }
        FetchOutcome::Failed { reason } => vec![Effect::LogFailure {
            request_id,
            kind,
            reason,
        }],
    }
}
