use std::sync::Once;
use std::time::{Duration, Instant};

use finder_core::{
    update, AppState, Effect, FetchKind, FetchOutcome, Mode, Movie, MovieId, Msg, RequestId,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(finder_logging::initialize_for_tests);
}

fn movies(ids: &[MovieId]) -> Vec<Movie> {
    ids.iter().copied().map(Movie::new).collect()
}

fn ids(state: &AppState) -> Vec<MovieId> {
    state.movies().iter().map(|m| m.id).collect()
}

fn loaded(state: AppState, request_id: RequestId, ids: &[MovieId]) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FetchSettled {
            request_id,
            outcome: FetchOutcome::Loaded(movies(ids)),
        },
    )
}

fn type_and_settle(state: AppState, text: &str, at: Instant) -> (AppState, Vec<Effect>) {
    let (state, effects) = update(
        state,
        Msg::SearchInputChanged {
            text: text.to_string(),
            now: at,
        },
    );
    assert!(effects.is_empty());
    update(
        state,
        Msg::Tick {
            now: at + Duration::from_millis(500),
        },
    )
}

#[test]
fn mount_fetches_first_discover_page() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::Started);

    assert_eq!(
        effects,
        vec![Effect::FetchDiscover {
            request_id: 1,
            page: 1
        }]
    );
    assert!(state.is_loading());
    assert!(state.consume_dirty());

    let (state, effects) = loaded(state, 1, &[1, 2]);
    assert!(effects.is_empty());
    assert_eq!(ids(&state), vec![1, 2]);
    assert!(!state.is_loading());
}

#[test]
fn second_start_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = loaded(state, 1, &[1]);
    let (state, effects) = update(state, Msg::Started);

    assert!(effects.is_empty());
    assert_eq!(ids(&state), vec![1]);
}

#[test]
fn load_more_appends_next_page_in_order() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = loaded(state, 1, &[1, 2]);

    let (state, effects) = update(state, Msg::LoadMoreClicked);
    assert_eq!(state.page(), 2);
    assert_eq!(
        effects,
        vec![Effect::FetchDiscover {
            request_id: 2,
            page: 2
        }]
    );

    let (state, _) = loaded(state, 2, &[3]);
    assert_eq!(ids(&state), vec![1, 2, 3]);
}

#[test]
fn load_more_ignored_while_loading() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    assert!(!state.view().load_more_enabled);

    let (state, effects) = update(state, Msg::LoadMoreClicked);
    assert!(effects.is_empty());
    assert_eq!(state.page(), 1);
}

#[test]
fn search_replaces_discover_results() {
    init_logging();
    let t0 = Instant::now();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = loaded(state, 1, &[1, 2]);
    let (state, _) = update(state, Msg::LoadMoreClicked);
    let (state, _) = loaded(state, 2, &[3]);

    let (state, effects) = type_and_settle(state, "batman", t0);
    assert_eq!(
        effects,
        vec![Effect::FetchSearch {
            request_id: 3,
            term: "batman".to_string()
        }]
    );
    assert_eq!(
        state.mode(),
        &Mode::Searching {
            term: "batman".to_string()
        }
    );

    let (state, _) = loaded(state, 3, &[9]);
    assert_eq!(ids(&state), vec![9]);
}

#[test]
fn clearing_search_box_keeps_current_list() {
    init_logging();
    let t0 = Instant::now();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = loaded(state, 1, &[1, 2]);
    let (state, _) = type_and_settle(state, "batman", t0);
    let (state, _) = loaded(state, 2, &[9]);

    let (state, effects) = type_and_settle(state, "", t0 + Duration::from_secs(2));
    assert!(effects.is_empty());
    assert_eq!(state.mode(), &Mode::Browsing);
    assert_eq!(state.debounced_search_term(), "");
    assert_eq!(ids(&state), vec![9]);
    assert!(!state.is_loading());
}

#[test]
fn intermediate_keystrokes_do_not_search() {
    init_logging();
    let t0 = Instant::now();
    let ms = Duration::from_millis;
    let mut state = AppState::new();
    for (offset, text) in [(0, "b"), (150, "ba"), (300, "bat")] {
        let (next, effects) = update(
            state,
            Msg::SearchInputChanged {
                text: text.to_string(),
                now: t0 + ms(offset),
            },
        );
        assert!(effects.is_empty());
        let (next, effects) = update(
            next,
            Msg::Tick {
                now: t0 + ms(offset + 100),
            },
        );
        assert!(effects.is_empty());
        state = next;
    }

    assert_eq!(state.search_term(), "bat");
    assert_eq!(state.debounced_search_term(), "");

    let (state, effects) = update(state, Msg::Tick { now: t0 + ms(800) });
    assert_eq!(
        effects,
        vec![Effect::FetchSearch {
            request_id: 1,
            term: "bat".to_string()
        }]
    );
    assert_eq!(state.debounced_search_term(), "bat");
}

#[test]
fn settling_on_same_term_does_not_refetch() {
    init_logging();
    let t0 = Instant::now();
    let (state, effects) = type_and_settle(AppState::new(), "alien", t0);
    assert_eq!(effects.len(), 1);
    let (state, _) = loaded(state, 1, &[4]);

    // Edit and revert within the window: the settled value is unchanged.
    let t1 = t0 + Duration::from_secs(1);
    let (state, _) = update(
        state,
        Msg::SearchInputChanged {
            text: "alie".to_string(),
            now: t1,
        },
    );
    let (state, effects) = type_and_settle(state, "alien", t1 + Duration::from_millis(100));
    assert!(effects.is_empty());
    assert_eq!(ids(&state), vec![4]);
}

#[test]
fn typing_updates_search_term_immediately() {
    init_logging();
    let (mut state, _) = update(
        AppState::new(),
        Msg::SearchInputChanged {
            text: "dune".to_string(),
            now: Instant::now(),
        },
    );

    assert!(state.consume_dirty());
    let view = state.view();
    assert_eq!(view.search_term, "dune");
    assert_eq!(view.mode, Mode::Browsing);
    assert!(state.debounce_deadline().is_some());
}

#[test]
fn load_more_during_search_appends_discover_page() {
    init_logging();
    let t0 = Instant::now();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = loaded(state, 1, &[1]);
    let (state, _) = type_and_settle(state, "heat", t0);
    let (state, _) = loaded(state, 2, &[7]);

    let (state, effects) = update(state, Msg::LoadMoreClicked);
    assert_eq!(
        effects,
        vec![Effect::FetchDiscover {
            request_id: 3,
            page: 2
        }]
    );
    let (state, _) = loaded(state, 3, &[20, 21]);
    assert_eq!(ids(&state), vec![7, 20, 21]);
    assert!(matches!(state.mode(), Mode::Searching { .. }));
}

#[test]
fn in_flight_requests_are_listed_in_issue_order() {
    init_logging();
    let t0 = Instant::now();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = type_and_settle(state, "up", t0);

    let in_flight: Vec<_> = state
        .in_flight()
        .map(|(id, kind)| (id, kind.clone()))
        .collect();
    assert_eq!(
        in_flight,
        vec![
            (1, FetchKind::Discover { page: 1 }),
            (
                2,
                FetchKind::Search {
                    term: "up".to_string()
                }
            ),
        ]
    );
}
