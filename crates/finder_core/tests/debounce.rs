use std::time::{Duration, Instant};

use finder_core::{Debouncer, SEARCH_DEBOUNCE};

const WINDOW: Duration = Duration::from_millis(500);

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn default_window_is_half_a_second() {
    assert_eq!(SEARCH_DEBOUNCE, WINDOW);
}

#[test]
fn value_propagates_only_after_quiet_window() {
    let t0 = Instant::now();
    let mut debouncer = Debouncer::new(WINDOW);
    debouncer.input("bat", t0);

    assert_eq!(debouncer.poll(t0), None);
    assert_eq!(debouncer.poll(t0 + ms(499)), None);
    assert_eq!(debouncer.poll(t0 + ms(500)), Some("bat"));
    assert!(!debouncer.is_pending());
    assert_eq!(debouncer.poll(t0 + ms(900)), None);
}

#[test]
fn new_input_resets_timer_and_drops_superseded_value() {
    let t0 = Instant::now();
    let mut debouncer = Debouncer::new(WINDOW);
    debouncer.input("b", t0);
    debouncer.input("ba", t0 + ms(300));
    debouncer.input("bat", t0 + ms(600));

    // 500ms after the first input, but the window restarted twice since.
    assert_eq!(debouncer.poll(t0 + ms(800)), None);
    assert_eq!(debouncer.poll(t0 + ms(1099)), None);
    assert_eq!(debouncer.poll(t0 + ms(1100)), Some("bat"));
    assert_eq!(debouncer.poll(t0 + ms(5000)), None);
}

#[test]
fn cancel_prevents_propagation() {
    let t0 = Instant::now();
    let mut debouncer = Debouncer::new(WINDOW);
    debouncer.input(42, t0);
    debouncer.cancel();

    assert!(!debouncer.is_pending());
    assert_eq!(debouncer.deadline(), None);
    assert_eq!(debouncer.poll(t0 + ms(1000)), None);
}

#[test]
fn deadline_tracks_latest_input() {
    let t0 = Instant::now();
    let mut debouncer = Debouncer::new(WINDOW);
    assert_eq!(debouncer.deadline(), None);

    debouncer.input('a', t0);
    assert_eq!(debouncer.deadline(), Some(t0 + WINDOW));

    debouncer.input('b', t0 + ms(120));
    assert_eq!(debouncer.deadline(), Some(t0 + ms(620)));
    assert_eq!(debouncer.window(), WINDOW);
}

#[test]
fn zero_window_propagates_immediately() {
    let t0 = Instant::now();
    let mut debouncer = Debouncer::new(Duration::ZERO);
    debouncer.input("now", t0);

    assert_eq!(debouncer.poll(t0), Some("now"));
}

#[test]
fn unbounded_window_has_no_deadline_and_never_settles() {
    let t0 = Instant::now();
    let mut debouncer = Debouncer::new(Duration::MAX);
    debouncer.input(1, t0);

    assert!(debouncer.is_pending());
    assert_eq!(debouncer.deadline(), None);
    assert_eq!(debouncer.poll(t0 + Duration::from_secs(3600)), None);
}
