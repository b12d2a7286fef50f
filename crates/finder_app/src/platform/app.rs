use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use finder_core::{update, AppState, Msg};
use finder_engine::{FetchSettings, TmdbCatalog};
use finder_logging::finder_info;
use ratatui::DefaultTerminal;

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui::keys::{map_key, KeyCommand};
use super::ui::render;

/// Upper bound on how long the loop waits for input before ticking again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    logging::initialize(&config.log_file, config.log_level);
    finder_info!("Starting movie finder with {:?}", config.api);

    let catalog = TmdbCatalog::new(config.api, FetchSettings::default())?;
    let runner = EffectRunner::new(Arc::new(catalog))?;

    let mut terminal = ratatui::try_init()?;
    let result = event_loop(&mut terminal, &runner);
    ratatui::restore();

    finder_info!("Movie finder exiting");
    result
}

fn event_loop(terminal: &mut DefaultTerminal, runner: &EffectRunner) -> anyhow::Result<()> {
    let mut state = AppState::new();
    let mut scroll = 0usize;
    let mut needs_render = true;

    dispatch(&mut state, runner, Msg::Started);

    loop {
        for msg in runner.drain_events() {
            dispatch(&mut state, runner, msg);
        }
        dispatch(&mut state, runner, Msg::Tick { now: Instant::now() });

        if state.consume_dirty() {
            needs_render = true;
        }

        if needs_render {
            let view = state.view();
            scroll = scroll.min(view.movies.len().saturating_sub(1));
            terminal.draw(|frame| render::draw(frame, &view, scroll))?;
            needs_render = false;
        }

        if !event::poll(poll_timeout(&state))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => match map_key(key, state.search_term(), Instant::now()) {
                Some(KeyCommand::Dispatch(msg)) => dispatch(&mut state, runner, msg),
                Some(KeyCommand::Scroll(delta)) => {
                    scroll = scroll.saturating_add_signed(delta);
                    needs_render = true;
                }
                Some(KeyCommand::Quit) => break,
                None => {}
            },
            Event::Resize(_, _) => needs_render = true,
            _ => {}
        }
    }

    Ok(())
}

fn dispatch(state: &mut AppState, runner: &EffectRunner, msg: Msg) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    runner.enqueue(effects);
}

/// Wakes early when the search debouncer is about to settle.
fn poll_timeout(state: &AppState) -> Duration {
    match state.debounce_deadline() {
        Some(deadline) => deadline
            .saturating_duration_since(Instant::now())
            .min(POLL_INTERVAL),
        None => POLL_INTERVAL,
    }
}
