use finder_core::{AppViewModel, Mode, MovieCardView};
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::layout::AppLayout;

const SEARCH_PLACEHOLDER: &str = "Search through thousands of movies";
const LOADING_TEXT: &str = "Loading...";

/// Draws the full screen for one view-model snapshot.
pub fn draw(frame: &mut Frame, view: &AppViewModel, scroll: usize) {
    let layout = AppLayout::new(frame.area());

    draw_header(frame, layout.header);
    draw_search(frame, layout.search, &view.search_term);
    if view.is_loading {
        draw_loading(frame, layout.movies);
    } else {
        draw_movies(frame, layout.movies, &view.movies, scroll);
    }
    draw_footer(frame, layout.footer, view);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let accent = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);
    let title = Line::from(vec![
        Span::raw("Find "),
        Span::styled("Movies", accent),
        Span::raw(" You Will Enjoy Without the Hassle"),
    ]);
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), area);
}

fn draw_search(frame: &mut Frame, area: Rect, search_term: &str) {
    let block = Block::default().borders(Borders::ALL).title(" Search ");
    let text = if search_term.is_empty() {
        Line::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Line::raw(search_term)
    };
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(text).block(block), area);

    let typed = u16::try_from(search_term.chars().count()).unwrap_or(u16::MAX);
    let cursor_x = inner
        .x
        .saturating_add(typed)
        .min(inner.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(cursor_x, inner.y));
}

fn draw_loading(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" All Movies ");
    let spinner = Paragraph::new(LOADING_TEXT)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(spinner, area);
}

fn draw_movies(frame: &mut Frame, area: Rect, movies: &[MovieCardView], scroll: usize) {
    let block = Block::default().borders(Borders::ALL).title(" All Movies ");
    let items: Vec<ListItem> = movies.iter().map(card_item).collect();
    let list = List::new(items).block(block);
    let mut state = ListState::default().with_offset(scroll);
    frame.render_stateful_widget(list, area, &mut state);
}

fn card_item(card: &MovieCardView) -> ListItem<'static> {
    let title = Line::styled(
        card.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    );
    let details = Line::from(vec![
        Span::styled("★ ", Style::default().fg(Color::Yellow)),
        Span::raw(format!("{} • {} • {}", card.rating, card.language, card.year)),
    ]);
    let mut lines = vec![title, details];
    if let Some(url) = &card.poster_url {
        lines.push(Line::styled(url.clone(), Style::default().fg(Color::DarkGray)));
    }
    ListItem::new(lines)
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let button_style = if view.load_more_enabled {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mode = match &view.mode {
        Mode::Browsing => "Popular".to_string(),
        Mode::Searching { term } => format!("Results for {term:?}"),
    };
    let line = Line::from(vec![
        Span::styled("[Ctrl+N] Load More", button_style),
        Span::raw(format!("   {mode} • page {}", view.page)),
        Span::styled("   Esc quit", Style::default().fg(Color::DarkGray)),
    ]);
    let footer = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
