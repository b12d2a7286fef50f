use crate::{Mode, Movie, MovieId};

pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

const MISSING: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub search_term: String,
    pub mode: Mode,
    pub page: u32,
    pub is_loading: bool,
    pub load_more_enabled: bool,
    pub movies: Vec<MovieCardView>,
    pub dirty: bool,
}

/// Fixed projection of a movie for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCardView {
    pub id: MovieId,
    pub title: String,
    pub rating: String,
    pub year: String,
    pub language: String,
    pub poster_url: Option<String>,
}

impl MovieCardView {
    pub fn from_movie(movie: &Movie) -> Self {
        let title = movie
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Untitled")
            .to_string();

        let rating = match movie.vote_average {
            Some(score) if score > 0.0 => format!("{score:.1}"),
            _ => MISSING.to_string(),
        };

        let year = movie
            .release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
            .unwrap_or(MISSING)
            .to_string();

        let language = movie
            .original_language
            .as_deref()
            .filter(|lang| !lang.is_empty())
            .unwrap_or(MISSING)
            .to_string();

        let poster_url = movie
            .poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{POSTER_BASE_URL}/{}", path.trim_start_matches('/')));

        Self {
            id: movie.id,
            title,
            rating,
            year,
            language,
            poster_url,
        }
    }
}
