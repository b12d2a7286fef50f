//! Movie finder core: pure fetch coordinator and view-model helpers.
mod debounce;
mod effect;
mod movie;
mod msg;
mod state;
mod update;
mod view_model;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use effect::Effect;
pub use movie::{Movie, MovieId};
pub use msg::{FetchOutcome, Msg};
pub use state::{AppState, CoordinatorSettings, FetchKind, Mode, RequestId, ResponseOrdering};
pub use update::update;
pub use view_model::{AppViewModel, MovieCardView, POSTER_BASE_URL};
