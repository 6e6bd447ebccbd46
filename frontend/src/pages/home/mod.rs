//! Home page components
//!
//! - `HomePage`: dependency graph on the left, program cards on the right
//! - `LmpCard`: summary card for one program with expandable version history

mod lmp_card;
mod page;
mod types;

pub use page::HomePage;
pub use types::{action_for, load_home, HomeState};
