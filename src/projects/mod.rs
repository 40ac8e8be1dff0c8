// Project folders: state.json plus dated iteration_<date>/output.md artifacts

pub mod layout;
mod iterator;
mod output;
mod state;

pub use iterator::{BatchSummary, Discrepancy, IterationOutcome, ProjectIterator, SkippedProject};
pub use layout::ProjectLayout;
pub use output::render_output;
pub use state::{IterationEntry, ProjectState, SourceIdea};
