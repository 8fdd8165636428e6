// Journey/stage reference data and the per-journey Kanban board.

pub mod board;
pub mod catalog;
pub mod handlers;

pub use catalog::JourneyCatalog;
