//! Pipeline services
//!
//! Stage order: clean → aggregate → analyze → summarize → project.

pub mod aggregator;
pub mod allocator;
pub mod calendar;
pub mod cleaner;
pub mod projector;

pub use aggregator::aggregate_visits;
pub use allocator::{analyze_rows, summarize, AllocationSettings};
pub use calendar::{business_days_between, weekend_days_between};
pub use cleaner::clean_visits;
pub use projector::{project_final, Projection};
