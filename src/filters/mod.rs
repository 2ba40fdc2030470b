pub mod apply;
pub mod debounce;
pub mod memo;

pub use apply::{ALL_CATEGORIES, CategoryFilter, filter_symptoms};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use memo::FilterEngine;
