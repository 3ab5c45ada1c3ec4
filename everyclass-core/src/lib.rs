//! EveryClass Core Library
//!
//! This library turns schedule data fetched from the EveryClass API server
//! into timetable views: a day × period grid, empty column flags, semester
//! switcher, de-duplicated teacher lists and privacy-gated student pages.
//! It performs no I/O; callers hand it already deserialized records.

pub mod api;
pub mod available;
pub mod category;
pub mod columns;
pub mod course;
pub mod daily;
pub mod error;
pub mod grid;
pub mod page;
pub mod privacy;
pub mod search;
pub mod semester;
pub mod slot;
pub mod teacher;
pub mod types;

// Re-export core types and error handling
pub use error::{Error, Result};
pub use types::*;

/// Commonly used items
pub mod prelude {
    pub use crate::{
        api::*, available::*, category::*, columns::*, course::*, daily::*, grid::*, page::*,
        privacy::*, search::*, semester::*, slot::*, teacher::*, types::*,
    };
}
