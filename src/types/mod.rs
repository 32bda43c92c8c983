//! Core types shared across the crate.

mod category;
mod movie;

pub use category::ListCategory;
pub use movie::{MovieDetail, MovieSummary};
