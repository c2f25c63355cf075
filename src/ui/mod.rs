//! Text rendering for reelscout
//!
//! Each screen renders to a `String` so the binary only has to print it and
//! tests can assert on the exact output.

pub mod movie_detail;
pub mod movie_list;

pub use movie_detail::render as render_movie_detail;
pub use movie_list::{render_home, render_movie_list, render_movie_row};
