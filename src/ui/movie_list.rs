//! Movie list rendering
//!
//! Plain-text tables for list, search, similar and recommended results, and
//! the condensed multi-list home screen.

use std::fmt::Write;

use crate::app::HomeSection;
use crate::data::{Movie, MovieResponse, ITEMS_PER_PAGE};
use crate::format::{format_rating, truncate_text, year_from_date, RatingTier};

/// Longest title shown in a row before truncation
const TITLE_WIDTH: usize = 48;

/// Rows shown per list on the home screen
pub const HOME_ROWS: usize = 5;

/// Formats a single movie as one line: id, rating with tier marker, title and year
pub fn render_movie_row(movie: &Movie) -> String {
    let tier = RatingTier::from_rating(movie.vote_average);
    let year = year_from_date(&movie.release_date);
    let title = truncate_text(&movie.title, TITLE_WIDTH);

    if year.is_empty() {
        format!("{:>8}  {}{:>4}  {}", movie.id, tier.marker(), format_rating(movie.vote_average), title)
    } else {
        format!(
            "{:>8}  {}{:>4}  {} ({})",
            movie.id,
            tier.marker(),
            format_rating(movie.vote_average),
            title,
            year
        )
    }
}

/// Renders a page of results under a heading
pub fn render_movie_list(heading: &str, response: &MovieResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "== {} (page {} of {}, {} results) ==",
        heading,
        response.page,
        response.total_pages.max(1),
        response.total_results
    );

    if response.results.is_empty() {
        out.push_str("  No movies found.\n");
        return out;
    }

    for movie in &response.results {
        out.push_str(&render_movie_row(movie));
        out.push('\n');
    }

    let first = (response.page.max(1) as usize - 1) * ITEMS_PER_PAGE + 1;
    let last = first + response.results.len() - 1;
    let _ = writeln!(out, "  showing {}-{} of {}", first, last, response.total_results);
    out
}

/// Renders the home screen: the top rows of each list, or why it is missing
pub fn render_home(sections: &[HomeSection]) -> String {
    let mut out = String::new();
    for section in sections {
        let _ = writeln!(out, "== {} ==", section.list.title());
        match &section.result {
            Ok(response) if response.results.is_empty() => out.push_str("  No movies found.\n"),
            Ok(response) => {
                for movie in response.results.iter().take(HOME_ROWS) {
                    out.push_str(&render_movie_row(movie));
                    out.push('\n');
                }
            }
            Err(e) => {
                let _ = writeln!(out, "  unavailable: {}", e);
            }
        }
        out.push('\n');
    }
    out
}
