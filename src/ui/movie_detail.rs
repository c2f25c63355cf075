//! Movie detail rendering

use std::fmt::Write;

use crate::app::MovieView;
use crate::format::{format_currency, format_date, format_rating, format_runtime, year_from_date};

/// Cast members listed before the rest are cut off
const MAX_CAST: usize = 12;

/// Renders the detail screen for a movie
///
/// `poster_url` is passed in already resolved so this stays independent of
/// the client's image base URL.
pub fn render(view: &MovieView, poster_url: &str) -> String {
    let d = &view.details;
    let mut out = String::new();

    let year = year_from_date(&d.release_date);
    if year.is_empty() {
        let _ = writeln!(out, "{}", d.title);
    } else {
        let _ = writeln!(out, "{} ({})", d.title, year);
    }

    if let Some(tagline) = d.tagline.as_deref().filter(|t| !t.is_empty()) {
        let _ = writeln!(out, "\"{}\"", tagline);
    }
    out.push('\n');

    let runtime = d
        .runtime
        .filter(|m| *m > 0)
        .map(format_runtime)
        .unwrap_or_else(|| "unknown".to_string());
    let _ = writeln!(
        out,
        "Released: {} | Runtime: {} | Rating: {} ({} votes)",
        format_date(&d.release_date),
        runtime,
        format_rating(d.vote_average),
        d.vote_count
    );

    if !d.genres.is_empty() {
        let genres: Vec<&str> = d.genres.iter().map(|g| g.name.as_str()).collect();
        let _ = writeln!(out, "Genres: {}", genres.join(", "));
    }

    if let Some(credits) = &view.credits {
        let directors = credits.directors();
        if !directors.is_empty() {
            let _ = writeln!(out, "Directed by: {}", directors.join(", "));
        }
    }

    if d.budget > 0 || d.revenue > 0 {
        let _ = writeln!(
            out,
            "Budget: {} | Revenue: {}",
            format_currency(d.budget),
            format_currency(d.revenue)
        );
    }

    let _ = writeln!(out, "Poster: {}", poster_url);
    if let Some(url) = view.trailer.as_ref().and_then(|t| t.watch_url()) {
        let _ = writeln!(out, "Trailer: {}", url);
    }

    if !d.overview.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{}", d.overview);
    }

    match &view.credits {
        Some(credits) if !credits.cast.is_empty() => {
            out.push_str("\nCast:\n");
            let mut cast: Vec<_> = credits.cast.iter().collect();
            cast.sort_by_key(|c| c.order);
            for member in cast.into_iter().take(MAX_CAST) {
                if member.character.is_empty() {
                    let _ = writeln!(out, "  {}", member.name);
                } else {
                    let _ = writeln!(out, "  {} as {}", member.name, member.character);
                }
            }
        }
        Some(_) => {}
        None => out.push_str("\nCast: unavailable\n"),
    }

    if let Some(credits) = &view.credits {
        let crew = credits.key_crew();
        if !crew.is_empty() {
            out.push_str("\nCrew:\n");
            for member in crew {
                let _ = writeln!(out, "  {} ({})", member.name, member.job);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CastMember, Credits, CrewMember, Genre, MovieDetails, Video};

    fn details() -> MovieDetails {
        MovieDetails {
            id: 550,
            title: "Fight Club".to_string(),
            overview: "An insomniac office worker...".to_string(),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: None,
            release_date: "1999-10-15".to_string(),
            vote_average: 8.4,
            vote_count: 26000,
            popularity: 60.0,
            adult: false,
            original_language: "en".to_string(),
            original_title: "Fight Club".to_string(),
            runtime: Some(139),
            budget: 63_000_000,
            revenue: 100_853_753,
            genres: vec![Genre { id: 18, name: "Drama".to_string() }],
            production_companies: vec![],
            status: "Released".to_string(),
            tagline: Some("Mischief. Mayhem. Soap.".to_string()),
            homepage: None,
            imdb_id: Some("tt0137523".to_string()),
        }
    }

    fn credits() -> Credits {
        Credits {
            id: 550,
            cast: vec![
                CastMember {
                    id: 2,
                    name: "Brad Pitt".to_string(),
                    character: "Tyler Durden".to_string(),
                    profile_path: None,
                    order: 1,
                },
                CastMember {
                    id: 1,
                    name: "Edward Norton".to_string(),
                    character: "The Narrator".to_string(),
                    profile_path: None,
                    order: 0,
                },
            ],
            crew: vec![CrewMember {
                id: 3,
                name: "David Fincher".to_string(),
                job: "Director".to_string(),
                department: "Directing".to_string(),
                profile_path: None,
            }],
        }
    }

    fn trailer() -> Video {
        Video {
            id: "v".to_string(),
            key: "SUXWAEX2jlg".to_string(),
            name: "Trailer".to_string(),
            site: "YouTube".to_string(),
            kind: "Trailer".to_string(),
            official: true,
        }
    }

    #[test]
    fn test_full_detail_render() {
        let view = MovieView {
            details: details(),
            credits: Some(credits()),
            trailer: Some(trailer()),
        };

        let out = render(&view, "https://image.tmdb.org/t/p/w500/poster.jpg");

        assert!(out.starts_with("Fight Club (1999)\n\"Mischief. Mayhem. Soap.\"\n"));
        assert!(out.contains("Released: October 15, 1999 | Runtime: 2h 19m | Rating: 8.4 (26000 votes)"));
        assert!(out.contains("Genres: Drama"));
        assert!(out.contains("Directed by: David Fincher"));
        assert!(out.contains("Budget: $63,000,000 | Revenue: $100,853,753"));
        assert!(out.contains("Poster: https://image.tmdb.org/t/p/w500/poster.jpg"));
        assert!(out.contains("Trailer: https://www.youtube.com/watch?v=SUXWAEX2jlg"));

        let narrator = out.find("Edward Norton as The Narrator").expect("narrator listed");
        let tyler = out.find("Brad Pitt as Tyler Durden").expect("tyler listed");
        assert!(narrator < tyler, "cast is ordered by billing");
        assert!(out.ends_with("\nCrew:\n  David Fincher (Director)\n"));
    }

    #[test]
    fn test_cast_is_capped_and_crew_limited_to_key_jobs() {
        let mut c = credits();
        c.cast = (0..15)
            .map(|i| CastMember {
                id: i,
                name: format!("Actor {}", i),
                character: String::new(),
                profile_path: None,
                order: i as u32,
            })
            .collect();
        c.crew.push(CrewMember {
            id: 4,
            name: "Jim Uhls".to_string(),
            job: "Screenplay".to_string(),
            department: "Writing".to_string(),
            profile_path: None,
        });
        c.crew.push(CrewMember {
            id: 5,
            name: "Jeff Cronenweth".to_string(),
            job: "Director of Photography".to_string(),
            department: "Camera".to_string(),
            profile_path: None,
        });
        let view = MovieView {
            details: details(),
            credits: Some(c),
            trailer: None,
        };

        let out = render(&view, "/placeholder.svg");

        assert!(out.contains("  Actor 11\n"));
        assert!(!out.contains("Actor 12"));
        assert!(out.contains("  Jim Uhls (Screenplay)"));
        assert!(!out.contains("Jeff Cronenweth"));
    }

    #[test]
    fn test_detail_render_degrades_without_credits_or_trailer() {
        let mut d = details();
        d.runtime = None;
        d.budget = 0;
        d.revenue = 0;
        d.tagline = Some(String::new());
        let view = MovieView {
            details: d,
            credits: None,
            trailer: None,
        };

        let out = render(&view, "/placeholder.svg");

        assert!(out.contains("Runtime: unknown"));
        assert!(!out.contains("Budget"));
        assert!(!out.contains("Trailer"));
        assert!(!out.contains("Directed by"));
        assert!(!out.contains("\"\""));
        assert!(out.contains("Cast: unavailable"));
    }
}
