//! Core data models for reelscout
//!
//! Response shapes returned by the TMDB v3 API, plus the small enums used to
//! pick endpoints (list kind, trending window) and image sizes.

pub mod client;

pub use client::{ApiError, TmdbClient, PLACEHOLDER_IMAGE};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of results TMDB returns per page
pub const ITEMS_PER_PAGE: usize = 20;

/// A movie as it appears in list and search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// `YYYY-MM-DD`, empty when unreleased or unknown
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub video: bool,
}

/// One page of movies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieResponse {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: String,
}

/// Full record for a single movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub original_title: String,
    /// Minutes; null for unreleased titles
    pub runtime: Option<u32>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub status: String,
    pub tagline: Option<String>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
    pub profile_path: Option<String>,
}

/// Cast and crew for a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    pub id: u64,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Crew jobs shown on the detail screen
const KEY_CREW_JOBS: [&str; 4] = ["Director", "Producer", "Screenplay", "Writer"];

/// Most key crew entries shown on the detail screen
const MAX_KEY_CREW: usize = 6;

impl Credits {
    /// Names of everyone credited with the `Director` job
    pub fn directors(&self) -> Vec<&str> {
        self.crew
            .iter()
            .filter(|c| c.job == "Director")
            .map(|c| c.name.as_str())
            .collect()
    }

    /// First six directors, producers and writers, in credit order
    pub fn key_crew(&self) -> Vec<&CrewMember> {
        self.crew
            .iter()
            .filter(|c| KEY_CREW_JOBS.contains(&c.job.as_str()))
            .take(MAX_KEY_CREW)
            .collect()
    }
}

/// A video (trailer, teaser, clip) attached to a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    /// Site-specific identifier, e.g. the YouTube video id
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && self.kind == "Trailer"
    }

    /// Watch URL for YouTube-hosted videos
    pub fn watch_url(&self) -> Option<String> {
        (self.site == "YouTube").then(|| format!("https://www.youtube.com/watch?v={}", self.key))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResponse {
    #[serde(default)]
    pub id: Option<u64>,
    pub results: Vec<Video>,
}

impl VideoResponse {
    /// First YouTube trailer, else the first YouTube video of any kind
    pub fn trailer(&self) -> Option<&Video> {
        let mut youtube = self.results.iter().filter(|v| v.site == "YouTube");
        let first = youtube.clone().next();
        youtube.find(|v| v.is_youtube_trailer()).or(first)
    }
}

/// Image settings from the `/configuration` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagesConfiguration {
    pub base_url: String,
    pub secure_base_url: String,
    #[serde(default)]
    pub backdrop_sizes: Vec<String>,
    #[serde(default)]
    pub logo_sizes: Vec<String>,
    #[serde(default)]
    pub poster_sizes: Vec<String>,
    #[serde(default)]
    pub profile_sizes: Vec<String>,
    #[serde(default)]
    pub still_sizes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfiguration {
    pub images: ImagesConfiguration,
    #[serde(default)]
    pub change_keys: Vec<String>,
}

/// Window for the trending endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<TimeWindow> {
        match s.trim().to_lowercase().as_str() {
            "day" | "today" => Some(TimeWindow::Day),
            "week" => Some(TimeWindow::Week),
            _ => None,
        }
    }
}

/// Size token understood by the image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    W200,
    W300,
    #[default]
    W500,
    W780,
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W200 => "w200",
            ImageSize::W300 => "w300",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::Original => "original",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<ImageSize> {
        match s.trim().to_lowercase().as_str() {
            "w200" => Some(ImageSize::W200),
            "w300" => Some(ImageSize::W300),
            "w500" => Some(ImageSize::W500),
            "w780" => Some(ImageSize::W780),
            "original" => Some(ImageSize::Original),
            _ => None,
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The paged movie lists the home screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieList {
    Popular,
    Trending,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl MovieList {
    pub const ALL: [MovieList; 5] = [
        MovieList::Trending,
        MovieList::Popular,
        MovieList::TopRated,
        MovieList::NowPlaying,
        MovieList::Upcoming,
    ];

    /// Human-readable heading
    pub fn title(&self) -> &'static str {
        match self {
            MovieList::Popular => "Popular",
            MovieList::Trending => "Trending",
            MovieList::TopRated => "Top Rated",
            MovieList::NowPlaying => "Now Playing",
            MovieList::Upcoming => "Upcoming",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<MovieList> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "popular" => Some(MovieList::Popular),
            "trending" => Some(MovieList::Trending),
            "top-rated" | "toprated" => Some(MovieList::TopRated),
            "now-playing" | "nowplaying" => Some(MovieList::NowPlaying),
            "upcoming" => Some(MovieList::Upcoming),
            _ => None,
        }
    }
}
