//! Application state and data loading
//!
//! `App` sits between the CLI and the `TmdbClient`: it knows which endpoints
//! each screen needs and fetches them concurrently.

use tracing::warn;

use crate::data::{
    ApiError, Credits, MovieDetails, MovieList, MovieResponse, TimeWindow, TmdbClient, Video,
};

/// Everything shown on a movie's detail screen
#[derive(Debug, Clone, PartialEq)]
pub struct MovieView {
    pub details: MovieDetails,
    /// Missing when the credits request failed
    pub credits: Option<Credits>,
    /// First YouTube trailer, if the videos request succeeded and had one
    pub trailer: Option<Video>,
}

/// One row of the home screen
#[derive(Debug)]
pub struct HomeSection {
    pub list: MovieList,
    pub result: Result<MovieResponse, ApiError>,
}

/// Main application
#[derive(Debug, Clone)]
pub struct App {
    client: TmdbClient,
}

impl App {
    pub fn new(client: TmdbClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &TmdbClient {
        &self.client
    }

    /// Fetches one page of a movie list
    ///
    /// `window` only affects `MovieList::Trending`.
    pub async fn load_list(
        &self,
        list: MovieList,
        page: u32,
        window: TimeWindow,
    ) -> Result<MovieResponse, ApiError> {
        match list {
            MovieList::Popular => self.client.popular_movies(page).await,
            MovieList::Trending => self.client.trending_movies(window, page).await,
            MovieList::TopRated => self.client.top_rated_movies(page).await,
            MovieList::NowPlaying => self.client.now_playing_movies(page).await,
            MovieList::Upcoming => self.client.upcoming_movies(page).await,
        }
    }

    /// Fetches the first page of every list concurrently
    ///
    /// A failing list does not fail the others; each section carries its own
    /// result.
    pub async fn load_home(&self) -> Vec<HomeSection> {
        let futures = MovieList::ALL
            .iter()
            .map(|list| self.load_list(*list, 1, TimeWindow::Week));

        let results: Vec<Result<MovieResponse, ApiError>> = futures::future::join_all(futures).await;

        MovieList::ALL
            .iter()
            .zip(results)
            .map(|(list, result)| HomeSection { list: *list, result })
            .collect()
    }

    /// Fetches details, credits and videos for a movie concurrently
    ///
    /// Only the details request is required; credits and trailer degrade to
    /// `None` on failure.
    pub async fn load_movie(&self, movie_id: u64) -> Result<MovieView, ApiError> {
        let (details, credits, videos) = futures::join!(
            self.client.movie_details(movie_id),
            self.client.movie_credits(movie_id),
            self.client.movie_videos(movie_id),
        );

        let details = details?;

        let credits = credits
            .map_err(|e| warn!(movie_id, error = %e, "credits unavailable"))
            .ok();

        let trailer = videos
            .map_err(|e| warn!(movie_id, error = %e, "videos unavailable"))
            .ok()
            .and_then(|videos| videos.trailer().cloned());

        Ok(MovieView {
            details,
            credits,
            trailer,
        })
    }
}
