//! Integration tests for screen-level loading in `App`
//!
//! Checks that the home screen and detail screen keep going when some of
//! their requests fail.

use std::time::Duration;

use mockito::{Server, ServerGuard};
use reelscout::data::{MovieList, TimeWindow};
use reelscout::{ApiError, App, CacheTtls, Config, TmdbClient};
use serde_json::json;

fn app_for(server: &ServerGuard) -> App {
    let config = Config {
        api_base_url: server.url(),
        image_base_url: "https://image.tmdb.org/t/p".to_string(),
        access_token: "test_token_123".to_string(),
        timeout: Duration::from_secs(5),
        cache_ttls: CacheTtls::default(),
    };
    App::new(TmdbClient::new(config))
}

fn list_body(title: &str) -> String {
    json!({
        "page": 1,
        "results": [{
            "id": 10,
            "title": title,
            "overview": "",
            "poster_path": null,
            "backdrop_path": null,
            "release_date": "2024-05-01",
            "vote_average": 7.1,
            "vote_count": 50
        }],
        "total_pages": 1,
        "total_results": 1
    })
    .to_string()
}

#[tokio::test]
async fn test_load_home_keeps_sections_in_order_and_isolates_failures() {
    let mut server = Server::new_async().await;
    let _trending = server
        .mock("GET", "/trending/movie/week?page=1")
        .with_status(200)
        .with_body(list_body("Trending Pick"))
        .create_async()
        .await;
    let _popular = server
        .mock("GET", "/movie/popular?page=1")
        .with_status(200)
        .with_body(list_body("Popular Pick"))
        .create_async()
        .await;
    let _top_rated = server
        .mock("GET", "/movie/top_rated?page=1")
        .with_status(500)
        .create_async()
        .await;
    let _now_playing = server
        .mock("GET", "/movie/now_playing?page=1")
        .with_status(200)
        .with_body(list_body("Now Playing Pick"))
        .create_async()
        .await;
    let _upcoming = server
        .mock("GET", "/movie/upcoming?page=1")
        .with_status(200)
        .with_body(list_body("Upcoming Pick"))
        .create_async()
        .await;
    let app = app_for(&server);

    let sections = app.load_home().await;

    let lists: Vec<MovieList> = sections.iter().map(|s| s.list).collect();
    assert_eq!(lists, MovieList::ALL.to_vec());

    let top_rated = &sections[2];
    assert!(matches!(top_rated.result, Err(ApiError::Upstream { status: 500 })));

    let popular = sections[1].result.as_ref().expect("popular loads");
    assert_eq!(popular.results[0].title, "Popular Pick");
    assert_eq!(sections.iter().filter(|s| s.result.is_ok()).count(), 4);
}

#[tokio::test]
async fn test_load_list_uses_window_only_for_trending() {
    let mut server = Server::new_async().await;
    let trending = server
        .mock("GET", "/trending/movie/day?page=2")
        .with_status(200)
        .with_body(list_body("Today"))
        .expect(1)
        .create_async()
        .await;
    let upcoming = server
        .mock("GET", "/movie/upcoming?page=2")
        .with_status(200)
        .with_body(list_body("Soon"))
        .expect(1)
        .create_async()
        .await;
    let app = app_for(&server);

    app.load_list(MovieList::Trending, 2, TimeWindow::Day).await.unwrap();
    app.load_list(MovieList::Upcoming, 2, TimeWindow::Day).await.unwrap();

    trending.assert_async().await;
    upcoming.assert_async().await;
}

#[tokio::test]
async fn test_load_movie_degrades_when_credits_fail() {
    let mut server = Server::new_async().await;
    let _details = server
        .mock("GET", "/movie/42")
        .with_status(200)
        .with_body(
            json!({
                "id": 42,
                "title": "Answer",
                "poster_path": "/a.jpg",
                "backdrop_path": null,
                "runtime": 95,
                "tagline": null,
                "homepage": null,
                "imdb_id": null
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _credits = server
        .mock("GET", "/movie/42/credits")
        .with_status(503)
        .create_async()
        .await;
    let _videos = server
        .mock("GET", "/movie/42/videos")
        .with_status(200)
        .with_body(
            json!({
                "id": 42,
                "results": [
                    {"id": "t1", "key": "teaser", "name": "Teaser", "site": "YouTube", "type": "Teaser"},
                    {"id": "t2", "key": "abc123", "name": "Trailer", "site": "YouTube", "type": "Trailer"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let app = app_for(&server);

    let view = app.load_movie(42).await.expect("details load");

    assert_eq!(view.details.title, "Answer");
    assert!(view.credits.is_none());
    assert_eq!(view.trailer.map(|t| t.key), Some("abc123".to_string()));
}

#[tokio::test]
async fn test_load_movie_fails_when_details_fail() {
    let mut server = Server::new_async().await;
    let _details = server
        .mock("GET", "/movie/7")
        .with_status(404)
        .create_async()
        .await;
    let _credits = server
        .mock("GET", "/movie/7/credits")
        .with_status(200)
        .with_body(r#"{"id": 7, "cast": [], "crew": []}"#)
        .create_async()
        .await;
    let _videos = server
        .mock("GET", "/movie/7/videos")
        .with_status(200)
        .with_body(r#"{"id": 7, "results": []}"#)
        .create_async()
        .await;
    let app = app_for(&server);

    let err = app.load_movie(7).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}
