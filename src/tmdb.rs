use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

use crate::error::AppResult;

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, rps: u32) -> Self {
        let quota = Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap());
        let limiter = Arc::new(RateLimiter::direct(quota));
        Self { client, api_key, base_url, limiter }
    }

    /// Title search; returns candidates in the order TMDB gives them.
    pub async fn search_movies(&self, title: &str) -> AppResult<Vec<SearchResult>> {
        self.limiter.until_ready().await;

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        debug!(query = %title, "searching TMDB");

        let resp: SearchResponse = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", title),
                ("include_adult", "false"),
                ("language", "en-US"),
                ("page", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(query = %title, results = resp.results.len(), "TMDB search complete");
        Ok(resp.results)
    }

    pub async fn movie_details(&self, tmdb_id: i64) -> AppResult<MovieDetails> {
        self.limiter.until_ready().await;

        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);
        debug!(tmdb_id, "fetching TMDB details");

        let details: MovieDetails = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(details)
    }
}

/// Four-digit year out of TMDB's `YYYY-MM-DD` release date. TMDB omits
/// the field entirely for some titles, which surfaces here as a parse
/// error.
pub fn release_year(release_date: &str) -> AppResult<i32> {
    let date: jiff::civil::Date = release_date.parse()?;
    Ok(i32::from(date.year()))
}

/// Absolute poster URL from the configured image host and the relative
/// path TMDB returns.
pub fn image_url(base: &str, poster_path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), poster_path.trim_start_matches('/'))
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    #[serde(rename = "original_title")]
    pub title: String,
    #[serde(default)]
    pub release_date: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MovieDetails {
    pub original_title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_shape_deserializes() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 27205, "original_title": "Inception", "title": "Inception", "release_date": "2010-07-16"},
                {"id": 64956, "original_title": "Untitled", "title": "Untitled"}
            ],
            "total_pages": 1,
            "total_results": 2
        }"#;

        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.results.len(), 2);
        assert_eq!(resp.results[0].id, 27205);
        assert_eq!(resp.results[0].title, "Inception");
        assert_eq!(resp.results[0].release_date, "2010-07-16");
        assert_eq!(resp.results[1].release_date, "");
    }

    #[test]
    fn details_shape_tolerates_null_poster() {
        let json = r#"{
            "id": 27205,
            "original_title": "Inception",
            "overview": "A thief who steals corporate secrets.",
            "release_date": "2010-07-16",
            "poster_path": null
        }"#;

        let details: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.original_title, "Inception");
        assert!(details.poster_path.is_none());
    }

    #[test]
    fn release_year_parses_the_four_digit_year() {
        assert_eq!(release_year("2010-07-16").unwrap(), 2010);
        assert_eq!(release_year("1999-12-31").unwrap(), 1999);
        assert!(release_year("").is_err());
        assert!(release_year("not-a-date").is_err());
    }

    #[test]
    fn image_url_joins_with_a_single_slash() {
        let base = "https://image.tmdb.org/t/p/original";
        assert_eq!(
            image_url(base, "/abc.jpg"),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/original/", "abc.jpg"),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
        assert!(image_url(base, "/abc.jpg").starts_with(base));
    }
}
