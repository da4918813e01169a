//! HTTP client for The Movie Database (TMDB) v3 API.
//!
//! This crate provides the production implementation of
//! [`catalog::MovieCatalog`]. It handles:
//! - Building authenticated requests (`api_key` + `language` query params)
//! - Mapping transport, status and decoding failures onto `CatalogError`
//! - An optional per-request timeout
//!
//! Only the endpoints the recommender and the CLI need are covered:
//! discover-by-genre, movie details and the genre list.

use std::time::Duration;

use async_trait::async_trait;
use catalog::{CatalogError, Genre, GenreId, MovieCatalog, MovieDetails, MovieId, MoviePage, Result};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, instrument};

/// Public TMDB v3 endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

const LANGUAGE: &str = "en-US";

/// Client for the TMDB REST API.
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl TmdbClient {
    /// Create a client against the public TMDB endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Point the client at another base URL (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound every request by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Request {
                endpoint: self.base_url.clone(),
                reason: e.to_string(),
            })?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// All movie genres known to the catalog
    pub async fn genre_list(&self) -> Result<Vec<Genre>> {
        #[derive(Deserialize)]
        struct GenreList {
            genres: Vec<Genre>,
        }

        let list: GenreList = self.get_json("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }

    /// GET `path` with the shared auth params plus `params`, decoding JSON
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(endpoint = path, "Sending TMDB request");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", LANGUAGE),
            ])
            .query(params)
            .send()
            .await
            .map_err(|e| self.transport_error(path, e))?;

        let status = response.status();
        if !status.is_success() {
            error!(endpoint = path, status = status.as_u16(), "TMDB returned an error status");
            return Err(CatalogError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(path, e))?;

        serde_json::from_str(&body).map_err(|e| CatalogError::Decode {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })
    }

    fn transport_error(&self, path: &str, e: reqwest::Error) -> CatalogError {
        match self.timeout {
            Some(timeout) if e.is_timeout() => CatalogError::Timeout {
                endpoint: path.to_string(),
                millis: timeout.as_millis() as u64,
            },
            _ => CatalogError::Request {
                endpoint: path.to_string(),
                reason: e.to_string(),
            },
        }
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    #[instrument(skip(self))]
    async fn movies_by_genre(&self, genre_id: GenreId, page: u32) -> Result<MoviePage> {
        self.get_json(
            "/discover/movie",
            &[
                ("with_genres", genre_id.to_string()),
                ("sort_by", "popularity.desc".to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails> {
        self.get_json(&format!("/movie/{}", movie_id), &[]).await
    }

    fn name(&self) -> &str {
        "tmdb"
    }
}
