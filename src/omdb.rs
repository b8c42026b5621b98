use serde::Deserialize;

use crate::error::AppError;

pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Detail record with the OMDb quirks already normalised: "N/A" sentinels
/// dropped, year ranges collapsed to the start year, genres split out.
#[derive(Clone, Debug)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub plot_short: Option<String>,
    pub imdb_rating: Option<String>,
    pub poster_url: Option<String>,
    pub genres: Vec<String>,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no OMDB_API_KEY provided - metadata lookups will be rejected");
        }
        Self { client, api_key, base_url }
    }

    /// Search by title and return the first match's IMDb id. Ambiguous
    /// titles deliberately take the first result.
    pub async fn search(&self, title: &str) -> Result<String, AppError> {
        let resp: SearchResponse = self
            .client
            .get(&self.base_url)
            .query(&[("s", title), ("apikey", self.api_key.as_str()), ("type", "movie")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if resp.response != "True" {
            return Err(AppError::NotFound(
                resp.error.unwrap_or_else(|| format!("no results for '{title}'")),
            ));
        }

        resp.results
            .into_iter()
            .next()
            .map(|hit| hit.imdb_id)
            .ok_or_else(|| AppError::NotFound(format!("no results for '{title}'")))
    }

    pub async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, AppError> {
        let resp: DetailResponse = self
            .client
            .get(&self.base_url)
            .query(&[("i", imdb_id), ("apikey", self.api_key.as_str()), ("plot", "short")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if resp.response != "True" {
            return Err(AppError::NotFound(
                resp.error.unwrap_or_else(|| format!("no record for '{imdb_id}'")),
            ));
        }

        let title = clean(resp.title)
            .ok_or_else(|| AppError::Upstream(format!("detail for '{imdb_id}' is missing a title")))?;

        Ok(MovieDetail {
            imdb_id: clean(resp.imdb_id).unwrap_or_else(|| imdb_id.to_string()),
            title,
            director: clean(resp.director),
            year: clean(resp.year).and_then(|y| parse_year(&y)),
            plot_short: clean(resp.plot),
            imdb_rating: clean(resp.imdb_rating),
            poster_url: clean(resp.poster),
            genres: clean(resp.genre)
                .map(|g| {
                    g.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

/// OMDb reports a release year either as "2001" or as a range like
/// "2001-2003"; the start year is the one that matters.
fn parse_year(raw: &str) -> Option<i32> {
    raw.split('-').next().unwrap_or(raw).trim().parse().ok()
}

fn clean(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let s = s.trim();
        (!s.is_empty() && s != "N/A").then(|| s.to_string())
    })
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Search", default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
}
