//! Movie records at three levels of detail.
//!
//! A [`MovieSummary`] is what search results and favorites carry. A
//! [`MovieDetail`] adds the full descriptive fields shown on a detail page, and a
//! [`CatalogEntry`] adds the [`Curation`] metadata the catalog fixture attaches
//! for row-based browsing. All three share the same `id`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder the data source uses for a missing poster image.
pub const NO_POSTER: &str = "N/A";

/// Kind of title a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieKind {
    Movie,
    Series,
    Episode,
}

/// The lightweight view of a movie used in result lists and favorites.
///
/// Identity is `id` (an external identifier such as `"tt0111161"`). This is
/// also the persisted representation of a favorite, so its serialized form must
/// stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: String,
    pub kind: MovieKind,
    /// Poster image URL, or [`NO_POSTER`].
    pub poster_url: String,
}

impl MovieSummary {
    /// Creates a summary of kind [`MovieKind::Movie`] without a poster.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinefile::domain::MovieSummary;
    ///
    /// let movie = MovieSummary::new("tt0111161", "The Shawshank Redemption", "1994");
    /// assert_eq!(movie.poster(), None);
    /// ```
    pub fn new(id: impl Into<String>, title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            kind: MovieKind::Movie,
            poster_url: NO_POSTER.to_string(),
        }
    }

    /// Returns the poster URL, or `None` for the `"N/A"` placeholder.
    #[must_use]
    pub fn poster(&self) -> Option<&str> {
        if self.poster_url == NO_POSTER || self.poster_url.is_empty() {
            None
        } else {
            Some(self.poster_url.as_str())
        }
    }
}

/// A single rating from an external source, e.g. `("Rotten Tomatoes", "91%")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// Full descriptive record of a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(default)]
    pub rated: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub runtime_minutes: Option<u32>,
    /// Genres in display order.
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub writers: Vec<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub awards: String,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub metascore: Option<u32>,
    #[serde(default)]
    pub imdb_rating: Option<f32>,
    #[serde(default)]
    pub imdb_votes: Option<u64>,
    #[serde(default)]
    pub box_office: Option<String>,
    #[serde(default)]
    pub production: Option<String>,
}

impl MovieDetail {
    /// Creates a detail record with only summary fields and genres populated.
    pub fn new(summary: MovieSummary, genres: Vec<String>) -> Self {
        Self {
            summary,
            rated: None,
            released: None,
            runtime_minutes: None,
            genres,
            director: String::new(),
            writers: Vec::new(),
            actors: Vec::new(),
            plot: String::new(),
            language: String::new(),
            country: String::new(),
            awards: String::new(),
            ratings: Vec::new(),
            metascore: None,
            imdb_rating: None,
            imdb_votes: None,
            box_office: None,
            production: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    /// Genres joined the way the data source writes them: `"Action, Crime, Drama"`.
    #[must_use]
    pub fn genre_line(&self) -> String {
        self.genres.join(", ")
    }

    /// Actors joined as a single comma separated line.
    #[must_use]
    pub fn actor_line(&self) -> String {
        self.actors.join(", ")
    }
}

/// Curation tag used to group catalog entries into browse rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Trending,
    Popular,
    New,
    Action,
    Drama,
    Comedy,
    Horror,
    SciFi,
    Romance,
    Thriller,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Trending,
        Self::Popular,
        Self::New,
        Self::Action,
        Self::Drama,
        Self::Comedy,
        Self::Horror,
        Self::SciFi,
        Self::Romance,
        Self::Thriller,
    ];

    /// The tag as written in the catalog fixture.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::Popular => "popular",
            Self::New => "new",
            Self::Action => "action",
            Self::Drama => "drama",
            Self::Comedy => "comedy",
            Self::Horror => "horror",
            Self::SciFi => "sci-fi",
            Self::Romance => "romance",
            Self::Thriller => "thriller",
        }
    }

    /// Human-readable row title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Trending => "Trending Now",
            Self::Popular => "Popular",
            Self::New => "New Releases",
            Self::Action => "Action & Adventure",
            Self::Drama => "Drama",
            Self::Comedy => "Comedy",
            Self::Horror => "Horror",
            Self::SciFi => "Sci-Fi",
            Self::Romance => "Romance",
            Self::Thriller => "Thriller",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.tag() == wanted)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// How far the user got through a partially watched title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchProgress {
    /// Percentage watched, 0 to 100.
    pub percentage: u8,
}

/// Presentation metadata attached by whoever curates the catalog.
///
/// Never derived from other fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curation {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub backdrop_url: Option<String>,
    #[serde(default)]
    pub user_rating: Option<f32>,
    #[serde(default)]
    pub featured: bool,
    /// Present when the title belongs in the "continue watching" row.
    #[serde(default)]
    pub continue_watching: Option<WatchProgress>,
}

/// A catalog record: full detail plus curation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub detail: MovieDetail,
    #[serde(flatten)]
    pub curation: Curation,
}

impl CatalogEntry {
    #[must_use]
    pub fn id(&self) -> &str {
        self.detail.id()
    }

    #[must_use]
    pub fn summary(&self) -> &MovieSummary {
        &self.detail.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poster_placeholder_is_none() {
        let mut movie = MovieSummary::new("tt1", "One", "2001");
        assert_eq!(movie.poster(), None);
        movie.poster_url = "https://img.example/one.jpg".into();
        assert_eq!(movie.poster(), Some("https://img.example/one.jpg"));
    }

    #[test]
    fn category_tags_parse_back() {
        for category in Category::ALL {
            assert_eq!(category.tag().parse::<Category>(), Ok(category));
        }
        assert_eq!("Sci-Fi".parse::<Category>(), Ok(Category::SciFi));
        assert!("westerns".parse::<Category>().is_err());
    }

    #[test]
    fn entry_reads_flat_fixture_json() {
        let json = r#"{
            "id": "tt0137523",
            "title": "Fight Club",
            "year": "1999",
            "kind": "movie",
            "poster_url": "N/A",
            "genres": ["Drama"],
            "director": "David Fincher",
            "actors": ["Brad Pitt", "Edward Norton"],
            "category": "drama",
            "continue_watching": { "percentage": 67 }
        }"#;

        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id(), "tt0137523");
        assert_eq!(entry.detail.actor_line(), "Brad Pitt, Edward Norton");
        assert_eq!(entry.curation.category, Some(Category::Drama));
        assert_eq!(entry.curation.continue_watching, Some(WatchProgress { percentage: 67 }));
        assert!(!entry.curation.featured);
    }

    #[test]
    fn summary_serialization_is_stable() {
        let movie = MovieSummary {
            id: "tt0468569".into(),
            title: "The Dark Knight".into(),
            year: "2008".into(),
            kind: MovieKind::Movie,
            poster_url: "N/A".into(),
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "tt0468569",
                "title": "The Dark Knight",
                "year": "2008",
                "kind": "movie",
                "poster_url": "N/A"
            })
        );
    }
}
