//! Search query representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Maximum query length, in characters.
pub const MAX_QUERY_LEN: usize = 100;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 50;

/// Page size used when the caller does not specify one.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Ordering hint forwarded to providers that support one.
///
/// Best effort: providers without an equivalent parameter ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Relevant,
    Latest,
    Oldest,
}

impl OrderBy {
    /// Returns the wire name of the hint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevant => "relevant",
            Self::Latest => "latest",
            Self::Oldest => "oldest",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "relevant" => Ok(Self::Relevant),
            "latest" => Ok(Self::Latest),
            "oldest" => Ok(Self::Oldest),
            other => Err(SearchError::InvalidQuery(format!(
                "order_by must be one of relevant, latest, oldest (got '{}')",
                other
            ))),
        }
    }
}

/// An image search request with all parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageQuery {
    /// The search terms.
    pub query: String,
    /// Page number (1-indexed).
    pub page: u32,
    /// Images requested per provider.
    pub per_page: u32,
    /// Requested provider identifiers. Empty means the default set.
    pub sources: Vec<String>,
    /// Ordering hint.
    pub order_by: OrderBy,
}

impl ImageQuery {
    /// Creates a new query with the given terms and default paging.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sources: Vec::new(),
            order_by: OrderBy::Relevant,
        }
    }

    /// Sets the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets the requested sources.
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the ordering hint.
    pub fn with_order(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    /// Checks the hard bounds on query text and paging.
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(SearchError::InvalidQuery("Query cannot be empty".into()));
        }

        if self.query.chars().count() > MAX_QUERY_LEN {
            return Err(SearchError::InvalidQuery(format!(
                "Query must be at most {} characters",
                MAX_QUERY_LEN
            )));
        }

        if self.page < 1 {
            return Err(SearchError::InvalidQuery("page must be at least 1".into()));
        }

        if !(1..=MAX_PER_PAGE).contains(&self.per_page) {
            return Err(SearchError::InvalidQuery(format!(
                "per_page must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }

        Ok(())
    }
}

/// Splits a comma-separated source list, trimming entries and dropping blanks
/// and repeats while keeping first-seen order.
pub fn parse_sources(raw: &str) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !sources.iter().any(|s| s == id) {
            sources.push(id.to_string());
        }
    }
    sources
}
