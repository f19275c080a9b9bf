//! Paged project and forum post listings.
//!
//! Listings only cover persisted rows; slugs served by the fallback store
//! never appear in them. Each summary carries the vote and comment counts
//! the list pages display.

use std::fmt;
use std::str::FromStr;

use super::{ForumPost, Project, ProjectStatus};

/// Default page size for project listings.
pub const PROJECT_PAGE_SIZE: u32 = 9;
/// Default page size for forum listings.
pub const FORUM_PAGE_SIZE: u32 = 10;
/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 50;
/// Longest accepted search term, in characters.
pub const SEARCH_MAX_CHARS: usize = 100;

/// Rejections raised while building a listing request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingValidationError {
    #[error("page must be a positive integer")]
    InvalidPage,
    #[error("limit must be between 1 and {max}")]
    InvalidLimit { max: u32 },
    #[error("sort must be one of {allowed}")]
    InvalidSort { allowed: &'static str },
    #[error("search must be at most {max} characters")]
    SearchTooLong { max: usize },
}

impl ListingValidationError {
    /// Name of the offending query parameter.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidPage => "page",
            Self::InvalidLimit { .. } => "limit",
            Self::InvalidSort { .. } => "sort",
            Self::SearchTooLong { .. } => "search",
        }
    }
}

/// One-based page number and page size.
///
/// # Examples
/// ```
/// use devhunt::domain::PageRequest;
///
/// let page = PageRequest::new(3, 9).expect("valid page");
/// assert_eq!(page.offset(), 18);
/// assert!(PageRequest::new(0, 9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, ListingValidationError> {
        if page == 0 {
            return Err(ListingValidationError::InvalidPage);
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(ListingValidationError::InvalidLimit { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, limit })
    }

    /// First page of `limit` rows.
    pub fn first(limit: u32) -> Result<Self, ListingValidationError> {
        Self::new(1, limit)
    }

    pub fn page(self) -> u32 {
        self.page
    }

    pub fn limit(self) -> u32 {
        self.limit
    }

    /// Rows skipped before this page.
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Case-insensitive substring filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Trim `raw`; blank input means "no filter" and yields `None`.
    pub fn parse(raw: &str) -> Result<Option<Self>, ListingValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.chars().count() > SEARCH_MAX_CHARS {
            return Err(ListingValidationError::SearchTooLong {
                max: SEARCH_MAX_CHARS,
            });
        }
        Ok(Some(Self(trimmed.to_owned())))
    }

    /// `ILIKE` pattern matching the term anywhere, with `%`, `_` and `\`
    /// escaped.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Order of a project listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectSort {
    #[default]
    Newest,
    /// Most votes overall.
    Popular,
    /// Most votes cast in the last seven days.
    Trending,
}

impl FromStr for ProjectSort {
    type Err = ListingValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "popular" => Ok(Self::Popular),
            "trending" => Ok(Self::Trending),
            _ => Err(ListingValidationError::InvalidSort {
                allowed: "newest, popular, trending",
            }),
        }
    }
}

/// Order of a forum listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForumSort {
    #[default]
    Newest,
    /// Most votes.
    Popular,
    /// Most comments.
    Active,
}

impl FromStr for ForumSort {
    type Err = ListingValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "popular" => Ok(Self::Popular),
            "active" => Ok(Self::Active),
            _ => Err(ListingValidationError::InvalidSort {
                allowed: "newest, popular, active",
            }),
        }
    }
}

/// Project listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectListQuery {
    pub page: PageRequest,
    /// `None` lists every status.
    pub status: Option<ProjectStatus>,
    pub sort: ProjectSort,
    pub search: Option<SearchTerm>,
}

/// Forum listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumPostListQuery {
    pub page: PageRequest,
    pub sort: ForumSort,
    pub search: Option<SearchTerm>,
}

/// Project row with its aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub project: Project,
    pub vote_count: u64,
    pub comment_count: u64,
}

/// Forum post row with its aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumPostSummary {
    pub post: ForumPost,
    pub vote_count: u64,
    pub comment_count: u64,
}

/// One page of results plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: PageRequest,
    pub total: u64,
}

impl<T> Paginated<T> {
    pub fn empty(page: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            page,
            total: 0,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page.limit()))
    }
}

impl fmt::Display for ProjectSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Newest => "newest",
            Self::Popular => "popular",
            Self::Trending => "trending",
        })
    }
}

impl fmt::Display for ForumSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Newest => "newest",
            Self::Popular => "popular",
            Self::Active => "active",
        })
    }
}
