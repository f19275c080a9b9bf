//! Project submissions and project detail read model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use super::{Comment, OwnerProfile, Slug};

pub const PROJECT_NAME_MIN: usize = 2;
pub const PROJECT_TAGLINE_MIN: usize = 5;
pub const PROJECT_TAGLINE_MAX: usize = 100;
pub const PROJECT_DESCRIPTION_MIN: usize = 20;

/// Lifecycle stage advertised by a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    Development,
    Beta,
    Launched,
}

impl ProjectStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Beta => "beta",
            Self::Launched => "launched",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ProjectValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "beta" => Ok(Self::Beta),
            "launched" => Ok(Self::Launched),
            _ => Err(ProjectValidationError::InvalidStatus),
        }
    }
}

/// Validation errors for project submissions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectValidationError {
    #[error("name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("tagline must be at least {min} characters")]
    TaglineTooShort { min: usize },
    #[error("tagline must be at most {max} characters")]
    TaglineTooLong { max: usize },
    #[error("description must be at least {min} characters")]
    DescriptionTooShort { min: usize },
    #[error("{field} must be an absolute http(s) URL")]
    InvalidUrl { field: &'static str },
    #[error("status must be one of development, beta, launched")]
    InvalidStatus,
}

impl ProjectValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameTooShort { .. } => "name",
            Self::TaglineTooShort { .. } | Self::TaglineTooLong { .. } => "tagline",
            Self::DescriptionTooShort { .. } => "description",
            Self::InvalidUrl { field } => field,
            Self::InvalidStatus => "status",
        }
    }
}

/// Raw project submission fields prior to validation.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub website: Option<String>,
    pub github: Option<String>,
    pub status: String,
}

/// Validated project submission.
///
/// ## Invariants
/// - `name` has at least [`PROJECT_NAME_MIN`] characters.
/// - `tagline` has between [`PROJECT_TAGLINE_MIN`] and
///   [`PROJECT_TAGLINE_MAX`] characters.
/// - `description` has at least [`PROJECT_DESCRIPTION_MIN`] characters.
/// - `website` and `github`, when present, are absolute http(s) URLs. Empty
///   strings are treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    name: String,
    tagline: String,
    description: String,
    website: Option<Url>,
    github: Option<Url>,
    status: ProjectStatus,
}

impl NewProject {
    /// Validate a draft.
    ///
    /// # Examples
    /// ```
    /// use devhunt::domain::{NewProject, ProjectDraft, ProjectStatus};
    ///
    /// let project = NewProject::try_from_draft(ProjectDraft {
    ///     name: "Code Craft".into(),
    ///     tagline: "Sharpen your tools".into(),
    ///     description: "A workshop for building better developer tooling.".into(),
    ///     website: Some(String::new()),
    ///     github: Some("https://github.com/devhunt/code-craft".into()),
    ///     status: "beta".into(),
    /// })
    /// .expect("valid draft");
    /// assert!(project.website().is_none());
    /// assert_eq!(project.status(), ProjectStatus::Beta);
    /// ```
    pub fn try_from_draft(draft: ProjectDraft) -> Result<Self, ProjectValidationError> {
        let ProjectDraft {
            name,
            tagline,
            description,
            website,
            github,
            status,
        } = draft;

        if name.chars().count() < PROJECT_NAME_MIN {
            return Err(ProjectValidationError::NameTooShort {
                min: PROJECT_NAME_MIN,
            });
        }
        let tagline_len = tagline.chars().count();
        if tagline_len < PROJECT_TAGLINE_MIN {
            return Err(ProjectValidationError::TaglineTooShort {
                min: PROJECT_TAGLINE_MIN,
            });
        }
        if tagline_len > PROJECT_TAGLINE_MAX {
            return Err(ProjectValidationError::TaglineTooLong {
                max: PROJECT_TAGLINE_MAX,
            });
        }
        if description.chars().count() < PROJECT_DESCRIPTION_MIN {
            return Err(ProjectValidationError::DescriptionTooShort {
                min: PROJECT_DESCRIPTION_MIN,
            });
        }
        let website = parse_optional_url("website", website)?;
        let github = parse_optional_url("github", github)?;
        let status = status.parse()?;

        Ok(Self {
            name,
            tagline,
            description,
            website,
            github,
            status,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tagline(&self) -> &str {
        &self.tagline
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn website(&self) -> Option<&Url> {
        self.website.as_ref()
    }

    pub fn github(&self) -> Option<&Url> {
        self.github.as_ref()
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }
}

fn parse_optional_url(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<Url>, ProjectValidationError> {
    let Some(raw) = value.filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    let url = Url::parse(&raw).map_err(|_| ProjectValidationError::InvalidUrl { field })?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(ProjectValidationError::InvalidUrl { field });
    }
    Ok(Some(url))
}

/// Persisted project row with its owner projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: Uuid,
    pub slug: Slug,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub website: Option<String>,
    pub github: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub owner: OwnerProfile,
}

/// Project detail with aggregates and comments (newest first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetail {
    pub project: Project,
    pub vote_count: u64,
    pub comment_count: u64,
    pub comments: Vec<Comment>,
}
