use thiserror::Error;

use crate::model::ids::RecordId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Reasons a record is rejected as malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("record is missing an id")]
    MissingId,

    #[error("record {0} is missing a display name")]
    MissingDisplayName(RecordId),

    #[error("record {0} is missing a photo url")]
    MissingPhotoUrl(RecordId),
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated record fields as they come out of a data source.
///
/// Every field is optional here; `validate` decides which absences are fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub preferred_name: Option<String>,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
    pub group: Option<String>,
    pub gender: Option<String>,
    pub job_title: Option<String>,
    pub location: Option<String>,
}

impl RecordDraft {
    /// Draft with the three required fields set.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        photo_url: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            display_name: Some(display_name.into()),
            photo_url: Some(photo_url.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    #[must_use]
    pub fn with_names(mut self, preferred: impl Into<String>, last: impl Into<String>) -> Self {
        self.preferred_name = Some(preferred.into());
        self.last_name = Some(last.into());
        self
    }

    #[must_use]
    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = Some(job_title.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Validate required fields and normalize blank optional fields to `None`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` when the id, display name or photo url is missing or blank.
    pub fn validate(self) -> Result<Record, RecordError> {
        let id = non_blank(self.id).ok_or(RecordError::MissingId)?;
        let id = RecordId::new(id);
        let display_name = non_blank(self.display_name)
            .ok_or_else(|| RecordError::MissingDisplayName(id.clone()))?;
        let photo_url =
            non_blank(self.photo_url).ok_or_else(|| RecordError::MissingPhotoUrl(id.clone()))?;

        Ok(Record {
            id,
            display_name,
            preferred_name: non_blank(self.preferred_name),
            last_name: non_blank(self.last_name),
            photo_url,
            group: non_blank(self.group),
            gender: non_blank(self.gender),
            job_title: non_blank(self.job_title),
            location: non_blank(self.location),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_owned())
        }
    })
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// One person in the directory. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    display_name: String,
    preferred_name: Option<String>,
    last_name: Option<String>,
    photo_url: String,
    group: Option<String>,
    gender: Option<String>,
    job_title: Option<String>,
    location: Option<String>,
}

impl Record {
    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn preferred_name(&self) -> Option<&str> {
        self.preferred_name.as_deref()
    }

    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    #[must_use]
    pub fn photo_url(&self) -> &str {
        &self.photo_url
    }

    /// The categorical attribute used for filtering, if the source had one.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    #[must_use]
    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    #[must_use]
    pub fn job_title(&self) -> Option<&str> {
        self.job_title.as_deref()
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Name shown on a choice button.
    ///
    /// People who set a preferred name are shown as "Preferred Last"; everyone
    /// else by their display name.
    #[must_use]
    pub fn label(&self) -> String {
        match (self.preferred_name(), self.last_name()) {
            (Some(preferred), Some(last)) => format!("{preferred} {last}"),
            (Some(preferred), None) => preferred.to_owned(),
            (None, _) => self.display_name.clone(),
        }
    }

    /// True when this record belongs to `group`.
    #[must_use]
    pub fn in_group(&self, group: &str) -> bool {
        self.group() == Some(group)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
