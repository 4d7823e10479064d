use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::domain::{Clock, Term, TermError, TermInput, TermStore};

// Whether an upsert targeted an explicit id or created a fresh entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertMode {
    Created,
    Updated,
}

pub struct UpsertTermResult {
    pub term: Term,
    pub mode: UpsertMode,
}

// Lists every term in file order.
pub struct ListTermsUseCase<S> {
    pub store: S,
}

impl<S> ListTermsUseCase<S>
where
    S: TermStore,
{
    pub async fn execute(&self) -> Result<Vec<Term>, TermError> {
        self.store.load().await.map_err(TermError::StorageFailure)
    }
}

// Creates or replaces a term and rewrites the whole catalog.
pub struct UpsertTermUseCase<C, S> {
    pub clock: C,
    pub store: S,
}

impl<C, S> UpsertTermUseCase<C, S>
where
    C: Clock,
    S: TermStore,
{
    pub async fn execute(&self, input: TermInput) -> Result<UpsertTermResult, TermError> {
        let supplied_id = input
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        let title = require_field(input.title.as_deref(), "title")?;
        let description = require_field(input.description.as_deref(), "description")?;
        let image = require_field(input.image.as_deref(), "image")?;

        let id = supplied_id
            .clone()
            .or_else(|| Some(slugify(&title)).filter(|slug| !slug.is_empty()))
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let now = rfc3339_from_millis(self.clock.now_epoch_millis())?;

        let mut terms = self
            .store
            .load()
            .await
            .map_err(TermError::StorageFailure)?;

        let term = match terms.iter_mut().find(|item| item.id == id) {
            Some(existing) => {
                existing.title = title;
                existing.description = description;
                existing.image = image;
                if existing.created_at.is_none() {
                    existing.created_at = Some(now.clone());
                }
                existing.updated_at = Some(now);
                existing.clone()
            }
            None => {
                let term = Term {
                    id,
                    title,
                    description,
                    image,
                    created_at: Some(now.clone()),
                    updated_at: Some(now),
                };
                terms.push(term.clone());
                term
            }
        };

        self.store
            .persist(&terms)
            .await
            .map_err(TermError::StorageFailure)?;

        let mode = if supplied_id.is_some() {
            UpsertMode::Updated
        } else {
            UpsertMode::Created
        };
        Ok(UpsertTermResult { term, mode })
    }
}

// Removes a term by id and rewrites the whole catalog.
pub struct DeleteTermUseCase<S> {
    pub store: S,
}

impl<S> DeleteTermUseCase<S>
where
    S: TermStore,
{
    pub async fn execute(&self, id: &str) -> Result<String, TermError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(TermError::NotFound);
        }

        let mut terms = self
            .store
            .load()
            .await
            .map_err(TermError::StorageFailure)?;
        terms.retain(|term| term.id != id);
        self.store
            .persist(&terms)
            .await
            .map_err(TermError::StorageFailure)?;

        Ok(id.to_string())
    }
}

fn require_field(value: Option<&str>, label: &'static str) -> Result<String, TermError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(TermError::MissingField(label)),
    }
}

// Lowercase ASCII slug; any run of other characters becomes a single dash.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    for c in input.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

fn rfc3339_from_millis(millis: u64) -> Result<String, TermError> {
    let nanos = i128::from(millis) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .map_err(|err| TermError::StorageFailure(err.to_string()))?
        .format(&Rfc3339)
        .map_err(|err| TermError::StorageFailure(err.to_string()))
}
