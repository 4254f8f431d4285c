//! Lifecycle validation for create and update requests.
//!
//! Both operations reduce a raw [`PostInput`] to a canonical record or a
//! typed rejection; the repository is only reached after validation
//! succeeds, so a failed request never leaves partial state behind.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use super::model::{NewPost, Post, PostInput, PostStatus};
use super::time;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,
    #[error("content is required")]
    EmptyContent,
    #[error("author is required")]
    EmptyAuthor,
    #[error("a schedule date is required for scheduled posts")]
    MissingSchedule,
}

impl ValidationError {
    /// Field the rejection refers to, for field-level error responses.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyContent => "content",
            Self::EmptyAuthor => "author",
            Self::MissingSchedule => "scheduledFor",
        }
    }
}

/// Validate a create request and stamp its timestamps.
///
/// The requested status is honored as-is (defaulting to draft), but
/// `published_at` is never stamped here: promotion happens through the
/// update path once the post exists.
pub fn validate_for_create(
    input: PostInput,
    now: DateTime<Utc>,
) -> Result<NewPost, ValidationError> {
    let title = required(input.title, ValidationError::EmptyTitle)?;
    let content = required(input.content, ValidationError::EmptyContent)?;
    let author = required(input.author, ValidationError::EmptyAuthor)?;
    let status = input.status.unwrap_or_default();
    let scheduled_for = resolve_schedule(status, input.scheduled_for.as_ref())?;

    Ok(NewPost {
        title,
        content,
        excerpt: none_if_empty(input.excerpt),
        status,
        scheduled_for,
        created_at: now,
        updated_at: now,
        featured_image: none_if_empty(input.featured_image),
        author,
    })
}

/// Validate an update against the stored post.
///
/// `id`, `slug`, and `created_at` always carry over from the stored post;
/// the input cannot touch them. The first transition into published stamps
/// `published_at = now`; an already-published post keeps its original
/// stamp, including across a later demotion to draft.
pub fn validate_for_update(
    existing: &Post,
    input: PostInput,
    now: DateTime<Utc>,
) -> Result<Post, ValidationError> {
    let title = required(input.title, ValidationError::EmptyTitle)?;
    let content = required(input.content, ValidationError::EmptyContent)?;
    let author = required(input.author, ValidationError::EmptyAuthor)?;
    let status = input.status.unwrap_or(existing.status);
    let scheduled_for = resolve_schedule(status, input.scheduled_for.as_ref())?;

    let published_at = match (status, existing.published_at) {
        (PostStatus::Published, None) => Some(now),
        (_, stamped) => stamped,
    };

    Ok(Post {
        id: existing.id,
        slug: existing.slug.clone(),
        created_at: existing.created_at,
        title,
        content,
        excerpt: none_if_empty(input.excerpt),
        status,
        scheduled_for,
        published_at,
        updated_at: now,
        featured_image: none_if_empty(input.featured_image),
        author,
    })
}

/// A schedule only means something while the post is scheduled; any prior
/// value is dropped the moment the status moves away.
fn resolve_schedule(
    status: PostStatus,
    raw: Option<&Value>,
) -> Result<Option<DateTime<Utc>>, ValidationError> {
    if status != PostStatus::Scheduled {
        return Ok(None);
    }
    match time::normalize_opt(raw) {
        Some(instant) => Ok(Some(instant)),
        None => Err(ValidationError::MissingSchedule),
    }
}

fn required(value: Option<String>, missing: ValidationError) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(missing),
    }
}

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn input() -> PostInput {
        PostInput {
            title: Some("Hello World".to_string()),
            content: Some("Body".to_string()),
            author: Some("Ana".to_string()),
            ..Default::default()
        }
    }

    fn stored(status: PostStatus) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: "Hello World".to_string(),
            slug: "hello-world".to_string(),
            content: "Body".to_string(),
            excerpt: None,
            status,
            scheduled_for: match status {
                PostStatus::Scheduled => Some(now()),
                _ => None,
            },
            published_at: None,
            created_at: Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(),
            featured_image: None,
            author: "Ana".to_string(),
        }
    }

    #[test]
    fn create_defaults_to_draft_and_stamps_timestamps() {
        let post = validate_for_create(input(), now()).unwrap();
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.created_at, now());
        assert_eq!(post.updated_at, now());
    }

    #[test]
    fn create_rejects_missing_required_fields() {
        let mut missing_title = input();
        missing_title.title = None;
        assert_eq!(
            validate_for_create(missing_title, now()),
            Err(ValidationError::EmptyTitle)
        );

        let mut empty_content = input();
        empty_content.content = Some(String::new());
        assert_eq!(
            validate_for_create(empty_content, now()),
            Err(ValidationError::EmptyContent)
        );

        let mut empty_author = input();
        empty_author.author = Some(String::new());
        assert_eq!(
            validate_for_create(empty_author, now()),
            Err(ValidationError::EmptyAuthor)
        );
    }

    #[test]
    fn create_rejects_scheduled_without_date() {
        let mut scheduled = input();
        scheduled.status = Some(PostStatus::Scheduled);
        assert_eq!(
            validate_for_create(scheduled, now()),
            Err(ValidationError::MissingSchedule)
        );

        let mut unparseable = input();
        unparseable.status = Some(PostStatus::Scheduled);
        unparseable.scheduled_for = Some(json!("not a date"));
        assert_eq!(
            validate_for_create(unparseable, now()),
            Err(ValidationError::MissingSchedule)
        );
    }

    #[test]
    fn create_normalizes_schedule_once() {
        let mut scheduled = input();
        scheduled.status = Some(PostStatus::Scheduled);
        scheduled.scheduled_for = Some(json!({ "seconds": 1_717_243_200 }));
        let post = validate_for_create(scheduled, now()).unwrap();
        assert_eq!(
            post.scheduled_for,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn create_ignores_schedule_on_non_scheduled_status() {
        let mut draft = input();
        draft.scheduled_for = Some(json!("2024-06-01T12:00:00Z"));
        let post = validate_for_create(draft, now()).unwrap();
        assert_eq!(post.scheduled_for, None);
    }

    #[test]
    fn create_never_stamps_published_at() {
        let mut published = input();
        published.status = Some(PostStatus::Published);
        let post = validate_for_create(published, now()).unwrap();
        assert_eq!(post.status, PostStatus::Published);
        // NewPost carries no publication stamp; the update path owns it.
        assert_eq!(post.scheduled_for, None);
    }

    #[test]
    fn update_preserves_identity_fields() {
        let existing = stored(PostStatus::Draft);
        let mut edit = input();
        edit.title = Some("New Title".to_string());
        let updated = validate_for_update(&existing, edit, now()).unwrap();
        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.slug, existing.slug);
        assert_eq!(updated.created_at, existing.created_at);
        assert_eq!(updated.title, "New Title");
        assert_eq!(updated.updated_at, now());
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn update_rejects_empty_title() {
        let existing = stored(PostStatus::Draft);
        let mut edit = input();
        edit.title = Some(String::new());
        assert_eq!(
            validate_for_update(&existing, edit, now()),
            Err(ValidationError::EmptyTitle)
        );
    }

    #[test]
    fn update_away_from_scheduled_drops_schedule() {
        let existing = stored(PostStatus::Scheduled);
        assert!(existing.scheduled_for.is_some());

        let mut edit = input();
        edit.status = Some(PostStatus::Draft);
        let updated = validate_for_update(&existing, edit, now()).unwrap();
        assert_eq!(updated.status, PostStatus::Draft);
        assert_eq!(updated.scheduled_for, None);
    }

    #[test]
    fn update_to_scheduled_requires_date() {
        let existing = stored(PostStatus::Draft);
        let mut edit = input();
        edit.status = Some(PostStatus::Scheduled);
        assert_eq!(
            validate_for_update(&existing, edit, now()),
            Err(ValidationError::MissingSchedule)
        );
    }

    #[test]
    fn first_publish_stamps_published_at_once() {
        let existing = stored(PostStatus::Draft);
        let mut publish = input();
        publish.status = Some(PostStatus::Published);
        let published = validate_for_update(&existing, publish, now()).unwrap();
        assert_eq!(published.published_at, Some(now()));

        // A later edit keeps the original stamp.
        let later = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let mut edit = input();
        edit.status = Some(PostStatus::Published);
        let edited = validate_for_update(&published, edit, later).unwrap();
        assert_eq!(edited.published_at, Some(now()));

        // And demotion to draft does not erase history.
        let mut demote = input();
        demote.status = Some(PostStatus::Draft);
        let demoted = validate_for_update(&edited, demote, later).unwrap();
        assert_eq!(demoted.published_at, Some(now()));
    }
}
