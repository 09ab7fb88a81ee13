//! Recipient resolution for new comments.

use chrono::Utc;
use tracing::debug;

use inkwell_core::error::AppError;
use inkwell_core::result::AppResult;
use inkwell_database::store::CommentTransaction;
use inkwell_entity::comment::Comment;
use inkwell_entity::notification::{
    NewNotification, Notification, NotificationTarget, NotificationVerb,
};

/// Emits at most one notification per newly created comment.
///
/// A root comment notifies the article author; a reply notifies the
/// author of the parent comment. Nobody is notified about their own
/// comment, and a reply to a tombstone notifies no one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationDispatcher;

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new() -> Self {
        Self
    }

    /// Record the notification for `comment` inside the creating transaction.
    ///
    /// Must be called exactly once per created comment.
    pub async fn on_comment_created(
        &self,
        tx: &mut dyn CommentTransaction,
        comment: &Comment,
    ) -> AppResult<Option<Notification>> {
        let Some(actor_id) = comment.author_id else {
            return Ok(None);
        };

        let (recipient_id, verb) = match comment.parent_id {
            None => {
                let article = tx.find_article(comment.article_id).await?.ok_or_else(|| {
                    AppError::not_found(format!("Article {} not found", comment.article_id))
                })?;
                (Some(article.author_id), NotificationVerb::CommentedOnArticle)
            }
            Some(parent_id) => {
                let parent_author = tx.find_comment(parent_id).await?.and_then(|p| p.author_id);
                (parent_author, NotificationVerb::RepliedToComment)
            }
        };

        let Some(recipient_id) = recipient_id.filter(|r| *r != actor_id) else {
            debug!(comment_id = %comment.id, "No notification recipient");
            return Ok(None);
        };

        let target = match verb {
            NotificationVerb::CommentedOnArticle => NotificationTarget::Article(comment.article_id),
            NotificationVerb::RepliedToComment => NotificationTarget::Comment(comment.id),
        };

        let notification = tx
            .insert_notification(NewNotification {
                recipient_id,
                actor_id,
                verb,
                target,
                created_at: Utc::now(),
            })
            .await?;

        debug!(
            notification_id = %notification.id,
            recipient_id = %recipient_id,
            verb = %verb,
            "Notification recorded"
        );

        Ok(Some(notification))
    }
}
