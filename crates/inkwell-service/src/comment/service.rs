//! Comment creation, listing, deletion, and moderation.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use inkwell_core::config::FeedConfig;
use inkwell_core::error::AppError;
use inkwell_core::result::AppResult;
use inkwell_core::types::pagination::{PageRequest, PageResponse};
use inkwell_database::store::{ArticleStore, CommentStore, CommentTransaction};
use inkwell_entity::comment::{
    Comment, CommentDeletion, NewComment, TOMBSTONE_TEXT, ThreadedComment,
};

use super::thread::flatten_forest;
use crate::context::RequestContext;
use crate::notification::NotificationDispatcher;

/// Request to post a comment on an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    /// Comment body.
    pub content: String,
    /// Comment being replied to, if any.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Maintains the comment tree of every article.
#[derive(Debug, Clone)]
pub struct CommentService {
    /// Comment store.
    comments: Arc<dyn CommentStore>,
    /// Article store.
    articles: Arc<dyn ArticleStore>,
    /// Notification dispatcher run inside the create transaction.
    dispatcher: NotificationDispatcher,
    /// Flattened entries per page.
    per_page: u64,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        comments: Arc<dyn CommentStore>,
        articles: Arc<dyn ArticleStore>,
        dispatcher: NotificationDispatcher,
        feed: &FeedConfig,
    ) -> Self {
        Self {
            comments,
            articles,
            dispatcher,
            per_page: feed.comments_per_page,
        }
    }

    /// Default number of flattened entries per page.
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Posts a comment and notifies whoever it addresses.
    ///
    /// A `parent_id` that matches no comment is ignored and the comment
    /// becomes a root. A parent on another article or one that has been
    /// deactivated is rejected.
    pub async fn create(
        &self,
        ctx: Option<&RequestContext>,
        article_id: Uuid,
        req: CreateCommentRequest,
    ) -> AppResult<Comment> {
        let ctx = ctx.ok_or_else(|| AppError::authentication("Log in to post a comment"))?;

        let content = req.content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Comment content cannot be empty"));
        }

        let mut tx = self.comments.begin().await?;

        tx.find_article(article_id)
            .await?
            .filter(|a| a.is_visible_to(Some(ctx.user_id)))
            .ok_or_else(|| AppError::not_found(format!("Article {article_id} not found")))?;

        let parent_id = match req.parent_id {
            Some(requested) => resolve_parent(tx.as_mut(), article_id, requested).await?,
            None => None,
        };

        let comment = tx
            .insert_comment(NewComment {
                article_id,
                author_id: ctx.user_id,
                parent_id,
                content: content.to_string(),
                created_at: Utc::now(),
            })
            .await?;

        self.dispatcher
            .on_comment_created(tx.as_mut(), &comment)
            .await?;

        tx.commit().await?;

        info!(
            comment_id = %comment.id,
            article_id = %article_id,
            user_id = %ctx.user_id,
            parent_id = ?comment.parent_id,
            "Comment created"
        );

        Ok(comment)
    }

    /// One page of the article's active comments in thread order.
    ///
    /// The thread of a draft is only visible to the draft's author. Pages
    /// past the end resolve to the last one.
    pub async fn flatten(
        &self,
        viewer: Option<&RequestContext>,
        article_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<ThreadedComment>> {
        self.articles
            .find_article(article_id)
            .await?
            .filter(|a| a.is_visible_to(viewer.map(|ctx| ctx.user_id)))
            .ok_or_else(|| AppError::not_found(format!("Article {article_id} not found")))?;

        let active = self.comments.list_active_for_article(article_id).await?;
        let flat = flatten_forest(active);

        let total = flat.len() as u64;
        let page = page.clamp_to(total);
        let items = page.slice(&flat);

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    /// Deletes a comment on behalf of its author.
    ///
    /// A comment with replies is tombstoned. A leaf is removed, and then
    /// every tombstoned ancestor left without replies is removed too.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        comment_id: Uuid,
    ) -> AppResult<CommentDeletion> {
        let mut tx = self.comments.begin().await?;

        let comment = tx
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Comment {comment_id} not found")))?;

        if !comment.is_authored_by(ctx.user_id) {
            return Err(AppError::authorization(
                "Only the author can delete this comment",
            ));
        }

        let outcome = if tx.count_replies(comment_id).await? > 0 {
            let comment = tx.tombstone_comment(comment_id, TOMBSTONE_TEXT).await?;
            CommentDeletion::Tombstoned { comment }
        } else {
            tx.delete_comment(comment_id).await?;
            let mut removed = vec![comment_id];
            prune_tombstoned_ancestors(tx.as_mut(), comment.parent_id, &mut removed).await?;
            CommentDeletion::Removed { removed }
        };

        tx.commit().await?;

        info!(
            comment_id = %comment_id,
            user_id = %ctx.user_id,
            outcome = outcome_label(&outcome),
            "Comment deleted"
        );

        Ok(outcome)
    }

    /// Hides or restores a comment. Staff only.
    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        comment_id: Uuid,
        active: bool,
    ) -> AppResult<Comment> {
        if !ctx.is_staff() {
            return Err(AppError::authorization("Only staff can moderate comments"));
        }

        let comment = self
            .comments
            .set_active(comment_id, active)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Comment {comment_id} not found")))?;

        info!(
            comment_id = %comment_id,
            moderator_id = %ctx.user_id,
            active,
            "Comment moderation state changed"
        );

        Ok(comment)
    }
}

async fn resolve_parent(
    tx: &mut dyn CommentTransaction,
    article_id: Uuid,
    requested: Uuid,
) -> AppResult<Option<Uuid>> {
    let Some(parent) = tx.find_comment(requested).await? else {
        debug!(parent_id = %requested, "Unknown parent, posting as a root comment");
        return Ok(None);
    };

    if parent.article_id != article_id {
        return Err(AppError::validation(
            "Parent comment belongs to a different article",
        ));
    }
    if !parent.is_active {
        return Err(AppError::validation("Cannot reply to a hidden comment"));
    }

    Ok(Some(parent.id))
}

/// Walk up from `parent_id`, removing tombstones that no longer have replies.
///
/// Reply counts are re-read after every removal.
async fn prune_tombstoned_ancestors(
    tx: &mut dyn CommentTransaction,
    mut parent_id: Option<Uuid>,
    removed: &mut Vec<Uuid>,
) -> AppResult<()> {
    while let Some(id) = parent_id {
        let Some(parent) = tx.find_comment(id).await? else {
            break;
        };
        if parent.author_id.is_some() || tx.count_replies(id).await? > 0 {
            break;
        }

        tx.delete_comment(id).await?;
        debug!(comment_id = %id, "Pruned childless tombstone");
        removed.push(id);
        parent_id = parent.parent_id;
    }
    Ok(())
}

fn outcome_label(outcome: &CommentDeletion) -> &'static str {
    match outcome {
        CommentDeletion::Tombstoned { .. } => "tombstoned",
        CommentDeletion::Removed { .. } => "removed",
    }
}
