//! Notification feed and bulk maintenance.

use std::sync::Arc;

use tracing::info;

use inkwell_core::config::FeedConfig;
use inkwell_core::result::AppResult;
use inkwell_core::types::pagination::{PageRequest, PageResponse};
use inkwell_database::store::NotificationStore;
use inkwell_entity::notification::Notification;

use crate::context::RequestContext;

/// Reads and maintains a user's notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
    /// Default feed page size.
    per_page: u64,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>, feed: &FeedConfig) -> Self {
        Self {
            store,
            per_page: feed.notifications_per_page,
        }
    }

    /// Default page size of the feed.
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// One page of the caller's notifications, newest first.
    ///
    /// Viewing the feed marks every notification of the caller read. The
    /// returned items still carry the read flag they had before the view.
    pub async fn feed(
        &self,
        ctx: &RequestContext,
        page: u64,
    ) -> AppResult<PageResponse<Notification>> {
        self.feed_page(ctx, PageRequest::new(page, self.per_page)).await
    }

    /// Like [`Self::feed`] with an explicit page size.
    pub async fn feed_page(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total = self.store.count_for_recipient(ctx.user_id).await?;
        let page = page.clamp_to(total);
        let items = self.store.list_for_recipient(ctx.user_id, &page).await?;

        self.mark_all_read(ctx).await?;

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    /// Unread notifications of the caller.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.store.count_unread(ctx.user_id).await
    }

    /// Marks all of the caller's notifications read. Returns rows changed.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        let changed = self.store.mark_all_read(ctx.user_id).await?;
        if changed > 0 {
            info!(user_id = %ctx.user_id, changed, "Notifications marked read");
        }
        Ok(changed)
    }

    /// Deletes every notification of the caller. Returns rows removed.
    pub async fn clear_all(&self, ctx: &RequestContext) -> AppResult<u64> {
        let removed = self.store.clear_all(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, removed, "Notifications cleared");
        Ok(removed)
    }
}
