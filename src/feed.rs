//! Feed session and view model
//!
//! Ties a [`PaginationController`] to an [`IdentityProvider`] and derives,
//! from their state, what a landing page should show. Nothing here renders;
//! a UI layer maps [`FeedView`] onto its own widgets.

use crate::error::FetchError;
use crate::identity::{Identity, IdentityProvider};
use crate::pagination::{LoadOutcome, PaginationController, Phase, Status};
use crate::source::PageSource;
use crate::types::Item;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Main content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    /// First page still loading
    Spinner,
    /// Show the loaded items
    Items,
}

/// Area below the items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Footer {
    /// Nothing, while the first page loads
    Hidden,
    /// A continuation page is loading
    Spinner,
    /// Idle with more pages available
    LoadMore,
    /// Idle and the cursor is exhausted
    EndOfFeed,
}

/// Everything a landing page needs to decide what to draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedView<T> {
    /// Loaded items in arrival order
    pub items: Vec<T>,
    /// Main content state
    pub body: Body,
    /// Footer state
    pub footer: Footer,
    /// Whether the "new post" composer is offered
    pub can_compose: bool,
    /// Whether follow suggestions are shown
    pub show_suggestions: bool,
}

impl<T> FeedView<T> {
    /// Derive a view from a controller snapshot and the viewer identity
    pub fn from_status(status: Status<T>, identity: &Identity) -> Self {
        let (body, footer) = match status.phase {
            Phase::LoadingInitial => (Body::Spinner, Footer::Hidden),
            Phase::LoadingMore => (Body::Items, Footer::Spinner),
            Phase::Idle if status.has_more => (Body::Items, Footer::LoadMore),
            Phase::Idle => (Body::Items, Footer::EndOfFeed),
        };

        Self {
            items: status.items,
            body,
            footer,
            can_compose: identity.is_auth,
            show_suggestions: identity.is_auth,
        }
    }
}

/// Navigation target for a selected item
pub fn item_route(item_id: &str) -> String {
    format!("/posts/{item_id}")
}

impl<T: Item> FeedView<T> {
    /// Navigation targets for every item, in display order
    pub fn routes(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item_route(item.item_id()))
            .collect()
    }
}

/// One mounted feed: a controller plus the viewer identity
pub struct FeedSession<T> {
    controller: PaginationController<T>,
    identity_provider: Arc<dyn IdentityProvider>,
    identity: RwLock<Identity>,
}

impl<T> FeedSession<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an unmounted session
    pub fn new(
        source: impl PageSource<T> + 'static,
        identity_provider: impl IdentityProvider + 'static,
    ) -> Self {
        Self::from_parts(
            PaginationController::new(source),
            Arc::new(identity_provider),
        )
    }

    /// Create an unmounted session from an existing controller and provider
    pub fn from_parts(
        controller: PaginationController<T>,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            controller,
            identity_provider,
            identity: RwLock::new(Identity::anonymous()),
        }
    }

    /// Load the first page and resolve the viewer concurrently
    pub async fn mount(&self) -> Result<LoadOutcome<T>, FetchError> {
        let (outcome, identity) =
            tokio::join!(self.controller.load_initial(), self.identity_provider.current());

        if self.controller.is_alive() {
            info!(authenticated = identity.is_auth, "feed mounted");
            *self
                .identity
                .write()
                .unwrap_or_else(PoisonError::into_inner) = identity;
        }
        outcome
    }

    /// Request the next page
    pub async fn load_more(&self) -> Result<LoadOutcome<T>, FetchError> {
        self.controller.load_more().await
    }

    /// Current view
    pub fn view(&self) -> FeedView<T> {
        FeedView::from_status(self.controller.status(), &self.identity())
    }

    /// Resolved viewer identity (anonymous until mounted)
    pub fn identity(&self) -> Identity {
        self.identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Handle onto the underlying controller
    pub fn controller(&self) -> &PaginationController<T> {
        &self.controller
    }

    /// Discard the session; in-flight fetches will not touch its state
    pub fn unmount(&self) {
        self.controller.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentity;
    use crate::pagination::Page;
    use async_trait::async_trait;
    use serde_json::json;
    use test_case::test_case;

    struct TwoPages;

    #[async_trait]
    impl PageSource<String> for TwoPages {
        async fn fetch_first_page(&self) -> Result<Page<String>, FetchError> {
            Ok(Page::new(vec!["a".to_string(), "b".to_string()], "k1"))
        }

        async fn fetch_next_page(&self, cursor: &str) -> Result<Page<String>, FetchError> {
            pretty_assertions::assert_eq!(cursor, "k1");
            Ok(Page::new(vec!["c".to_string()], ""))
        }
    }

    fn status(phase: Phase, has_more: bool) -> Status<String> {
        Status {
            items: vec!["a".to_string()],
            has_more,
            phase,
        }
    }

    #[test_case(Phase::LoadingInitial, true => (Body::Spinner, Footer::Hidden) ; "initial load")]
    #[test_case(Phase::LoadingMore, true => (Body::Items, Footer::Spinner) ; "loading more")]
    #[test_case(Phase::Idle, true => (Body::Items, Footer::LoadMore) ; "idle with more")]
    #[test_case(Phase::Idle, false => (Body::Items, Footer::EndOfFeed) ; "idle exhausted")]
    fn test_view_layout(phase: Phase, has_more: bool) -> (Body, Footer) {
        let view = FeedView::from_status(status(phase, has_more), &Identity::anonymous());
        (view.body, view.footer)
    }

    #[test]
    fn test_view_affordances_follow_identity() {
        let view = FeedView::from_status(status(Phase::Idle, true), &Identity::anonymous());
        assert!(!view.can_compose);
        assert!(!view.show_suggestions);

        let identity = Identity::authenticated("t", json!({"handle": "ada"}));
        let view = FeedView::from_status(status(Phase::Idle, true), &identity);
        assert!(view.can_compose);
        assert!(view.show_suggestions);
    }

    #[test]
    fn test_item_routes() {
        pretty_assertions::assert_eq!(item_route("p42"), "/posts/p42");

        let view = FeedView::from_status(status(Phase::Idle, false), &Identity::anonymous());
        pretty_assertions::assert_eq!(view.routes(), vec!["/posts/a".to_string()]);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let identity = Identity::authenticated("t", json!({}));
        let session = FeedSession::new(TwoPages, StaticIdentity::new(identity));

        let before = session.view();
        pretty_assertions::assert_eq!(before.footer, Footer::EndOfFeed);
        assert!(!before.can_compose);

        assert!(session.mount().await.unwrap().is_loaded());
        let view = session.view();
        pretty_assertions::assert_eq!(view.items, vec!["a".to_string(), "b".to_string()]);
        pretty_assertions::assert_eq!(view.footer, Footer::LoadMore);
        assert!(view.can_compose);

        session.load_more().await.unwrap();
        let view = session.view();
        pretty_assertions::assert_eq!(view.items.len(), 3);
        pretty_assertions::assert_eq!(view.footer, Footer::EndOfFeed);

        session.unmount();
        assert!(!session.controller().is_alive());
    }
}
