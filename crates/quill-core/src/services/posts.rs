//! Post service - CRUD over posts with owner-only mutation.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostPatch, Subject};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Create a post owned by `owner`.
    pub async fn create(
        &self,
        owner: Subject,
        title: String,
        content: String,
    ) -> Result<Post, DomainError> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(DomainError::Validation(
                "Title and content are required".to_string(),
            ));
        }

        let post = self.posts.insert(Post::new(owner, title, content)).await?;
        tracing::info!(post_id = %post.id, owner = %owner, "Post created");
        Ok(post)
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_all().await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Apply `patch` to a post owned by `subject`.
    ///
    /// Existence is checked before ownership, so a missing post is always
    /// [`DomainError::NotFound`].
    pub async fn update(
        &self,
        subject: Subject,
        id: Uuid,
        patch: PostPatch,
    ) -> Result<Post, DomainError> {
        let mut post = self.get_by_id(id).await?;
        authorize(&post, &subject)?;

        if !post.apply(patch) {
            return Ok(post);
        }

        let post = self.posts.update(post).await.map_err(|e| store_error(e, id))?;
        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, subject: Subject, id: Uuid) -> Result<(), DomainError> {
        let post = self.get_by_id(id).await?;
        authorize(&post, &subject)?;

        self.posts.delete(id).await.map_err(|e| store_error(e, id))?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }
}

fn authorize(post: &Post, subject: &Subject) -> Result<(), DomainError> {
    if post.is_owned_by(subject) {
        return Ok(());
    }
    tracing::debug!(post_id = %post.id, subject = %subject, "Mutation by non-owner rejected");
    Err(DomainError::Forbidden)
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
}

/// A post deleted between load and write is reported as missing.
fn store_error(err: RepoError, id: Uuid) -> DomainError {
    match err {
        RepoError::NotFound => not_found(id),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePostRepository;

    fn service() -> PostService {
        PostService::new(Arc::new(FakePostRepository::default()))
    }

    fn subject() -> Subject {
        Subject::from(Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_create_sets_owner_from_subject() {
        let service = service();
        let alice = subject();

        let post = service
            .create(alice, "Hi".into(), "World".into())
            .await
            .unwrap();

        assert!(post.is_owned_by(&alice));
        assert_eq!(service.get_by_id(post.id).await.unwrap().user_id, post.user_id);
    }

    #[tokio::test]
    async fn test_create_requires_title_and_content() {
        let service = service();

        let result = service.create(subject(), "".into(), "World".into()).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let result = service.create(subject(), "Hi".into(), "  ".into()).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_returns_all_posts() {
        let service = service();
        service.create(subject(), "a".into(), "1".into()).await.unwrap();
        service.create(subject(), "b".into(), "2".into()).await.unwrap();

        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_by_owner_changes_only_supplied_fields() {
        let service = service();
        let alice = subject();
        let post = service.create(alice, "Hi".into(), "World".into()).await.unwrap();

        let patch = PostPatch {
            title: None,
            content: Some("Everyone".into()),
        };
        let updated = service.update(alice, post.id, patch).await.unwrap();

        assert_eq!(updated.title, "Hi");
        assert_eq!(updated.content, "Everyone");
        assert_eq!(updated.user_id, post.user_id);

        let stored = service.get_by_id(post.id).await.unwrap();
        assert_eq!(stored.content, "Everyone");
    }

    #[tokio::test]
    async fn test_update_and_delete_by_non_owner_forbidden() {
        let service = service();
        let alice = subject();
        let bob = subject();
        let post = service.create(alice, "Hi".into(), "World".into()).await.unwrap();

        let patch = PostPatch {
            title: Some("Hijacked".into()),
            content: None,
        };
        let result = service.update(bob, post.id, patch).await;
        assert!(matches!(result, Err(DomainError::Forbidden)));

        let result = service.delete(bob, post.id).await;
        assert!(matches!(result, Err(DomainError::Forbidden)));

        assert_eq!(service.get_by_id(post.id).await.unwrap().title, "Hi");
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found_before_forbidden() {
        let service = service();
        let missing = Uuid::new_v4();

        let result = service.get_by_id(missing).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));

        let result = service.update(subject(), missing, PostPatch::default()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));

        let result = service.delete(subject(), missing).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let service = service();
        let alice = subject();
        let post = service.create(alice, "Hi".into(), "World".into()).await.unwrap();

        service.delete(alice, post.id).await.unwrap();

        let result = service.get_by_id(post.id).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
