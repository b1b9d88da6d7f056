//! Test doubles for the ports.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, Subject, User};
use crate::error::RepoError;
use crate::ports::{
    AuthError, BaseRepository, PasswordService, PostRepository, TokenClaims, TokenService,
    UserRepository,
};

#[derive(Default)]
pub struct FakeUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
    /// Lookups never see existing rows, as when a concurrent signup lands
    /// between the uniqueness check and the insert.
    stale_lookups: bool,
}

impl FakeUserRepository {
    pub fn with_stale_lookups() -> Self {
        Self {
            stale_lookups: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for FakeUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(RepoError::Constraint("users unique".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        let slot = users.get_mut(&user.id).ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        if self.stale_lookups {
            return Ok(None);
        }
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        if self.stale_lookups {
            return Ok(None);
        }
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.username == username).cloned())
    }
}

#[derive(Default)]
pub struct FakePostRepository {
    posts: Mutex<HashMap<Uuid, Post>>,
}

#[async_trait]
impl BaseRepository<Post, Uuid> for FakePostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.posts.lock().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let slot = posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for FakePostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().values().cloned().collect())
    }
}

/// Reversible "hash" - only for exercising the services.
pub struct PlainPasswordService;

impl PasswordService for PlainPasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash.strip_prefix("plain$") == Some(password))
    }
}

/// Tokens of the form `token:<uuid>`; anything else has a bad signature.
#[derive(Default)]
pub struct FakeTokenService;

impl TokenService for FakeTokenService {
    fn issue(&self, subject: Subject) -> Result<String, AuthError> {
        Ok(format!("token:{subject}"))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let subject = token
            .strip_prefix("token:")
            .and_then(|s| s.parse().ok())
            .ok_or(AuthError::BadSignature)?;

        Ok(TokenClaims {
            subject,
            issued_at: 0,
            expires_at: i64::MAX,
        })
    }

    fn ttl_seconds(&self) -> i64 {
        3600
    }
}
