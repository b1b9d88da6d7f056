use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};
use uuid::Uuid;

use quill_core::domain::{Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_base::map_db_err;
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn post_model(id: Uuid, user_id: Uuid, title: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        user_id,
        title: title.to_owned(),
        content: "Content".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, user_id, "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.user_id, user_id);
}

#[tokio::test]
async fn test_find_all_posts() {
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            post_model(Uuid::new_v4(), user_id, "Second"),
            post_model(Uuid::new_v4(), user_id, "First"),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_all().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Second");
}

#[tokio::test]
async fn test_insert_post_returns_stored_row() {
    let user_id = Uuid::new_v4();
    let post_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, user_id, "Hi")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let mut post = Post::new(user_id.into(), "Hi".into(), "Content".into());
    post.id = post_id;

    let saved: Post = repo.insert(post).await.unwrap();
    assert_eq!(saved.id, post_id);
    assert_eq!(saved.user_id, user_id);
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_find_user_by_email() {
    let now = Utc::now();
    let model = user::Model {
        id: Uuid::new_v4(),
        username: "alice".to_owned(),
        email: "a@x.com".to_owned(),
        password_hash: "$argon2id$...".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model.clone()]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let found: User = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.id, model.id);
    assert_eq!(found.username, "alice");
}

#[tokio::test]
async fn test_query_failure_maps_to_query_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Query(RuntimeErr::Internal(
            "relation \"users\" does not exist".to_owned(),
        ))])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let result = repo.find_by_username("alice").await;
    assert!(matches!(result, Err(RepoError::Query(_))));
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    // UPDATE .. RETURNING comes back empty when the row is gone.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = Post::new(Uuid::new_v4().into(), "Title".into(), "Content".into());

    let result = BaseRepository::<Post, Uuid>::update(&repo, post).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_update_post_returns_stored_row() {
    let user_id = Uuid::new_v4();
    let post_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, user_id, "Renamed")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let mut post = Post::new(user_id.into(), "Renamed".into(), "Content".into());
    post.id = post_id;

    let saved: Post = repo.update(post).await.unwrap();
    assert_eq!(saved.id, post_id);
    assert_eq!(saved.title, "Renamed");
}

#[test]
fn test_missing_rows_map_to_not_found() {
    assert!(matches!(map_db_err(DbErr::RecordNotUpdated), RepoError::NotFound));
    assert!(matches!(
        map_db_err(DbErr::RecordNotFound("posts".to_owned())),
        RepoError::NotFound
    ));
}

#[test]
fn test_connection_failures_map_to_connection_error() {
    let err = map_db_err(DbErr::Conn(RuntimeErr::Internal("connection refused".to_owned())));
    assert!(matches!(err, RepoError::Connection(msg) if msg.contains("connection refused")));
}

#[test]
fn test_other_failures_map_to_query_error() {
    let err = map_db_err(DbErr::Query(RuntimeErr::Internal("syntax error".to_owned())));
    assert!(matches!(err, RepoError::Query(_)));
}
