use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;
use chirp_core::domain::Post;
use chirp_core::ports::PostRepository;
use sea_orm::{DatabaseBackend, MockDatabase};

fn model(author_id: &str, content: &str) -> post::Model {
    post::Model {
        id: uuid::Uuid::new_v4(),
        author_id: author_id.to_owned(),
        content: content.to_owned(),
        created_at: chrono::Utc::now().into(),
    }
}

#[tokio::test]
async fn find_post_by_id_maps_the_row() {
    let row = model("user_1", "👍");
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id, post_id);
    assert_eq!(post.author_id, "user_1");
    assert_eq!(post.content, "👍");
}

#[tokio::test]
async fn find_by_id_miss_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo.find_by_id(uuid::Uuid::new_v4()).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn find_by_author_maps_all_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model("user_1", "🍕"), model("user_1", "🌮")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_by_author("user_1", 100).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.author_id == "user_1"));
}
