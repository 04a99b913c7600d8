#[cfg(test)]
mod entity_tests {
    use crate::entity::{format_timestamp, now_timestamp, prelude::*};
    use crate::ids::*;
    use crate::test_utils::{create_test_author, create_test_group, create_test_post, setup_test_db};

    #[tokio::test]
    async fn test_create_and_find_author() {
        let db = setup_test_db().await;

        let author_id = AuthorId::new();
        let author = AuthorActiveModel {
            id: Set(author_id),
            username: Set("test".to_string()),
        };
        Author::insert(author).exec(&db).await.unwrap();

        let found = Author::find_by_id(author_id)
            .one(&db)
            .await
            .expect("Failed to query author")
            .expect("author exists");
        assert_eq!(found.username, "test");
    }

    #[tokio::test]
    async fn test_post_belongs_to_author_and_group() {
        let db = setup_test_db().await;
        let author = create_test_author(&db, "test").await;
        let group = create_test_group(&db, "test-slug").await;
        let post = create_test_post(&db, &author, "Test post", Some(&group)).await;

        let (found, found_author) = Post::find_by_id(post.id)
            .find_also_related(Author)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.group_id, Some(group.id));
        assert_eq!(found_author.map(|a| a.id), Some(author.id));

        let group_posts = group.find_related(Post).all(&db).await.unwrap();
        assert_eq!(group_posts.len(), 1);
    }

    #[tokio::test]
    async fn test_post_requires_existing_author() {
        let db = setup_test_db().await;

        let orphan = PostActiveModel {
            id: Set(PostId::new()),
            text: Set("nobody wrote this".to_string()),
            pub_date: Set(now_timestamp()),
            author_id: Set(AuthorId::new()),
            group_id: Set(None),
            image: Set(None),
        };
        assert!(Post::insert(orphan).exec(&db).await.is_err());
    }

    #[tokio::test]
    async fn test_comment_links_post_and_author() {
        let db = setup_test_db().await;
        let author = create_test_author(&db, "test").await;
        let post = create_test_post(&db, &author, "Test post", None).await;

        let comment = CommentActiveModel {
            id: Set(CommentId::new()),
            post_id: Set(post.id),
            author_id: Set(author.id),
            text: Set("Nice".to_string()),
            created_at: Set(now_timestamp()),
        };
        Comment::insert(comment).exec(&db).await.unwrap();

        let comments = post.find_related(Comment).all(&db).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author_id, author.id);
    }

    #[test]
    fn test_post_displays_first_fifteen_chars() {
        let post = PostModel {
            id: PostId::new(),
            text: "Тестовый пост, который длиннее пятнадцати символов".to_string(),
            pub_date: now_timestamp(),
            author_id: AuthorId::new(),
            group_id: None,
            image: None,
        };
        assert_eq!(post.to_string(), "Тестовый пост, ");
        assert_eq!(post.to_string().chars().count(), 15);
    }

    #[test]
    fn test_group_displays_title() {
        let group = GroupModel {
            id: GroupId::new(),
            title: "Тестовая группа".to_string(),
            slug: "test-slug".to_string(),
            description: "Тестовое описание".to_string(),
        };
        assert_eq!(group.to_string(), "Тестовая группа");
    }

    #[test]
    fn test_timestamps_sort_lexically() {
        use chrono::{TimeZone, Utc};

        let earlier = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        let later = earlier + chrono::Duration::microseconds(1);
        let (a, b) = (format_timestamp(earlier), format_timestamp(later));

        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }
}
