//! Assembles the feeds (everything, one group, one author) and the post
//! detail view. Feeds are newest first and always paginated.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    entity::prelude::*,
    ids::{CommentId, GroupId, PostId},
    pagination::{self, Page, PAGE_SIZE},
    service::{
        authors::{AuthorsService, AuthorsServiceError},
        comments::CommentsService,
        groups::{GroupsService, GroupsServiceError},
    },
};

#[derive(Debug, Error)]
pub enum ListingsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("group not found")]
    GroupNotFound,

    #[error("author not found")]
    AuthorNotFound,

    #[error("post not found")]
    PostNotFound,
}

// Lookups by user-supplied key: any miss, malformed key included, is a 404.
impl From<GroupsServiceError> for ListingsServiceError {
    fn from(error: GroupsServiceError) -> Self {
        match error {
            GroupsServiceError::DbError(err) => ListingsServiceError::DbError(err),
            GroupsServiceError::GroupNotFound | GroupsServiceError::InvalidSlug(_) => {
                ListingsServiceError::GroupNotFound
            }
        }
    }
}

impl From<AuthorsServiceError> for ListingsServiceError {
    fn from(error: AuthorsServiceError) -> Self {
        match error {
            AuthorsServiceError::DbError(err) => ListingsServiceError::DbError(err),
            AuthorsServiceError::AuthorNotFound | AuthorsServiceError::EmptyUsername => {
                ListingsServiceError::AuthorNotFound
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRef {
    pub id: GroupId,
    pub title: String,
    pub slug: String,
}

impl From<&GroupModel> for GroupRef {
    fn from(group: &GroupModel) -> Self {
        GroupRef {
            id: group.id,
            title: group.title.clone(),
            slug: group.slug.clone(),
        }
    }
}

/// One post as it appears in a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub id: PostId,
    pub text: String,
    pub pub_date: String,
    pub author: String,
    pub group: Option<GroupRef>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupFeed {
    pub group: GroupModel,
    pub page: Page<PostSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorFeed {
    pub author: AuthorModel,
    pub post_count: u64,
    pub page: Page<PostSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    pub id: CommentId,
    pub author: String,
    pub text: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: PostSummary,
    /// Total posts by this post's author.
    pub post_count: u64,
    pub comments: Vec<CommentView>,
}

#[derive(Clone)]
pub struct ListingsService {
    db: DatabaseConnection,
    authors: AuthorsService,
    groups: GroupsService,
    comments: CommentsService,
}

impl ListingsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            authors: AuthorsService::new(db.clone()),
            groups: GroupsService::new(db.clone()),
            comments: CommentsService::new(db.clone()),
            db,
        }
    }

    pub async fn global_feed(
        &self,
        page: Option<&str>,
    ) -> Result<Page<PostSummary>, ListingsServiceError> {
        self.feed(Post::find(), page).await
    }

    pub async fn group_feed(
        &self,
        slug: &str,
        page: Option<&str>,
    ) -> Result<GroupFeed, ListingsServiceError> {
        let group = self.groups.get_by_slug(slug).await?;

        let posts = Post::find().filter(PostColumn::GroupId.eq(group.id));
        let page = self.feed(posts, page).await?;

        Ok(GroupFeed { group, page })
    }

    pub async fn author_feed(
        &self,
        username: &str,
        page: Option<&str>,
    ) -> Result<AuthorFeed, ListingsServiceError> {
        let author = self.authors.get_by_username(username).await?;

        let posts = Post::find().filter(PostColumn::AuthorId.eq(author.id));
        let page = self.feed(posts, page).await?;
        let post_count = page.meta.total_items;

        Ok(AuthorFeed {
            author,
            post_count,
            page,
        })
    }

    pub async fn post_detail(&self, post_id: PostId) -> Result<PostDetail, ListingsServiceError> {
        let (post, author) = Post::find_by_id(post_id)
            .find_also_related(Author)
            .one(&self.db)
            .await?
            .ok_or(ListingsServiceError::PostNotFound)?;

        let group = match post.group_id {
            Some(group_id) => Some(self.groups.get_group(group_id).await?),
            None => None,
        };

        let post_count = self.authors.count_posts(post.author_id).await?;

        let comments = self
            .comments
            .list_for_post(post_id)
            .await?
            .into_iter()
            .map(|(comment, author)| CommentView {
                id: comment.id,
                author: author.map(|a| a.username).unwrap_or_default(),
                text: comment.text,
                created_at: comment.created_at,
            })
            .collect();

        Ok(PostDetail {
            post: summarize(post, author, group.as_ref().map(GroupRef::from)),
            post_count,
            comments,
        })
    }

    async fn feed(
        &self,
        posts: Select<Post>,
        page: Option<&str>,
    ) -> Result<Page<PostSummary>, ListingsServiceError> {
        let select = posts
            .order_by_desc(PostColumn::PubDate)
            .order_by_desc(PostColumn::Id)
            .find_also_related(Author);

        let page = pagination::fetch_page(select.paginate(&self.db, PAGE_SIZE), page).await?;
        debug!(
            page = page.meta.number,
            of = page.meta.num_pages,
            items = page.len(),
            "assembled feed page"
        );

        let groups = self.groups_for(&page.items).await?;
        Ok(page.map(|(post, author)| {
            let group = post.group_id.and_then(|id| groups.get(&id)).map(GroupRef::from);
            summarize(post, author, group)
        }))
    }

    // One query for every group referenced on the page.
    async fn groups_for(
        &self,
        items: &[(PostModel, Option<AuthorModel>)],
    ) -> Result<HashMap<GroupId, GroupModel>, DbErr> {
        let mut ids: Vec<GroupId> = items.iter().filter_map(|(post, _)| post.group_id).collect();
        ids.sort();
        ids.dedup();

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let groups = Group::find()
            .filter(GroupColumn::Id.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(groups.into_iter().map(|group| (group.id, group)).collect())
    }
}

fn summarize(post: PostModel, author: Option<AuthorModel>, group: Option<GroupRef>) -> PostSummary {
    PostSummary {
        id: post.id,
        text: post.text,
        pub_date: post.pub_date,
        author: author.map(|a| a.username).unwrap_or_default(),
        group,
        image: post.image,
    }
}
