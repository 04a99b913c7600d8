use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    entity::{now_timestamp, prelude::*},
    error::FieldErrors,
    forms::{CleanPostForm, ImageChange, PostForm, INVALID_CHOICE},
    ids::PostId,
    media::MediaStore,
    service::{
        authorship,
        groups::{GroupsService, GroupsServiceError},
    },
};

#[derive(Debug, Error)]
pub enum PostsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("failed to store image")]
    Media(#[from] std::io::Error),

    #[error("post not found")]
    PostNotFound,

    #[error("unauthorized: not post author")]
    Unauthorized,

    #[error(transparent)]
    Invalid(#[from] FieldErrors),
}

#[derive(Clone)]
pub struct PostsService {
    db: DatabaseConnection,
    media: MediaStore,
    groups: GroupsService,
}

impl PostsService {
    pub fn new(db: DatabaseConnection, media: MediaStore) -> Self {
        Self {
            groups: GroupsService::new(db.clone()),
            db,
            media,
        }
    }

    pub async fn get_post(&self, post_id: PostId) -> Result<PostModel, PostsServiceError> {
        Post::find_by_id(post_id)
            .one(&self.db)
            .await?
            .ok_or(PostsServiceError::PostNotFound)
    }

    /// Publishes a new post by `author`, dated now.
    #[instrument(skip(self, author, form), fields(author = %author.username))]
    pub async fn create_post(
        &self,
        author: &AuthorModel,
        form: &PostForm,
    ) -> Result<PostModel, PostsServiceError> {
        let clean = self.clean(form).await?;

        let image = match &clean.image {
            ImageChange::Replace(upload) => Some(self.media.save_post_image(upload).await?),
            ImageChange::Keep | ImageChange::Clear => None,
        };

        let post = PostActiveModel {
            id: Set(PostId::new()),
            text: Set(clean.text),
            pub_date: Set(now_timestamp()),
            author_id: Set(author.id),
            group_id: Set(clean.group_id),
            image: Set(image.clone()),
        };

        let post = match Post::insert(post).exec_with_returning(&self.db).await {
            Ok(post) => post,
            Err(err) => {
                self.discard_image(image.as_deref()).await;
                return Err(err.into());
            }
        };
        info!(post = %post.id, "created post");

        Ok(post)
    }

    /// Rewrites text, group and image of an existing post. `pub_date` and
    /// `author_id` never change.
    #[instrument(skip(self, acting, form), fields(acting = %acting.username))]
    pub async fn edit_post(
        &self,
        acting: &AuthorModel,
        post_id: PostId,
        form: &PostForm,
    ) -> Result<PostModel, PostsServiceError> {
        let post = self.get_post(post_id).await?;

        if !authorship::check(acting.id, &post).is_allowed() {
            warn!(post = %post_id, "edit declined for non-author");
            return Err(PostsServiceError::Unauthorized);
        }

        let clean = self.clean(form).await?;

        let mut post_active: PostActiveModel = post.into();
        post_active.text = Set(clean.text);
        post_active.group_id = Set(clean.group_id);

        let mut stored = None;
        match &clean.image {
            ImageChange::Keep => {}
            ImageChange::Clear => post_active.image = Set(None),
            ImageChange::Replace(upload) => {
                let path = self.media.save_post_image(upload).await?;
                post_active.image = Set(Some(path.clone()));
                stored = Some(path);
            }
        }

        let updated = match post_active.update(&self.db).await {
            Ok(updated) => updated,
            Err(err) => {
                self.discard_image(stored.as_deref()).await;
                return Err(err.into());
            }
        };
        info!(post = %updated.id, "edited post");

        Ok(updated)
    }

    // A stored upload whose row never landed is removed again.
    async fn discard_image(&self, image: Option<&str>) {
        let Some(image) = image else { return };
        if let Err(err) = self.media.remove(image).await {
            warn!(%image, %err, "failed to remove orphaned image");
        }
    }

    // Field checks plus the one that needs the database: the chosen group
    // has to exist.
    async fn clean(&self, form: &PostForm) -> Result<CleanPostForm, PostsServiceError> {
        let clean = form.clean()?;

        if let Some(group_id) = clean.group_id {
            match self.groups.get_group(group_id).await {
                Ok(_) => {}
                Err(GroupsServiceError::DbError(err)) => return Err(err.into()),
                Err(_) => {
                    let mut errors = FieldErrors::default();
                    errors.add("group", INVALID_CHOICE);
                    return Err(errors.into());
                }
            }
        }

        Ok(clean)
    }
}
