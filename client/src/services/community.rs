//! Community feed service

use validator::Validate;

use shared::{NewCommunityPost, PostView};

use crate::error::{AppError, AppResult};
use crate::external::BackendClient;

#[derive(Clone)]
pub struct CommunityService {
    backend: BackendClient,
}

impl CommunityService {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// Posts ready for display, newest as the backend orders them
    pub async fn list_posts(&self) -> AppResult<Vec<PostView>> {
        let response = self.backend.community_posts().await?;
        if !response.success {
            tracing::warn!("Community feed reported success=false");
        }
        Ok(response.posts.into_iter().map(PostView::from).collect())
    }

    /// Publish a post and return its id
    pub async fn create_post(&self, post: &NewCommunityPost) -> AppResult<String> {
        post.validate()?;

        let response = self.backend.create_post(post).await?;
        if !response.success {
            return Err(AppError::InvalidResponse("post was not accepted".into()));
        }
        tracing::info!("Community post created: {:?}", response.post_id);
        Ok(response.post_id.unwrap_or_default())
    }
}
