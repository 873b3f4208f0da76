//! Feedback submission

use validator::Validate;

use shared::{FeedbackResponse, FeedbackSubmission};

use crate::error::{AppError, AppResult};
use crate::external::BackendClient;

#[derive(Clone)]
pub struct FeedbackService {
    backend: BackendClient,
}

impl FeedbackService {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    pub async fn submit(&self, feedback: &FeedbackSubmission) -> AppResult<FeedbackResponse> {
        feedback.validate()?;

        let response = self.backend.submit_feedback(feedback).await?;
        if response.success == Some(false) {
            return Err(AppError::InvalidResponse(
                response
                    .message
                    .unwrap_or_else(|| "feedback was not accepted".to_string()),
            ));
        }
        tracing::info!(
            "Feedback submitted (posted to community: {})",
            response.posted_to_community
        );
        Ok(response)
    }
}
