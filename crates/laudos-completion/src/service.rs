use std::sync::Arc;

use async_trait::async_trait;
use laudos_core::models::completion::{CompletionRequest, CompletionResult};

use crate::error::CompletionError;

/// A text-completion backend: prompt in, text out.
///
/// The HTTP client implements this; tests substitute scripted fakes.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, CompletionError>;
}

#[async_trait]
impl<T: CompletionService + ?Sized> CompletionService for Arc<T> {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, CompletionError> {
        (**self).complete(request).await
    }
}
