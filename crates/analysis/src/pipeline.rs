use async_trait::async_trait;
use inci_protocol::{AnalysisPayload, AnalysisResult, AnalyzeRequest, AnalyzeResponse};

use crate::error::AnalysisError;
use crate::normalize::normalize;
use crate::project::has_highlights;
use crate::session::{AnalysisSession, Completion, RequestToken, ANALYZING_STATUS};

/// Supplies raw ingredient text, typically scraped from a product page.
pub trait IngredientSource {
    fn ingredient_text(&self) -> Option<String>;
}

#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, AnalysisError>;
}

/// Builds the request body, or fails when cleanup leaves nothing to send.
pub fn prepare_request(raw: Option<String>) -> Result<AnalyzeRequest, AnalysisError> {
    let raw = raw.ok_or(AnalysisError::Scrape)?;
    let ingredients = normalize(&raw);
    if ingredients.is_empty() {
        return Err(AnalysisError::Scrape);
    }
    Ok(AnalyzeRequest::new(ingredients))
}

pub fn interpret(response: AnalyzeResponse) -> Result<AnalysisResult, AnalysisError> {
    let envelope = match response {
        AnalyzeResponse::Failure(failure) => {
            return Err(AnalysisError::Api {
                message: failure.joined_message(),
            })
        }
        AnalyzeResponse::Success(envelope) => envelope,
    };
    let result = envelope
        .analysis
        .and_then(AnalysisPayload::into_result)
        .ok_or(AnalysisError::EmptyAnalysis)?;
    if !has_highlights(&result) {
        return Err(AnalysisError::EmptyAnalysis);
    }
    Ok(result)
}

/// Sends an already prepared request, giving up as soon as the token is cancelled.
pub async fn execute(
    token: &RequestToken,
    request: &AnalyzeRequest,
    backend: &dyn AnalysisBackend,
) -> Result<AnalysisResult, AnalysisError> {
    tracing::info!(
        request_id = %token.request_id(),
        ingredients_len = request.ingredients.len(),
        "submitting ingredient list"
    );
    let response = token
        .cancellation()
        .run_until_cancelled(backend.analyze(request))
        .await
        .ok_or(AnalysisError::Cancelled)??;
    interpret(response)
}

/// One full attempt: scrape, clean, submit, classify, and record the outcome in the session.
pub async fn run_analysis(
    session: &mut AnalysisSession,
    source: &dyn IngredientSource,
    backend: &dyn AnalysisBackend,
) -> Result<(), AnalysisError> {
    let token = session.begin_request();
    let outcome = match prepare_request(source.ingredient_text()) {
        Ok(request) => {
            session.set_status(&token, ANALYZING_STATUS);
            execute(&token, &request, backend).await
        }
        Err(err) => Err(err),
    };
    let result = match &outcome {
        Ok(_) => Ok(()),
        Err(err) => Err(err.clone()),
    };
    if session.complete(&token, outcome) == Completion::Stale {
        return Err(AnalysisError::Cancelled);
    }
    result
}
