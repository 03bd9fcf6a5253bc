use inci_protocol::AnalysisResult;
use std::time::SystemTime;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::AnalysisError;
use crate::navigation::{self, NavEvent, Screen, View};
use crate::project::{project, ViewModel};

pub const SCRAPING_STATUS: &str = "Scraping ingredients...";
pub const ANALYZING_STATUS: &str = "Analyzing...";
pub const RESULTS_STATUS: &str = "Results:";

/// Handle for one analysis attempt. Only the most recently issued token can complete.
#[derive(Debug, Clone)]
pub struct RequestToken {
    seq: u64,
    request_id: Uuid,
    cancel: CancellationToken,
}

impl RequestToken {
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug, Clone)]
pub struct CachedAnalysis {
    pub result: AnalysisResult,
    pub model: ViewModel,
    pub analyzed_at: SystemTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// State for one popup lifetime: current panel, status line, the last good report and the
/// in-flight request.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    view: View,
    status: Option<String>,
    last: Option<CachedAnalysis>,
    seq: u64,
    in_flight: Option<CancellationToken>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn last(&self) -> Option<&CachedAnalysis> {
        self.last.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts a new attempt, cancelling whatever was still running.
    pub fn begin_request(&mut self) -> RequestToken {
        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(seq = self.seq, "cancelling superseded analysis request");
            previous.cancel();
        }
        self.seq += 1;
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());
        self.status = Some(SCRAPING_STATUS.to_string());
        RequestToken {
            seq: self.seq,
            request_id: Uuid::new_v4(),
            cancel,
        }
    }

    pub fn set_status(&mut self, token: &RequestToken, status: &str) {
        if self.is_current(token) {
            self.status = Some(status.to_string());
        }
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        token.seq == self.seq && !token.is_cancelled()
    }

    pub fn complete(
        &mut self,
        token: &RequestToken,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Completion {
        if !self.is_current(token) {
            tracing::debug!(
                request_id = %token.request_id,
                seq = token.seq,
                current = self.seq,
                "dropping stale analysis outcome"
            );
            return Completion::Stale;
        }
        self.in_flight = None;
        match outcome {
            Ok(result) => {
                let model = project(&result);
                self.last = Some(CachedAnalysis {
                    result,
                    model,
                    analyzed_at: SystemTime::now(),
                });
                self.status = Some(RESULTS_STATUS.to_string());
                self.navigate(NavEvent::AnalysisSucceeded);
            }
            Err(err) => {
                tracing::warn!(request_id = %token.request_id, error = %err, "analysis failed");
                self.status = Some(err.status_message());
                self.navigate(NavEvent::AnalysisFailed);
            }
        }
        Completion::Applied
    }

    pub fn navigate(&mut self, event: NavEvent) -> &View {
        self.view = navigation::transition(&self.view, &event);
        &self.view
    }

    pub fn screen(&self) -> Screen<'_> {
        navigation::screen(
            &self.view,
            self.last.as_ref().map(|cached| &cached.model),
            self.status(),
        )
    }

    /// Drops everything; the session is as good as new afterwards.
    pub fn clear(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel();
        }
        let seq = self.seq;
        *self = Self::default();
        // Keep the counter so tokens issued before the clear stay stale.
        self.seq = seq;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inci_protocol::{CategoryEntry, IngredientRef};
    use std::collections::BTreeMap;

    fn result() -> AnalysisResult {
        AnalysisResult {
            ingredients_table: Vec::new(),
            positive: BTreeMap::from([(
                "hydrating".to_string(),
                CategoryEntry {
                    count: 1,
                    list: vec![IngredientRef {
                        title: "Glycerin".to_string(),
                    }],
                },
            )]),
            harmful: BTreeMap::new(),
        }
    }

    #[test]
    fn success_caches_and_shows_highlights() {
        let mut session = AnalysisSession::new();
        let token = session.begin_request();
        assert!(session.is_busy());
        assert_eq!(session.complete(&token, Ok(result())), Completion::Applied);
        assert!(!session.is_busy());
        assert_eq!(session.view(), &View::Highlights);
        assert_eq!(session.status(), Some(RESULTS_STATUS));
        assert!(matches!(session.screen(), Screen::Highlights { .. }));
        assert_eq!(
            session.last().expect("cached").model.highlights[0].label,
            "Hydrating"
        );
    }

    #[test]
    fn failure_keeps_cache_and_returns_to_analyze() {
        let mut session = AnalysisSession::new();
        let token = session.begin_request();
        session.complete(&token, Ok(result()));
        session.navigate(NavEvent::SelectCategory("hydrating".to_string()));

        let token = session.begin_request();
        session.complete(&token, Err(AnalysisError::Scrape));
        assert_eq!(session.view(), &View::Analyze);
        assert_eq!(session.status(), Some("No ingredients found."));
        assert!(session.last().is_some());
        assert_eq!(
            session.screen(),
            Screen::Analyze {
                status: Some("No ingredients found.")
            }
        );
    }

    #[test]
    fn unknown_category_keeps_highlights_on_screen() {
        let mut session = AnalysisSession::new();
        let token = session.begin_request();
        session.complete(&token, Ok(result()));
        session.navigate(NavEvent::SelectCategory("does_not_exist".to_string()));
        assert!(matches!(session.screen(), Screen::Highlights { .. }));
        assert_eq!(session.navigate(NavEvent::Back), &View::Highlights);
    }

    #[test]
    fn newer_request_supersedes_older() {
        let mut session = AnalysisSession::new();
        let first = session.begin_request();
        let second = session.begin_request();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_ne!(first.request_id(), second.request_id());

        assert_eq!(session.complete(&first, Ok(result())), Completion::Stale);
        assert!(session.last().is_none());
        assert_eq!(
            session.complete(&second, Err(AnalysisError::EmptyAnalysis)),
            Completion::Applied
        );
        assert_eq!(session.status(), Some("No analysis available."));
    }

    #[test]
    fn status_updates_ignore_stale_tokens() {
        let mut session = AnalysisSession::new();
        let first = session.begin_request();
        let _second = session.begin_request();
        session.set_status(&first, ANALYZING_STATUS);
        assert_eq!(session.status(), Some(SCRAPING_STATUS));
    }

    #[test]
    fn clear_resets_and_cancels() {
        let mut session = AnalysisSession::new();
        let done = session.begin_request();
        session.complete(&done, Ok(result()));
        let pending = session.begin_request();
        session.clear();
        assert!(pending.is_cancelled());
        assert!(session.last().is_none());
        assert_eq!(session.view(), &View::Analyze);
        assert_eq!(session.status(), None);
        assert_eq!(session.complete(&pending, Ok(result())), Completion::Stale);
    }
}
