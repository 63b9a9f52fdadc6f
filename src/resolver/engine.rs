//! Resolution engine implementation
//!
//! Wraps an answer backend in a latency bound and the fallback guarantee:
//! backend errors and timeouts degrade to deterministic synthesis instead of
//! surfacing to the caller. Resolution has no persistence side effects, so
//! an abandoned (dropped) call leaves no partial state behind.

use super::backend::{AnswerBackend, CannedBackend};
use super::fallback;
use crate::region::Region;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A resolved answer, before the caller assigns identity and a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// The answer text
    pub answer: String,
    /// Regulatory document the answer is drawn from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    /// Sub-section within the standard
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause: Option<String>,
}

/// Default bound on a single backend call
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Query resolution engine.
///
/// `resolve` never fails for well-formed input; it always returns some
/// answer.
pub struct Resolver {
    backend: Box<dyn AnswerBackend>,
    timeout: Duration,
}

impl Resolver {
    /// Create a resolver over the given backend
    pub fn new(backend: Box<dyn AnswerBackend>) -> Self {
        Self {
            backend,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolver over the built-in canonical table
    pub fn canned() -> Self {
        Self::new(Box::new(CannedBackend::default()))
    }

    /// Set the bound on a single backend call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve a question against a region.
    ///
    /// Backend failure or timeout degrades to the templated regional
    /// fallback; the caller always receives an answer.
    pub async fn resolve(&self, question: &str, region: &Region) -> Resolution {
        match tokio::time::timeout(self.timeout, self.backend.answer(question, region)).await {
            Ok(Ok(resolution)) => resolution,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "answer backend failed, synthesizing fallback");
                fallback::synthesize(question, region)
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "answer backend timed out, synthesizing fallback"
                );
                fallback::synthesize(question, region)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Result};
    use async_trait::async_trait;

    struct FailingBackend;

    #[async_trait]
    impl AnswerBackend for FailingBackend {
        async fn answer(&self, _question: &str, _region: &Region) -> Result<Resolution> {
            Err(Error::ResolutionUnavailable("connection refused".to_string()))
        }
    }

    struct StalledBackend;

    #[async_trait]
    impl AnswerBackend for StalledBackend {
        async fn answer(&self, _question: &str, _region: &Region) -> Result<Resolution> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!()
        }
    }

    fn canned_resolver() -> Resolver {
        Resolver::new(Box::new(CannedBackend::with_latency(Duration::ZERO)))
    }

    #[tokio::test]
    async fn test_table_match() {
        let region = Region::new("Australia", Some("New South Wales".to_string()));
        let resolution = canned_resolver()
            .resolve("what is the minimum height for a power outlet?", &region)
            .await;

        assert_eq!(resolution.standard.as_deref(), Some("AS/NZS 3000:2018"));
        assert_eq!(resolution.clause.as_deref(), Some("4.4.2.2"));
    }

    #[tokio::test]
    async fn test_fallback_for_unmatched_question() {
        let region = Region::country("Canada");
        let resolution = canned_resolver()
            .resolve("zzz unrelated gibberish", &region)
            .await;

        assert_eq!(resolution.standard.as_deref(), Some("CSA C22.1"));
        assert_eq!(resolution.clause.as_deref(), Some("Various sections"));
    }

    #[tokio::test]
    async fn test_backend_failure_degrades_to_fallback() {
        let resolver = Resolver::new(Box::new(FailingBackend));
        let region = Region::country("United Kingdom");

        let resolution = resolver.resolve("earthing arrangements", &region).await;

        assert_eq!(resolution.standard.as_deref(), Some("BS 7671:2018"));
        assert_eq!(resolution.clause.as_deref(), Some("Various sections"));
        assert!(resolution.answer.contains("earthing arrangements"));
    }

    #[tokio::test]
    async fn test_backend_timeout_degrades_to_fallback() {
        let resolver =
            Resolver::new(Box::new(StalledBackend)).with_timeout(Duration::from_millis(10));
        let region = Region::country("United States");

        let resolution = resolver.resolve("service entrance sizing", &region).await;

        assert_eq!(resolution.standard.as_deref(), Some("NFPA 70 (NEC)"));
    }

    #[tokio::test]
    async fn test_resolution_serde_roundtrip() {
        let resolution = Resolution {
            answer: "text".to_string(),
            standard: Some("IEC 60364".to_string()),
            clause: None,
        };

        let json = serde_json::to_string(&resolution).unwrap();
        let back: Resolution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resolution);
    }
}
