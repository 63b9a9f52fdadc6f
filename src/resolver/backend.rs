//! Answer backends
//!
//! The resolver talks to an [`AnswerBackend`]. A production deployment
//! substitutes a remote knowledge service behind this trait without touching
//! callers; [`CannedBackend`] is the built-in deterministic table.

use super::engine::Resolution;
use super::fallback;
use crate::Result;
use crate::region::Region;
use async_trait::async_trait;
use std::time::Duration;

/// Source of answers for the resolution engine.
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    /// Answer a question scoped to a region.
    ///
    /// Implementations may fail or stall; [`super::Resolver`] bounds the
    /// call and degrades to fallback synthesis on any error.
    async fn answer(&self, question: &str, region: &Region) -> Result<Resolution>;
}

/// A canonical question/answer entry
struct CannedEntry {
    question: &'static str,
    answer: &'static str,
    standard: &'static str,
    clause: &'static str,
}

/// Canonical entries, in priority order: the first matching entry wins.
const CANNED_ANSWERS: &[CannedEntry] = &[
    CannedEntry {
        question: "what is the minimum height for a power outlet?",
        answer: "According to the Australian/New Zealand Wiring Rules (AS/NZS 3000:2018), \
                 there is no specific minimum height requirement for general power outlets \
                 in residential installations. However, industry practice typically places \
                 them at 300mm above the finished floor level. For kitchens and other wet \
                 areas, outlets should be at least 150mm above benchtops and at least 300mm \
                 away from sinks.",
        standard: "AS/NZS 3000:2018",
        clause: "4.4.2.2",
    },
    CannedEntry {
        question: "maximum circuit breaker size for 12 AWG wire",
        answer: "For 12 AWG copper wire with 90°C insulation (THHN, THWN-2, etc.), the \
                 maximum circuit breaker size is 20 amperes per the National Electrical \
                 Code. This is based on the wire's ampacity rating and the requirement to \
                 protect the conductor from overcurrent conditions.",
        standard: "NFPA 70 (NEC)",
        clause: "240.4(D)(5)",
    },
    CannedEntry {
        question: "requirements for bathroom lighting",
        answer: "In residential bathrooms, lighting must be controlled by a wall switch \
                 located at the entrance. At least one light fixture must be installed in \
                 every bathroom, and all lighting fixtures in wet locations must be rated \
                 for damp or wet locations. Recessed fixtures must be specifically labeled \
                 for use in wet areas if installed in shower or tub zones.",
        standard: "IEC 60364-7-701",
        clause: "701.512.2",
    },
    CannedEntry {
        question: "spacing between electrical panel and gas meter",
        answer: "According to safety regulations, there must be a minimum clearance of 3 \
                 feet (915mm) between an electrical panel and a gas meter. This separation \
                 is required to prevent potential ignition of gas leaks by electrical \
                 arcing and to ensure safe access to both utilities for maintenance and \
                 emergency situations.",
        standard: "NFPA 54/ANSI Z223.1",
        clause: "5.7.2",
    },
];

/// Simulated round-trip of the knowledge service this backend stands in for
const SIMULATED_LATENCY: Duration = Duration::from_millis(1500);

/// Built-in deterministic backend over the canonical answer table.
///
/// Matching is deliberately loose: an entry matches when any word of the
/// normalized question equals the second or third word of the entry's
/// canonical question. Table order breaks ties.
pub struct CannedBackend {
    latency: Duration,
}

impl CannedBackend {
    /// Backend with the default simulated latency
    pub fn new() -> Self {
        Self {
            latency: SIMULATED_LATENCY,
        }
    }

    /// Backend with a specific simulated latency (zero for tests)
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for CannedBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// The second and third whitespace words of a canonical question
fn trigger_words(canonical: &str) -> impl Iterator<Item = &str> {
    canonical.split_whitespace().skip(1).take(2)
}

#[async_trait]
impl AnswerBackend for CannedBackend {
    async fn answer(&self, question: &str, region: &Region) -> Result<Resolution> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let normalized = question.trim().to_lowercase();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        for entry in CANNED_ANSWERS {
            if trigger_words(entry.question).any(|trigger| words.contains(&trigger)) {
                return Ok(Resolution {
                    answer: entry.answer.to_string(),
                    standard: Some(entry.standard.to_string()),
                    clause: Some(entry.clause.to_string()),
                });
            }
        }

        Ok(fallback::synthesize(question, region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canned() -> CannedBackend {
        CannedBackend::with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_exact_canonical_question_matches() {
        let resolution = canned()
            .answer(
                "what is the minimum height for a power outlet?",
                &Region::default(),
            )
            .await
            .unwrap();

        assert_eq!(resolution.standard.as_deref(), Some("AS/NZS 3000:2018"));
        assert_eq!(resolution.clause.as_deref(), Some("4.4.2.2"));
    }

    #[tokio::test]
    async fn test_match_is_case_insensitive_and_trimmed() {
        let resolution = canned()
            .answer("  WHAT IS THE RULE HERE?  ", &Region::default())
            .await
            .unwrap();

        // "is" and "the" both trigger the first entry
        assert_eq!(resolution.clause.as_deref(), Some("4.4.2.2"));
    }

    #[tokio::test]
    async fn test_trigger_word_matches_whole_words_only() {
        // "gibberish" contains "is" as a substring but not as a word
        let resolution = canned()
            .answer("zzz unrelated gibberish", &Region::country("Canada"))
            .await
            .unwrap();

        assert_eq!(resolution.clause.as_deref(), Some(fallback::FALLBACK_CLAUSE));
    }

    #[tokio::test]
    async fn test_table_order_breaks_ties() {
        // "is" triggers the first entry, "bathroom" the third; first wins
        let resolution = canned()
            .answer("is bathroom wiring special?", &Region::default())
            .await
            .unwrap();

        assert_eq!(resolution.clause.as_deref(), Some("4.4.2.2"));
    }

    #[tokio::test]
    async fn test_second_entry_reachable() {
        let resolution = canned()
            .answer(
                "circuit protection for a workshop subpanel",
                &Region::country("United States"),
            )
            .await
            .unwrap();

        assert_eq!(resolution.clause.as_deref(), Some("240.4(D)(5)"));
    }

    #[tokio::test]
    async fn test_unmatched_question_uses_regional_standard() {
        let resolution = canned()
            .answer("zzz unrelated gibberish", &Region::country("Canada"))
            .await
            .unwrap();

        assert_eq!(resolution.standard.as_deref(), Some("CSA C22.1"));
        assert_eq!(resolution.clause.as_deref(), Some("Various sections"));
    }
}
