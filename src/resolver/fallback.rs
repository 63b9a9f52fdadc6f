//! Fallback synthesis - the deterministic, always-succeeding answer path
//!
//! When no canonical entry matches, or the backend fails or times out, the
//! engine synthesizes a templated answer citing the regional wiring standard.

use super::engine::Resolution;
use crate::region::Region;

/// Primary wiring standard per country. Countries not listed fall back to
/// the international standard.
const REGION_STANDARDS: &[(&str, &str)] = &[
    ("Australia", "AS/NZS 3000:2018"),
    ("United States", "NFPA 70 (NEC)"),
    ("United Kingdom", "BS 7671:2018"),
    ("Canada", "CSA C22.1"),
];

const INTERNATIONAL_STANDARD: &str = "IEC 60364";

/// Clause reference used when no single clause applies
pub const FALLBACK_CLAUSE: &str = "Various sections";

/// The standard cited for a country
pub fn standard_for(country: &str) -> &'static str {
    REGION_STANDARDS
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, standard)| *standard)
        .unwrap_or(INTERNATIONAL_STANDARD)
}

/// Build the templated fallback answer for a question and region
pub fn synthesize(question: &str, region: &Region) -> Resolution {
    let standard = standard_for(&region.country);
    let answer = format!(
        "Based on the electrical standards applicable in {}, the specific \
         regulation regarding \"{}\" spans several sections of {}. Consult \
         the cited standard for the requirements that apply to your \
         installation.",
        region, question, standard
    );
    Resolution {
        answer,
        standard: Some(standard.to_string()),
        clause: Some(FALLBACK_CLAUSE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_per_country() {
        assert_eq!(standard_for("Australia"), "AS/NZS 3000:2018");
        assert_eq!(standard_for("United States"), "NFPA 70 (NEC)");
        assert_eq!(standard_for("United Kingdom"), "BS 7671:2018");
        assert_eq!(standard_for("Canada"), "CSA C22.1");
    }

    #[test]
    fn test_unlisted_country_gets_international_standard() {
        assert_eq!(standard_for("New Zealand"), "IEC 60364");
        assert_eq!(standard_for("Atlantis"), "IEC 60364");
    }

    #[test]
    fn test_synthesize_names_question_and_region() {
        let region = Region::new("Canada", Some("Ontario".to_string()));
        let resolution = synthesize("socket spacing in garages", &region);

        assert!(resolution.answer.contains("socket spacing in garages"));
        assert!(resolution.answer.contains("Canada, Ontario"));
        assert_eq!(resolution.standard.as_deref(), Some("CSA C22.1"));
        assert_eq!(resolution.clause.as_deref(), Some(FALLBACK_CLAUSE));
    }
}
