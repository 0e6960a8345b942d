use crate::reference_data::molmass::normalize_subscripts;

/// A question as submitted by the user. Lives for the duration of one solve call.
///
/// `text` is kept verbatim (it becomes the response's canonical problem), `normalized` has
/// unicode subscripts mapped to ASCII digits and is what every regex runs on, `lower` is the
/// lower-cased normalized text used by keyword predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub text: String,
    pub normalized: String,
    pub lower: String,
    pub hint: Option<String>,
}

impl Question {
    pub fn new(text: &str, hint: Option<&str>) -> Self {
        let normalized = normalize_subscripts(text);
        let lower = normalized.to_lowercase();
        let hint = hint
            .map(|h| h.trim().to_lowercase())
            .filter(|h| !h.is_empty());
        Self {
            text: text.to_string(),
            normalized,
            lower,
            hint,
        }
    }

    pub fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.lower.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_normalization() {
        let q = Question::new("How much CO₂ forms when CH₄ burns?", Some("  "));
        assert_eq!(q.normalized, "How much CO2 forms when CH4 burns?");
        assert_eq!(q.lower, "how much co2 forms when ch4 burns?");
        assert_eq!(q.hint, None);
        assert!(q.contains_any(&["burn"]));
        let q = Question::new("x", Some(" Gas-Laws "));
        assert_eq!(q.hint.as_deref(), Some("gas-laws"));
    }
}
