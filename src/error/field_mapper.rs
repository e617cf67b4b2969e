//! Heuristic attribution of server error messages to form fields
//!
//! Backends report validation failures as prose ("Employee ID already
//! exists"), not as structured per-field codes. The mapper scans a normalized
//! message for keywords, in priority order, and attributes the message to the
//! first field whose keyword occurs in it. This is best-effort guessing: a
//! message without a recognizable keyword stays a form-level banner.

/// A keyword rule attributing messages to a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule<F> {
    /// Lowercase keywords, any of which selects the field.
    keywords: &'static [&'static str],
    /// The field that receives the message.
    field: F,
}

impl<F: Copy> FieldRule<F> {
    /// Creates a rule. Keywords must be lowercase.
    pub const fn new(keywords: &'static [&'static str], field: F) -> Self {
        Self { keywords, field }
    }

    /// Returns the rule's keywords.
    pub fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }

    /// Returns the field this rule selects.
    pub fn field(&self) -> F {
        self.field
    }

    /// Checks the rule against an already-lowercased message.
    fn matches_lowercase(&self, message: &str) -> bool {
        self.keywords.iter().any(|keyword| message.contains(keyword))
    }

    /// Checks if this rule matches the given message, ignoring case.
    pub fn matches(&self, message: &str) -> bool {
        self.matches_lowercase(&message.to_lowercase())
    }
}

/// Returns the first field whose rule matches `message`, if any.
///
/// Rules are tried in slice order, so at most one field is ever selected.
pub fn map_to_field<F: Copy>(rules: &[FieldRule<F>], message: &str) -> Option<F> {
    let lowered = message.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches_lowercase(&lowered))
        .map(FieldRule::field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Id,
        Name,
    }

    const RULES: &[FieldRule<Field>] = &[
        FieldRule::new(&["identifier", "id number"], Field::Id),
        FieldRule::new(&["name"], Field::Name),
    ];

    #[test]
    fn test_rule_matches_case_insensitively() {
        let rule = FieldRule::new(&["email"], Field::Name);
        assert!(rule.matches("EMAIL is taken"));
        assert!(rule.matches("invalid e-mail or email"));
        assert!(!rule.matches("e-mail is taken"));
    }

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(
            map_to_field(RULES, "Identifier and name are both wrong"),
            Some(Field::Id)
        );
        assert_eq!(map_to_field(RULES, "Name is required"), Some(Field::Name));
    }

    #[test]
    fn test_any_keyword_of_a_rule_matches() {
        assert_eq!(map_to_field(RULES, "ID NUMBER missing"), Some(Field::Id));
    }

    #[test]
    fn test_no_match_yields_none() {
        assert_eq!(map_to_field(RULES, "Server error. Please try again later."), None);
        assert_eq!(map_to_field::<Field>(&[], "name"), None);
    }

    #[test]
    fn test_rule_accessors() {
        let rule = RULES[1];
        assert_eq!(rule.keywords(), &["name"]);
        assert_eq!(rule.field(), Field::Name);
    }
}
