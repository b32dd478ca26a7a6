//! Answer matching for short-answer quiz types.

/// Compare a student's answer against the expected one.
///
/// Both sides are trimmed and lowercased, then compared exactly; a
/// trailing-`s` mismatch in either direction is also accepted so that
/// minor singular/plural variation ("enzyme" vs "enzymes") is not
/// marked wrong. The suffix rule is deliberately this narrow — it is
/// the product's established behavior, not a general stemmer.
///
/// # Examples
///
/// ```
/// use crammer_flows::answer_matches;
///
/// assert!(answer_matches("  Enzymes ", "enzyme"));
/// assert!(answer_matches("chloroplast", "chloroplasts"));
/// assert!(!answer_matches("chlorophyll", "chloroplast"));
/// ```
pub fn answer_matches(user: &str, correct: &str) -> bool {
    let user = user.trim().to_lowercase();
    let correct = correct.trim().to_lowercase();

    if user == correct {
        return true;
    }
    if let Some(stem) = user.strip_suffix('s')
        && stem == correct
    {
        return true;
    }
    if let Some(stem) = correct.strip_suffix('s')
        && stem == user
    {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_after_normalization() {
        assert!(answer_matches("Mitosis", "mitosis"));
        assert!(answer_matches("  osmosis  ", "Osmosis"));
    }

    #[test]
    fn accepts_plural_user_answer() {
        assert!(answer_matches("neutrons", "neutron"));
    }

    #[test]
    fn accepts_singular_user_answer() {
        assert!(answer_matches("neutron", "neutrons"));
    }

    #[test]
    fn rejects_other_morphology() {
        // The rule is a bare trailing-s check, nothing more.
        assert!(!answer_matches("oxidise", "oxidised"));
        assert!(!answer_matches("babies", "baby"));
    }

    #[test]
    fn rejects_different_terms() {
        assert!(!answer_matches("anode", "cathode"));
    }

    #[test]
    fn double_plural_is_not_matched() {
        assert!(!answer_matches("gass", "gases"));
    }
}
