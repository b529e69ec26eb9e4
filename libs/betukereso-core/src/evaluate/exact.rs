//! Exact display-text match (find-letter).

use crate::case::DisplayLetter;

/// The clicked cell is correct only if it shows exactly the target's text.
pub fn is_match(clicked: &str, target: &DisplayLetter) -> bool {
    clicked == target.text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::CaseStyle;
    use crate::types::Grapheme;

    #[test]
    fn case_is_part_of_the_answer() {
        let target = DisplayLetter::new(Grapheme::from("dzs"), CaseStyle::Upper);
        assert!(is_match("DZS", &target));
        assert!(!is_match("Dzs", &target));
        assert!(!is_match("dz", &target));
    }
}
