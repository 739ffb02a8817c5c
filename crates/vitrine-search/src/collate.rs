//! Locale-aware title comparison.
//!
//! The index displays entries in German dictionary order (DIN 5007-1):
//! umlauts compare as their base vowels, ß as "ss", case-insensitively.
//! The comparison must stay deterministic across platforms, so it works on
//! a folded key computed here instead of any system locale facility. Equal
//! keys fall back to plain `str` ordering as the final tie-break.

use std::cmp::Ordering;

/// Compare two titles in canonical display order.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    fold_key(a).cmp(&fold_key(b)).then_with(|| a.cmp(b))
}

/// Collation key: lowercased, with German letters folded to their
/// dictionary equivalents.
fn fold_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'ä' | 'Ä' => key.push('a'),
            'ö' | 'Ö' => key.push('o'),
            'ü' | 'Ü' => key.push('u'),
            'ß' => key.push_str("ss"),
            _ => key.extend(c.to_lowercase()),
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(compare_titles("berlin", "BERLIN"), Ordering::Greater);
        assert_eq!(fold_key("berlin"), fold_key("BERLIN"));
        assert_eq!(compare_titles("Alpha", "beta"), Ordering::Less);
    }

    #[test]
    fn test_umlauts_fold_to_base_vowels() {
        // Ärzte sorts with A, not after Z
        assert_eq!(compare_titles("Ärzte", "Berlin"), Ordering::Less);
        assert_eq!(compare_titles("Äpfel", "Apotheke"), Ordering::Less);
        assert_eq!(compare_titles("Öl", "Obst"), Ordering::Greater);
        assert_eq!(compare_titles("Über uns", "Umzug"), Ordering::Less);
    }

    #[test]
    fn test_sharp_s_folds_to_ss() {
        assert_eq!(fold_key("Straße"), fold_key("Strasse"));
        // equal keys break the tie on raw string order, deterministically
        assert_eq!(compare_titles("Straße", "Strasse"), Ordering::Greater);
        assert_eq!(compare_titles("Strasse", "Straße"), Ordering::Less);
    }

    #[test]
    fn test_deterministic() {
        let mut titles = vec!["Zimmer", "Ärzte", "alpha", "Umzug", "Über uns"];
        titles.sort_by(|a, b| compare_titles(a, b));
        assert_eq!(titles, vec!["alpha", "Ärzte", "Über uns", "Umzug", "Zimmer"]);
    }
}
