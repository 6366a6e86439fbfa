//! Summary, size estimates and the content fingerprint

use crate::result::Metadata;
use crate::types::{Edu, Lang, Ruleset};
use sha1::{Digest, Sha1};

/// Number of EDUs quoted in the summary
pub const SUMMARY_EDUS: usize = 2;

/// Hex digits kept from the digest
pub const FINGERPRINT_LEN: usize = 10;

/// Leading EDUs joined by a space, with a language-specific prefix
///
/// Empty when there are no EDUs.
pub fn summary(edus: &[Edu], lang: Lang) -> String {
    if edus.is_empty() {
        return String::new();
    }
    let prefix = match lang {
        Lang::Es => "Resumen: ",
        Lang::En | Lang::Auto => "Summary: ",
    };
    let head: Vec<&str> = edus.iter().take(SUMMARY_EDUS).map(Edu::text).collect();
    format!("{prefix}{}", head.join(" "))
}

/// Stable short id for `text`: leading hex digits of SHA-1 of the trimmed text
pub fn fingerprint(text: &str) -> String {
    let digest = Sha1::digest(text.trim().as_bytes());
    digest
        .iter()
        .take(FINGERPRINT_LEN / 2)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Whitespace-separated token count, never below 1
pub fn estimate_tokens(text: &str) -> usize {
    text.split_whitespace().count().max(1)
}

/// Metadata recorded for every analysis
pub fn metadata(text: &str, ruleset: Ruleset, model: &str) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("chars".into(), text.chars().count().into());
    metadata.insert("tokens_est".into(), estimate_tokens(text).into());
    metadata.insert("ruleset".into(), ruleset.name().into());
    metadata.insert("model".into(), model.into());
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::segment;

    #[test]
    fn test_summary_prefix_follows_language() {
        let edus = segment("Uno. Dos. Tres.").unwrap();
        assert_eq!(summary(&edus, Lang::Es), "Resumen: Uno. Dos.");
        assert_eq!(summary(&edus, Lang::En), "Summary: Uno. Dos.");
        assert_eq!(summary(&edus[..1], Lang::Auto), "Summary: Uno.");
        assert_eq!(summary(&[], Lang::Es), "");
    }

    #[test]
    fn test_fingerprint_is_stable_and_trimmed() {
        let id = fingerprint("hello");
        assert_eq!(id.len(), FINGERPRINT_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(id, fingerprint("  hello\n"));
        assert_ne!(id, fingerprint("hello!"));
        // sha1("hello") = aaf4c61ddcc5e8a2...
        assert_eq!(id, "aaf4c61ddc");
    }

    #[test]
    fn test_fingerprint_of_spanish_sample() {
        assert_eq!(fingerprint("El perro corre. El gato duerme."), "dc4bcfa491");
    }

    #[test]
    fn test_token_estimate_floor() {
        assert_eq!(estimate_tokens(""), 1);
        assert_eq!(estimate_tokens("one"), 1);
        assert_eq!(estimate_tokens("one two\tthree\nfour"), 4);
    }

    #[test]
    fn test_metadata_keys() {
        let metadata = metadata("añade dos", Ruleset::Minimal, "heuristic-rst");
        let keys: Vec<&str> = metadata.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["chars", "model", "ruleset", "tokens_est"]);
        assert_eq!(metadata["chars"], 9);
        assert_eq!(metadata["tokens_est"], 2);
        assert_eq!(metadata["ruleset"], "minimal");
    }
}
