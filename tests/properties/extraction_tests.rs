use proptest::prelude::*;

use skill_packager::config::SanitizeConfig;
use skill_packager::content::{
    FilenameSanitizer, NO_DESCRIPTION, document_metadata_from_str, example_metadata_from_str,
    toc_references,
};

fn arb_token() -> impl Strategy<Value = String> {
    r"[A-Za-z][A-Za-z0-9\-]{0,20}"
}

/// Filler between references; never forms a reference of its own.
fn arb_filler() -> impl Strategy<Value = String> {
    r"[a-z #\-\n]{0,30}"
}

fn arb_example_name() -> impl Strategy<Value = String> {
    r"[A-Za-z0-9+_]{1,24}\.swift"
}

proptest! {
    #[test]
    fn test_toc_references_preserve_order_and_duplicates(
        parts in prop::collection::vec((arb_filler(), arb_token()), 0..12),
        trailer in arb_filler(),
    ) {
        let mut content = String::new();
        for (filler, token) in &parts {
            content.push_str(filler);
            content.push_str(&format!("<doc:{token}>"));
        }
        content.push_str(&trailer);

        let expected: Vec<String> = parts.into_iter().map(|(_, token)| token).collect();
        prop_assert_eq!(toc_references(&content), expected);
    }

    #[test]
    fn test_sanitize_is_idempotent(name in arb_example_name()) {
        let sanitizer = FilenameSanitizer::default();
        let once = sanitizer.sanitize(&name);
        prop_assert!(!once.contains('+'));
        prop_assert_eq!(sanitizer.sanitize(&once), once.clone());
        prop_assert_eq!(once.len(), name.len());
    }

    #[test]
    fn test_configured_sanitizer_is_idempotent(name in r"[A-Za-z0-9+ _\-]{1,24}\.swift") {
        let mut config = SanitizeConfig::default();
        config.substitutions.insert(" ".to_string(), "-".to_string());
        let sanitizer = FilenameSanitizer::from_config(&config).unwrap();

        let once = sanitizer.sanitize(&name);
        prop_assert!(!once.contains('+') && !once.contains(' '));
        prop_assert_eq!(sanitizer.sanitize(&once), once);
    }

    #[test]
    fn test_document_metadata_never_empty(content in ".{0,400}", stem in arb_token()) {
        let (title, description) = document_metadata_from_str(&content, &stem);
        prop_assert!(!title.is_empty());
        prop_assert!(!description.is_empty());
    }

    #[test]
    fn test_document_without_heading_keeps_fallback(
        lines in prop::collection::vec(r"[a-z@}<> ]{0,40}", 0..10),
        stem in arb_token(),
    ) {
        let content = lines.join("\n");
        let (title, description) = document_metadata_from_str(&content, &stem);
        prop_assert_eq!(title, stem);
        prop_assert_eq!(description, NO_DESCRIPTION);
    }

    #[test]
    fn test_example_metadata_always_describes(content in ".{0,400}", name in arb_example_name()) {
        let sanitizer = FilenameSanitizer::default();
        let (filename, description) = example_metadata_from_str(&content, &name, &sanitizer);
        prop_assert_eq!(filename, sanitizer.sanitize(&name));
        prop_assert!(!description.is_empty());
    }
}
