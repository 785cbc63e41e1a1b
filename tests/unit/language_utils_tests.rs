/*!
 * Tests for language utility functions
 */

use xlifflow::language_utils::{
    get_language_name, language_codes_match, normalize_to_part2t, validate_language_code,
};

/// Test validation of common workflow language tags
#[test]
fn test_validate_language_code_withBcp47Tags_shouldAccept() {
    for code in ["en", "en-US", "zh-CN", "zh_TW", "pt-BR", "fra", "ger", "de"] {
        assert!(validate_language_code(code).is_ok(), "{} should be valid", code);
    }
}

/// Test invalid tags are rejected
#[test]
fn test_validate_language_code_withInvalidTags_shouldReject() {
    for code in ["", "e", "zz", "english", "en-U S"] {
        assert!(validate_language_code(code).is_err(), "{:?} should be invalid", code);
    }
}

/// Test normalization to ISO 639-2/T
#[test]
fn test_normalize_to_part2t_withVariousForms_shouldReturnThreeLetterCode() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("zh-CN").unwrap(), "zho");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("deu").unwrap(), "deu");
}

/// Test matching ignores regions and code forms
#[test]
fn test_language_codes_match_withEquivalentTags_shouldMatch() {
    assert!(language_codes_match("zh-CN", "zh-TW"));
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("fr", "fre"));
    assert!(!language_codes_match("en", "de"));
    assert!(!language_codes_match("en", "zz"));
}

/// Test display names
#[test]
fn test_get_language_name_withRegion_shouldAppendRegion() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("en-gb").unwrap(), "English (GB)");
    assert!(get_language_name("zz").is_err());
}
