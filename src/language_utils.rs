use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for language tag handling
///
/// Translation tools (and XLIFF files) identify languages with BCP 47 style
/// tags such as `en`, `zh-CN` or `pt_BR`. Only the primary subtag is checked
/// against ISO 639; the region subtag is kept as written.

/// Bibliographic ISO 639-2/B codes and their terminological 639-2/T form
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// A parsed language tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag {
    /// The ISO 639 language
    pub language: Language,
    /// Region or script subtag as written, upper-cased for two-letter regions
    pub region: Option<String>,
}

impl LanguageTag {
    /// Parse a tag like `en`, `eng`, `zh-CN` or `pt_BR`
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        let mut parts = trimmed.splitn(2, ['-', '_']);
        let primary = parts.next().unwrap_or_default();
        let region = parts.next().map(str::trim).filter(|r| !r.is_empty());

        let language = lookup_primary(primary)
            .ok_or_else(|| anyhow!("Invalid language code: {}", tag))?;

        let region = match region {
            Some(r) if r.chars().all(|c| c.is_ascii_alphanumeric()) => Some(if r.len() == 2 {
                r.to_uppercase()
            } else {
                r.to_string()
            }),
            Some(_) => return Err(anyhow!("Invalid region in language code: {}", tag)),
            None => None,
        };

        Ok(Self { language, region })
    }

    /// English display name, with the region in parentheses when present
    pub fn display_name(&self) -> String {
        match &self.region {
            Some(region) => format!("{} ({})", self.language.to_name(), region),
            None => self.language.to_name().to_string(),
        }
    }
}

fn lookup_primary(primary: &str) -> Option<Language> {
    let code = primary.to_lowercase();
    match code.len() {
        2 => Language::from_639_1(&code),
        3 => {
            let part2t = PART2B_TO_PART2T
                .iter()
                .find(|(b, _)| *b == code)
                .map(|(_, t)| *t)
                .unwrap_or(code.as_str());
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Validate a language tag
pub fn validate_language_code(code: &str) -> Result<()> {
    LanguageTag::parse(code).map(|_| ())
}

/// Normalize the primary subtag of a language tag to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    Ok(LanguageTag::parse(code)?.language.to_639_3().to_string())
}

/// Check if two language tags represent the same language, ignoring regions
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (LanguageTag::parse(code1), LanguageTag::parse(code2)) {
        (Ok(a), Ok(b)) => a.language == b.language,
        _ => false,
    }
}

/// Get the language name for a tag, e.g. `zh-CN` -> `Chinese (CN)`
pub fn get_language_name(code: &str) -> Result<String> {
    Ok(LanguageTag::parse(code)?.display_name())
}
