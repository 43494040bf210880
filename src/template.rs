//! Filename template expansion
//! Substitutes dimension and seed tokens, `%date:FMT%` patterns and legacy
//! bare date tokens into caller-supplied filename templates.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

/// Legacy bare tokens and their strftime equivalents, in replacement order.
/// `yyyy` must run before `yy` so the four-digit form wins.
const LEGACY_TOKENS: &[(&str, &str)] = &[
    ("yyyy", "%Y"),
    ("yy", "%y"),
    ("MM", "%m"),
    ("dd", "%d"),
    ("HH", "%H"),
    ("mm", "%M"),
    ("ss", "%S"),
];

/// Expand a filename template against the current local time.
pub fn expand(template: &str, width: u32, height: u32, seed: u64) -> String {
    expand_at(template, width, height, seed, &Local::now())
}

/// Expand a filename template against a caller-supplied timestamp.
///
/// Replacement order: `%width%`/`%height%`/`%seed%` first, then every
/// `%date:<FMT>%` occurrence (`<FMT>` is handed to the strftime parser
/// verbatim, non-greedy up to the next `%`), then the legacy bare tokens.
///
/// Legacy replacement is a plain case-sensitive substring substitution kept
/// for backward compatibility: a literal `dd` inside an unrelated word is
/// rewritten too. Templates containing neither `%` nor a legacy token pass
/// through unchanged.
pub fn expand_at(
    template: &str,
    width: u32,
    height: u32,
    seed: u64,
    now: &DateTime<Local>,
) -> String {
    let has_legacy = LEGACY_TOKENS.iter().any(|(token, _)| template.contains(token));
    if !template.contains('%') && !has_legacy {
        return template.to_string();
    }

    let mut expanded = template.replace("%width%", &width.to_string());
    expanded = expanded.replace("%height%", &height.to_string());
    expanded = expanded.replace("%seed%", &seed.to_string());
    expanded = expand_date_patterns(&expanded, now);

    for (token, fmt) in LEGACY_TOKENS {
        if expanded.contains(token) {
            expanded = expanded.replace(token, &format_time(now, fmt));
        }
    }

    expanded
}

/// Replace every `%date:<FMT>%` with the formatted timestamp.
/// An unterminated `%date:` pattern is kept literally.
fn expand_date_patterns(input: &str, now: &DateTime<Local>) -> String {
    const OPEN: &str = "%date:";

    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        match after.find('%') {
            Some(end) => {
                output.push_str(&format_time(now, &after[..end]));
                rest = &after[end + 1..];
            }
            None => {
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    output.push_str(rest);
    output
}

/// Format with a strftime pattern; a pattern chrono cannot parse is returned
/// as the literal pattern text instead of panicking at display time.
fn format_time(now: &DateTime<Local>, fmt: &str) -> String {
    let items: Vec<Item<'_>> = StrftimeItems::new(fmt).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return fmt.to_string();
    }
    now.format_with_items(items.into_iter()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 7, 13, 14, 15).unwrap()
    }

    #[test]
    fn test_plain_template_is_untouched() {
        assert_eq!(expand_at("portrait", 512, 512, 1, &fixed_now()), "portrait");
        assert_eq!(expand_at("a/b/c", 512, 512, 1, &fixed_now()), "a/b/c");
    }

    #[test]
    fn test_dimension_and_seed_tokens() {
        assert_eq!(
            expand_at("img_%width%x%height%_%seed%", 512, 768, 42, &fixed_now()),
            "img_512x768_42"
        );
    }

    #[test]
    fn test_legacy_tokens() {
        assert_eq!(
            expand_at("out_yyyy-MM-dd", 512, 512, 1, &fixed_now()),
            "out_2024-03-07"
        );
        assert_eq!(
            expand_at("HH-mm-ss", 512, 512, 1, &fixed_now()),
            "13-14-15"
        );
        assert_eq!(expand_at("run_yy", 512, 512, 1, &fixed_now()), "run_24");
    }

    #[test]
    fn test_legacy_tokens_are_substring_matched() {
        // Compatibility shim: "dd" inside an unrelated word is replaced too.
        assert_eq!(
            expand_at("badday", 512, 512, 1, &fixed_now()),
            "ba07ay"
        );
    }

    #[test]
    fn test_date_pattern_is_nongreedy() {
        // The pattern body runs up to the next `%`, so plain text passes
        // through the strftime formatter untouched.
        assert_eq!(
            expand_at("%date:v2%_%seed%", 512, 512, 9, &fixed_now()),
            "v2_9"
        );
    }

    #[test]
    fn test_date_pattern_with_legacy_letters() {
        // The strftime pass leaves the letters alone, the legacy pass then
        // substitutes them.
        assert_eq!(
            expand_at("%date:yyyy-MM-dd%", 512, 512, 1, &fixed_now()),
            "2024-03-07"
        );
    }

    #[test]
    fn test_unterminated_date_pattern_is_literal() {
        assert_eq!(
            expand_at("shot_%date:", 512, 512, 1, &fixed_now()),
            "shot_%date:"
        );
    }

    #[test]
    fn test_subfolder_templates() {
        assert_eq!(
            expand_at("%date:yyyy-MM-dd%/img_%seed%", 512, 512, 7, &fixed_now()),
            "2024-03-07/img_7"
        );
    }
}
