use chrono::NaiveDate;

use crate::transliterate;

pub const OUTPUT_EXTENSION: &str = "csv";

/// Stem used when a run covers more than one city.
pub const MULTI_CITY_STEM: &str = "map_results";

const MAX_STEM_CHARS: usize = 80;

/// Deterministic output filename for a run.
///
/// One city: `{transliterated_city}_{dd.mm.yyyy}.csv`.
/// Any other count: `map_results_{dd.mm.yyyy}.csv`, without per-city detail.
pub fn output_filename<S: AsRef<str>>(cities: &[S], run_date: NaiveDate) -> String {
    let date = run_date.format("%d.%m.%Y");
    let stem = match cities {
        [only] => sanitize_stem(&transliterate(only.as_ref().trim())),
        _ => MULTI_CITY_STEM.to_string(),
    };
    format!("{stem}_{date}.{OUTPUT_EXTENSION}")
}

fn sanitize_stem(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);

    // Collapse runs of underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars().take(MAX_STEM_CHARS) {
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }

    if compacted.is_empty() {
        return "city".to_string();
    }
    if is_reserved_windows_name(&compacted) {
        compacted.push('_');
    }
    compacted
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
