use regex::{Regex, RegexBuilder};

/// Case-insensitive whole-word matcher for a city name inside address text.
///
/// The city is escaped before it becomes a pattern, so names containing
/// regex metacharacters are matched literally.
#[derive(Debug, Clone)]
pub struct CityMatcher {
    pattern: Regex,
}

impl CityMatcher {
    pub fn new(city: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(city.trim())))
            .case_insensitive(true)
            .build()?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, address: &str) -> bool {
        self.pattern.is_match(address)
    }
}

/// Returns true when `city` appears in `address` as a whole word.
pub fn address_matches(address: &str, city: &str) -> bool {
    CityMatcher::new(city)
        .map(|matcher| matcher.matches(address))
        .unwrap_or(false)
}
