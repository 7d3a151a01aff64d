//! Channel classification table
//!
//! Maps channel display names to a (language, category) pair through an
//! ordered manual rule table. Lookup runs three tiers over the table, first
//! matching entry per tier wins: exact case-insensitive match, then prefix
//! match, then substring match. Rule order is significant and preserved.
//!
//! The table is immutable, built once at process start; channels no rule
//! matches fall back to language "Unknown", category "Other".

use std::sync::LazyLock;

/// Language/category fallbacks for unmatched channels
pub const UNKNOWN_LANGUAGE: &str = "Unknown";
pub const OTHER_CATEGORY: &str = "Other";

/// One manual classification rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRule {
    /// Name pattern the rule matches against (case-insensitive)
    pub pattern: &'static str,
    pub language: &'static str,
    pub category: &'static str,
}

const fn rule(
    pattern: &'static str,
    language: &'static str,
    category: &'static str,
) -> ClassificationRule {
    ClassificationRule {
        pattern,
        language,
        category,
    }
}

/// Built-in manual rule table, ordered most-specific first
///
/// Specific station names precede broad network names so the substring tier
/// does not swallow them (e.g. "Zee News" must sit above "Zee").
const MANUAL_RULES: &[ClassificationRule] = &[
    // News
    rule("Aaj Tak", "Hindi", "News"),
    rule("ABP News", "Hindi", "News"),
    rule("Zee News", "Hindi", "News"),
    rule("India TV", "Hindi", "News"),
    rule("News18 India", "Hindi", "News"),
    rule("Republic Bharat", "Hindi", "News"),
    rule("NDTV India", "Hindi", "News"),
    rule("NDTV 24x7", "English", "News"),
    rule("Republic TV", "English", "News"),
    rule("Times Now", "English", "News"),
    rule("WION", "English", "News"),
    rule("Mirror Now", "English", "News"),
    rule("India Today", "English", "News"),
    rule("Puthiya Thalaimurai", "Tamil", "News"),
    rule("Polimer News", "Tamil", "News"),
    rule("Thanthi TV", "Tamil", "News"),
    rule("TV9 Telugu", "Telugu", "News"),
    rule("NTV Telugu", "Telugu", "News"),
    rule("Asianet News", "Malayalam", "News"),
    rule("Manorama News", "Malayalam", "News"),
    rule("ABP Ananda", "Bengali", "News"),
    rule("Zee 24 Ghanta", "Bengali", "News"),
    rule("PTC News", "Punjabi", "News"),
    rule("ABP Majha", "Marathi", "News"),
    rule("TV9 Marathi", "Marathi", "News"),
    // Entertainment
    rule("Star Plus", "Hindi", "Entertainment"),
    rule("Colors", "Hindi", "Entertainment"),
    rule("Sony SAB", "Hindi", "Entertainment"),
    rule("Sony TV", "Hindi", "Entertainment"),
    rule("Zee TV", "Hindi", "Entertainment"),
    rule("&TV", "Hindi", "Entertainment"),
    rule("Sun TV", "Tamil", "Entertainment"),
    rule("Vijay TV", "Tamil", "Entertainment"),
    rule("Star Vijay", "Tamil", "Entertainment"),
    rule("Zee Tamil", "Tamil", "Entertainment"),
    rule("Star Maa", "Telugu", "Entertainment"),
    rule("Zee Telugu", "Telugu", "Entertainment"),
    rule("Gemini TV", "Telugu", "Entertainment"),
    rule("Asianet", "Malayalam", "Entertainment"),
    rule("Surya TV", "Malayalam", "Entertainment"),
    rule("Star Jalsha", "Bengali", "Entertainment"),
    rule("Zee Bangla", "Bengali", "Entertainment"),
    rule("PTC Punjabi", "Punjabi", "Entertainment"),
    rule("Zee Marathi", "Marathi", "Entertainment"),
    rule("Star Pravah", "Marathi", "Entertainment"),
    // Movies
    rule("Star Gold", "Hindi", "Movies"),
    rule("Zee Cinema", "Hindi", "Movies"),
    rule("Sony Max", "Hindi", "Movies"),
    rule("B4U Movies", "Hindi", "Movies"),
    rule("KTV", "Tamil", "Movies"),
    rule("Gemini Movies", "Telugu", "Movies"),
    // Music
    rule("9XM", "Hindi", "Music"),
    rule("MTV Beats", "Hindi", "Music"),
    rule("Mastiii", "Hindi", "Music"),
    rule("B4U Music", "Hindi", "Music"),
    rule("Sun Music", "Tamil", "Music"),
    // Sports
    rule("Star Sports", "English", "Sports"),
    rule("Sony Ten", "English", "Sports"),
    rule("Sports18", "English", "Sports"),
    rule("DD Sports", "Hindi", "Sports"),
    // Kids
    rule("Cartoon Network", "English", "Kids"),
    rule("Pogo", "Hindi", "Kids"),
    rule("Nick", "Hindi", "Kids"),
    rule("Hungama", "Hindi", "Kids"),
    // Devotional
    rule("Aastha", "Hindi", "Devotional"),
    rule("Sanskar", "Hindi", "Devotional"),
    rule("Shemaroo Bhakti", "Hindi", "Devotional"),
    // Public broadcaster
    rule("DD National", "Hindi", "Entertainment"),
    rule("DD News", "Hindi", "News"),
    rule("Doordarshan", "Hindi", "Entertainment"),
    // Broad network catch-alls, kept last
    rule("Zee", "Hindi", "Entertainment"),
    rule("Sony", "Hindi", "Entertainment"),
    rule("Star", "Hindi", "Entertainment"),
    rule("Sun", "Tamil", "Entertainment"),
    rule("DD ", "Hindi", "Entertainment"),
];

/// Ordered classification table with tiered case-insensitive lookup
#[derive(Debug)]
pub struct ClassificationTable {
    rules: Vec<ClassificationRule>,
}

static BUILTIN_TABLE: LazyLock<ClassificationTable> =
    LazyLock::new(|| ClassificationTable::new(MANUAL_RULES.to_vec()));

impl ClassificationTable {
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    /// The process-wide built-in table
    pub fn builtin() -> &'static ClassificationTable {
        &BUILTIN_TABLE
    }

    /// Resolve a channel name to (language, category)
    ///
    /// Tier order: exact, then prefix, then substring; within a tier the
    /// earliest rule in the table wins. Falls back to ("Unknown", "Other").
    pub fn classify(&self, name: &str) -> (&'static str, &'static str) {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return (UNKNOWN_LANGUAGE, OTHER_CATEGORY);
        }

        for rule in &self.rules {
            if rule.pattern.to_lowercase() == needle {
                return (rule.language, rule.category);
            }
        }
        for rule in &self.rules {
            if needle.starts_with(&rule.pattern.to_lowercase()) {
                return (rule.language, rule.category);
            }
        }
        for rule in &self.rules {
            if needle.contains(&rule.pattern.to_lowercase()) {
                return (rule.language, rule.category);
            }
        }

        (UNKNOWN_LANGUAGE, OTHER_CATEGORY)
    }
}
