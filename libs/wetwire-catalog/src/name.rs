//! Bidirectional, acronym-aware casing used by the Serializer and Import
//! code generator (spec.md §4.7).

use heck::ToSnakeCase;

/// Fixed acronym set, applied longest-first to avoid partial matches.
pub const ACRONYMS: &[&str] = &[
    "https", "http", "vnet", "nic", "sku", "ssh", "api", "gb", "id", "ip", "os", "vm",
];

/// Pure functions for converting between ARM/Go casing conventions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameTransformer;

impl NameTransformer {
    pub fn new() -> Self {
        Self
    }

    /// `camelCase` → `PascalCase`, with acronyms applied.
    pub fn camel_to_pascal(&self, s: &str) -> String {
        let capitalized = capitalize_first(s);
        apply_acronyms(&capitalized)
    }

    /// `PascalCase` → `camelCase` (the inverse direction, used by the
    /// Serializer to derive ARM JSON field names from Go struct fields).
    /// Lowercases the leading hump in full (so `SKU` → `sku`, `APIVersion`
    /// → `apiVersion`) rather than just the first character.
    pub fn pascal_to_camel(&self, s: &str) -> String {
        let words = split_humps(s);
        let mut result = String::new();
        for (i, word) in words.iter().enumerate() {
            if i == 0 {
                result.push_str(&word.to_lowercase());
            } else {
                result.push_str(word);
            }
        }
        result
    }

    /// `snake_case` or `kebab-case` → `PascalCase`, with acronyms applied.
    pub fn snake_kebab_to_pascal(&self, s: &str) -> String {
        let pieces: Vec<String> = s
            .split(|c| c == '-' || c == '_')
            .filter(|p| !p.is_empty())
            .map(capitalize_first)
            .collect();
        apply_acronyms(&pieces.join(""))
    }

    /// Apply the acronym table to an already-PascalCase identifier.
    pub fn apply_acronyms(&self, s: &str) -> String {
        apply_acronyms(s)
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Split a PascalCase/camelCase identifier into "humps": a new word
/// starts at an uppercase letter preceded by a lowercase letter, or at
/// an uppercase letter preceded by another uppercase letter but
/// followed by a lowercase one (so `HTTPSTraffic` splits as
/// `HTTPS` + `Traffic`, not character-by-character).
fn split_humps(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut start = 0usize;

    for i in 1..chars.len() {
        let prev = chars[i - 1];
        let cur = chars[i];
        let next = chars.get(i + 1).copied();

        let boundary = (cur.is_uppercase() && prev.is_lowercase())
            || (cur.is_uppercase() && prev.is_uppercase() && next.is_some_and(|n| n.is_lowercase()));

        if boundary {
            words.push(chars[start..i].iter().collect());
            start = i;
        }
    }
    if start < chars.len() {
        words.push(chars[start..].iter().collect());
    }
    if words.is_empty() {
        words.push(String::new());
    }
    words
}

fn apply_acronyms(s: &str) -> String {
    split_humps(s)
        .into_iter()
        .map(|word| transform_word(&word))
        .collect()
}

fn transform_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    if ACRONYMS.contains(&lower.as_str()) {
        return lower.to_uppercase();
    }
    if word.chars().all(|c| c.is_ascii_uppercase()) && word.chars().count() > 1 {
        if let Some(decomposed) = decompose_acronyms(&lower) {
            return decomposed;
        }
    }
    capitalize_first(word)
}

/// Greedily match a run of concatenated acronyms (longest-match-first),
/// used to keep `applyAcronyms` idempotent on its own output (e.g.
/// `NICId` → `NICID`, and re-applying to `NICID` must stay `NICID`).
fn decompose_acronyms(lower: &str) -> Option<String> {
    if lower.is_empty() {
        return Some(String::new());
    }
    let mut sorted: Vec<&&str> = ACRONYMS.iter().collect();
    sorted.sort_by_key(|a| std::cmp::Reverse(a.len()));
    for acro in sorted {
        if let Some(rest) = lower.strip_prefix(*acro) {
            if let Some(decoded_rest) = decompose_acronyms(rest) {
                return Some(format!("{}{}", acro.to_uppercase(), decoded_rest));
            }
        }
    }
    None
}

/// Convert a `PascalCase` identifier to a snake_case module/package
/// alias (used by the Import code generator to derive a Go package name
/// for ARM types outside the catalog). Delegates to `heck` rather than
/// hand-rolling snake_case.
pub fn module_name(pascal: &str) -> String {
    pascal.to_snake_case()
}
