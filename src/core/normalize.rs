//! Normalization helpers shared by the identity matcher.

/// Keep `[A-Za-z0-9 ]`, lowercase, collapse space runs, trim.
/// Drops emoji and punctuation while keeping word boundaries.
pub fn normalize_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    kept.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Digits only; a leading `91` country code is dropped when more than 10 digits remain.
pub fn normalize_phone(info: &str) -> String {
    let digits: String = info.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() > 10 && digits.starts_with("91") {
        return digits[2..].to_string();
    }
    digits
}

/// Containment match on normalized phone numbers, both sides at least 5 digits.
pub fn phones_match(a: &str, b: &str) -> bool {
    let a = normalize_phone(a);
    let b = normalize_phone(b);

    if a.len() < 5 || b.len() < 5 {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}
