//! Identity matcher: resolves a chat sender label to a directory person.
//!
//! Strategies run in a fixed order and the first hit wins. Within one day a
//! label is claimed at most once and a person is claimed at most once, and
//! every alias claim of the day is made before any name or phone claim.

use crate::chat::aggregate::DayEntries;
use crate::core::normalize::{normalize_name, phones_match};
use crate::models::person::Person;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStrategy {
    AliasExact,
    AliasNormalized,
    NameExact,
    NameNormalized,
    Phone,
}

impl MatchStrategy {
    pub const CASCADE: [MatchStrategy; 5] = [
        MatchStrategy::AliasExact,
        MatchStrategy::AliasNormalized,
        MatchStrategy::NameExact,
        MatchStrategy::NameNormalized,
        MatchStrategy::Phone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::AliasExact => "alias",
            MatchStrategy::AliasNormalized => "alias~",
            MatchStrategy::NameExact => "name",
            MatchStrategy::NameNormalized => "name~",
            MatchStrategy::Phone => "phone",
        }
    }

    pub fn matches(&self, label: &str, person: &Person) -> bool {
        match self {
            MatchStrategy::AliasExact => person.alias().is_some_and(|a| a == label),
            MatchStrategy::AliasNormalized => {
                person.alias().is_some_and(|a| normalized_eq(label, a))
            }
            MatchStrategy::NameExact => person.display_name == label,
            MatchStrategy::NameNormalized => normalized_eq(label, &person.display_name),
            MatchStrategy::Phone => person.phone().is_some_and(|p| phones_match(label, p)),
        }
    }
}

fn normalized_eq(a: &str, b: &str) -> bool {
    let na = normalize_name(a);
    !na.is_empty() && na == normalize_name(b)
}

/// Strategy by which `label` would resolve to this one person, if any.
pub fn resolves_to(label: &str, person: &Person) -> Option<MatchStrategy> {
    if !person.is_active {
        return None;
    }
    MatchStrategy::CASCADE
        .into_iter()
        .find(|s| s.matches(label, person))
}

/// Run the cascade for one label over active people not yet claimed today.
pub fn find_person<'a>(
    label: &str,
    people: &'a [Person],
    claimed: &HashSet<i64>,
) -> Option<(&'a Person, MatchStrategy)> {
    for strategy in MatchStrategy::CASCADE {
        let hit = people
            .iter()
            .filter(|p| p.is_active && !claimed.contains(&p.id))
            .find(|p| strategy.matches(label, p));

        if let Some(p) = hit {
            return Some((p, strategy));
        }
    }
    None
}

#[derive(Debug, Default, Clone)]
pub struct DayMatches {
    /// person id → claimed label
    pub by_person: HashMap<i64, String>,
    /// label → strategy that claimed it
    pub strategies: HashMap<String, MatchStrategy>,
    /// labels nobody claimed, in label order
    pub unclaimed: Vec<String>,
}

impl DayMatches {
    pub fn label_for(&self, person_id: i64) -> Option<&str> {
        self.by_person.get(&person_id).map(String::as_str)
    }
}

/// Resolve every label of one day.
///
/// Each strategy pass walks the still-unclaimed labels in label order, so a
/// weak match on one label cannot take a person whose alias appears on
/// another label.
pub fn match_day(entries: &DayEntries, people: &[Person]) -> DayMatches {
    let mut out = DayMatches::default();
    let mut claimed: HashSet<i64> = HashSet::new();

    for strategy in MatchStrategy::CASCADE {
        for label in entries.keys() {
            if out.strategies.contains_key(label) {
                continue;
            }

            let hit = people
                .iter()
                .filter(|p| p.is_active && !claimed.contains(&p.id))
                .find(|p| strategy.matches(label, p));

            if let Some(person) = hit {
                claimed.insert(person.id);
                out.by_person.insert(person.id, label.clone());
                out.strategies.insert(label.clone(), strategy);
            }
        }
    }

    out.unclaimed = entries
        .keys()
        .filter(|label| !out.strategies.contains_key(*label))
        .cloned()
        .collect();

    out
}
