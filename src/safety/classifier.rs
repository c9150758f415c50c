//! Snippet Classifier
//!
//! Ordered substring rules over lower-cased English text. The first rule that
//! decides wins, so the order below is load-bearing: narrow phrases (childbirth
//! topics, "avoid anemia" style collocations) must run before the broad danger
//! keywords would swallow them.

use super::SafetyStatus;

/// Rule 1: statements that the food is fine
const AFFIRMATIVE_PHRASES: &[&str] = &[
    "safe to eat",
    "generally safe",
    "fine to eat",
    "can eat",
    "good source",
    "healthy",
    "yes,",
    "yes you can",
    "perfectly safe",
];

/// Qualifiers that cancel an affirmative phrase
const HEDGES: &[&str] = &["except", "unless", "only if"];

/// Rule 2
const MITIGATIONS: &[&str] = &["cooked", "heating", "pasteurized"];

/// Rule 3: results about giving birth rather than eating
const CHILDBIRTH_TERMS: &[&str] = &[
    "amniotic",
    "labor",
    "contraction",
    "delivery",
    "breastfeeding",
];

/// Rule 4
const DANGER_PHRASES: &[&str] = &[
    "avoid",
    "unsafe",
    "do not eat",
    "listeria",
    "salmonella",
    "toxoplasmosis",
    "mercury",
];

/// Rule 4a: "avoid" names the condition the food prevents
const BENIGN_AVOIDANCE: &[&str] = &[
    "avoid anemia",
    "avoid becoming",
    "avoid infection",
    "avoid sickness",
    "avoid illness",
    "avoid constipation",
];

/// Rule 4b
const GENERIC_LISTS: &[&str] = &["what not to eat", "foods to avoid"];
const EXPLICIT_DANGER: &[&str] = &["is unsafe", "is dangerous"];

/// Rule 5
const MODERATION_PHRASES: &[&str] = &[
    "limit",
    "moderation",
    "small amount",
    "consult",
    "ask your doctor",
    "caffeine",
    "watch out",
    "risk of",
    "bacteria",
    "parasite",
    "harmful",
    "danger",
    "cooked thoroughly",
    "pasteurized",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// "raw" only counts as a danger signal when produce is not involved
fn mentions_raw_food(text: &str) -> bool {
    text.contains("raw") && !text.contains("vegetable") && !text.contains("fruit")
}

/// Classify a snippet/title blob for the food the user asked about.
///
/// Total over all inputs: empty or unrelated text falls through to
/// [`SafetyStatus::Unknown`]. Matching is case-insensitive.
pub fn classify(text: &str, original_query: &str) -> SafetyStatus {
    let text = text.to_lowercase();
    let query = original_query.to_lowercase();

    // A hedge does not return here; evaluation continues with rule 2
    if contains_any(&text, AFFIRMATIVE_PHRASES) && !contains_any(&text, HEDGES) {
        return SafetyStatus::Safe;
    }

    if contains_any(&text, MITIGATIONS) {
        if text.contains("avoid") || text.contains("unsafe") {
            return SafetyStatus::Caution;
        }
        return SafetyStatus::Safe;
    }

    if contains_any(&text, CHILDBIRTH_TERMS) {
        return SafetyStatus::Unknown;
    }

    if contains_any(&text, DANGER_PHRASES) || mentions_raw_food(&text) {
        return classify_danger(&text, &query);
    }

    if contains_any(&text, MODERATION_PHRASES) {
        return SafetyStatus::Caution;
    }

    if text.contains("safe") {
        return SafetyStatus::Caution;
    }

    SafetyStatus::Unknown
}

/// Sub-rules 4a-4d. Both arguments are already lower-cased.
fn classify_danger(text: &str, query: &str) -> SafetyStatus {
    if text.contains("avoid") && contains_any(text, BENIGN_AVOIDANCE) {
        return SafetyStatus::Safe;
    }

    if contains_any(text, GENERIC_LISTS) && !contains_any(text, EXPLICIT_DANGER) {
        return SafetyStatus::Unknown;
    }

    // The user did not ask about the raw form
    if text.contains("raw") && !query.contains("raw") {
        return SafetyStatus::Caution;
    }

    SafetyStatus::Unsafe
}
