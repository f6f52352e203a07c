//! Visual cue extraction from generated prose.
//!
//! Scans a story for concrete, picturable phrases (named characters,
//! locations, objects, atmosphere) that ground the image prompt in the
//! scene the text actually describes. Extraction is regex-driven and
//! deliberately favors precision over recall: a handful of sharp cues
//! beats a long list of noisy ones.

use crate::extraction::strip_title_marker;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Upper bound on returned cues.
pub const MAX_CUES: usize = 5;
/// Matches taken from any single pattern.
const PER_RULE_CAP: usize = 2;
/// Inputs shorter than this carry no usable scene.
const MIN_PROSE_CHARS: usize = 20;
/// Containment shorter than this is coincidence, not duplication.
const OVERLAP_MIN_CHARS: usize = 3;

/// Honorific or rank followed by a capitalized name.
static TITLED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b((?:Dr|Mr|Ms|Mrs|Prof)\.\s*[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?|(?:Captain|Professor|Commander|Doctor|Lieutenant|Sergeant|Admiral|General|Colonel|Agent)\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)",
    )
    .expect("Valid titled name regex")
});

/// Capitalized name performing a scene-setting action.
static NAMED_ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)\s+(?:stood|walked|gazed|stared|watched|turned|reached|climbed|knelt|leaned|paused|whispered|studied|pressed|floated)\b",
    )
    .expect("Valid named action regex")
});

/// Preposition followed by a capitalized place name.
static LOCATION_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?i:in|at|on|near|inside|beneath|aboard|above|within|under|across|beyond)\s+(?i:the\s+)?([A-Z][\w'-]*(?:\s+[A-Z][\w'-]*)*\s+(?i:station|city|colony|laboratory|tower|dome|outpost|chamber|facility|settlement|spire|harbor|vault|citadel|ruins|basin|archive))\b",
    )
    .expect("Valid location phrase regex")
});

/// Definite article followed by a named vessel or installation.
static NAMED_VESSEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b[Tt]he\s+([A-Z][\w'-]+(?:\s+[A-Z][\w'-]+)?\s+(?i:ship|vessel|station|freighter|cruiser|shuttle|orbital|carrier))\b",
    )
    .expect("Valid named vessel regex")
});

/// Modifier paired with a technological noun.
static OBJECT_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b([\w-]+\s+(?:engine|device|console|reactor|drone|implant|artifact|terminal|beacon|interface|capsule|probe|scanner|relay|array))s?\b",
    )
    .expect("Valid object pair regex")
});

/// Standalone nouns picturable without a modifier.
static OBJECT_NOUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(hologram|android|starship|exosuit|datapad|airlock|terraformer|cryopod|servo|nanite)s?\b")
        .expect("Valid object noun regex")
});

/// Modifier paired with an atmospheric noun.
static ATMOSPHERE_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b([\w-]+\s+(?:glow|light|mist|fog|shadow|sky|haze|storm|dusk|silence|hum))s?\b",
    )
    .expect("Valid atmosphere pair regex")
});

/// Standalone atmospheric nouns.
static ATMOSPHERE_NOUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(aurora|starlight|moonlight|neon|bioluminescence|nebula)s?\b")
        .expect("Valid atmosphere noun regex")
});

/// Leading words that disqualify a capitalized match as a name.
const NAME_STOPWORDS: &[&str] = &[
    "the", "she", "he", "it", "they", "we", "you", "i", "a", "an", "then", "but", "and", "as",
    "his", "her", "its", "their", "this", "that", "there", "who", "what", "when", "where",
];

/// Filler words stripped from the front of modifier-noun pairs.
const FILLER_WORDS: &[&str] = &[
    "the", "a", "an", "his", "her", "its", "their", "this", "that", "of", "and", "or", "with",
    "in", "on", "at", "to", "was", "were", "is", "are", "been", "had", "has", "have", "will",
    "would", "might", "could", "can",
];

/// One extraction pattern plus the cleanup applied to its matches.
struct CueRule {
    /// Rule family, recorded in traces.
    category: &'static str,
    pattern: &'static LazyLock<Regex>,
    cleanup: fn(&str) -> Option<String>,
}

/// Rules in evaluation order: characters, locations, objects, atmosphere.
static CUE_RULES: &[CueRule] = &[
    CueRule {
        category: "character",
        pattern: &TITLED_NAME_RE,
        cleanup: keep_phrase,
    },
    CueRule {
        category: "character",
        pattern: &NAMED_ACTION_RE,
        cleanup: keep_name,
    },
    CueRule {
        category: "location",
        pattern: &LOCATION_PHRASE_RE,
        cleanup: keep_phrase,
    },
    CueRule {
        category: "location",
        pattern: &NAMED_VESSEL_RE,
        cleanup: keep_phrase,
    },
    CueRule {
        category: "object",
        pattern: &OBJECT_PAIR_RE,
        cleanup: keep_pair,
    },
    CueRule {
        category: "object",
        pattern: &OBJECT_NOUN_RE,
        cleanup: keep_phrase,
    },
    CueRule {
        category: "atmosphere",
        pattern: &ATMOSPHERE_PAIR_RE,
        cleanup: keep_pair,
    },
    CueRule {
        category: "atmosphere",
        pattern: &ATMOSPHERE_NOUN_RE,
        cleanup: keep_phrase,
    },
];

/// Extract up to [`MAX_CUES`] picturable phrases from story prose.
///
/// The title marker is stripped first so cue text comes from the scene,
/// not the headline. Near-duplicates are suppressed case-insensitively,
/// including phrases contained in an already-kept cue.
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn extract_visual_cues(text: &str) -> Vec<String> {
    let stripped = strip_title_marker(text);
    let prose = stripped.trim();
    if prose.chars().count() < MIN_PROSE_CHARS {
        return Vec::new();
    }

    let mut cues: Vec<String> = Vec::new();
    'rules: for rule in CUE_RULES {
        let mut taken = 0;
        for caps in rule.pattern.captures_iter(prose) {
            if cues.len() >= MAX_CUES {
                break 'rules;
            }
            if taken >= PER_RULE_CAP {
                break;
            }
            let raw = caps.get(1).map_or("", |m| m.as_str());
            let Some(phrase) = (rule.cleanup)(raw) else {
                continue;
            };
            if is_duplicate(&phrase, &cues) {
                continue;
            }
            debug!(category = rule.category, cue = %phrase, "Collected visual cue");
            cues.push(phrase);
            taken += 1;
        }
    }
    cues
}

/// Collapse internal whitespace.
fn tidy(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep any non-empty phrase as matched.
fn keep_phrase(raw: &str) -> Option<String> {
    let phrase = tidy(raw);
    (!phrase.is_empty()).then_some(phrase)
}

/// Keep a name unless it starts with a capitalized pronoun or article
/// the pattern cannot tell apart from a proper noun.
fn keep_name(raw: &str) -> Option<String> {
    let phrase = tidy(raw);
    let first = phrase.split_whitespace().next()?;
    if NAME_STOPWORDS.contains(&first.to_ascii_lowercase().as_str()) {
        return None;
    }
    Some(phrase)
}

/// Keep modifier-noun pairs after shedding filler lead-ins; a bare noun
/// is not a pair.
fn keep_pair(raw: &str) -> Option<String> {
    let phrase = tidy(raw);
    let mut words: Vec<&str> = phrase.split_whitespace().collect();
    while let Some(first) = words.first() {
        if FILLER_WORDS.contains(&first.to_ascii_lowercase().as_str()) {
            words.remove(0);
        } else {
            break;
        }
    }
    if words.len() < 2 {
        return None;
    }
    Some(words.join(" "))
}

/// Case-insensitive duplicate check with substring containment.
fn is_duplicate(candidate: &str, kept: &[String]) -> bool {
    let candidate = candidate.to_lowercase();
    kept.iter().any(|existing| {
        let existing = existing.to_lowercase();
        if candidate == existing {
            return true;
        }
        let (shorter, longer) = if candidate.len() <= existing.len() {
            (&candidate, &existing)
        } else {
            (&existing, &candidate)
        };
        shorter.len() > OVERLAP_MIN_CHARS && longer.contains(shorter.as_str())
    })
}
