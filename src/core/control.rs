//! ControlProtocol: extracts embedded directives from a candidate reply
//!
//! Six tag kinds, HTML-comment delimited. Parsing never fails the whole
//! call: a key that does not parse is dropped for that key only, and
//! every tag kind is stripped from the text whether or not it parsed.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::types::{ControlDirectives, Dimension, EmotionalState, Pace};

lazy_static! {
    /// <!--typing:duration=3000-->
    static ref TYPING_PATTERN: Regex = Regex::new(r"<!--typing:([^>]+)-->").unwrap();

    /// <!--pause:500--> (inline, position-sensitive)
    static ref PAUSE_PATTERN: Regex = Regex::new(r"<!--pause:(\d+)-->").unwrap();

    /// <!--state:warmth=2,tension=5-->
    static ref STATE_PATTERN: Regex = Regex::new(r"<!--state:([^>]+)-->").unwrap();

    /// <!--presence:away--> (stripped, not currently actioned)
    static ref PRESENCE_PATTERN: Regex = Regex::new(r"<!--presence:([^>]+)-->").unwrap();

    /// <!--read:delay=2000--> (stripped, not currently actioned)
    static ref READ_PATTERN: Regex = Regex::new(r"<!--read:([^>]+)-->").unwrap();

    /// <!--pace:slow-->
    static ref PACE_PATTERN: Regex = Regex::new(r"<!--pace:(\w+)-->").unwrap();
}

/// Control-tag parser
#[derive(Debug, Default)]
pub struct ControlProtocol;

impl ControlProtocol {
    pub fn new() -> Self {
        Self
    }

    /// Parse one candidate reply into clean text and directives.
    /// The clean text contains no residual markers of any tag kind.
    pub fn parse(&self, raw: &str) -> (String, ControlDirectives) {
        let mut directives = ControlDirectives::default();

        // typing: comma-separated key=value pairs, only duration is known
        if let Some(caps) = TYPING_PATTERN.captures(raw) {
            for param in caps[1].split(',') {
                if let Some((key, value)) = param.split_once('=') {
                    if key.trim() == "duration" {
                        match value.trim().parse::<u64>() {
                            Ok(ms) => directives.typing_duration = Some(ms),
                            Err(_) => debug!(value = value.trim(), "dropped malformed typing duration"),
                        }
                    }
                }
            }
        }

        // pace: a single name; unknown names leave the default
        if let Some(caps) = PACE_PATTERN.captures(raw) {
            match Pace::parse(&caps[1]) {
                Some(pace) => directives.pace = pace,
                None => debug!(pace = &caps[1], "dropped unknown pace name"),
            }
        }

        // state: key=value integer overrides; unknown dimensions and
        // non-integer values are dropped per key
        if let Some(caps) = STATE_PATTERN.captures(raw) {
            for param in caps[1].split(',') {
                if let Some((key, value)) = param.split_once('=') {
                    let key = key.trim();
                    match (Dimension::parse(key), value.trim().parse::<i64>()) {
                        (Some(dim), Ok(v)) => {
                            directives.state_updates.insert(dim, v);
                        }
                        (None, _) => debug!(key, "dropped unknown state dimension"),
                        (_, Err(_)) => debug!(key, "dropped non-integer state value"),
                    }
                }
            }
        }

        // Strip the five position-insensitive tag kinds first, then walk
        // pause tags so their offsets land in clean-text coordinates
        let mut intermediate = raw.to_string();
        for pattern in [
            &*TYPING_PATTERN,
            &*STATE_PATTERN,
            &*PRESENCE_PATTERN,
            &*READ_PATTERN,
            &*PACE_PATTERN,
        ] {
            intermediate = pattern.replace_all(&intermediate, "").into_owned();
        }

        let mut clean = String::with_capacity(intermediate.len());
        let mut clean_chars = 0usize;
        let mut last_end = 0usize;
        for caps in PAUSE_PATTERN.captures_iter(&intermediate) {
            let Some(m) = caps.get(0) else { continue };
            let segment = &intermediate[last_end..m.start()];
            clean.push_str(segment);
            clean_chars += segment.chars().count();
            if let Ok(ms) = caps[1].parse::<u64>() {
                directives.inline_pauses.insert(clean_chars, ms);
            }
            last_end = m.end();
        }
        clean.push_str(&intermediate[last_end..]);

        let trimmed = clean.trim();
        // Pause offsets shift if leading whitespace was trimmed away
        let leading = clean.len() - clean.trim_start().len();
        if leading > 0 && !directives.inline_pauses.is_empty() {
            let leading_chars = clean[..leading].chars().count();
            directives.inline_pauses = directives
                .inline_pauses
                .iter()
                .map(|(offset, ms)| (offset.saturating_sub(leading_chars), *ms))
                .collect();
        }

        (trimmed.to_string(), directives)
    }

    /// Apply state-update directives: overwrite each named dimension,
    /// then clamp the whole state once. Overwrite semantics, not the
    /// transition table's additive deltas.
    pub fn apply_state_updates(&self, state: &mut EmotionalState, directives: &ControlDirectives) {
        for (dim, value) in &directives.state_updates {
            state.set_dimension(*dim, *value);
        }
        state.clamp();
    }
}

// =============================================================================
// TESTS
// =============================================================================
