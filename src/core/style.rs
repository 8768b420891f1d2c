//! Response style hints derived from the hidden state
//!
//! These never leave the crate as rendering decisions; they are hints a
//! text generator or status surface can consume.

use serde::Serialize;

use crate::types::{EmotionalState, WarmthBand};
use crate::TENSION_UNPREDICTABLE;

/// disappointment at or above this flattens engagement
const DISAPPOINTMENT_MECHANICAL: i64 = 5;

/// Style hints for one reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseStyle {
    pub reply_length: &'static str,
    pub reply_delay: &'static str,
    pub tone: &'static str,
    pub punctuation: &'static str,
    pub emoji_usage: &'static str,
    pub question_asking: &'static str,
    pub sharing: &'static str,
    pub example_phrases: &'static [&'static str],
}

impl WarmthBand {
    /// Per-band example phrases; the table is immutable and total
    pub fn example_phrases(&self) -> &'static [&'static str] {
        match self {
            WarmthBand::Freezing => &["嗯", "哦", "好", "随便", "都行"],
            WarmthBand::Cold => &["还行吧", "也不是", "看情况", "再说"],
            WarmthBand::Neutral => &["还好", "是啊", "对的", "嗯嗯"],
            WarmthBand::Warm => &["哈哈", "真的吗", "然后呢", "我也是"],
            WarmthBand::Caring => &["你呢", "怎么了", "早点休息", "吃饭了吗"],
        }
    }
}

/// Derive style hints for the current state
pub fn response_style(state: &EmotionalState) -> ResponseStyle {
    let band = WarmthBand::from_warmth(state.warmth);

    let mut style = match band {
        WarmthBand::Freezing => ResponseStyle {
            reply_length: "very_short",
            reply_delay: "long",
            tone: "cold",
            punctuation: "minimal",
            emoji_usage: "rare",
            question_asking: "never",
            sharing: "none",
            example_phrases: band.example_phrases(),
        },
        WarmthBand::Cold => ResponseStyle {
            reply_length: "short",
            reply_delay: "medium_long",
            tone: "polite_distant",
            punctuation: "normal",
            emoji_usage: "rare",
            question_asking: "rarely",
            sharing: "minimal",
            example_phrases: band.example_phrases(),
        },
        WarmthBand::Neutral => ResponseStyle {
            reply_length: "normal",
            reply_delay: "medium",
            tone: "neutral",
            punctuation: "normal",
            emoji_usage: "rare",
            question_asking: "sometimes",
            sharing: "minimal",
            example_phrases: band.example_phrases(),
        },
        WarmthBand::Warm => ResponseStyle {
            reply_length: "normal_plus",
            reply_delay: "short",
            tone: "warm",
            punctuation: "normal",
            emoji_usage: "rare",
            question_asking: "often",
            sharing: "some",
            example_phrases: band.example_phrases(),
        },
        WarmthBand::Caring => ResponseStyle {
            reply_length: "longer",
            reply_delay: "quick",
            tone: "caring",
            punctuation: "normal",
            emoji_usage: "rare",
            question_asking: "often",
            sharing: "willing",
            example_phrases: band.example_phrases(),
        },
    };

    // High tension makes timing and tone cautious
    if state.tension >= TENSION_UNPREDICTABLE {
        style.reply_delay = "unpredictable";
        style.tone = "cautious";
        style.punctuation = "ellipsis_heavy";
    }

    // Accumulated disappointment flattens engagement
    if state.disappointment >= DISAPPOINTMENT_MECHANICAL {
        style.tone = "mechanical";
        style.question_asking = "never";
        style.sharing = "none";
        style.reply_length = "short";
    }

    style
}

/// Status-surface temperature: (icon, label). Hidden at max warmth.
pub fn temperature_display(state: &EmotionalState) -> (&'static str, &'static str) {
    if state.tension > TENSION_UNPREDICTABLE {
        return ("💭", "迟疑");
    }
    if state.disappointment > DISAPPOINTMENT_MECHANICAL {
        return ("📉", "疏远中");
    }
    match WarmthBand::from_warmth(state.warmth) {
        WarmthBand::Freezing => ("❄", "冷"),
        WarmthBand::Cold => ("☁", "微凉"),
        WarmthBand::Neutral => ("🌤", "还行"),
        WarmthBand::Warm => ("☀", "暖"),
        WarmthBand::Caring => ("", ""),
    }
}

// =============================================================================
// TESTS
// =============================================================================
