//! Crisis screen - flags chat text containing high-risk phrases.
//!
//! A plain case-insensitive substring match: no word boundaries, stemming or
//! negation handling. Widening coverage means adding phrases here.

/// High-risk phrases. Matched case-insensitively anywhere in the text.
pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "want to die",
    "self harm",
    "cut myself",
    "hurt myself",
    "no point living",
    "better off dead",
    "ending it all",
    "take my own life",
    "not worth living",
];

/// Appended to the assistant reply whenever a message is flagged.
pub const CRISIS_RESOURCES_NOTICE: &str = "\n\n🚨 I'm concerned about you. Please reach out to a counselor or call the crisis helpline: 988 (US) or your local emergency number. You're not alone.";

/// Returns true when `message` contains any crisis phrase.
pub fn detect_crisis(message: &str) -> bool {
    let lowered = message.to_lowercase();
    CRISIS_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Append the crisis-resources notice to a provider reply.
pub fn with_crisis_resources(reply: String) -> String {
    reply + CRISIS_RESOURCES_NOTICE
}
