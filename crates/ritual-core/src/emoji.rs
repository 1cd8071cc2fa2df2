//! Keyword-based emoji assignment for habits created without a glyph.
//!
//! The habit name is scanned case-insensitively against keyword groups;
//! the first matching group wins.

/// Pick an emoji for a habit name. Falls back to the sparkle glyph when
/// no keyword matches.
pub fn auto_emoji(name: &str) -> &'static str {
  let name = name.to_lowercase();
  let has = |keywords: &[&str]| keywords.iter().any(|k| name.contains(k));

  if has(&["water", "drink", "hydrat"]) {
    return "💧";
  }
  if has(&["exercise", "workout", "gym"]) {
    return "💪";
  }
  if has(&["read", "book", "study"]) {
    return "📚";
  }
  if has(&["meditat", "mindful", "breath"]) {
    return "🧘";
  }
  if has(&["run", "jog", "cardio"]) {
    return "🏃";
  }
  if has(&["sleep", "rest", "bed"]) {
    return "🛏️";
  }
  if has(&["shower", "bath", "clean"]) {
    return "🚿";
  }
  if has(&["eat", "meal", "nutrition"]) {
    return "🥗";
  }
  if has(&["vitamin", "pill", "medicine"]) {
    return "💊";
  }
  if has(&["wake", "morning", "early"]) {
    return "🌅";
  }
  if has(&["write", "journal", "diary"]) {
    return "📝";
  }
  if has(&["music", "song", "listen"]) {
    return "🎵";
  }
  if has(&["art", "draw", "paint"]) {
    return "🎨";
  }
  if has(&["bike", "cycle", "cycling"]) {
    return "🚴";
  }
  if has(&["swim", "pool"]) {
    return "🏊";
  }
  if has(&["guitar", "instrument", "practice"]) {
    return "🎸";
  }
  if has(&["fruit", "apple", "healthy"]) {
    return "🍎";
  }
  if has(&["milk", "protein", "shake"]) {
    return "🥛";
  }
  if has(&["plant", "garden", "green"]) {
    return "🌱";
  }
  if has(&["goal", "target", "focus"]) {
    return "🎯";
  }
  if has(&["energy", "power", "boost"]) {
    return "⚡";
  }
  if has(&["passion", "fire", "burn"]) {
    return "🔥";
  }
  if has(&["brain", "think", "mental"]) {
    return "🧠";
  }
  if has(&["love", "heart", "care"]) {
    return "❤️";
  }
  if has(&["shine", "glow", "sparkle"]) {
    return "✨";
  }
  if has(&["lift", "weight", "strength"]) {
    return "🏋️";
  }
  if has(&["sun", "bright", "light"]) {
    return "☀️";
  }
  if has(&["remind", "alert", "notification"]) {
    return "🔔";
  }
  if has(&["phone", "app", "digital"]) {
    return "📱";
  }
  if has(&["nature", "leaf", "organic"]) {
    return "🌿";
  }

  "✨"
}
