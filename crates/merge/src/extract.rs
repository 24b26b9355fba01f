use std::collections::HashSet;

use crate::config::MergeConfig;

/// Candidate surnames for a record header, most likely first.
///
/// Rules are tried in order and the first one that applies decides:
///
/// 1. `" & "` separates several families: last word of each side.
/// 2. `","` separates several names: last word of each trimmed side.
/// 3. Otherwise hyphens become spaces and the last word that is alphabetic,
///    longer than one character and not a stop word is the only candidate.
/// 4. If no word survives rule 3, the last raw word is used when it is
///    alphabetic and not a stop word.
///
/// Uses the default stop words; see [`extract_key_names_with`].
pub fn extract_key_names(header: &str) -> Vec<String> {
    extract_key_names_with(header, &MergeConfig::default().stop_word_set())
}

/// [`extract_key_names`] with an explicit, lowercased stop-word set.
pub fn extract_key_names_with(header: &str, stop_words: &HashSet<String>) -> Vec<String> {
    if header.contains(" & ") {
        return header.split(" & ").filter_map(last_word).collect();
    }

    if header.contains(',') {
        return header.split(',').map(str::trim).filter_map(last_word).collect();
    }

    let dehyphenated = header.replace('-', " ");
    let words: Vec<&str> = dehyphenated.split_whitespace().collect();
    let is_stop = |word: &str| stop_words.contains(&word.to_lowercase());

    if let Some(name) = words
        .iter()
        .rev()
        .copied()
        .find(|&w| is_alphabetic(w) && w.chars().count() > 1 && !is_stop(w))
    {
        return vec![name.to_string()];
    }

    // Single-letter names ("A") and the like.
    match words.last().copied() {
        Some(last) if is_alphabetic(last) && !is_stop(last) => vec![last.to_string()],
        _ => Vec::new(),
    }
}

/// A side with no words contributes no candidate.
fn last_word(part: &str) -> Option<String> {
    part.split_whitespace().last().map(String::from)
}

fn is_alphabetic(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}
