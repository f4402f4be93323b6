//! Name handling for ROM files and remote thumbnails.
//!
//! ROM sets follow the No-Intro/Redump convention:
//! ```text
//! Legend of Zelda, The - A Link to the Past (USA) (Rev 1) [!].sfc
//! ```
//! The title is everything before the first `(` or `[`; the tags carry region,
//! revision and dump status. Arcade sets instead use short driver names
//! (`mslug.zip`), which are mapped to full titles through a fixed table.

/// Arcade driver short names and their canonical titles.
const ARCADE_TITLES: &[(&str, &str)] = &[
    ("1942", "1942"),
    ("1943", "1943 - The Battle of Midway"),
    ("aof", "Art of Fighting"),
    ("aof2", "Art of Fighting 2"),
    ("aof3", "Art of Fighting 3 - The Path of the Warrior"),
    ("blazstar", "Blazing Star"),
    ("bublbobl", "Bubble Bobble"),
    ("captcomm", "Captain Commando"),
    ("ddragon", "Double Dragon"),
    ("dino", "Cadillacs and Dinosaurs"),
    ("dkong", "Donkey Kong"),
    ("fatfury1", "Fatal Fury - King of Fighters"),
    ("fatfury2", "Fatal Fury 2"),
    ("fatfury3", "Fatal Fury 3 - Road to the Final Victory"),
    ("ffight", "Final Fight"),
    ("galaga", "Galaga"),
    ("garou", "Garou - Mark of the Wolves"),
    ("kof94", "The King of Fighters '94"),
    ("kof95", "The King of Fighters '95"),
    ("kof96", "The King of Fighters '96"),
    ("kof97", "The King of Fighters '97"),
    ("kof98", "The King of Fighters '98 - The Slugfest"),
    ("kof99", "The King of Fighters '99 - Millennium Battle"),
    ("kof2000", "The King of Fighters 2000"),
    ("kof2001", "The King of Fighters 2001"),
    ("kof2002", "The King of Fighters 2002"),
    ("lastblad", "The Last Blade"),
    ("lastbld2", "The Last Blade 2"),
    ("mslug", "Metal Slug - Super Vehicle-001"),
    ("mslug2", "Metal Slug 2 - Super Vehicle-001/II"),
    ("mslug3", "Metal Slug 3"),
    ("mslug4", "Metal Slug 4"),
    ("mslug5", "Metal Slug 5"),
    ("mslugx", "Metal Slug X - Super Vehicle-001"),
    ("mspacman", "Ms. Pac-Man"),
    ("mvsc", "Marvel vs. Capcom - Clash of Super Heroes"),
    ("pacman", "Pac-Man"),
    ("pulstar", "Pulstar"),
    ("punisher", "The Punisher"),
    ("rbff1", "Real Bout Fatal Fury"),
    ("rbff2", "Real Bout Fatal Fury 2 - The Newcomers"),
    ("samsho", "Samurai Shodown"),
    ("samsho2", "Samurai Shodown II"),
    ("sf2", "Street Fighter II - The World Warrior"),
    ("sf2ce", "Street Fighter II' - Champion Edition"),
    ("sfa", "Street Fighter Alpha - Warriors' Dreams"),
    ("sfa2", "Street Fighter Alpha 2"),
    ("sfa3", "Street Fighter Alpha 3"),
    ("shocktro", "Shock Troopers"),
    ("simpsons", "The Simpsons"),
    ("ssf2", "Super Street Fighter II - The New Challengers"),
    ("tmnt", "Teenage Mutant Ninja Turtles"),
    ("wof", "Warriors of Fate"),
    ("xmen", "X-Men"),
];

/// Characters the thumbnail repository replaces with `_` in file names.
const THUMBNAIL_UNSAFE_CHARS: &[char] = &['&', '*', '/', ':', '`', '<', '>', '?', '\\', '|', '"'];

/// Canonical title for an arcade short name (case-insensitive).
pub fn arcade_title(short_name: &str) -> Option<&'static str> {
    let needle = short_name.trim();
    ARCADE_TITLES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(needle))
        .map(|(_, title)| *title)
}

/// Split a file name into `(stem, extension)`.
///
/// Only a trailing segment that looks like a real extension is split off:
/// 1-4 ASCII alphanumerics with at least one letter. This keeps titles such
/// as `"Super Mario Bros. 3"` or `"Vol. 2"` intact.
pub fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    if let Some(dot) = file_name.rfind('.') {
        let ext = &file_name[dot + 1..];
        let looks_like_ext = (1..=4).contains(&ext.len())
            && ext.chars().all(|c| c.is_ascii_alphanumeric())
            && ext.chars().any(|c| c.is_ascii_alphabetic());
        if looks_like_ext && dot > 0 {
            return (&file_name[..dot], Some(ext));
        }
    }
    (file_name, None)
}

/// File name without its extension.
pub fn strip_extension(file_name: &str) -> &str {
    split_extension(file_name).0
}

/// Remove every `( ... )` and `[ ... ]` segment, including nested ones.
///
/// An unterminated segment swallows the rest of the string. Whitespace left
/// around removed segments is collapsed and the result trimmed.
pub fn strip_tags(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut depth = 0u32;
    for ch in name.chars() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the comparison key for a file name.
///
/// When the input carries an extension and its stem is a known arcade short
/// name, the canonical title is normalized instead. Keys never contain a
/// `.`, so normalizing a key returns it unchanged.
pub fn normalize_key(file_name: &str) -> String {
    let (stem, ext) = split_extension(file_name);
    match ext {
        Some(_) => normalize_title(arcade_title(stem).unwrap_or(stem)),
        None => normalize_title(stem),
    }
}

/// Normalize a bare title: lowercase, tags removed, every non-alphanumeric
/// character turned into a single space, trimmed.
///
/// No extension or arcade handling; remote thumbnail names go through here
/// after their `.png` is removed.
pub fn normalize_title(title: &str) -> String {
    let mut key = String::with_capacity(title.len());
    for ch in strip_tags(title).chars() {
        if ch.is_ascii_alphanumeric() {
            key.push(ch.to_ascii_lowercase());
        } else if !key.is_empty() && !key.ends_with(' ') {
            key.push(' ');
        }
    }
    if key.ends_with(' ') {
        key.pop();
    }
    key
}

/// Human-readable title for the manifest.
///
/// Arcade short names map to their canonical title; everything else has its
/// tags stripped and a trailing article moved to the front
/// (`"Legend of Zelda, The - Link's Awakening"` becomes
/// `"The Legend of Zelda - Link's Awakening"`).
pub fn display_name(file_name: &str) -> String {
    let stem = strip_extension(file_name);
    if let Some(title) = arcade_title(stem) {
        return title.to_string();
    }

    let clean = strip_tags(stem);
    for suffix in [", The", ", the"] {
        if clean.contains(suffix) {
            return format!("The {}", clean.replacen(suffix, "", 1));
        }
    }
    clean
}

/// Manifest identifier: lowercase file name with dots and spaces replaced.
pub fn entry_id(file_name: &str) -> String {
    file_name.replace(['.', ' '], "_").to_lowercase()
}

/// Apply the thumbnail repository's file-name substitutions.
pub fn thumbnail_safe_name(name: &str) -> String {
    name.chars()
        .map(|c| if THUMBNAIL_UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

#[cfg(test)]
#[path = "tests/naming_tests.rs"]
mod tests;
