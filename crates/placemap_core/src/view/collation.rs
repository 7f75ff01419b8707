//! Ukrainian-aware name collation.
//!
//! Raw code point order misplaces `Ґ`, `Є`, `І` and `Ї`, which live outside
//! the contiguous `А..я` block, and puts every accented Latin letter after `z`.
//! Names are compared on a primary key that follows the Ukrainian alphabet
//! (accented letters share the slot of their base letter), then on accents,
//! then on case (lowercase first), then on raw code points so distinct
//! strings never compare equal.

use std::cmp::Ordering;

const UKRAINIAN_ALPHABET: [char; 33] = [
    'а', 'б', 'в', 'г', 'ґ', 'д', 'е', 'є', 'ж', 'з', 'и', 'і', 'ї', 'й', 'к', 'л', 'м', 'н', 'о',
    'п', 'р', 'с', 'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ь', 'ю', 'я',
];

/// Alphabet positions are spread out so letters of neighbouring Cyrillic
/// alphabets (`ъ`, `ы`, `э`) fit between Ukrainian ones.
const SLOT_WIDTH: u32 = 4;

/// Last code point of each run in Latin Extended-A and the base letter of that run.
const LATIN_EXTENDED_A_RUNS: [(u32, char); 20] = [
    (0x105, 'a'),
    (0x10D, 'c'),
    (0x111, 'd'),
    (0x11B, 'e'),
    (0x123, 'g'),
    (0x127, 'h'),
    (0x133, 'i'),
    (0x135, 'j'),
    (0x138, 'k'),
    (0x142, 'l'),
    (0x14B, 'n'),
    (0x153, 'o'),
    (0x159, 'r'),
    (0x161, 's'),
    (0x167, 't'),
    (0x173, 'u'),
    (0x175, 'w'),
    (0x178, 'y'),
    (0x17E, 'z'),
    (0x17F, 's'),
];

const TIER_SHIFT: u32 = 24;
const TIER_WHITESPACE: u32 = 0;
const TIER_PUNCTUATION: u32 = 1;
const TIER_DIGIT: u32 = 2;
const TIER_CYRILLIC: u32 = 3;
const TIER_LATIN: u32 = 4;
const TIER_OTHER: u32 = 5;
/// Offset for letters with no slot in the alphabet table.
const UNLISTED_OFFSET: u32 = 0x1000;

/// Compares two display names in Ukrainian alphabetical order.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    left.chars()
        .map(primary_weight)
        .cmp(right.chars().map(primary_weight))
        .then_with(|| left.chars().map(accent_weight).cmp(right.chars().map(accent_weight)))
        .then_with(|| left.chars().map(case_weight).cmp(right.chars().map(case_weight)))
        .then_with(|| left.cmp(right))
}

fn fold(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Lowercase letter with its accent removed; unaccented letters map to themselves.
fn base_letter(folded: char) -> char {
    latin_base(folded)
        .or_else(|| cyrillic_base(folded))
        .unwrap_or(folded)
}

fn latin_base(folded: char) -> Option<char> {
    let base = match folded {
        'à'..='å' | 'æ' => 'a',
        'ç' => 'c',
        'ð' => 'd',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ß' => 's',
        'þ' => 't',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        '\u{100}'..='\u{17F}' => {
            let code = u32::from(folded);
            return LATIN_EXTENDED_A_RUNS
                .iter()
                .find(|(last, _)| code <= *last)
                .map(|(_, base)| *base);
        }
        _ => return None,
    };
    Some(base)
}

fn cyrillic_base(folded: char) -> Option<char> {
    match folded {
        'ё' => Some('е'),
        'ѓ' => Some('г'),
        'ќ' => Some('к'),
        'ў' => Some('у'),
        _ => None,
    }
}

fn alphabet_slot(letter: char) -> Option<u32> {
    UKRAINIAN_ALPHABET
        .iter()
        .position(|candidate| *candidate == letter)
        .map(|position| position as u32 * SLOT_WIDTH)
}

fn cyrillic_index(letter: char) -> u32 {
    let slot = match letter {
        'ъ' => alphabet_slot('ь').map(|soft_sign| soft_sign - 2),
        'ы' => alphabet_slot('ь').map(|soft_sign| soft_sign - 1),
        'э' => alphabet_slot('ь').map(|soft_sign| soft_sign + 1),
        other => alphabet_slot(other),
    };
    slot.unwrap_or(UNLISTED_OFFSET + u32::from(letter))
}

fn primary_weight(ch: char) -> u32 {
    let folded = fold(ch);
    let base = base_letter(folded);
    let (tier, index) = if folded.is_whitespace() {
        (TIER_WHITESPACE, u32::from(folded))
    } else if let Some(digit) = folded.to_digit(10) {
        (TIER_DIGIT, digit)
    } else if folded.is_numeric() {
        (TIER_DIGIT, UNLISTED_OFFSET + u32::from(folded))
    } else if is_cyrillic(base) {
        (TIER_CYRILLIC, cyrillic_index(base))
    } else if base.is_ascii_lowercase() {
        (TIER_LATIN, u32::from(base) - u32::from('a'))
    } else if folded.is_alphabetic() && u32::from(folded) < 0x0250 {
        (TIER_LATIN, UNLISTED_OFFSET + u32::from(folded))
    } else if folded.is_alphanumeric() {
        (TIER_OTHER, u32::from(folded))
    } else {
        (TIER_PUNCTUATION, u32::from(folded))
    };
    (tier << TIER_SHIFT) | index
}

/// 0 for a plain letter, the accented code point otherwise.
fn accent_weight(ch: char) -> u32 {
    let folded = fold(ch);
    if base_letter(folded) == folded {
        0
    } else {
        u32::from(folded)
    }
}

fn case_weight(ch: char) -> u8 {
    if ch.is_uppercase() {
        1
    } else {
        0
    }
}

fn is_cyrillic(ch: char) -> bool {
    matches!(u32::from(ch), 0x0400..=0x04FF | 0x0500..=0x052F)
}
