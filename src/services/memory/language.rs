//! Language Classification
//!
//! A lightweight heuristic classifier used to tag each memory with a
//! language code at creation time. It distinguishes Vietnamese from
//! English by counting common Vietnamese marker words and checking for
//! Vietnamese-specific letters. Not a general language model.

/// Common Vietnamese words and phrases used as classification markers.
const VIETNAMESE_MARKERS: &[&str] = &[
    "xin chào",
    "chào",
    "tôi",
    "bạn",
    "của",
    "và",
    "là",
    "có",
    "không",
    "được",
    "này",
    "đó",
    "một",
    "ngày",
    "tháng",
    "năm",
    "giờ",
    "phút",
    "hôm nay",
    "ngày mai",
    "hôm qua",
    "cảm ơn",
    "xin lỗi",
    "tạm biệt",
    "thích",
];

/// Base letters that occur in Vietnamese orthography but not in English.
const VIETNAMESE_LETTERS: &[char] = &['đ', 'ơ', 'ư', 'ă', 'â', 'ê', 'ô'];

/// Accented vowels outside the Latin Extended Additional block that
/// Vietnamese uses and English does not.
const VIETNAMESE_ACCENTED_VOWELS: &[char] = &[
    'à', 'á', 'ã', 'è', 'é', 'ì', 'í', 'ĩ', 'ò', 'ó', 'õ', 'ù', 'ú', 'ũ', 'ý',
];

/// Whether a (lowercased) character is specific to Vietnamese orthography.
///
/// Vietnamese tone marks produce precomposed codepoints (ở, ầ, ọ, …)
/// that are distinct from their base letters; the bulk of them live in
/// the Latin Extended Additional block, U+1EA0..=U+1EF9.
fn is_vietnamese_letter(c: char) -> bool {
    VIETNAMESE_LETTERS.contains(&c)
        || VIETNAMESE_ACCENTED_VOWELS.contains(&c)
        || ('\u{1ea0}'..='\u{1ef9}').contains(&c)
}

/// Classify the language of a piece of text.
///
/// Returns `"vi"` when more than one Vietnamese marker word appears, or
/// when the text contains a Vietnamese-specific letter; `"en"` otherwise.
pub fn detect(text: &str) -> &'static str {
    let lower = text.to_lowercase();

    if lower.chars().any(is_vietnamese_letter) {
        return "vi";
    }

    let marker_count = VIETNAMESE_MARKERS
        .iter()
        .filter(|marker| lower.contains(*marker))
        .count();

    if marker_count > 1 {
        "vi"
    } else {
        "en"
    }
}
