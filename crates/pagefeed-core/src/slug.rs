//! URL slug derivation from titles.

/// Characters removed from slugs.
const STRIPPED: &[char] = &[
    ':', ';', ',', '.', '!', '?', '(', ')', '[', ']', '{', '}', '=', '+', '*', '/', '\\', '|', '<',
    '>',
];

/// Derive a URL slug from a title.
///
/// Lowercases, turns spaces into `-`, transliterates German umlauts and
/// `ß`, and strips punctuation. Other characters pass through unchanged.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for c in title.chars().flat_map(char::to_lowercase) {
        match c {
            ' ' => slug.push('-'),
            'ä' => slug.push_str("ae"),
            'ö' => slug.push_str("oe"),
            'ü' => slug.push_str("ue"),
            'ß' => slug.push_str("ss"),
            c if STRIPPED.contains(&c) => {}
            c => slug.push(c),
        }
    }

    slug
}
