/// Choice offered to users whose author is not in the known-author list.
pub const NO_AUTHOR: &str = "None of the above";

/// Sentinel for an author that is absent or could not be cleaned reliably.
pub const UNKNOWN_AUTHOR: &str = "NA";

const MIN_NAME_LENGTH: usize = 5;

/// Cleans raw author strings into the canonical names the author encoder
/// was fitted on.
///
/// Upstream author fields are noisy (multi-author lists, credentials, stray
/// tokens). Anything that does not look like a single clean name collapses
/// to [`UNKNOWN_AUTHOR`].
///
/// ```
/// use newscat::AuthorNormalizer;
///
/// let normalizer = AuthorNormalizer::new();
/// assert_eq!(normalizer.normalize("By JOHN SMITH, Reuters"), "John Smith");
/// assert_eq!(normalizer.normalize("None of the above"), "NA");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorNormalizer;

impl AuthorNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Returns the cleaned name, or `"NA"`.
    pub fn normalize(&self, raw: &str) -> String {
        if raw == NO_AUTHOR {
            return UNKNOWN_AUTHOR.to_string();
        }

        let lowered = raw.to_lowercase();
        // `split` always yields at least one piece
        let first = lowered.split(',').next().unwrap_or_default();
        let first = first.split("and").next().unwrap_or_default();

        let stripped = first
            .replace('_', " ")
            .replace(|c: char| c == '"' || c == '\'', "")
            .replace('-', " ")
            .replace('.', " ")
            .replace("by ", "");

        let capitalized = stripped
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");
        let name = remove_parenthesized(&capitalized).trim().to_string();

        if is_reliable(&name) {
            name
        } else {
            UNKNOWN_AUTHOR.to_string()
        }
    }
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Removes everything from the first `(` through the last `)` after it.
fn remove_parenthesized(name: &str) -> String {
    let Some(open) = name.find('(') else {
        return name.to_string();
    };
    match name.rfind(')') {
        Some(close) if close > open => format!("{}{}", &name[..open], &name[close + 1..]),
        _ => name.to_string(),
    }
}

fn is_reliable(name: &str) -> bool {
    name.chars().count() >= MIN_NAME_LENGTH
        && !name.chars().any(|c| c.is_ascii_digit() || c == '#')
        && name.chars().any(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(raw: &str) -> String {
        AuthorNormalizer::new().normalize(raw)
    }

    #[test]
    fn test_sentinel_choice() {
        assert_eq!(clean(NO_AUTHOR), UNKNOWN_AUTHOR);
        // only the exact choice is special-cased
        assert_eq!(clean("none of the above"), "None Of The Above");
    }

    #[test]
    fn test_simple_names() {
        assert_eq!(clean("John Smith"), "John Smith");
        assert_eq!(clean("ed mazza"), "Ed Mazza");
        assert_eq!(clean("MARY o'BRIEN"), "Mary Obrien");
    }

    #[test]
    fn test_multi_author_lists_keep_first() {
        assert_eq!(clean("Ron Dicker, Contributor"), "Ron Dicker");
        assert_eq!(clean("Lee Moran and Ed Mazza"), "Lee Moran");
    }

    #[test]
    fn test_and_is_a_literal_substring() {
        // "andrew" starts with "and", leaving nothing
        assert_eq!(clean("Andrew Smith"), UNKNOWN_AUTHOR);
        assert_eq!(clean("Sandra Bullock"), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_punctuation_and_prefix() {
        assert_eq!(clean("by Jane_Doe-Roe"), "Jane Doe Roe");
        assert_eq!(clean("J.K. Rowling"), "J K Rowling");
        assert_eq!(clean("\"Paul Blart\""), "Paul Blart");
    }

    #[test]
    fn test_parenthesized_removed() {
        assert_eq!(clean("Jane Doe (Reporter)"), "Jane Doe");
        assert_eq!(clean("Janet (a) Doe (b)"), "Janet");
        assert_eq!(clean("Jane Doe (unclosed"), "Jane Doe (unclosed");
    }

    #[test]
    fn test_unreliable_names_collapse() {
        assert_eq!(clean("Xx99!!"), UNKNOWN_AUTHOR);
        assert_eq!(clean("Ap"), UNKNOWN_AUTHOR);
        assert_eq!(clean("#hashtag news"), UNKNOWN_AUTHOR);
        assert_eq!(clean("Staff 2"), UNKNOWN_AUTHOR);
        assert_eq!(clean(""), UNKNOWN_AUTHOR);
        assert_eq!(clean("..."), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_reliable_results_hold_invariants() {
        let inputs = [
            "John Smith",
            "Ron Dicker, Contributor",
            "by Jane_Doe-Roe",
            "Jane Doe (Reporter)",
            "Dr. Who",
            "X Y Z",
            "QWERTY",
        ];
        for input in inputs {
            let name = clean(input);
            if name == UNKNOWN_AUTHOR {
                continue;
            }
            assert!(name.chars().count() > 4, "{:?} -> {:?}", input, name);
            assert!(!name.chars().any(|c| c.is_ascii_digit() || c == '#'));
            assert!(name.chars().any(|c| c.is_ascii_lowercase()));
        }
    }
}
