//! Soundex encoding for the phonetic match tier.
//!
//! Classic four-character Soundex: first letter kept, remaining consonants
//! mapped to digit classes, consecutive duplicates collapsed, vowels and
//! h/w/y ignored, zero-padded. "Smith" and "Smyth" encode identically.

/// Digit class for a consonant, or `None` for vowels and h/w/y.
fn digit_for(c: char) -> Option<char> {
    match c {
        'b' | 'f' | 'p' | 'v' => Some('1'),
        'c' | 'g' | 'j' | 'k' | 'q' | 's' | 'x' | 'z' => Some('2'),
        'd' | 't' => Some('3'),
        'l' => Some('4'),
        'm' | 'n' => Some('5'),
        'r' => Some('6'),
        _ => None,
    }
}

/// Encode a single name token. Empty input encodes as `"0000"`.
pub fn soundex(token: &str) -> String {
    let lower = token.to_lowercase();
    let mut chars = lower.chars().filter(|c| c.is_ascii_alphabetic());

    let first = match chars.next() {
        Some(c) => c,
        None => return "0000".to_string(),
    };

    let mut code = String::with_capacity(4);
    code.push(first.to_ascii_uppercase());

    let mut prev = digit_for(first);
    for c in chars {
        let digit = digit_for(c);
        if let Some(d) = digit {
            if prev != Some(d) {
                code.push(d);
                if code.len() == 4 {
                    break;
                }
            }
        }
        prev = digit;
    }

    while code.len() < 4 {
        code.push('0');
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(soundex("Robert"), "R163");
        assert_eq!(soundex("Rupert"), "R163");
        assert_eq!(soundex("Tymczak"), "T522");
        assert_eq!(soundex("Pfister"), "P236");
    }

    #[test]
    fn test_spelling_variants_collide() {
        assert_eq!(soundex("Smith"), soundex("Smyth"));
        assert_eq!(soundex("Johnson"), soundex("Jonson"));
    }

    #[test]
    fn test_short_names_zero_padded() {
        assert_eq!(soundex("Lee"), "L000");
        assert_eq!(soundex("Wu"), "W000");
    }

    #[test]
    fn test_empty_and_nonalpha() {
        assert_eq!(soundex(""), "0000");
        assert_eq!(soundex("123"), "0000");
    }
}
