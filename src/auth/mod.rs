pub mod middleware;
pub mod password;
pub mod provider;
pub mod session;

/// A login identifier. Email and phone key the same credential check but
/// resolve through different account lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Email(String),
    Phone(String),
}

impl Identifier {
    /// Classifies a raw identifier. Anything with an `@` is treated as an
    /// email; everything else must normalize as a phone number.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.contains('@') {
            Some(Identifier::Email(raw.to_ascii_lowercase()))
        } else {
            normalize_phone(raw).map(Identifier::Phone)
        }
    }
}

/// Normalizes a phone number to `+` followed by 8-15 digits (spaces,
/// dashes, dots, and parentheses stripped). Returns `None` for anything
/// that does not fit that shape.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let digits: String = rest
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !(8..=15).contains(&digits.len()) {
        return None;
    }

    Some(format!("+{digits}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_normalization() {
        assert_eq!(
            normalize_phone("+55 (11) 91234-5678"),
            Some("+5511912345678".to_string())
        );
        assert_eq!(normalize_phone("11912345678"), Some("+11912345678".to_string()));
        assert_eq!(normalize_phone("123"), None);
        assert_eq!(normalize_phone("not-a-phone"), None);
        assert_eq!(normalize_phone(""), None);
    }

    #[test]
    fn identifier_classification() {
        assert_eq!(
            Identifier::parse("Alice@Example.com"),
            Some(Identifier::Email("alice@example.com".to_string()))
        );
        assert_eq!(
            Identifier::parse("+55 11 91234 5678"),
            Some(Identifier::Phone("+5511912345678".to_string()))
        );
        assert_eq!(Identifier::parse("abc"), None);
        assert_eq!(Identifier::parse(""), None);
    }
}
