use std::collections::BTreeMap;

pub mod client;
pub mod nunny;

/// Per-field error map produced by the wizard validators. Validation is
/// synchronous, pure and idempotent: the same form always yields the same
/// map.
pub type FieldErrors = BTreeMap<String, String>;

pub(crate) fn is_email_shaped(value: &str) -> bool {
    // Mirrors the permissive registration check: something before the @,
    // something after it containing a dot, no whitespace anywhere.
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

pub(crate) fn is_kenyan_phone(value: &str) -> bool {
    let rest = if let Some(rest) = value.strip_prefix("+254") {
        rest
    } else if let Some(rest) = value.strip_prefix('0') {
        rest
    } else {
        return false;
    };
    let mut chars = rest.chars();
    matches!(chars.next(), Some('1') | Some('7')) && {
        let digits: Vec<char> = chars.collect();
        digits.len() == 8 && digits.iter().all(char::is_ascii_digit)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::application::wizard::{is_email_shaped, is_kenyan_phone};

    #[rstest]
    #[case("grace@example.com", true)]
    #[case("g@e.co", true)]
    #[case("no-at-sign.com", false)]
    #[case("trailing@nodot", false)]
    #[case("spaces in@example.com", false)]
    #[case("@example.com", false)]
    #[case("grace@", false)]
    fn test_email_shape(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_email_shaped(input), expected);
    }

    #[rstest]
    #[case("+254712345678", true)]
    #[case("0712345678", true)]
    #[case("0112345678", true)]
    #[case("+254812345678", false)]
    #[case("071234567", false)]
    #[case("07123456789", false)]
    #[case("71234567", false)]
    #[case("07123a5678", false)]
    fn test_kenyan_phone(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_kenyan_phone(input), expected);
    }
}
