/// Splits raw input into email candidates.
///
/// Any run of commas and whitespace (newlines and byte order marks included)
/// separates tokens. Order is preserved, empty tokens are dropped, and
/// duplicates are kept.
pub fn parse_candidates(raw: &str) -> Vec<String> {
    raw.split(is_separator)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn is_separator(c: char) -> bool {
    c == ',' || c == '\u{feff}' || c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::parse_candidates;

    #[test]
    fn splits_on_commas_spaces_and_newlines() {
        assert_eq!(
            parse_candidates("a@x.com, b@x.com\nbad"),
            vec!["a@x.com", "b@x.com", "bad"]
        );
    }

    #[test]
    fn keeps_duplicates_and_order() {
        assert_eq!(
            parse_candidates("b@x.com a@x.com,b@x.com"),
            vec!["b@x.com", "a@x.com", "b@x.com"]
        );
    }

    #[test]
    fn separator_runs_and_edges_produce_no_empty_tokens() {
        let parsed = parse_candidates(",, \t\r\n a@x.com ,,\n\n b@x.com ,\t");
        assert_eq!(parsed, vec!["a@x.com", "b@x.com"]);
        assert!(parse_candidates(" ,\n, ").is_empty());
    }

    #[test]
    fn leading_byte_order_mark_is_a_separator() {
        assert_eq!(
            parse_candidates("\u{feff}a@x.com,\u{feff}b@x.com"),
            vec!["a@x.com", "b@x.com"]
        );
    }
}
