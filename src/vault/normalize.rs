/// Translate well-known ansible failure messages into short, readable ones.
///
/// Known failure messages, checked in order. The first contained substring wins.
/// Matching is case-sensitive. Add a row to translate another message.
pub const KNOWN_ERRORS: &[(&str, &str)] = &[
    (
        "The task includes an option with an undefined variable",
        "(undefined variable)",
    ),
    ("VARIABLE IS NOT DEFINED!", "(undefined variable)"),
];

/// Return the friendly replacement for a known failure, or `message` unchanged.
#[must_use]
pub fn normalize_message(message: &str) -> String {
    KNOWN_ERRORS
        .iter()
        .find(|(needle, _)| message.contains(needle))
        .map_or_else(|| message.to_owned(), |(_, friendly)| (*friendly).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_undefined_variable_task_error() {
        let msg = "The task includes an option with an undefined variable. The error was: \
                   'db_password' is undefined. 'db_password' is undefined";
        assert_eq!(normalize_message(msg), "(undefined variable)");
    }

    #[test]
    fn test_undefined_variable_debug_error() {
        let msg = r#"fatal: [localhost]: FAILED! => {"msg": "VARIABLE IS NOT DEFINED!"}"#;
        assert_eq!(normalize_message(msg), "(undefined variable)");
    }

    #[rstest]
    #[case("")]
    #[case("Some other random error")]
    #[case("hunter2")]
    #[case("the task includes an option with an undefined variable")]
    #[case("  padded value\t")]
    fn test_unknown_messages_pass_through(#[case] msg: &str) {
        assert_eq!(normalize_message(msg), msg);
    }

    #[test]
    fn test_first_match_wins() {
        let msg = "VARIABLE IS NOT DEFINED! The task includes an option with an undefined variable";
        assert_eq!(normalize_message(msg), KNOWN_ERRORS[0].1);
    }
}
