use strsim::levenshtein;

/// Rank `options` by Levenshtein distance from `input`, keeping only close
/// neighbors. Ties keep the options' original order.
pub(crate) fn suggestion_list(
    input: &str,
    options: impl IntoIterator<Item = String>,
) -> Vec<String> {
    let threshold = input.len() / 2 + 1;
    let mut ranked: Vec<(usize, String)> = options
        .into_iter()
        .filter_map(|option| {
            let distance = if option.eq_ignore_ascii_case(input) {
                // A case-only mismatch is the closest possible near-miss.
                1
            } else {
                levenshtein(input, &option)
            };
            (distance <= threshold).then_some((distance, option))
        })
        .collect();
    ranked.sort_by_key(|(distance, _)| *distance);
    ranked.into_iter().map(|(_, option)| option).collect()
}

const MAX_SUGGESTIONS: usize = 5;

/// Format a ` Did you mean ...?` suffix for an error message, or an empty
/// string when there is nothing to suggest. `label` qualifies the
/// suggestions (e.g. `"the enum value"`).
pub(crate) fn did_you_mean(label: Option<&str>, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }

    let quoted: Vec<String> = suggestions
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|suggestion| format!("\"{suggestion}\""))
        .collect();
    let listed = match quoted.as_slice() {
        [single] => single.clone(),
        [first, second] => format!("{first} or {second}"),
        many => {
            let (last, rest) = many.split_last().expect("at least three suggestions");
            format!("{}, or {last}", rest.join(", "))
        }
    };

    match label {
        Some(label) => format!(" Did you mean {label} {listed}?"),
        None => format!(" Did you mean {listed}?"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_distance() {
        let suggestions = suggestion_list(
            "nme",
            ["name", "age", "email"].map(String::from),
        );
        assert_eq!(suggestions, vec!["name".to_string(), "age".to_string()]);
    }

    #[test]
    fn case_swap_ranks_first() {
        let suggestions = suggestion_list(
            "NAME",
            ["named", "name"].map(String::from),
        );
        assert_eq!(suggestions[0], "name");
    }

    #[test]
    fn rejects_distant_options() {
        let suggestions = suggestion_list("id", ["somethingelse".to_string()]);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn formats_one_two_and_many() {
        assert_eq!(did_you_mean(None, &[]), "");
        assert_eq!(
            did_you_mean(None, &["a".to_string()]),
            " Did you mean \"a\"?",
        );
        assert_eq!(
            did_you_mean(None, &["a".to_string(), "b".to_string()]),
            " Did you mean \"a\" or \"b\"?",
        );
        assert_eq!(
            did_you_mean(
                None,
                &["a".to_string(), "b".to_string(), "c".to_string()],
            ),
            " Did you mean \"a\", \"b\", or \"c\"?",
        );
        assert_eq!(
            did_you_mean(Some("the enum value"), &["RED".to_string()]),
            " Did you mean the enum value \"RED\"?",
        );
    }
}
