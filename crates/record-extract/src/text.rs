//! Cleanup applied to every extracted string.

/// Collapses whitespace and drops a leading label such as `Born:` or
/// `Death Place:`. Blank results are `None`.
pub fn clean(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let value = match collapsed.split_once(':') {
        Some((label, rest)) if is_label(label) && (rest.is_empty() || rest.starts_with(' ')) => {
            rest.trim().to_string()
        }
        _ => collapsed,
    };
    (!value.is_empty()).then_some(value)
}

/// Field captions source pages render in front of a value
const LABELS: &[&str] = &[
    "born",
    "birth",
    "birth date",
    "birth place",
    "birthplace",
    "date of birth",
    "place of birth",
    "died",
    "death",
    "death date",
    "death place",
    "date of death",
    "place of death",
    "sex",
    "gender",
];

fn is_label(prefix: &str) -> bool {
    let prefix = prefix.trim();
    LABELS.iter().any(|label| prefix.eq_ignore_ascii_case(label))
}
