//! Identifier helpers for generated Go source.

const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Inserts underscores at upper-case or digit word boundaries and lower-cases
/// the result: `HTTPServer` becomes `http_server`, `Store2Go` becomes
/// `store_2_go`.
pub fn to_snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && (c.is_uppercase() || c.is_numeric()) {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_is_lower = chars[i - 1].is_lowercase();
            if next_is_lower || prev_is_lower {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// Whether `name` can be used as a Go identifier (import alias, field name).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
        && !GO_KEYWORDS.contains(&name)
}
