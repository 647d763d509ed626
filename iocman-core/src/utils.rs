//! Small parsers shared by configuration and generation code.

/// Canonical form of a configuration value.
///
/// Every line is trimmed and blank lines are dropped, so a multi-line
/// value becomes one directive per line.
///
/// ```
/// use iocman_core::normalize_value;
///
/// assert_eq!(normalize_value("  a\n\n   b  \n"), "a\nb");
/// ```
pub fn normalize_value(value: &str) -> String {
    split_lines(value).collect::<Vec<_>>().join("\n")
}

/// Iterate over the non-blank, trimmed lines of a multi-line value.
pub fn split_lines(value: &str) -> impl Iterator<Item = &str> {
    value.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Split a comma-separated list, trimming items and dropping empty ones.
pub fn split_list(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Join items into the comma-separated form stored in configuration.
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a `key=value` condition.
///
/// Returns `None` when there is no `=` or the key is empty. The value may
/// be empty.
pub fn parse_condition(condition: &str) -> Option<(&str, &str)> {
    let (key, value) = condition.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Convert a TOML value to its string representation.
///
/// Arrays become multi-line values, one element per line.
pub fn toml_value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(d) => d.to_string(),
        toml::Value::Array(items) => items
            .iter()
            .map(toml_value_to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        toml::Value::Table(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_value_idempotent() {
        let raw = "\n  dbLoadRecords(\"a\")  \n\n\tiocInit\n";
        let once = normalize_value(raw);
        assert_eq!(once, "dbLoadRecords(\"a\")\niocInit");
        assert_eq!(normalize_value(&once), once);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("autosave, caputlog"), vec!["autosave", "caputlog"]);
        assert_eq!(split_list(" a ,, b ,"), vec!["a", "b"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_join_list() {
        assert_eq!(join_list(&["a.db", "b.db"]), "a.db, b.db");
        assert_eq!(join_list::<&str>(&[]), "");
    }

    #[test]
    fn test_parse_condition() {
        assert_eq!(parse_condition(" P = X "), Some(("P", "X")));
        assert_eq!(parse_condition("PORT=L0=1"), Some(("PORT", "L0=1")));
        assert_eq!(parse_condition("EMPTY="), Some(("EMPTY", "")));
        assert_eq!(parse_condition("novalue"), None);
        assert_eq!(parse_condition("=X"), None);
        assert_eq!(parse_condition(""), None);
    }

    #[test]
    fn test_toml_value_to_string() {
        assert_eq!(
            toml_value_to_string(&toml::Value::String("hello".to_string())),
            "hello"
        );
        assert_eq!(toml_value_to_string(&toml::Value::Integer(42)), "42");
        assert_eq!(toml_value_to_string(&toml::Value::Boolean(true)), "true");
        assert_eq!(
            toml_value_to_string(&toml::Value::Array(vec![
                toml::Value::String("a.db, P=1".to_string()),
                toml::Value::String("b.db".to_string()),
            ])),
            "a.db, P=1\nb.db"
        );
    }
}
