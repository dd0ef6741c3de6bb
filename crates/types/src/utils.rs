//! Utility functions and helpers

use std::collections::HashSet;

/// Render names as a bracketed, comma-joined list without spaces or quotes
pub fn render_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("[{}]", joined)
}

/// Drop repeated names, keeping the first occurrence of each
pub fn unique_in_order<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_list() {
        assert_eq!(render_list(["dev", "test"]), "[dev,test]");
        let deps = vec!["dev".to_string()];
        assert_eq!(render_list(&deps), "[dev]");
        assert_eq!(render_list(Vec::<String>::new()), "[]");
    }

    #[test]
    fn test_unique_in_order() {
        let names = unique_in_order(["feature-2", "feature-1", "feature-2"]);
        assert_eq!(names, vec!["feature-2", "feature-1"]);
        assert!(unique_in_order(Vec::<&str>::new()).is_empty());
    }
}
