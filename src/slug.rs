use std::collections::BTreeMap;

/// Derives the routing key for a company from its display name: lowercase,
/// then every run of characters outside `[a-z0-9]` becomes one `-`.
///
/// Leading and trailing separators are kept ("(Acme)" -> "-acme-") and no
/// collision check is made; see [`slug_collisions`].
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_separator = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_separator = false;
        } else if !in_separator {
            slug.push('-');
            in_separator = true;
        }
    }

    slug
}

/// Groups of distinct names that derive the same slug. Diagnostic only, slugs
/// themselves are never rewritten.
pub fn slug_collisions<'a, I>(names: I) -> Vec<(String, Vec<&'a str>)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut by_slug: BTreeMap<String, Vec<&'a str>> = BTreeMap::new();
    for name in names {
        let entry = by_slug.entry(slugify(name)).or_default();
        if !entry.contains(&name) {
            entry.push(name);
        }
    }

    by_slug.into_iter().filter(|(_, names)| names.len() > 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_names() {
        assert_eq!(slugify("SpaceX"), "spacex");
        assert_eq!(slugify("Tempus AI"), "tempus-ai");
        assert_eq!(slugify("Scale AI, Inc."), "scale-ai-inc-");
    }

    #[test]
    fn test_runs_collapse_to_one_separator() {
        assert_eq!(slugify("A  &  B"), "a-b");
        assert_eq!(slugify("x---y"), "x-y");
    }

    #[test]
    fn test_edges_are_not_trimmed() {
        assert_eq!(slugify("(Acme)"), "-acme-");
        assert_eq!(slugify(" leading"), "-leading");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_non_ascii_letters_become_separators() {
        assert_eq!(slugify("Café Zürich"), "caf-z-rich");
    }

    #[test]
    fn test_idempotent() {
        for name in ["OpenAI", "Scale AI, Inc.", "(Acme)", "Café Zürich", "x---y", "42 Labs"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once);
            assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }

    #[test]
    fn test_collisions_are_reported_not_resolved() {
        let names = ["Open AI", "Open-AI", "OpenAI", "Open AI"];
        assert_eq!(slugify("Open AI"), slugify("Open-AI"));

        let collisions = slug_collisions(names);
        assert_eq!(collisions, vec![("open-ai".to_string(), vec!["Open AI", "Open-AI"])]);
    }
}
