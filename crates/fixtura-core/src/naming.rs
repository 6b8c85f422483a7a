use std::fmt;

/// Separator used between namespace segments of a canonical class name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Separators accepted in model identifiers supplied by callers.
const INPUT_SEPARATORS: &[&str] = &["::", "\\", "/"];

/// Capitalize every word of `value` and drop `-`, `_` and whitespace separators.
///
/// `blog_post`, `blog-post` and `blog post` all become `BlogPost`; characters
/// after the first of each word keep their case, so `BlogPost` is unchanged.
pub fn studly(value: &str) -> String {
    value
        .split(|ch: char| ch == '_' || ch == '-' || ch.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Canonical model class name, optionally namespaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName {
    namespace: Option<String>,
    name: String,
}

impl ClassName {
    /// Parse a caller-supplied identifier such as `post`, `blog::post` or
    /// `App\Models\blog_post` into its canonical studly form.
    pub fn parse(identifier: &str) -> Option<Self> {
        let mut normalized = identifier.trim().to_string();
        for separator in INPUT_SEPARATORS {
            normalized = normalized.replace(separator, "\u{0}");
        }

        let mut segments: Vec<String> = normalized
            .split('\u{0}')
            .map(studly)
            .filter(|segment| !segment.is_empty())
            .collect();
        let name = segments.pop()?;
        let namespace = if segments.is_empty() {
            None
        } else {
            Some(segments.join(NAMESPACE_SEPARATOR))
        };

        Some(Self { namespace, name })
    }

    /// Class `name` (studlied) placed under an already canonical namespace.
    pub fn in_namespace(namespace: Option<&str>, name: &str) -> Self {
        Self {
            namespace: namespace
                .filter(|namespace| !namespace.is_empty())
                .map(str::to_string),
            name: studly(name),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn canonical(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}{NAMESPACE_SEPARATOR}{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Case-folded canonical name; `AUTHOR`, `author` and `Author` share one key.
    pub fn lookup_key(&self) -> String {
        self.canonical().to_lowercase()
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studly_joins_words() {
        assert_eq!(studly("blog_post"), "BlogPost");
        assert_eq!(studly("blog-post"), "BlogPost");
        assert_eq!(studly("post"), "Post");
        assert_eq!(studly("BlogPost"), "BlogPost");
        assert_eq!(studly("__"), "");
    }

    #[test]
    fn parses_bare_identifier() {
        let class = ClassName::parse("blog_post").expect("class name");
        assert_eq!(class.namespace(), None);
        assert_eq!(class.canonical(), "BlogPost");
    }

    #[test]
    fn lookup_key_ignores_case() {
        let upper = ClassName::parse("AUTHOR").expect("class name");
        let lower = ClassName::parse("author").expect("class name");
        assert_eq!(upper.canonical(), "AUTHOR");
        assert_eq!(upper.lookup_key(), lower.lookup_key());

        let namespaced = ClassName::parse("BLOG/blog_post").expect("class name");
        assert_eq!(namespaced.lookup_key(), "blog::blogpost");
    }

    #[test]
    fn parses_namespaced_identifiers() {
        let class = ClassName::parse("app\\models\\post").expect("class name");
        assert_eq!(class.namespace(), Some("App::Models"));
        assert_eq!(class.name(), "Post");

        let class = ClassName::parse("blog::author").expect("class name");
        assert_eq!(class.canonical(), "Blog::Author");
    }

    #[test]
    fn rejects_empty_identifier() {
        assert!(ClassName::parse("  ").is_none());
        assert!(ClassName::parse("::").is_none());
    }

    #[test]
    fn places_name_under_namespace() {
        let class = ClassName::in_namespace(Some("Blog"), "author");
        assert_eq!(class.canonical(), "Blog::Author");
        assert_eq!(ClassName::in_namespace(Some(""), "author").canonical(), "Author");
    }
}
