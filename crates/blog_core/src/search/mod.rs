//! Article search.
//!
//! # Responsibility
//! - Resolve substring queries over title, content and author.
//! - Keep match semantics independent of the index used to find candidates.

pub mod fts;

use crate::model::article::Article;

/// Case folding shared by the match rule and the `*_folded` index columns.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Returns whether `article` matches `query` as a case-insensitive substring
/// of its title, content or author.
///
/// The query is matched literally; an empty query matches every article.
pub fn matches_query(article: &Article, query: &str) -> bool {
    let needle = fold_case(query);
    [&article.title, &article.content, &article.author]
        .iter()
        .any(|field| fold_case(field).contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::{fold_case, matches_query};
    use crate::model::article::Article;

    #[test]
    fn matching_ignores_case_and_checks_every_field() {
        let article = Article::new("Hello World", "This is a test content.", "Author Name");
        assert!(matches_query(&article, "auth"));
        assert!(matches_query(&article, "WORLD"));
        assert!(matches_query(&article, "test con"));
        assert!(!matches_query(&article, "zzz-no-match"));
    }

    #[test]
    fn empty_query_matches_everything() {
        let article = Article::new("Hello World", "This is a test content.", "Alice");
        assert!(matches_query(&article, ""));
    }

    #[test]
    fn folding_follows_unicode_lowercase_mapping() {
        assert_eq!(fold_case("\u{130}stanbul"), "i\u{307}stanbul");
        let article = Article::new(
            "Travel notes",
            "A long walk by the water.",
            "\u{130}stanbul Writer",
        );
        assert!(matches_query(&article, "i\u{307}stanbul"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let article = Article::new("C++ tips", "Use .* carefully in patterns", "Bob");
        assert!(matches_query(&article, "c++"));
        assert!(matches_query(&article, ".*"));
        assert!(!matches_query(&article, "c.+tips"));
    }
}
