//! FTS5 trigram-backed candidate lookup for article search.
//!
//! # Responsibility
//! - Use the `articles_fts` trigram index to narrow candidates for
//!   queries long enough to form a trigram.
//! - Fall back to a full scan for shorter queries.
//! - The index covers the `*_folded` columns, so the query is folded with
//!   [`fold_case`] before it reaches `MATCH`.
//!
//! # Invariants
//! - Every returned article satisfies [`matches_query`].
//! - Result ordering is `created_at DESC, seq DESC`, same as listing.

use super::{fold_case, matches_query};
use crate::model::article::Article;
use crate::repo::article_repo::{
    parse_article_row, RepoResult, ARTICLE_ORDER_SQL, ARTICLE_SELECT_SQL,
};
use log::debug;
use rusqlite::Connection;

/// Trigram index cannot answer queries shorter than this many characters.
const TRIGRAM_MIN_CHARS: usize = 3;

/// Returns articles matching `query`, newest first.
pub fn search_articles(conn: &Connection, query: &str) -> RepoResult<Vec<Article>> {
    let folded = fold_case(query);
    let query_chars = folded.chars().count();
    let indexed = query_chars >= TRIGRAM_MIN_CHARS;
    debug!(
        "event=article_search module=search indexed={} query_chars={}",
        indexed, query_chars
    );

    let candidates = if indexed {
        indexed_candidates(conn, &folded)?
    } else {
        scan_candidates(conn)?
    };

    Ok(candidates
        .into_iter()
        .filter(|article| matches_query(article, query))
        .collect())
}

fn indexed_candidates(conn: &Connection, folded_query: &str) -> RepoResult<Vec<Article>> {
    let mut stmt = conn.prepare(&format!(
        "{ARTICLE_SELECT_SQL}
         JOIN articles_fts ON articles_fts.rowid = articles.seq
         WHERE articles_fts MATCH ?1
         {ARTICLE_ORDER_SQL};"
    ))?;
    let mut rows = stmt.query([phrase_expression(folded_query)])?;
    let mut articles = Vec::new();

    while let Some(row) = rows.next()? {
        articles.push(parse_article_row(row)?);
    }

    Ok(articles)
}

fn scan_candidates(conn: &Connection) -> RepoResult<Vec<Article>> {
    let mut stmt = conn.prepare(&format!("{ARTICLE_SELECT_SQL} {ARTICLE_ORDER_SQL};"))?;
    let mut rows = stmt.query([])?;
    let mut articles = Vec::new();

    while let Some(row) = rows.next()? {
        articles.push(parse_article_row(row)?);
    }

    Ok(articles)
}

/// Quotes raw text as a single FTS5 phrase so no character is read as syntax.
fn phrase_expression(raw: &str) -> String {
    let escaped = raw.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::phrase_expression;

    #[test]
    fn phrase_expression_escapes_quotes() {
        assert_eq!(phrase_expression("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(phrase_expression("a OR b"), "\"a OR b\"");
    }
}
