//! Operator filter for the paginated listing
//!
//! The listing and its total count must always agree on the predicate, so
//! both statements of a variant are fixed strings that share the same
//! WHERE clause. The variant is selected by whether a search term is
//! present; predicate fragments are never concatenated at runtime.

const LIST_ALL: &str = r#"
    SELECT cnpj, razao_social, registro_ans, modalidade, uf
    FROM operadoras
    ORDER BY razao_social, rowid
    LIMIT ?1 OFFSET ?2
"#;

const COUNT_ALL: &str = "SELECT COUNT(*) FROM operadoras";

const LIST_FILTERED: &str = r#"
    SELECT cnpj, razao_social, registro_ans, modalidade, uf
    FROM operadoras
    WHERE razao_social LIKE ?1 ESCAPE '\' OR cnpj LIKE ?1 ESCAPE '\'
    ORDER BY razao_social, rowid
    LIMIT ?2 OFFSET ?3
"#;

const COUNT_FILTERED: &str = r#"
    SELECT COUNT(*)
    FROM operadoras
    WHERE razao_social LIKE ?1 ESCAPE '\' OR cnpj LIKE ?1 ESCAPE '\'
"#;

/// Builder for the operator listing filter
///
/// The lifetime `'query` is how long the borrowed search text must live.
#[derive(Debug, Default)]
pub struct OperatorFilter<'query> {
    pub search: Option<&'query str>,
}

/// Statements and bound pattern for one listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorQuery {
    /// Page query; binds `[pattern,] limit, offset`
    pub list_sql: &'static str,
    /// Total query; binds `[pattern]`
    pub count_sql: &'static str,
    /// `LIKE` pattern for the filtered variant, `None` when unfiltered
    pub pattern: Option<String>,
}

impl<'query> OperatorFilter<'query> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search text (matched against legal name and tax id)
    pub fn search(mut self, query: Option<&'query str>) -> Self {
        self.search = query;
        self
    }

    pub fn build(self) -> OperatorQuery {
        match self.search.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => OperatorQuery {
                list_sql: LIST_FILTERED,
                count_sql: COUNT_FILTERED,
                pattern: Some(format!("%{}%", escape_like(q))),
            },
            None => OperatorQuery {
                list_sql: LIST_ALL,
                count_sql: COUNT_ALL,
                pattern: None,
            },
        }
    }
}

/// Escape `LIKE` wildcards so the search text matches literally
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
