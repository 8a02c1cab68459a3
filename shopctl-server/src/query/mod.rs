//! Parameterized SQL accumulator
//!
//! Values never reach the SQL text. Binding a value appends it to the
//! argument list and writes its `$N` token in the same step, so argument
//! N is always placeholder N. Only `&'static str` fragments can be written
//! as text.

pub mod products;

use std::fmt;

pub use products::compose_products_query;

/// A value bound to a positional placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    Text(String),
    Int(i64),
}

impl From<&str> for SqlArg {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<i64> for SqlArg {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl fmt::Display for SqlArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => write!(f, "{:?}", v),
            Self::Int(v) => write!(f, "{}", v),
        }
    }
}

/// Incremental query under construction.
///
/// One builder per query; it is never shared between calls.
#[derive(Debug)]
pub struct QueryBuilder {
    base: &'static str,
    clauses: Vec<String>,
    args: Vec<SqlArg>,
    next_index: usize,
}

impl QueryBuilder {
    pub fn new(base: &'static str) -> Self {
        Self {
            base,
            clauses: Vec::new(),
            args: Vec::new(),
            next_index: 1,
        }
    }

    /// Append `value` and return the placeholder token that refers to it.
    fn bind(&mut self, value: SqlArg) -> String {
        let token = format!("${}", self.next_index);
        self.args.push(value);
        self.next_index += 1;
        token
    }

    /// Append `AND <template> $N`, e.g. `and_where("p.price >=", 10)`.
    pub fn and_where(&mut self, template: &'static str, value: impl Into<SqlArg>) -> &mut Self {
        let token = self.bind(value.into());
        self.clauses.push(format!("AND {} {}", template, token));
        self
    }

    /// Append a fixed fragment with no bound values (ORDER BY, GROUP BY...).
    pub fn push_fixed(&mut self, fragment: &'static str) -> &mut Self {
        self.clauses.push(fragment.to_owned());
        self
    }

    /// Append `LIMIT $N OFFSET $N+1`.
    pub fn limit_offset(&mut self, limit: i64, offset: i64) -> &mut Self {
        let limit = self.bind(SqlArg::Int(limit));
        let offset = self.bind(SqlArg::Int(offset));
        self.clauses.push(format!("LIMIT {} OFFSET {}", limit, offset));
        self
    }

    pub fn build(self) -> BuiltQuery {
        let mut sql = self.base.trim().to_owned();
        for clause in &self.clauses {
            sql.push(' ');
            sql.push_str(clause);
        }

        BuiltQuery {
            sql,
            args: self.args,
        }
    }
}

/// Finished query text with its ordered arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    sql: String,
    args: Vec<SqlArg>,
}

impl BuiltQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Arguments in placeholder order: `args()[0]` binds `$1`.
    pub fn args(&self) -> &[SqlArg] {
        &self.args
    }
}

impl fmt::Display for BuiltQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.sql)?;
        for (i, arg) in self.args.iter().enumerate() {
            writeln!(f, "  ${} = {}", i + 1, arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_placeholders_in_bind_order() {
        let mut qb = QueryBuilder::new("SELECT * FROM t WHERE 1=1");
        qb.and_where("a =", "x").and_where("b >=", 3i64);
        qb.push_fixed("ORDER BY id ASC");
        qb.limit_offset(10, 20);
        let q = qb.build();

        assert_eq!(
            q.sql(),
            "SELECT * FROM t WHERE 1=1 AND a = $1 AND b >= $2 ORDER BY id ASC LIMIT $3 OFFSET $4"
        );
        assert_eq!(
            q.args(),
            &[
                SqlArg::Text("x".into()),
                SqlArg::Int(3),
                SqlArg::Int(10),
                SqlArg::Int(20)
            ]
        );
    }

    #[test]
    fn fixed_fragments_bind_nothing() {
        let mut qb = QueryBuilder::new("SELECT 1");
        qb.push_fixed("ORDER BY 1");
        let q = qb.build();
        assert!(q.args().is_empty());
        assert_eq!(q.sql(), "SELECT 1 ORDER BY 1");
    }

    #[test]
    fn base_whitespace_is_trimmed() {
        let mut qb = QueryBuilder::new("\n  SELECT 1\n  ");
        qb.limit_offset(1, 0);
        assert_eq!(qb.build().sql(), "SELECT 1 LIMIT $1 OFFSET $2");
    }

    #[test]
    fn display_lists_numbered_args() {
        let mut qb = QueryBuilder::new("SELECT 1");
        qb.and_where("name =", "it's");
        let text = qb.build().to_string();
        assert!(text.contains("$1 = \"it's\""));
    }
}
