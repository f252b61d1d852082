//! Condition combinators and a small SELECT builder.
//!
//! Conditions render to SQL with `?` placeholders and collect their bind
//! values in order, so a built [`Statement`] can be executed directly by
//! [`Db`](crate::Db).

use crate::Value;

/// Lists longer than this are bound as one JSON array instead of one
/// placeholder per value, keeping clear of SQLite's bind-variable limit.
pub const INLINE_LIST_LIMIT: usize = 256;

/// A boolean test over the rows of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column = value`
    Eq(&'static str, Value),
    /// `column >= value`
    Ge(&'static str, Value),
    /// `column <= value`
    Le(&'static str, Value),
    /// Case-insensitive substring match with Unicode case folding.
    ///
    /// Renders as `column REGEXP ?`, which needs a connection opened by
    /// [`Db::connect`](crate::Db::connect).
    ContainsCi(&'static str, String),
    /// `column IN (values...)`. An empty list matches nothing. Long lists of
    /// integers or text are bound as a single JSON array.
    InList(&'static str, Vec<Value>),
    /// `column IS NULL`
    IsNull(&'static str),
    /// Disjunction. An empty list matches nothing.
    Any(Vec<Condition>),
    /// Conjunction. An empty list matches everything.
    All(Vec<Condition>),
    /// Matches no row.
    Never,
}

impl Condition {
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Condition::Eq(column, value.into())
    }

    pub fn ge(column: &'static str, value: impl Into<Value>) -> Self {
        Condition::Ge(column, value.into())
    }

    pub fn le(column: &'static str, value: impl Into<Value>) -> Self {
        Condition::Le(column, value.into())
    }

    pub fn contains_ci(column: &'static str, needle: impl Into<String>) -> Self {
        Condition::ContainsCi(column, needle.into())
    }

    pub fn in_list<I, V>(column: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Condition::InList(column, values.into_iter().map(Into::into).collect())
    }

    pub fn is_null(column: &'static str) -> Self {
        Condition::IsNull(column)
    }

    pub fn any(conditions: Vec<Condition>) -> Self {
        Condition::Any(conditions)
    }

    pub fn all(conditions: Vec<Condition>) -> Self {
        Condition::All(conditions)
    }

    pub fn never() -> Self {
        Condition::Never
    }

    /// Whether this condition can be shown to match no row without running it.
    pub fn is_unsatisfiable(&self) -> bool {
        match self {
            Condition::Never => true,
            Condition::InList(_, values) => values.is_empty(),
            Condition::Any(conditions) => conditions.iter().all(Condition::is_unsatisfiable),
            Condition::All(conditions) => conditions.iter().any(Condition::is_unsatisfiable),
            _ => false,
        }
    }

    /// Append this condition's SQL to `sql` and its bind values to `params`.
    pub fn render(&self, sql: &mut String, params: &mut Vec<Value>) {
        match self {
            Condition::Eq(column, value) => {
                sql.push_str(&format!("{} = ?", column));
                params.push(value.clone());
            }
            Condition::Ge(column, value) => {
                sql.push_str(&format!("{} >= ?", column));
                params.push(value.clone());
            }
            Condition::Le(column, value) => {
                sql.push_str(&format!("{} <= ?", column));
                params.push(value.clone());
            }
            Condition::ContainsCi(column, needle) => {
                sql.push_str(&format!("{} REGEXP ?", column));
                params.push(Value::Text(contains_pattern(needle)));
            }
            Condition::InList(_, values) if values.is_empty() => sql.push_str("0 = 1"),
            Condition::InList(column, values) if values.len() > INLINE_LIST_LIMIT => {
                match json_array(values) {
                    Some(array) => {
                        sql.push_str(&format!("{} IN (SELECT value FROM json_each(?))", column));
                        params.push(Value::Text(array));
                    }
                    None => render_placeholders(column, values, sql, params),
                }
            }
            Condition::InList(column, values) => {
                render_placeholders(column, values, sql, params)
            }
            Condition::IsNull(column) => sql.push_str(&format!("{} IS NULL", column)),
            Condition::Any(conditions) if conditions.is_empty() => sql.push_str("0 = 1"),
            Condition::Any(conditions) => render_joined(conditions, " OR ", sql, params),
            Condition::All(conditions) if conditions.is_empty() => sql.push_str("1 = 1"),
            Condition::All(conditions) => render_joined(conditions, " AND ", sql, params),
            Condition::Never => sql.push_str("0 = 1"),
        }
    }

    /// Render to a standalone SQL fragment.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut sql = String::new();
        let mut params = Vec::new();
        self.render(&mut sql, &mut params);
        (sql, params)
    }
}

fn render_joined(conditions: &[Condition], separator: &str, sql: &mut String, params: &mut Vec<Value>) {
    sql.push('(');
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            sql.push_str(separator);
        }
        condition.render(sql, params);
    }
    sql.push(')');
}

fn render_placeholders(column: &str, values: &[Value], sql: &mut String, params: &mut Vec<Value>) {
    let placeholders = values.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
    sql.push_str(&format!("{} IN ({})", column, placeholders));
    params.extend(values.iter().cloned());
}

/// JSON array text for `json_each`, if every value is an integer or text.
fn json_array(values: &[Value]) -> Option<String> {
    let items = values
        .iter()
        .map(|value| match value {
            Value::Integer(i) => Some(serde_json::Value::from(*i)),
            Value::Text(s) => Some(serde_json::Value::from(s.as_str())),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(serde_json::Value::Array(items).to_string())
}

/// Case-insensitive regex matching `needle` literally anywhere in the text.
fn contains_pattern(needle: &str) -> String {
    format!("(?i){}", regex::escape(needle))
}

/// SQL text plus its positional bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Combine statements with `INTERSECT`, keeping only rows every one returns.
    ///
    /// Returns `None` for an empty list.
    pub fn intersect(statements: Vec<Statement>) -> Option<Statement> {
        let mut iter = statements.into_iter();
        let mut combined = iter.next()?;
        for next in iter {
            combined.sql = format!("{} INTERSECT {}", combined.sql, next.sql);
            combined.params.extend(next.params);
        }
        Some(combined)
    }
}

/// SELECT statement builder.
///
/// # Example
///
/// ```rust
/// use turbo_db::{Condition, Select};
///
/// let stmt = Select::from("products p")
///     .column("p.id")
///     .filter(Condition::eq("p.availability", true))
///     .order_by("p.id ASC")
///     .limit(10)
///     .build();
/// assert_eq!(
///     stmt.sql,
///     "SELECT p.id FROM products p WHERE p.availability = ? ORDER BY p.id ASC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Select {
    distinct: bool,
    columns: Vec<String>,
    from: String,
    joins: Vec<String>,
    filters: Vec<Condition>,
    group_by: Vec<String>,
    order_by: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Select {
    /// Start a SELECT over a table expression (e.g. `"products p"`).
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            from: table.into(),
            ..Default::default()
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn column(mut self, expr: impl Into<String>) -> Self {
        self.columns.push(expr.into());
        self
    }

    pub fn columns(mut self, exprs: &[&str]) -> Self {
        self.columns.extend(exprs.iter().map(|c| c.to_string()));
        self
    }

    /// Add a full join clause, e.g. `"LEFT JOIN brands b ON b.id = p.brand_id"`.
    pub fn join(mut self, clause: impl Into<String>) -> Self {
        self.joins.push(clause.into());
        self
    }

    /// Add a condition. Multiple filters are combined with AND.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filters.push(condition);
        self
    }

    pub fn group_by(mut self, expr: impl Into<String>) -> Self {
        self.group_by.push(expr.into());
        self
    }

    pub fn order_by(mut self, expr: impl Into<String>) -> Self {
        self.order_by.push(expr.into());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Render the statement.
    pub fn build(&self) -> Statement {
        let mut sql = String::from("SELECT ");
        let mut params = Vec::new();

        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
        }
        sql.push_str(" FROM ");
        sql.push_str(&self.from);

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        if !self.filters.is_empty() {
            sql.push_str(" WHERE ");
            for (i, condition) in self.filters.iter().enumerate() {
                if i > 0 {
                    sql.push_str(" AND ");
                }
                condition.render(&mut sql, &mut params);
            }
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        // SQLite only accepts OFFSET after LIMIT; -1 means no limit.
        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset)),
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {}", limit)),
            (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {}", offset)),
            (None, None) => {}
        }

        Statement { sql, params }
    }
}
