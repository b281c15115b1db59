//! Statement builder.
//!
//! A [`Builder`] accumulates rendered clause terms in call order and joins
//! them with single spaces. Clause methods (`select_clause`, `where_clause`,
//! ...) append one clause each; statement methods (`select`, `update`,
//! `delete`, `insert`, `union`) compose them.
//!
//! ```
//! use shorthand::{mapping, Builder, Dialect};
//!
//! let mut builder = Builder::new(Dialect::Generic);
//! builder
//!     .select("account", "user_name", Some(mapping! { "user_id[>]" => 200 }))
//!     .unwrap();
//! assert_eq!(
//!     builder.sql(),
//!     r#"SELECT "user_name" FROM "account" WHERE "user_id" > 200"#
//! );
//! ```
//!
//! Conditions are parsed as soon as a clause is added, so shorthand errors
//! surface from the clause call rather than from [`Builder::sql`].

mod args;

pub use args::{Column, Columns, InsertHead, SelectOptions, Source, Sources, SubAlias};

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, trace};

use super::clause::{Join, Limit, Order, Primary, Set, Where};
use super::dialect::{Dialect, Placement, SqlDialect};
use super::term::{Field, FieldSelect, Table, TableFrom};
use super::value::{Key, Mapping, Value};
use crate::error::{BuildError, BuildResult};

/// Ordered accumulator of clause terms for one statement.
#[derive(Debug, Clone)]
pub struct Builder {
    dialect: &'static dyn SqlDialect,
    terms: Vec<String>,
    primary: Option<Primary>,
    sub: SubAlias,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl Builder {
    pub fn new(dialect: Dialect) -> Self {
        Self::with_dialect(dialect.dialect())
    }

    /// Build for any dialect, including ones defined outside this crate.
    pub fn with_dialect(dialect: &'static dyn SqlDialect) -> Self {
        Self {
            dialect,
            terms: vec![],
            primary: None,
            sub: SubAlias::Unset,
        }
    }

    pub fn dialect(&self) -> &'static dyn SqlDialect {
        self.dialect
    }

    /// The table JOIN ON fields resolve against, set by the last FROM clause.
    pub fn primary(&self) -> Option<&Primary> {
        self.primary.as_ref()
    }

    pub fn sub_alias(&self) -> &SubAlias {
        &self.sub
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Reset to a fresh builder with the same dialect.
    pub fn clear(&mut self) -> &mut Self {
        self.terms.clear();
        self.primary = None;
        self.sub = SubAlias::Unset;
        self
    }

    /// The statement without subquery wrapping.
    fn body(&self) -> String {
        self.terms.join(" ")
    }

    /// Render the statement, wrapped according to its subquery alias.
    pub fn sql(&self) -> String {
        match &self.sub {
            SubAlias::Unset => self.body(),
            SubAlias::Bare => format!("({})", self.body()),
            SubAlias::Named(alias) => format!("({}) AS {}", self.body(), self.dialect.quote(alias)),
        }
    }

    fn push(&mut self, term: impl Into<String>) {
        self.terms.push(term.into());
    }

    // =========================================================================
    // Clauses
    // =========================================================================

    /// `SELECT [DISTINCT] cols`. An empty column name, or no columns, selects `*`.
    pub fn select_clause(
        &mut self,
        columns: impl Into<Columns>,
        distinct: bool,
    ) -> BuildResult<&mut Self> {
        let columns = columns.into();
        let rendered = if columns.is_empty() {
            vec!["*".to_string()]
        } else {
            columns
                .iter()
                .map(|column| match column {
                    Column::Name(name) if name.is_empty() => Ok("*".to_string()),
                    Column::Name(name) => Ok(FieldSelect::parse(name)?.to_sql(self.dialect)),
                    Column::Raw(raw) => Ok(raw.to_string()),
                    Column::Field(field) => Ok(field.to_sql(self.dialect)),
                })
                .collect::<BuildResult<Vec<_>>>()?
        };
        self.push(if distinct { "SELECT DISTINCT" } else { "SELECT" });
        self.push(rendered.join(","));
        Ok(self)
    }

    /// Mark this builder as a subquery: `(...)`, or `(...) AS "alias"` when named.
    pub fn sub(&mut self, alias: Option<&str>) -> &mut Self {
        self.sub = SubAlias::from(alias);
        self
    }

    /// `FROM src, ...`. The first source becomes the primary table for JOINs.
    pub fn from_clause(&mut self, sources: impl Into<Sources>) -> BuildResult<&mut Self> {
        let sources = sources.into();
        let mut primary = None;
        let mut rendered = Vec::new();
        for (i, source) in sources.iter().enumerate() {
            let (sql, reference) = match source {
                Source::Table(name) => {
                    let table = TableFrom::parse(name)?;
                    let reference = Primary::Named(table.reference().to_string());
                    (table.to_sql(self.dialect), Some(reference))
                }
                Source::Query(query) => {
                    let reference = match query.sub_alias() {
                        SubAlias::Named(alias) => Primary::Named(alias.clone()),
                        _ => Primary::UnaliasedQuery,
                    };
                    (query.sql(), Some(reference))
                }
                Source::Raw(raw) => (raw.to_string(), None),
            };
            if i == 0 {
                primary = reference;
            }
            rendered.push(sql);
        }
        if rendered.is_empty() {
            return Err(BuildError::TableParse("No table given for FROM".into()));
        }
        self.primary = primary;
        self.push("FROM");
        self.push(rendered.join(","));
        Ok(self)
    }

    /// `INTO table` for `SELECT ... INTO`.
    pub fn into_clause(&mut self, table: &str) -> BuildResult<&mut Self> {
        let table = Table::parse(table)?.to_sql(self.dialect);
        self.push("INTO");
        self.push(table);
        Ok(self)
    }

    /// JOINs against the primary table of the preceding FROM.
    pub fn join_clause(&mut self, joins: &Mapping) -> BuildResult<&mut Self> {
        let sql = Join::new(joins, self.primary.as_ref()).to_sql(self.dialect)?;
        self.push(sql);
        Ok(self)
    }

    /// `WHERE ...`; an empty mapping adds nothing.
    pub fn where_clause(&mut self, conditions: &Mapping) -> BuildResult<&mut Self> {
        if conditions.is_empty() {
            return Ok(self);
        }
        let sql = Where::new(conditions).to_sql(self.dialect)?;
        self.push("WHERE");
        self.push(sql);
        Ok(self)
    }

    pub fn order_clause(&mut self, orders: &Mapping) -> BuildResult<&mut Self> {
        let sql = Order::new(orders).to_sql(self.dialect)?;
        self.push("ORDER BY");
        self.push(sql);
        Ok(self)
    }

    /// Pagination, placed where the dialect wants it.
    ///
    /// For WHERE placement the fragment is ANDed onto an existing predicate
    /// (parenthesizing a compound one), or becomes the predicate of a new
    /// WHERE opened ahead of any ORDER BY, GROUP BY or HAVING.
    pub fn limit_clause(&mut self, limit: impl Into<Value>) -> BuildResult<&mut Self> {
        let fragment = Limit::parse(&limit.into())?.fragment(self.dialect);
        match fragment.placement {
            Placement::Append => self.push(fragment.sql),
            Placement::At(index) => {
                let index = index.min(self.terms.len());
                trace!(index, sql = %fragment.sql, "splicing limit into statement");
                self.terms.insert(index, fragment.sql);
            }
            Placement::Where => match self.terms.iter().position(|t| t == "WHERE") {
                None => {
                    let index = self.where_slot();
                    trace!(index, sql = %fragment.sql, "limit opens a WHERE clause");
                    self.terms.insert(index, fragment.sql);
                    self.terms.insert(index, "WHERE".to_string());
                }
                Some(at) => {
                    let compound = self
                        .terms
                        .get(at + 1)
                        .is_some_and(|p| p.contains(" AND ") || p.contains(" OR "));
                    if compound {
                        trace!(sql = %fragment.sql, "limit merged into compound WHERE");
                        let predicate = &mut self.terms[at + 1];
                        *predicate = format!("({}) AND ({})", predicate, fragment.sql);
                    } else {
                        trace!(sql = %fragment.sql, "limit appended to WHERE");
                        let index = (at + 2).min(self.terms.len());
                        self.terms.insert(index, format!("AND ({})", fragment.sql));
                    }
                }
            },
        }
        Ok(self)
    }

    /// Where a new WHERE belongs: before the first clause that must follow it
    /// in this query, else at the end.
    fn where_slot(&self) -> usize {
        self.terms
            .iter()
            .take_while(|t| !matches!(t.as_str(), "UNION" | "UNION ALL"))
            .position(|t| matches!(t.as_str(), "ORDER BY" | "GROUP BY" | "HAVING"))
            .unwrap_or(self.terms.len())
    }

    /// `GROUP BY f, ...`
    pub fn group_clause(&mut self, fields: impl Into<Columns>) -> BuildResult<&mut Self> {
        let rendered = fields
            .into()
            .iter()
            .map(|column| match column {
                Column::Name(name) => Ok(Field::parse(name)?.to_sql(self.dialect)),
                Column::Raw(raw) => Ok(raw.to_string()),
                Column::Field(field) => Ok(field.to_sql(self.dialect)),
            })
            .collect::<BuildResult<Vec<_>>>()?;
        self.push("GROUP BY");
        self.push(rendered.join(","));
        Ok(self)
    }

    /// `HAVING ...`; an empty mapping adds nothing.
    pub fn having_clause(&mut self, conditions: &Mapping) -> BuildResult<&mut Self> {
        if conditions.is_empty() {
            return Ok(self);
        }
        let sql = Where::new(conditions).to_sql(self.dialect)?;
        self.push("HAVING");
        self.push(sql);
        Ok(self)
    }

    pub fn exists_clause(&mut self, query: &Builder) -> &mut Self {
        self.push("EXISTS");
        self.push(query.sql());
        self
    }

    pub fn union_clause(&mut self, other: &Builder, all: bool) -> &mut Self {
        self.push("UNION");
        if all {
            self.push("ALL");
        }
        self.push(other.sql());
        self
    }

    /// `INSERT INTO table [(fields)] VALUES ...` or `INSERT INTO table SELECT ...`.
    ///
    /// Without explicit fields, a record (mapping) first row supplies them and
    /// every other record row must carry the same keys. Subquery rows are
    /// UNIONed: `UNION ALL` when the later query is marked as a subquery,
    /// plain `UNION` otherwise.
    pub fn insert_clause(
        &mut self,
        table: &str,
        rows: &[Value],
        fields: Option<Columns>,
    ) -> BuildResult<&mut Self> {
        let Some(first) = rows.first() else {
            return Err(BuildError::InsertParse(format!(
                "No values to insert into \"{}\"",
                table
            )));
        };
        let table = Table::parse(table)?.to_sql(self.dialect);

        let fields = match fields.filter(|f| !f.is_empty()) {
            Some(fields) => Some(fields),
            None => match first {
                Value::Map(record) => {
                    check_record_keys(record, &rows[1..])?;
                    Some(Columns::new(
                        record
                            .keys()
                            .map(|key| match key {
                                Key::Name(name) => Column::Name(name.clone()),
                                Key::Raw(raw) => Column::Raw(raw.clone()),
                            })
                            .collect(),
                    ))
                }
                _ => None,
            },
        };
        let field_list = match &fields {
            Some(fields) => Some(self.render_insert_fields(fields)?),
            None => None,
        };

        let mut terms = vec!["INSERT INTO".to_string(), table];
        terms.extend(field_list);
        if let Value::Query(head) = first {
            terms.push(head.sql());
            for row in &rows[1..] {
                match row {
                    Value::Query(query) if query.sub_alias().is_set() => {
                        terms.push("UNION ALL".to_string());
                        terms.push(query.body());
                    }
                    Value::Query(query) => {
                        terms.push("UNION".to_string());
                        terms.push(query.sql());
                    }
                    _ => {
                        return Err(BuildError::InsertParse(
                            "All values should be subqueries in INSERT.".into(),
                        ))
                    }
                }
            }
        } else {
            let tuples = rows
                .iter()
                .map(|row| self.render_insert_row(row, fields.as_ref()))
                .collect::<BuildResult<Vec<_>>>()?;
            terms.push("VALUES".to_string());
            terms.push(tuples.join(","));
        }
        self.terms.extend(terms);
        Ok(self)
    }

    fn render_insert_fields(&self, fields: &Columns) -> BuildResult<String> {
        let names = fields
            .iter()
            .map(|column| match column {
                Column::Name(name) => Ok(Table::parse(name)?.to_sql(self.dialect)),
                Column::Raw(raw) => Ok(raw.to_string()),
                Column::Field(field) => Ok(self.dialect.quote(field.name())),
            })
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(format!("({})", names.join(",")))
    }

    fn render_insert_row(&self, row: &Value, fields: Option<&Columns>) -> BuildResult<String> {
        let values: Vec<Value> = match (row, fields) {
            (Value::List(items), _) => items.clone(),
            (Value::Map(record), Some(fields)) => fields
                .iter()
                .map(|column| {
                    let name = match column {
                        Column::Name(name) => name.clone(),
                        Column::Raw(raw) => raw.to_string(),
                        Column::Field(field) => field.name().to_string(),
                    };
                    record
                        .iter()
                        .find(|(key, _)| key.to_string() == name)
                        .map_or(Value::Null, |(_, value)| value.clone())
                })
                .collect(),
            (Value::Map(record), None) => record.values().cloned().collect(),
            (Value::Query(_), _) => {
                return Err(BuildError::InsertParse(
                    "Subqueries cannot be mixed with literal rows in INSERT.".into(),
                ))
            }
            (other, _) => {
                return Err(BuildError::InsertParse(format!(
                    "Unsupported row in INSERT: {:?}",
                    other
                )))
            }
        };
        let rendered = values
            .iter()
            .map(|value| self.dialect.value(value))
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(format!("({})", rendered.join(",")))
    }

    pub fn update_clause(&mut self, table: &str) -> BuildResult<&mut Self> {
        let table = Table::parse(table)?.to_sql(self.dialect);
        self.push("UPDATE");
        self.push(table);
        Ok(self)
    }

    pub fn set_clause(&mut self, sets: &Mapping) -> BuildResult<&mut Self> {
        let sql = Set::new(sets).to_sql(self.dialect)?;
        self.push("SET");
        self.push(sql);
        Ok(self)
    }

    pub fn delete_clause(&mut self, table: &str) -> BuildResult<&mut Self> {
        let table = Table::parse(table)?.to_sql(self.dialect);
        self.push("DELETE FROM");
        self.push(table);
        Ok(self)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// `SELECT columns FROM sources [WHERE ...]`.
    ///
    /// The condition mapping may carry the pseudo-keys `ORDER`, `LIMIT`,
    /// `GROUP`, `HAVING` and `EXISTS`; they are lifted out and rendered as
    /// their own clauses.
    pub fn select(
        &mut self,
        sources: impl Into<Sources>,
        columns: impl Into<Columns>,
        conditions: Option<Mapping>,
    ) -> BuildResult<&mut Self> {
        self.select_with(sources, columns, conditions, SelectOptions::default())
    }

    pub fn select_with(
        &mut self,
        sources: impl Into<Sources>,
        columns: impl Into<Columns>,
        conditions: Option<Mapping>,
        options: SelectOptions,
    ) -> BuildResult<&mut Self> {
        let mut conditions = conditions.unwrap_or_default();
        let mut lift = |key: &str| conditions.remove(key).filter(Value::is_truthy);
        let order = lift("ORDER");
        let limit = lift("LIMIT");
        let group = lift("GROUP");
        let having = lift("HAVING");
        let exists = lift("EXISTS");

        self.select_clause(columns, options.distinct)?;
        if let Some(table) = &options.into {
            self.into_clause(table)?;
        }
        self.from_clause(sources)?;
        if let Some(joins) = &options.join {
            if !joins.is_empty() {
                self.join_clause(joins)?;
            }
        }
        self.where_clause(&conditions)?;
        if let Some(order) = order {
            self.order_clause(&order_mapping(order)?)?;
        }
        if let Some(limit) = limit {
            self.limit_clause(limit)?;
        }
        if let Some(group) = group {
            self.group_clause(Columns::from_value(&group)?)?;
        }
        if let Some(having) = having {
            match having {
                Value::Map(having) => self.having_clause(&having)?,
                other => {
                    return Err(BuildError::WhereParse(format!(
                        "HAVING expects a mapping of conditions: {:?}",
                        other
                    )))
                }
            };
        }
        if let Some(exists) = exists {
            match exists {
                Value::Query(query) => self.exists_clause(&query),
                other => {
                    return Err(BuildError::WhereParse(format!(
                        "EXISTS expects a subquery: {:?}",
                        other
                    )))
                }
            };
        }
        if let Some(sub) = options.sub {
            self.sub = sub;
        }
        debug!(dialect = self.dialect.name(), sql = %self.sql(), "built SELECT");
        Ok(self)
    }

    /// `UPDATE table SET ... [WHERE ...]`.
    pub fn update(
        &mut self,
        table: &str,
        data: &Mapping,
        conditions: Option<&Mapping>,
    ) -> BuildResult<&mut Self> {
        self.update_clause(table)?.set_clause(data)?;
        if let Some(conditions) = conditions {
            self.where_clause(conditions)?;
        }
        debug!(dialect = self.dialect.name(), sql = %self.sql(), "built UPDATE");
        Ok(self)
    }

    /// `DELETE FROM table WHERE ...`.
    pub fn delete(&mut self, table: &str, conditions: &Mapping) -> BuildResult<&mut Self> {
        self.delete_clause(table)?.where_clause(conditions)?;
        debug!(dialect = self.dialect.name(), sql = %self.sql(), "built DELETE");
        Ok(self)
    }

    /// `INSERT INTO table ...` with the head naming the fields or giving the first row.
    pub fn insert(
        &mut self,
        table: &str,
        head: impl Into<InsertHead>,
        rows: Vec<Value>,
    ) -> BuildResult<&mut Self> {
        let (fields, all_rows) = match head.into() {
            InsertHead::Fields(fields) => (Some(fields), rows),
            InsertHead::Row(first) => (None, prepend(Value::List(first), rows)),
            InsertHead::Record(record) => (None, prepend(Value::Map(record), rows)),
        };
        self.insert_clause(table, &all_rows, fields)?;
        debug!(dialect = self.dialect.name(), sql = %self.sql(), "built INSERT");
        Ok(self)
    }

    /// Chain queries with UNION.
    ///
    /// On an empty builder the first query starts the statement unwrapped.
    /// A later query marked as a subquery is joined with `UNION ALL` and
    /// rendered unwrapped; others use plain `UNION`.
    pub fn union(&mut self, queries: &[Builder]) -> &mut Self {
        let mut queries = queries.iter();
        if self.terms.is_empty() {
            if let Some(first) = queries.next() {
                self.push(first.body());
            }
        }
        for query in queries {
            if query.sub.is_set() {
                self.push("UNION ALL");
                self.push(query.body());
            } else {
                self.push("UNION");
                self.push(query.sql());
            }
        }
        debug!(dialect = self.dialect.name(), sql = %self.sql(), "built UNION");
        self
    }
}

fn prepend(first: Value, rest: Vec<Value>) -> Vec<Value> {
    let mut rows = Vec::with_capacity(rest.len() + 1);
    rows.push(first);
    rows.extend(rest);
    rows
}

/// Every record row must carry exactly the keys of the first one.
fn check_record_keys(first: &Mapping, rest: &[Value]) -> BuildResult<()> {
    let expected: HashSet<&Key> = first.keys().collect();
    for row in rest {
        if let Value::Map(record) = row {
            let keys: HashSet<&Key> = record.keys().collect();
            if keys != expected {
                return Err(BuildError::InsertParse(
                    "Inconsistent keys in values for INSERT.".into(),
                ));
            }
        }
    }
    Ok(())
}

/// `ORDER` accepts a mapping of directions, or field names sorted ascending.
fn order_mapping(value: Value) -> BuildResult<Mapping> {
    match value {
        Value::Map(orders) => Ok(orders),
        Value::Raw(raw) => Ok(Mapping::new().with(raw, Value::Null)),
        other => {
            let columns = Columns::from_value(&other).map_err(|_| {
                BuildError::OrderParse(format!("Unrecognized ORDER: {:?}", other))
            })?;
            Ok(columns
                .iter()
                .map(|column| match column {
                    Column::Name(name) => (Key::Name(name.clone()), Value::Null),
                    Column::Raw(raw) => (Key::Raw(raw.clone()), Value::Null),
                    Column::Field(field) => (Key::Name(field_path(field)), Value::Null),
                })
                .collect())
        }
    }
}

fn field_path(field: &Field) -> String {
    [field.schema(), field.table(), Some(field.name())]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(".")
}

impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}

/// Builders are equal when they render the same SQL.
impl PartialEq for Builder {
    fn eq(&self, other: &Self) -> bool {
        self.sql() == other.sql()
    }
}
