//! Lexical extraction of table metadata from SQL table-definition files.
//!
//! The input dialect is SQL-Server-style DDL with bracketed identifiers
//! (`CREATE TABLE [sales].[orders]`), one definition file per table. Matching
//! is purely regex-based against the raw file text; there is no tokenizer and
//! no handling of comments or quoting beyond the patterns below.

use once_cell::sync::Lazy;
use regex::Regex;

/// Schemas excluded from scanning and from extracted relations.
pub const IGNORED_SCHEMAS: &[&str] = &["dbo", "documentation", "etl", "History", "lib", "xsec"];

/// Fallback description for tables without any key declarations.
pub const NO_KEYS_DESCRIPTION: &str = "No primary or foreign keys";

/// Matches `CREATE TABLE [schema].[table]`, brackets optional on each segment.
static CREATE_TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"CREATE TABLE \[?([A-Za-z0-9_]+)\]?\.\[?([A-Za-z0-9_]+)\]?").unwrap()
});

/// Matches `FOREIGN KEY ([col]) REFERENCES [schema].[table]`, capturing the
/// local column and the referenced schema/table.
static FOREIGN_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"FOREIGN KEY \(\[?([A-Za-z0-9_]+)\]?\) REFERENCES \[?([A-Za-z0-9_]+)\]?\.\[?([A-Za-z0-9_]+)\]?",
    )
    .unwrap()
});

/// Matches `PRIMARY KEY CLUSTERED ([col] ASC)` with an optional leading
/// `CONSTRAINT [name]`.
static PRIMARY_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:CONSTRAINT\s*\[\w+\]\s*)?PRIMARY KEY CLUSTERED\s*\(\[?(\w+)\]?\s*ASC\)")
        .unwrap()
});

/// One foreign key declaration found in a definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    /// Local column holding the reference.
    pub column: String,
    /// Referenced table as `schema.table`.
    pub table: String,
}

/// Everything extracted from a single table-definition file.
#[derive(Debug, Clone)]
pub struct FileExtract {
    /// Table identifiers (`schema.table`) declared in the file, in order.
    pub tables: Vec<String>,
    /// Referenced table identifiers, with ignored-schema references dropped.
    pub relations: Vec<String>,
    /// Human-readable summary of the file's key declarations.
    pub keys_summary: String,
}

impl FileExtract {
    /// Hover text for the diagram: declared table names followed by the key
    /// summary.
    pub fn hover_title(&self) -> String {
        let mut lines = self.tables.clone();
        lines.push(String::new());
        lines.push(self.keys_summary.clone());
        lines.join("\n")
    }
}

/// Is this schema in the fixed ignore set?
pub fn is_ignored_schema(schema: &str) -> bool {
    IGNORED_SCHEMAS.contains(&schema)
}

/// Extract table declarations, foreign-key relations, and a key summary from
/// the text of one definition file.
pub fn extract(content: &str) -> FileExtract {
    let tables: Vec<String> = CREATE_TABLE_RE
        .captures_iter(content)
        .map(|c| format!("{}.{}", &c[1], &c[2]))
        .collect();

    let mut relations = Vec::new();
    let mut foreign_keys = Vec::new();
    for caps in FOREIGN_KEY_RE.captures_iter(content) {
        let target = format!("{}.{}", &caps[2], &caps[3]);
        // Relations skip ignored schemas; the hover summary lists every FK.
        if !is_ignored_schema(&caps[2]) {
            relations.push(target.clone());
        }
        foreign_keys.push(ForeignKeyRef {
            column: caps[1].to_string(),
            table: target,
        });
    }

    // Malformed files can declare several primary keys; only the first counts.
    let primary_key = PRIMARY_KEY_RE
        .captures(content)
        .map(|c| c[1].to_string());

    let keys_summary = format_keys_summary(primary_key.as_deref(), &foreign_keys);

    FileExtract {
        tables,
        relations,
        keys_summary,
    }
}

fn format_keys_summary(primary_key: Option<&str>, foreign_keys: &[ForeignKeyRef]) -> String {
    let mut lines = Vec::new();
    if let Some(pk) = primary_key {
        lines.push(format!("Primary Key: {pk}"));
    }
    for fk in foreign_keys {
        lines.push(format!("join to {} on {}", fk.table, fk.column));
    }

    if lines.is_empty() {
        NO_KEYS_DESCRIPTION.to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bracketed_table_name() {
        let result = extract("CREATE TABLE [sales].[orders] (\n  [order_id] INT\n);");
        assert_eq!(result.tables, vec!["sales.orders"]);
    }

    #[test]
    fn test_extract_unbracketed_table_name() {
        let result = extract("CREATE TABLE sales.orders (order_id INT);");
        assert_eq!(result.tables, vec!["sales.orders"]);
    }

    #[test]
    fn test_extract_foreign_key_relation() {
        let sql = "CREATE TABLE [sales].[orders] (\n\
                   [cust_id] INT,\n\
                   FOREIGN KEY ([cust_id]) REFERENCES [sales].[customers] ([id])\n\
                   );";
        let result = extract(sql);
        assert_eq!(result.relations, vec!["sales.customers"]);
        assert!(result.keys_summary.contains("join to sales.customers on cust_id"));
    }

    #[test]
    fn test_ignored_schema_reference_dropped_from_relations() {
        let sql = "CREATE TABLE [sales].[orders] (\n\
                   FOREIGN KEY ([user_id]) REFERENCES [dbo].[users]\n\
                   );";
        let result = extract(sql);
        assert!(result.relations.is_empty());
        // The hover summary still lists the FK.
        assert!(result.keys_summary.contains("join to dbo.users on user_id"));
    }

    #[test]
    fn test_primary_key_clustered() {
        let sql = "CREATE TABLE [hr].[employees] (\n\
                   [emp_id] INT NOT NULL,\n\
                   CONSTRAINT [PK_employees] PRIMARY KEY CLUSTERED ([emp_id] ASC)\n\
                   );";
        let result = extract(sql);
        assert_eq!(result.keys_summary, "Primary Key: emp_id");
    }

    #[test]
    fn test_primary_key_without_constraint_name() {
        let sql = "CREATE TABLE [hr].[teams] (\n\
                   [team_id] INT,\n\
                   PRIMARY KEY CLUSTERED ([team_id] ASC)\n\
                   );";
        let result = extract(sql);
        assert_eq!(result.keys_summary, "Primary Key: team_id");
    }

    #[test]
    fn test_only_first_primary_key_used() {
        let sql = "CREATE TABLE [hr].[broken] (\n\
                   PRIMARY KEY CLUSTERED ([first_col] ASC),\n\
                   PRIMARY KEY CLUSTERED ([second_col] ASC)\n\
                   );";
        let result = extract(sql);
        assert_eq!(result.keys_summary, "Primary Key: first_col");
    }

    #[test]
    fn test_no_keys_fallback_text() {
        let result = extract("CREATE TABLE [sales].[scratch] ([a] INT);");
        assert_eq!(result.keys_summary, NO_KEYS_DESCRIPTION);
    }

    #[test]
    fn test_primary_and_foreign_keys_combined() {
        let sql = "CREATE TABLE [sales].[orders] (\n\
                   [order_id] INT NOT NULL,\n\
                   [cust_id] INT,\n\
                   CONSTRAINT [PK_orders] PRIMARY KEY CLUSTERED ([order_id] ASC),\n\
                   FOREIGN KEY ([cust_id]) REFERENCES [sales].[customers] ([id])\n\
                   );";
        let result = extract(sql);
        assert_eq!(
            result.keys_summary,
            "Primary Key: order_id\njoin to sales.customers on cust_id"
        );
    }

    #[test]
    fn test_self_referential_foreign_key() {
        let sql = "CREATE TABLE [hr].[employees] (\n\
                   [manager_id] INT,\n\
                   FOREIGN KEY ([manager_id]) REFERENCES [hr].[employees] ([emp_id])\n\
                   );";
        let result = extract(sql);
        assert_eq!(result.relations, vec!["hr.employees"]);
    }

    #[test]
    fn test_hover_title_includes_table_name() {
        let result = extract("CREATE TABLE [sales].[orders] ([a] INT);");
        let title = result.hover_title();
        assert!(title.starts_with("sales.orders\n"));
        assert!(title.ends_with(NO_KEYS_DESCRIPTION));
    }

    #[test]
    fn test_file_without_create_table() {
        let result = extract("GRANT SELECT ON SCHEMA::sales TO reporting;");
        assert!(result.tables.is_empty());
        assert!(result.relations.is_empty());
    }
}
