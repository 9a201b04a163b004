//! The single table IntelliSQL knows about.
//!
//! `STUDENTS_TABLE` is the one definition used both to describe the table to
//! the model and to create it when seeding, so the two cannot drift apart.

/// A column of the known table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    pub name: &'static str,
    /// Column type as written in the DDL.
    pub data_type: &'static str,
}

/// A statically known table definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name.
    pub name: &'static str,
    /// Columns in declaration order.
    pub columns: &'static [Column],
}

/// The STUDENTS table: `STUDENTS(NAME, CLASS, MARKS, COMPANY)`.
pub const STUDENTS_TABLE: TableSchema = TableSchema {
    name: "STUDENTS",
    columns: &[
        Column {
            name: "NAME",
            data_type: "VARCHAR(25)",
        },
        Column {
            name: "CLASS",
            data_type: "VARCHAR(25)",
        },
        Column {
            name: "MARKS",
            data_type: "INT",
        },
        Column {
            name: "COMPANY",
            data_type: "VARCHAR(25)",
        },
    ],
};

impl TableSchema {
    /// Returns the column names in declaration order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Formats the table for inclusion in an LLM prompt.
    pub fn format_for_llm(&self) -> String {
        format!(
            "The SQL database has the name {} and has the following columns - {}.",
            self.name,
            self.column_names().join(", ")
        )
    }

    /// Builds the `CREATE TABLE` statement for this table.
    pub fn create_table_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("    {} {}", c.name, c.data_type))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("CREATE TABLE {}(\n{}\n)", self.name, columns)
    }

    /// Builds the `DROP TABLE IF EXISTS` statement for this table.
    pub fn drop_table_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name)
    }

    /// Builds a positional `INSERT` statement with one placeholder per column.
    pub fn insert_sql(&self) -> String {
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        format!("INSERT INTO {} VALUES({})", self.name, placeholders)
    }
}
