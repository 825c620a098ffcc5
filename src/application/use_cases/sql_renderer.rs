// ============================================================
// SQL RENDERER
// ============================================================
// Compose sanitized names, resolved types and escaped values into
// CREATE TABLE and batched INSERT statements

use tracing::debug;

use super::dialect_mapper::to_dialect_type;
use super::sanitizer::sanitize_identifier;
use super::value_escaper::escape_value;
use crate::domain::{ColumnProfile, DataTable, Dialect};

/// Rendered SQL for one conversion
#[derive(Debug, Clone)]
pub struct RenderedSql {
    pub create_table: String,
    pub insert: String,
    /// True when the row cap dropped rows from the INSERT output
    pub truncated: bool,
}

/// Renders SQL text from a profiled table. Column order in both DDL and
/// DML follows the original header order.
pub struct SqlRenderer {
    /// Rows per multi-row INSERT statement
    batch_size: usize,

    /// Optional cap on rendered rows
    max_rows: Option<usize>,

    /// Emit NULL for non-numeric values in numeric columns
    strict_numeric: bool,
}

impl SqlRenderer {
    pub fn new(batch_size: usize, max_rows: Option<usize>, strict_numeric: bool) -> Self {
        Self {
            batch_size,
            max_rows,
            strict_numeric,
        }
    }

    pub fn render(
        &self,
        table: &DataTable,
        profiles: &[ColumnProfile],
        table_name: &str,
        dialect: Dialect,
    ) -> RenderedSql {
        let sanitized_table = sanitize_identifier(table_name);
        let dialect_types: Vec<String> = profiles
            .iter()
            .map(|p| to_dialect_type(p.generic_type, dialect))
            .collect();

        let create_table =
            self.render_create_table(&sanitized_table, profiles, &dialect_types, dialect);
        let (insert, truncated) =
            self.render_inserts(table, profiles, &dialect_types, &sanitized_table);

        debug!(
            table = %sanitized_table,
            dialect = %dialect,
            rows = table.row_count(),
            truncated,
            "rendered SQL"
        );

        RenderedSql {
            create_table,
            insert,
            truncated,
        }
    }

    fn render_create_table(
        &self,
        table_name: &str,
        profiles: &[ColumnProfile],
        dialect_types: &[String],
        dialect: Dialect,
    ) -> String {
        let definitions: Vec<String> = profiles
            .iter()
            .zip(dialect_types)
            .map(|(p, t)| format!("  {} {}", p.sanitized_name, t))
            .collect();

        let options = dialect
            .table_options()
            .map(|o| format!(" {}", o))
            .unwrap_or_default();

        format!(
            "CREATE TABLE {} (\n{}\n){};",
            table_name,
            definitions.join(",\n"),
            options
        )
    }

    fn render_inserts(
        &self,
        table: &DataTable,
        profiles: &[ColumnProfile],
        dialect_types: &[String],
        table_name: &str,
    ) -> (String, bool) {
        let total = table.row_count();
        let rendered_count = self.max_rows.map_or(total, |cap| cap.min(total));
        let truncated = rendered_count < total;

        let column_list = profiles
            .iter()
            .map(|p| p.sanitized_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let mut statements = Vec::new();
        for batch in table.rows[..rendered_count].chunks(self.batch_size) {
            let tuples: Vec<String> = batch
                .iter()
                .map(|row| {
                    let values: Vec<String> = table
                        .headers
                        .iter()
                        .zip(dialect_types)
                        .map(|(header, dialect_type)| {
                            escape_value(row.get(header), dialect_type, self.strict_numeric)
                        })
                        .collect();
                    format!("  ({})", values.join(", "))
                })
                .collect();

            statements.push(format!(
                "INSERT INTO {} ({}) VALUES\n{};",
                table_name,
                column_list,
                tuples.join(",\n")
            ));
        }

        let mut insert = statements.join("\n\n");
        if truncated {
            insert.push_str(&format!(
                "\n\n-- Output truncated: {} of {} row(s) rendered (row cap {})",
                rendered_count,
                total,
                self.max_rows.unwrap_or(rendered_count)
            ));
        }

        (insert, truncated)
    }
}
