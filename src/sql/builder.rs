//! Builds the parameterized statements used by the mall store, once per configured table.

use crate::config::TableConfig;

/// Quote identifier for PostgreSQL (safe: only from config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

/// Column list shared by every statement returning whole rows.
const COLUMNS: &str = r#""id", "name", "score", "location", "has_restaurants""#;

/// Every statement the mall store runs. Placeholders are documented per field.
#[derive(Clone, Debug)]
pub struct MallStatements {
    /// Qualified table name, also used for DDL.
    pub table: String,
    pub create_table: String,
    /// All rows in id order.
    pub select_all: String,
    /// `$1` = id.
    pub select_by_id: String,
    /// `$1` = name; first match by id.
    pub select_by_name: String,
    /// `$1` = score; exact match.
    pub select_by_score: String,
    /// `$1` = location; first match by id.
    pub select_by_location: String,
    /// `$1` = has_restaurants.
    pub select_by_restaurants: String,
    /// `$1` = minimum score, inclusive.
    pub select_by_min_score: String,
    pub select_names: String,
    pub count: String,
    /// `$1..$4` = name, score, location, has_restaurants; id from the sequence.
    pub insert: String,
    /// `$1` = id, `$2..$5` = fields. Inserts with that id or overwrites the existing row.
    pub upsert: String,
    /// Blocks concurrent inserts so the sequence check below sees every id already drawn.
    pub lock_table: String,
    /// `$1` = id just upserted. Moves the id sequence up to `$1` only when it is behind; never backward.
    pub advance_sequence: String,
    /// `$1` = id.
    pub delete: String,
}

impl MallStatements {
    pub fn new(cfg: &TableConfig) -> Self {
        let table = qualified_table(&cfg.schema, &cfg.table);
        let select = format!("SELECT {} FROM {}", COLUMNS, table);
        let id = quoted("id");
        MallStatements {
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS {} (\
                 \"id\" BIGSERIAL PRIMARY KEY, \
                 \"name\" TEXT NOT NULL, \
                 \"score\" INTEGER NOT NULL, \
                 \"location\" TEXT NOT NULL, \
                 \"has_restaurants\" BOOLEAN NOT NULL)",
                table
            ),
            select_all: format!("{} ORDER BY {}", select, id),
            select_by_id: format!("{} WHERE {} = $1", select, id),
            select_by_name: format!("{} WHERE \"name\" = $1 ORDER BY {} LIMIT 1", select, id),
            select_by_score: format!("{} WHERE \"score\" = $1 ORDER BY {}", select, id),
            select_by_location: format!("{} WHERE \"location\" = $1 ORDER BY {} LIMIT 1", select, id),
            select_by_restaurants: format!("{} WHERE \"has_restaurants\" = $1 ORDER BY {}", select, id),
            select_by_min_score: format!("{} WHERE \"score\" >= $1 ORDER BY {}", select, id),
            select_names: format!("SELECT \"name\" FROM {} ORDER BY {}", table, id),
            count: format!("SELECT COUNT(*) FROM {}", table),
            insert: format!(
                "INSERT INTO {} (\"name\", \"score\", \"location\", \"has_restaurants\") \
                 VALUES ($1, $2, $3, $4) RETURNING {}",
                table, COLUMNS
            ),
            upsert: format!(
                "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5) \
                 ON CONFLICT ({}) DO UPDATE SET \
                 \"name\" = EXCLUDED.\"name\", \
                 \"score\" = EXCLUDED.\"score\", \
                 \"location\" = EXCLUDED.\"location\", \
                 \"has_restaurants\" = EXCLUDED.\"has_restaurants\" \
                 RETURNING {}",
                table, COLUMNS, id, COLUMNS
            ),
            lock_table: format!("LOCK TABLE {} IN SHARE ROW EXCLUSIVE MODE", table),
            advance_sequence: format!(
                "SELECT setval(s.seq, $1::bigint) \
                 FROM (SELECT pg_get_serial_sequence('{}', 'id')::regclass AS seq) s \
                 WHERE $1::bigint > COALESCE(pg_sequence_last_value(s.seq), 0)",
                table.replace('\'', "''")
            ),
            delete: format!("DELETE FROM {} WHERE {} = $1 RETURNING {}", table, id, COLUMNS),
            table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmts() -> MallStatements {
        MallStatements::new(&TableConfig {
            schema: "retail".into(),
            table: "malls".into(),
        })
    }

    #[test]
    fn qualifies_and_quotes_table() {
        assert_eq!(qualified_table("public", "centrocomercial"), "\"public\".\"centrocomercial\"");
        assert_eq!(quoted("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn reads_are_ordered_by_id() {
        let s = stmts();
        assert_eq!(
            s.select_all,
            "SELECT \"id\", \"name\", \"score\", \"location\", \"has_restaurants\" FROM \"retail\".\"malls\" ORDER BY \"id\""
        );
        for sql in [&s.select_by_score, &s.select_by_restaurants, &s.select_by_min_score, &s.select_names] {
            assert!(sql.ends_with("ORDER BY \"id\""), "{}", sql);
        }
        assert!(s.select_by_min_score.contains("\"score\" >= $1"));
    }

    #[test]
    fn single_row_lookups_take_first_match() {
        let s = stmts();
        assert!(s.select_by_name.ends_with("LIMIT 1"));
        assert!(s.select_by_location.ends_with("LIMIT 1"));
        assert!(!s.select_by_id.contains("LIMIT"));
    }

    #[test]
    fn writes_return_rows() {
        let s = stmts();
        assert!(!s.insert.contains("\"id\","));
        assert!(s.insert.ends_with("RETURNING \"id\", \"name\", \"score\", \"location\", \"has_restaurants\""));
        assert!(s.upsert.contains("ON CONFLICT (\"id\") DO UPDATE SET"));
        assert!(!s.upsert.contains("\"id\" = EXCLUDED"));
        assert!(s.delete.starts_with("DELETE FROM \"retail\".\"malls\" WHERE \"id\" = $1"));
    }

    #[test]
    fn sequence_only_moves_forward() {
        let s = stmts();
        assert!(s.advance_sequence.contains("pg_get_serial_sequence('\"retail\".\"malls\"', 'id')"));
        assert!(s.advance_sequence.contains("WHERE $1::bigint > COALESCE(pg_sequence_last_value(s.seq), 0)"));
        assert!(!s.advance_sequence.contains("MAX("));
        assert_eq!(s.lock_table, "LOCK TABLE \"retail\".\"malls\" IN SHARE ROW EXCLUSIVE MODE");
    }
}
