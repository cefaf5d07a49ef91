use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::OnceLock;

const MAX_OP_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap());
    re.replace_all(s, "").into_owned()
}

/// Terminal colour of an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "register" => Colour::Green,
        "change" => Colour::Cyan,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// One row of the `log` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

impl AuditRow {
    fn op_target(&self) -> String {
        if self.target.is_empty() {
            self.operation.clone()
        } else {
            format!("{} ({})", self.operation, self.target)
        }
    }
}

pub struct AuditLogic;

impl AuditLogic {
    pub fn load(pool: &DbPool) -> AppResult<Vec<AuditRow>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(AuditRow {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Render one line; only the operation word is coloured and the
    /// `operation (target)` column is cut at 60 visible characters.
    fn render_line(row: &AuditRow, id_w: usize, date_w: usize, op_w: usize) -> String {
        let color = color_for_operation(&row.operation);

        let visible = row.op_target();
        let visible = if visible.chars().count() > MAX_OP_WIDTH {
            let mut s: String = visible.chars().take(MAX_OP_WIDTH - 3).collect();
            s.push_str("...");
            s
        } else {
            visible
        };

        let colored = match visible.split_once(' ') {
            Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
            None => color.paint(visible.as_str()).to_string(),
        };

        let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

        format!(
            "{:>id_w$}: {:<date_w$} | {}{} => {}",
            row.id,
            row.date,
            colored,
            padding,
            row.message,
            id_w = id_w,
            date_w = date_w
        )
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let rows = Self::load(pool)?;

        if rows.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = rows
            .iter()
            .map(|r| r.op_target().chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = rows
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = rows.iter().map(|r| r.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");
        for row in &rows {
            println!("{}", Self::render_line(row, id_w, date_w, op_w));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::log::audit;
    use crate::db::migrate::run_pending_migrations;

    #[test]
    fn rows_come_back_in_insertion_order() {
        let pool = DbPool::in_memory().unwrap();
        run_pending_migrations(&pool.conn).unwrap();
        audit(&pool.conn, "register", "D1", "Driver onboarded").unwrap();
        audit(&pool.conn, "change", "D1", "OFF -> D").unwrap();

        let rows = AuditLogic::load(&pool).unwrap();
        let ops: Vec<&str> = rows.iter().map(|r| r.operation.as_str()).collect();
        let tail = &ops[ops.len() - 2..];
        assert_eq!(tail, ["register", "change"]);
        assert!(ops.contains(&"migration_applied"));
    }

    #[test]
    fn long_targets_are_truncated_without_counting_ansi() {
        let row = AuditRow {
            id: 7,
            date: "2025-06-01T10:00:00+00:00".into(),
            operation: "export".into(),
            target: "x".repeat(100),
            message: "done".into(),
        };
        let line = AuditLogic::render_line(&row, 1, 25, MAX_OP_WIDTH);
        let plain = strip_ansi(&line);
        assert!(plain.contains("..."));
        assert!(plain.ends_with("=> done"));
        let col = plain.split(" | ").nth(1).unwrap().split(" => ").next().unwrap();
        assert_eq!(col.chars().count(), MAX_OP_WIDTH);
    }
}
