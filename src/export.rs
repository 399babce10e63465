//! Classification result export
//!
//! The bulk classifier's `user_id -> Condition` table is consumed downstream
//! as a two-column semicolon-delimited dataset (`user_id;Predicted_Condition`).

use crate::error::AnalyticsError;
use crate::types::Condition;
use std::collections::BTreeMap;
use std::path::Path;

/// Render the bulk classification table, one worker per line, ascending id.
pub fn render_conditions_csv(table: &BTreeMap<i64, Condition>) -> String {
    let mut out = String::from("user_id;Predicted_Condition\n");
    for (user_id, condition) in table {
        out.push_str(&format!("{user_id};{condition}\n"));
    }
    out
}

/// Write the bulk classification table to a file.
pub fn write_conditions_csv<P: AsRef<Path>>(
    path: P,
    table: &BTreeMap<i64, Condition>,
) -> Result<(), AnalyticsError> {
    std::fs::write(path, render_conditions_csv(table))?;
    Ok(())
}
