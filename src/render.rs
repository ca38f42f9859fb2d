//! Plain-text tables for the explorer views.

use crate::{
    config::ExplorerConfig, diff::RoleDiff, matrix::PermissionMatrix, permission::Permission,
    service::ServiceSummary,
};
use prettytable::{Cell, Row, Table, format};

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table
}

fn text_row<I, S>(cells: I) -> Row
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Row::new(cells.into_iter().map(|text| Cell::new(text.as_ref())).collect())
}

/// Render a permission matrix: one row per permission, one column per role.
pub fn permission_table(matrix: &PermissionMatrix, config: &ExplorerConfig) -> Table {
    let mut table = new_table();

    let header = std::iter::once("Permission")
        .chain(matrix.columns.iter().map(|column| column.label.as_str()));
    table.set_titles(text_row(header));

    for row in &matrix.rows {
        let marks = row.cells.iter().map(|&member| {
            if member {
                config.membership_mark.as_str()
            } else {
                ""
            }
        });
        table.add_row(text_row(std::iter::once(row.permission.as_str()).chain(marks)));
    }

    table
}

/// Render the service listing.
pub fn service_table(services: &[ServiceSummary]) -> Table {
    let mut table = new_table();
    table.set_titles(text_row(["Service", "Count", "Roles"]));

    for summary in services {
        table.add_row(text_row([
            summary.service.clone(),
            summary.count.to_string(),
            summary.role_names.join(", "),
        ]));
    }

    table
}

/// Number of body rows in the side-by-side comparison table.
///
/// This is one less than the longer column, so the last entry of the longer
/// column is not shown and single-entry columns produce no rows at all.
pub fn comparison_row_count(diff: &RoleDiff) -> usize {
    diff.left_only
        .len()
        .max(diff.right_only.len())
        .saturating_sub(1)
}

/// Render the permissions unique to each side of a comparison.
pub fn comparison_table(
    left_name: &str,
    right_name: &str,
    diff: &RoleDiff,
    config: &ExplorerConfig,
) -> Table {
    let mut table = new_table();
    table.set_titles(text_row([
        format!("{left_name} Only"),
        format!("{right_name} Only"),
    ]));

    let cell_text = |column: &[Permission], index: usize| -> String {
        match column.get(index) {
            Some(permission) => permission.to_string(),
            None if index == 0 => config.empty_placeholder.clone(),
            None => String::new(),
        }
    };

    for index in 0..comparison_row_count(diff) {
        table.add_row(text_row([
            cell_text(&diff.left_only, index),
            cell_text(&diff.right_only, index),
        ]));
    }

    table
}

/// Render the permissions both sides of a comparison include.
pub fn common_table(
    left_name: &str,
    right_name: &str,
    diff: &RoleDiff,
    config: &ExplorerConfig,
) -> Table {
    let mut table = new_table();
    table.set_titles(text_row([format!("Both {left_name} & {right_name}")]));

    if diff.common.is_empty() {
        table.add_row(text_row([config.empty_placeholder.as_str()]));
    } else {
        for permission in &diff.common {
            table.add_row(text_row([permission.as_str()]));
        }
    }

    table
}

/// Render both comparison tables, one after the other.
pub fn render_comparison(
    left_name: &str,
    right_name: &str,
    diff: &RoleDiff,
    config: &ExplorerConfig,
) -> String {
    format!(
        "{}\n{}",
        comparison_table(left_name, right_name, diff, config),
        common_table(left_name, right_name, diff, config)
    )
}
