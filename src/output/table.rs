//! Plain-text table rendering

use crate::pagination::{PageView, Phase};
use crate::remote::{Cfp, OperatorInfo, Part, TradeRecord};
use std::fmt::Write as _;

/// Text shown instead of a table when a committed page has no rows
pub const EMPTY_STATE: &str = "No data to display.";

/// A record that can be laid out as one table row
pub trait TableRow {
    /// Column titles
    fn headers() -> Vec<&'static str>;

    /// Cell values, one per header
    fn cells(&self) -> Vec<String>;
}

fn opt(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl TableRow for Part {
    fn headers() -> Vec<&'static str> {
        vec!["Trace ID", "Parts Name", "Support Name", "Plant", "Amount", "Unit", "Terminated"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            opt(self.trace_id.as_deref()),
            self.parts_name.clone(),
            opt(self.support_parts_name.as_deref()),
            opt(self.plant_id.as_deref()),
            number(self.amount_required),
            opt(self.amount_required_unit.as_deref()),
            if self.terminated_flag { "yes" } else { "no" }.to_string(),
        ]
    }
}

impl TableRow for TradeRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "Trade ID",
            "Parts Name",
            "Downstream Operator",
            "Upstream Operator",
            "CFP Status",
            "Message",
        ]
    }

    fn cells(&self) -> Vec<String> {
        let relation = &self.trade_relation;
        vec![
            opt(relation.trade_id.as_deref()),
            self.part
                .as_ref()
                .map(|p| p.parts_name.clone())
                .unwrap_or_default(),
            relation.downstream_operator_id.clone(),
            relation.upstream_operator_id.clone(),
            opt(self.status.cfp_response_status.as_deref()),
            opt(self.status.message.as_deref()),
        ]
    }
}

impl TableRow for Cfp {
    fn headers() -> Vec<&'static str> {
        vec!["Trace ID", "CFP Type", "GHG Emission", "Unit", "DQR Type"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.trace_id.clone(),
            opt(self.cfp_type.as_deref()),
            number(self.ghg_emission),
            opt(self.ghg_declared_unit.as_deref()),
            opt(self.dqr_type.as_deref()),
        ]
    }
}

impl TableRow for OperatorInfo {
    fn headers() -> Vec<&'static str> {
        vec!["Operator ID", "Name", "Address", "Open Operator ID"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.operator_id.clone(),
            opt(self.operator_name.as_deref()),
            opt(self.operator_address.as_deref()),
            opt(self.open_operator_id.as_deref()),
        ]
    }
}

/// Lay out rows as an aligned table, or the empty state when there are none
pub fn render_table<T: TableRow>(rows: &[T]) -> String {
    if rows.is_empty() {
        return format!("{EMPTY_STATE}\n");
    }

    let headers = T::headers();
    let cells: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Render a list view with its page footer
pub fn render_view<T: TableRow>(view: &PageView<T>) -> String {
    let mut out = if view.is_empty_state() || !view.rows.is_empty() {
        render_table(&view.rows)
    } else {
        String::new()
    };

    if view.phase == Phase::Failed {
        return out;
    }

    let _ = write!(out, "\n{} | page {}", view.page_name, view.page_number());
    if view.has_next() {
        out.push_str(" | more rows: rerun with --next");
    }
    out.push('\n');
    out
}
