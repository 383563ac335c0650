use crate::domain::payment::Submission;
use crate::domain::shopper::Shopper;
use crate::error::PaymentError;
use std::fmt::Write;

/// Operator-facing text for a failed action. Raw details go to the log only.
pub fn describe(err: &PaymentError) -> String {
    match err {
        PaymentError::Validation(e) => e.to_string(),
        PaymentError::Auth(_) => "not authenticated; please log in again".to_string(),
        PaymentError::Gateway(_) => "payment gateway error; try again".to_string(),
        PaymentError::NotFound(what) => format!("{what} not found"),
    }
}

pub fn shoppers(list: &[Shopper]) -> String {
    list.iter()
        .map(|s| format!("{:>3}  {}\n", s.id, s.display()))
        .collect()
}

pub fn ledger(entries: &[Submission]) -> String {
    if entries.is_empty() {
        return "no previous requests\n".to_string();
    }

    let header = [
        "ID", "SHOPPER", "CURRENCY", "AMOUNT", "DATE", "STATUS", "BANK MESSAGE",
    ];
    let rows: Vec<[String; 7]> = entries
        .iter()
        .map(|s| {
            [
                s.id().to_string(),
                s.shopper().to_string(),
                s.currency().to_string(),
                s.amount().to_string(),
                s.created_at().to_string(),
                s.status().to_string(),
                s.bank_message().unwrap_or("-").to_string(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let mut line = |cells: &[&str]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", padded.join("  ").trim_end());
    };
    line(&header[..]);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        line(&cells[..]);
    }
    out
}
