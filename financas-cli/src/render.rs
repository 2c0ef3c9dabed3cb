//! Plain-text rendering of ledger rows and dashboard figures.

use financas_core::ExpenseRecord;
use financas_report::{Dashboard, GroupTotal, ReportRow};
use rust_decimal::Decimal;
use std::fmt::Display;

pub fn money(amount: Decimal) -> String {
    format!("R$ {:.2}", amount.round_dp(2))
}

fn installment_label(r: &ExpenseRecord) -> String {
    r.installment
        .map(|i| format!(" [{}]", i))
        .unwrap_or_default()
}

pub fn print_records(records: &[ExpenseRecord]) {
    for r in records {
        println!(
            "- {} | {}{} | {} | {} / {} | {} | {}",
            r.date.format("%Y-%m"),
            r.description,
            installment_label(r),
            money(r.amount),
            r.payment_method,
            r.account,
            r.category,
            r.expense_type,
        );
    }
}

pub fn print_rows(rows: &[ReportRow]) {
    if rows.is_empty() {
        println!("(no expenses match the filters)");
        return;
    }
    for row in rows {
        let r = &row.record;
        println!(
            "{:<10} {:>4} {:<10} {:<30} {:>12} {:<8} {:<7} {:<16} {}",
            r.date.format("%Y-%m-%d").to_string(),
            row.year,
            row.month_name,
            format!("{}{}", r.description, installment_label(r)),
            money(r.amount),
            r.payment_method.label(),
            r.account.label(),
            r.category.label(),
            r.expense_type.label(),
        );
    }
    println!("\n{} rows", rows.len());
}

fn print_groups<K: Display>(title: &str, groups: &[GroupTotal<K>]) {
    println!("## {title}\n");
    if groups.is_empty() {
        println!("(none)\n");
        return;
    }
    for g in groups {
        println!("- {:<16} {:>14}  ({} rows)", g.key.to_string(), money(g.total), g.count);
    }
    println!();
}

pub fn print_dashboard(dash: &Dashboard) {
    println!("# Dashboard\n");
    println!("Total expenses:        {}", money(dash.total));
    println!(
        "Top category:          {}",
        dash.top_category.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
    );
    println!(
        "Most used method:      {}",
        dash.top_method.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string())
    );
    println!("Income in view:        {}", money(dash.income));
    println!("Left over:             {}\n", money(dash.leftover));

    println!("## Total per month\n");
    if dash.monthly.is_empty() {
        println!("(none)\n");
    } else {
        for m in &dash.monthly {
            println!("- {} {:<10} {:>14}", m.year, m.month_name, money(m.total));
        }
        println!();
    }

    print_groups("Total per category", &dash.by_category);
    print_groups("Total per payment method", &dash.by_method);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_has_two_places() {
        assert_eq!(money(dec!(12.5)), "R$ 12.50");
        assert_eq!(money(dec!(1000)), "R$ 1000.00");
        assert_eq!(money(dec!(3.456)), "R$ 3.46");
    }
}
