use chrono::NaiveDate;
use financas_core::{
    Account, Category, ExpenseRecord, ExpenseType, PaymentMethod, PurchaseInput, expand_purchase,
};
use financas_report::{ReportFilter, build_dashboard};
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn ledger() -> Vec<ExpenseRecord> {
    let tv = PurchaseInput {
        purchase_date: d(2024, 11, 28),
        statement_closing_date: d(2024, 11, 15),
        description: "TV".to_string(),
        amount: dec!(250),
        payment_method: PaymentMethod::Credit,
        account: Account::Meli,
        category: Category::Casa,
        expense_type: ExpenseType::Fixed,
        is_recurring: true,
        installment_count: Some(4),
    };
    let lunch = PurchaseInput {
        purchase_date: d(2025, 1, 10),
        statement_closing_date: d(2025, 1, 10),
        description: "Almoço".to_string(),
        amount: dec!(42.5),
        payment_method: PaymentMethod::Pix,
        account: Account::Inter,
        category: Category::Comida,
        expense_type: ExpenseType::Variable,
        is_recurring: false,
        installment_count: None,
    };

    let mut rows = expand_purchase(&tv).unwrap();
    rows.extend(expand_purchase(&lunch).unwrap());
    rows
}

/// Installments bought after closing land two statements ahead and spill into the next year.
#[test]
fn test_installments_spread_over_statement_months() {
    let rows = ledger();
    let all = build_dashboard(&rows, &ReportFilter::default(), dec!(3000));

    let months: Vec<_> = all.monthly.iter().map(|m| (m.year, m.month)).collect();
    assert_eq!(months, vec![(2025, 1), (2025, 2), (2025, 3), (2025, 4)]);
    assert_eq!(all.monthly[0].total, dec!(292.5));
    assert_eq!(all.total, dec!(1042.50));
    assert_eq!(all.top_category, Some(Category::Casa));
}

#[test]
fn test_year_and_method_filters() {
    let rows = ledger();
    let filter = ReportFilter {
        years: vec![2025],
        methods: vec![PaymentMethod::Credit],
        months: vec![1, 2],
        ..Default::default()
    };
    let dash = build_dashboard(&rows, &filter, dec!(3000));

    assert_eq!(dash.rows.len(), 2);
    assert!(dash.rows.iter().all(|r| r.record.description == "TV"));
    assert_eq!(dash.rows[0].month_name, "janeiro");
    assert_eq!(dash.total, dec!(500));
    assert_eq!(dash.income, dec!(6000));
    assert_eq!(dash.leftover, dec!(5500));
    assert_eq!(dash.top_method, Some(PaymentMethod::Credit));
}
