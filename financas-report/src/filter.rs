//! Multiselect filters. An empty selection lets everything through.

use chrono::Datelike;
use financas_core::{Account, Category, ExpenseRecord, ExpenseType, PaymentMethod};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub categories: Vec<Category>,
    pub methods: Vec<PaymentMethod>,
    pub expense_types: Vec<ExpenseType>,
    pub accounts: Vec<Account>,
    pub years: Vec<i32>,
    /// Month numbers, 1..=12
    pub months: Vec<u32>,
}

impl ReportFilter {
    pub fn matches(&self, r: &ExpenseRecord) -> bool {
        allows(&self.categories, &r.category)
            && allows(&self.methods, &r.payment_method)
            && allows(&self.expense_types, &r.expense_type)
            && allows(&self.accounts, &r.account)
            && allows(&self.years, &r.date.year())
            && allows(&self.months, &r.date.month())
    }

    pub fn apply<'a>(&self, records: &'a [ExpenseRecord]) -> Vec<&'a ExpenseRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

fn allows<T: PartialEq>(selected: &[T], value: &T) -> bool {
    selected.is_empty() || selected.contains(value)
}
