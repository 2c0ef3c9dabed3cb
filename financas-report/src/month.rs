//! Portuguese month names for display grouping.

pub const MONTH_NAMES_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// `1..=12` to its name; anything else is `None`.
pub fn month_name_pt(month: u32) -> Option<&'static str> {
    MONTH_NAMES_PT.get(month.checked_sub(1)? as usize).copied()
}

/// Parse a month given as a number or a Portuguese name (`3`, `marco`, `Março`).
pub fn parse_month(s: &str) -> Option<u32> {
    let s = s.trim().to_lowercase();
    if let Ok(n) = s.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let s = s.replace('ç', "c");
    MONTH_NAMES_PT
        .iter()
        .position(|name| name.replace('ç', "c") == s)
        .map(|i| i as u32 + 1)
}
