//! Display formatting for synthesized figures

/// Groups decimal digits in threes with `,` (`426847` -> `"426,847"`)
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Dollar label with grouped digits (`"$426,847"`)
pub fn currency_label(value: u64) -> String {
    format!("${}", group_thousands(value))
}

pub fn fixed_decimals(value: f64, places: usize) -> String {
    format!("{:.*}", places, value)
}
