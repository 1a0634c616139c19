//! Currency formatting for messages and CLI output

/// Symbol and fraction digits for a currency code
fn currency_style(code: &str) -> (Option<&'static str>, usize) {
    match code {
        "USD" => (Some("$"), 2),
        "EUR" => (Some("€"), 2),
        "GBP" => (Some("£"), 2),
        "JPY" => (Some("¥"), 0),
        "CAD" => (Some("CA$"), 2),
        "AUD" => (Some("A$"), 2),
        "INR" => (Some("₹"), 2),
        "CNY" => (Some("CN¥"), 2),
        _ => (None, 2),
    }
}

/// Format an amount in the ledger currency, en-US style (`$1,234.56`)
///
/// Unknown codes are rendered as a prefix (`CHF 12.00`). Non-finite
/// amounts render as zero.
pub fn money(amount: f64, currency: &str) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let code = currency.trim().to_uppercase();
    let (symbol, decimals) = currency_style(&code);

    let factor = 10f64.powi(decimals as i32);
    let rounded = (amount.abs() * factor).round() / factor;
    let negative = amount < 0.0 && rounded > 0.0;

    let fixed = format!("{:.*}", decimals, rounded);
    let (whole, fraction) = match fixed.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    match symbol {
        Some(s) => out.push_str(s),
        None => {
            out.push_str(&code);
            out.push(' ');
        }
    }
    out.push_str(&group_thousands(whole));
    if let Some(f) = fraction {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
