//! Money formatting for display. Never feed these strings back into arithmetic.

const YEN_SIGN: char = '￥';

/// Formats an amount the way ja-JP renders JPY: `￥1,500,000`, no decimals.
pub fn format_yen(value: f64) -> String {
    if !value.is_finite() {
        return format!("{YEN_SIGN}{value}");
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{YEN_SIGN}{}", group_thousands(rounded.abs()))
}

fn group_thousands(whole: f64) -> String {
    let digits = format!("{whole:.0}");
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
