fn group_thousands(int_part: u64) -> String {
    let digits = int_part.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two decimals with thousands separators: `4,200.50`.
pub fn format_number(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

pub fn format_price(price: f64) -> String {
    format!("${}", format_number(price))
}

pub fn format_signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

pub fn format_pct(pct: f64) -> String {
    format!("{}%", format_signed(pct))
}

/// Card line: `+2.15 (+1.24%)`.
pub fn format_change_line(change: f64, pct: f64) -> String {
    format!("{} ({})", format_signed(change), format_pct(pct))
}

/// Detail panel line: `▲ 2.15 (+1.24%)`.
pub fn format_arrow_change(change: f64, pct: f64) -> String {
    let arrow = if change >= 0.0 { "▲" } else { "▼" };
    format!("{} {:.2} ({})", arrow, change, format_pct(pct))
}

/// One-decimal index move: `+1.2%`.
pub fn format_index_change(change: f64) -> String {
    if change >= 0.0 {
        format!("+{:.1}%", change)
    } else {
        format!("{:.1}%", change)
    }
}

pub fn format_gain(gain: f64) -> String {
    if gain >= 0.0 {
        format!("+${:.2}", gain)
    } else {
        format!("-${:.2}", gain.abs())
    }
}

pub fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len < 4 {
        return s.chars().take(max_len).collect();
    }
    if s.chars().count() > max_len {
        let end = s
            .char_indices()
            .nth(max_len - 3)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        format!("{}...", &s[..end])
    } else {
        s.to_string()
    }
}

pub fn format_relative_time(unix_ts: i64) -> String {
    if unix_ts <= 0 {
        return String::new();
    }
    let elapsed_secs = chrono::Utc::now().timestamp() - unix_ts;
    if elapsed_secs < 0 {
        return "just now".to_string();
    }
    let mins = elapsed_secs / 60;
    let hours = mins / 60;
    let days = hours / 24;
    match () {
        _ if days > 0 => format!("{}d ago", days),
        _ if hours > 0 => format!("{}h ago", hours),
        _ if mins > 0 => format!("{}m ago", mins),
        _ => "just now".to_string(),
    }
}
