//! Display formatting for ranked results

/// Round to a whole number and group digits by thousands: `1936259.4` → `1,936,259`.
pub fn thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.round());
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) if rest != "0" => ("-", rest),
        Some(rest) => ("", rest),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

/// `$` plus a thousands-grouped whole amount: `250000.0` → `$250,000`.
pub fn dollars(value: f64) -> String {
    let grouped = thousands(value);
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", grouped),
    }
}

/// A ratio as a one-decimal percentage: `0.0873` → `8.7%`.
pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Render rows as an HTML table. Cells are emitted verbatim so anchor markup stays live.
pub fn html_table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table border=\"1\" class=\"dataframe\">\n  <thead>\n    <tr>");
    for column in columns {
        html.push_str(&format!("<th>{}</th>", column));
    }
    html.push_str("</tr>\n  </thead>\n  <tbody>\n");
    for row in rows {
        html.push_str("    <tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("  </tbody>\n</table>");
    html
}
