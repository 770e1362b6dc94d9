/// Greedy word wrap; never returns an empty list.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = if line.is_empty() { word.len() } else { line.len() + 1 + word.len() };
        if !line.is_empty() && needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Cuts `s` to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    match max_chars {
        0 => String::new(),
        n => s.chars().take(n - 1).chain(std::iter::once('…')).collect(),
    }
}

/// Formats a feature value for display; `None` renders as a dash.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if v != 0.0 && (v.abs() >= 1e6 || v.abs() < 1e-3) => format!("{v:.4e}"),
        Some(v) => format!("{v:.6}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap("unknown element", 40), vec!["unknown element"]);
    }

    #[test]
    fn wrap_breaks_between_words() {
        assert_eq!(
            wrap("row 3 has no composition value", 12),
            vec!["row 3 has no", "composition", "value"]
        );
    }

    #[test]
    fn wrap_of_blank_text_is_one_empty_line() {
        assert_eq!(wrap("   ", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_leaves_fitting_text_alone() {
        assert_eq!(truncate("Fe0.6Ni0.4", 10), "Fe0.6Ni0.4");
    }

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("Fe0.6Ni0.4", 6), "Fe0.6…");
        assert_eq!(truncate("Fe0.6Ni0.4", 1), "…");
        assert_eq!(truncate("Fe0.6Ni0.4", 0), "");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("Å·Å·Å", 4), "Å·Å…");
    }

    #[test]
    fn format_value_switches_to_scientific_for_extremes() {
        assert_eq!(format_value(Some(9.0)), "9.000000");
        assert_eq!(format_value(Some(0.0)), "0.000000");
        assert_eq!(format_value(Some(3695.0)), "3695.000000");
        assert_eq!(format_value(Some(2.5e-5)), "2.5000e-5");
        assert_eq!(format_value(None), "-");
    }
}
