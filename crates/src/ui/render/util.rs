use unicode_width::UnicodeWidthChar;

// Cut `line` to at most `width` terminal columns, then pad with spaces to exactly `width`.
pub fn fit_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0usize;
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

// Truncate or pad the line list so it occupies exactly `per` lines.
pub fn normalize_and_pad(mut lines: Vec<String>, total_width: usize, per: usize) -> String {
    lines.truncate(per);
    while lines.len() < per {
        lines.push(" ".repeat(total_width));
    }
    lines.join("\n")
}
