//! Helvetica metrics for laying out text without a font file.
//!
//! Both backends draw text in Helvetica (PDF standard font, SVG font stack
//! starting with Helvetica), so widths come from its AFM advance table.

/// Cap height as a fraction of the font size.
pub const CAP_HEIGHT: f64 = 0.718;
/// Descender depth as a fraction of the font size.
pub const DESCENT: f64 = 0.207;
/// Superscript size relative to the base text.
pub const SUPERSCRIPT_SCALE: f64 = 0.7;
/// Superscript baseline rise relative to the base font size.
pub const SUPERSCRIPT_RISE: f64 = 0.45;

/// Advance width of `c` in 1/1000 em.
fn advance(c: char) -> u16 {
    match c {
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | '[' | ']' | '\\' | 'f' | 't' => 278,
        '(' | ')' | '-' | '`' | 'r' => 333,
        '"' => 355,
        '#' | '$' | '0'..='9' | '?' | '_' => 556,
        '%' => 889,
        '&' => 667,
        '\'' => 191,
        '*' => 389,
        '+' | '<' | '=' | '>' | '~' => 584,
        '@' => 1015,
        '^' => 469,
        '{' | '}' => 334,
        '|' => 260,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 722,
        'F' | 'T' | 'Z' => 611,
        'G' | 'O' | 'Q' => 778,
        'I' => 278,
        'J' | 'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 500,
        'L' => 556,
        'M' | 'm' => 833,
        'W' => 944,
        'i' | 'j' | 'l' => 222,
        'w' => 722,
        'a' | 'b' | 'd' | 'e' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 556,
        _ => 556,
    }
}

/// Width of `text` set at `size` points.
#[must_use]
pub fn text_width(text: &str, size: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(advance(c))).sum();
    f64::from(units) / 1000.0 * size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_width() {
        assert!((text_width("100", 10.0) - 16.68).abs() < 1e-9);
    }

    #[test]
    fn test_label_width() {
        let w = text_width("Detection Ratio", 8.0);
        assert!(w > 50.0 && w < 65.0, "{w}");
        assert_eq!(text_width("", 8.0), 0.0);
    }
}
