// File: crates/perfchart-core/src/text.rs
// Summary: Deterministic text metrics used for layout, independent of installed fonts.
// Notes:
// - Widths are average advances of a serif face (Times-like) in em units.
// - Layout reads only these tables, never the fonts installed on the host.

/// Ascent above the baseline, in em.
pub const ASCENT: f32 = 0.72;
/// Descent below the baseline, in em.
pub const DESCENT: f32 = 0.22;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Offset from the anchor to the start of a run of `width`.
    pub fn start_offset(&self, width: f32) -> f32 {
        match self {
            Align::Left => 0.0,
            Align::Center => -width / 2.0,
            Align::Right => -width,
        }
    }
}

fn advance(c: char) -> f32 {
    match c {
        ' ' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' | 'i' | 'j' | 'l' => 0.28,
        '(' | ')' | '[' | ']' | 'f' | 't' | 'r' | 'I' | '-' => 0.33,
        '0'..='9' => 0.5,
        'm' | 'w' => 0.75,
        'M' | 'W' | '%' => 0.85,
        c if c.is_uppercase() => 0.68,
        c if c.is_lowercase() => 0.47,
        _ => 0.55,
    }
}

/// Approximate advance width of `text` at `size` points.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().map(advance).sum::<f32>() * size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_scale_linearly() {
        let w13 = text_width("Probabilidade (%)", 13.0);
        let w26 = text_width("Probabilidade (%)", 26.0);
        assert!((w26 - 2.0 * w13).abs() < 1e-3);
        assert!(text_width("WWW", 10.0) > text_width("iii", 10.0));
        assert_eq!(text_width("", 10.0), 0.0);
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(Align::Left.start_offset(10.0), 0.0);
        assert_eq!(Align::Center.start_offset(10.0), -5.0);
        assert_eq!(Align::Right.start_offset(10.0), -10.0);
    }
}
