// File: crates/perfchart-core/src/backend/eps.rs
// Summary: Encapsulated PostScript writer for scenes.
// Notes:
// - Output is 7-bit ASCII; Latin-1 text is emitted through an ISOLatin1
//   re-encoded copy of a standard font, other characters become '?'.
// - PostScript has no alpha channel: translucent colors are composited over white.
// - No timestamps are written, so identical scenes give identical bytes.

use std::fmt::{self, Write};

use crate::color::Color;
use crate::geometry::Rect;
use crate::scene::{PathShape, Scene, Shape, Stroke, TextShape};
use crate::text::Align;

const PROLOG: &str = "\
/pcdict 16 dict def
pcdict begin
/m /moveto load def
/l /lineto load def
/cp /closepath load def
/rgb /setrgbcolor load def
/lw /setlinewidth load def
/ds /setdash load def
/reencode {
  findfont dup length dict begin
    { 1 index /FID ne { def } { pop pop } ifelse } forall
    /Encoding ISOLatin1Encoding def
    currentdict
  end definefont pop
} bind def
/showc { dup stringwidth pop 2 div neg 0 rmoveto show } bind def
/showr { dup stringwidth pop neg 0 rmoveto show } bind def
end
";

/// Map a font family onto one of the standard 35 PostScript fonts.
pub fn postscript_font(family: &str) -> &'static str {
    let f = family.to_ascii_lowercase();
    if f.contains("courier") || f.contains("mono") {
        "Courier"
    } else if f.contains("arial") || f.contains("helvetica") || f.contains("sans") {
        "Helvetica"
    } else {
        "Times-Roman"
    }
}

/// Fixed-precision number without trailing zeros.
fn num(v: f32) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-0" => "0".to_string(),
        s => s.to_string(),
    }
}

/// PostScript string literal. Latin-1 goes out as octal escapes.
fn ps_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('(');
    for c in s.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            c if (c as u32) < 256 => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out.push(')');
    out
}

struct Writer<'a> {
    out: String,
    page: &'a Rect,
}

impl Writer<'_> {
    fn xy(&self, x: f32, y: f32) -> String {
        format!("{} {}", num(x - self.page.left), num(self.page.bottom - y))
    }

    fn color(&mut self, c: Color) -> fmt::Result {
        let (r, g, b) = if c.is_opaque() { c } else { c.over(Color::WHITE) }.unit_rgb();
        writeln!(self.out, "{} {} {} rgb", num(r), num(g), num(b))
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) -> fmt::Result {
        self.color(color)?;
        writeln!(
            self.out,
            "{} {} {} rectfill",
            self.xy(rect.left, rect.bottom),
            num(rect.width()),
            num(rect.height())
        )
    }

    fn stroke_style(&mut self, s: &Stroke) -> fmt::Result {
        self.color(s.color)?;
        let dash = s
            .dash
            .as_ref()
            .map(|d| d.iter().map(|v| num(*v)).collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        writeln!(self.out, "{} lw [{}] 0 ds", num(s.width), dash)
    }

    fn path(&mut self, p: &PathShape) -> fmt::Result {
        if p.subpaths.iter().all(|sp| sp.is_empty()) {
            return Ok(());
        }
        writeln!(self.out, "newpath")?;
        for sp in &p.subpaths {
            let Some((first, rest)) = sp.split_first() else { continue };
            let mut line = format!("{} m", self.xy(first.x, first.y));
            for pt in rest {
                line.push_str(&format!(" {} l", self.xy(pt.x, pt.y)));
            }
            if p.closed {
                line.push_str(" cp");
            }
            writeln!(self.out, "{line}")?;
        }
        match (&p.fill, &p.stroke) {
            (Some(fill), Some(stroke)) => {
                writeln!(self.out, "gsave")?;
                self.color(*fill)?;
                writeln!(self.out, "fill grestore")?;
                self.stroke_style(stroke)?;
                writeln!(self.out, "stroke")
            }
            (Some(fill), None) => {
                self.color(*fill)?;
                writeln!(self.out, "fill")
            }
            (None, Some(stroke)) => {
                self.stroke_style(stroke)?;
                writeln!(self.out, "stroke")
            }
            (None, None) => writeln!(self.out, "newpath"),
        }
    }

    fn text(&mut self, t: &TextShape) -> fmt::Result {
        if t.text.is_empty() {
            return Ok(());
        }
        self.color(t.color)?;
        let show = match t.align {
            Align::Left => "show",
            Align::Center => "showc",
            Align::Right => "showr",
        };
        writeln!(self.out, "/PCFont findfont {} scalefont setfont", num(t.size))?;
        let s = ps_string(&t.text);
        if t.vertical {
            writeln!(
                self.out,
                "gsave {} translate 90 rotate 0 0 m {s} {show} grestore",
                self.xy(t.at.x, t.at.y)
            )
        } else {
            writeln!(self.out, "{} m {s} {show}", self.xy(t.at.x, t.at.y))
        }
    }
}

/// Render the `page` region of `scene` as a single-page EPS file.
pub fn encode(scene: &Scene, page: Rect, dpi: f32) -> Result<Vec<u8>, fmt::Error> {
    let mut w = Writer { out: String::new(), page: &page };
    let (pw, ph) = (page.width(), page.height());

    writeln!(w.out, "%!PS-Adobe-3.0 EPSF-3.0")?;
    writeln!(w.out, "%%Creator: perfchart")?;
    writeln!(w.out, "%%BoundingBox: 0 0 {} {}", pw.ceil() as i64, ph.ceil() as i64)?;
    writeln!(w.out, "%%HiResBoundingBox: 0 0 {} {}", num(pw), num(ph))?;
    writeln!(w.out, "%%LanguageLevel: 2")?;
    writeln!(w.out, "%%Pages: 1")?;
    writeln!(w.out, "%%Orientation: Portrait")?;
    writeln!(w.out, "%%DocumentNeededResources: font {}", postscript_font(&scene.font_family))?;
    writeln!(w.out, "% Resolution: {} dpi", num(dpi))?;
    writeln!(w.out, "%%EndComments")?;
    writeln!(w.out, "%%BeginProlog")?;
    w.out.push_str(PROLOG);
    writeln!(w.out, "%%EndProlog")?;
    writeln!(w.out, "%%Page: 1 1")?;
    writeln!(w.out, "pcdict begin")?;
    writeln!(w.out, "/PCFont /{} reencode", postscript_font(&scene.font_family))?;
    writeln!(w.out, "gsave")?;
    writeln!(w.out, "1 setlinejoin 0 setlinecap")?;

    if let Some(bg) = scene.background {
        w.fill_rect(&page, bg)?;
    }
    for shape in &scene.shapes {
        match shape {
            Shape::Fill { rect, color } => w.fill_rect(rect, *color)?,
            Shape::Path(p) => w.path(p)?,
            Shape::Text(t) => w.text(t)?,
        }
    }

    writeln!(w.out, "grestore")?;
    writeln!(w.out, "end")?;
    writeln!(w.out, "showpage")?;
    writeln!(w.out, "%%Trailer")?;
    writeln!(w.out, "%%EOF")?;
    Ok(w.out.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(12.3456), "12.346");
        assert_eq!(num(-0.0001), "0");
    }

    #[test]
    fn strings_escape_parens_and_latin1() {
        assert_eq!(ps_string("Probabilidade (%)"), "(Probabilidade \\(%\\))");
        assert_eq!(ps_string("sub-ótimo"), "(sub-\\363timo)");
        assert_eq!(ps_string("a\\b"), "(a\\\\b)");
        assert_eq!(ps_string("σ"), "(?)");
    }

    #[test]
    fn font_families_map_to_standard_fonts() {
        assert_eq!(postscript_font("Times New Roman"), "Times-Roman");
        assert_eq!(postscript_font("Arial"), "Helvetica");
        assert_eq!(postscript_font("DejaVu Sans Mono"), "Courier");
    }

    #[test]
    fn header_declares_page_size_and_y_is_flipped() {
        let scene = Scene {
            width: 100.0,
            height: 50.0,
            background: None,
            font_family: "Times New Roman".into(),
            shapes: vec![Shape::Fill {
                rect: Rect::from_ltrb(10.0, 10.0, 20.0, 20.0),
                color: Color::BLACK,
            }],
        };
        let page = Rect::from_ltwh(0.0, 0.0, 100.0, 50.0);
        let eps = String::from_utf8(encode(&scene, page, 300.0).unwrap()).unwrap();
        assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n"));
        assert!(eps.contains("%%BoundingBox: 0 0 100 50\n"));
        // Bottom-left corner of the rect is (10, 20) in scene space -> (10, 30) in PostScript.
        assert!(eps.contains("10 30 10 10 rectfill"));
        assert!(eps.trim_end().ends_with("%%EOF"));
        assert!(eps.is_ascii());
    }
}
