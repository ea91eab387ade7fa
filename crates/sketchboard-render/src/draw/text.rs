use super::{DrawStatus, rounded_rect_path, with_rotation};
use crate::error::RenderResult;
use crate::painter::{Painter, TextBaseline};
use kurbo::Point;
use sketchboard_core::element::{Element, TextAlign, TextDesc};

/// Break `text` into lines no wider than `max_width` in the painter's current
/// font.
///
/// Explicit newlines always break. Lines wrap at character boundaries, so CJK
/// text and long words wrap too; a single character wider than `max_width`
/// still gets its own line.
pub fn wrap_text(painter: &mut dyn Painter, text: &str, max_width: f64) -> RenderResult<Vec<String>> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for ch in paragraph.chars() {
            line.push(ch);
            if painter.measure_text(&line)? > max_width && line.chars().count() > 1 {
                line.pop();
                lines.push(std::mem::take(&mut line));
                line.push(ch);
            }
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Draw the optional background box and border, then the wrapped text
/// centred vertically in the element box.
pub fn draw_text(painter: &mut dyn Painter, elem: &Element, desc: &TextDesc) -> RenderResult<DrawStatus> {
    with_rotation(painter, elem, |p| {
        let rect = elem.rect();
        if let Some(bg) = &desc.bg_color {
            rounded_rect_path(p, rect, desc.border_radius)?;
            p.set_fill_style(bg);
            p.fill();
        }
        if desc.border_width > 0.0 {
            let inset = desc.border_width / 2.0;
            rounded_rect_path(p, rect.inset(-inset), (desc.border_radius - inset).max(0.0))?;
            p.set_line_width(desc.border_width);
            p.set_stroke_style(&desc.border_color);
            p.stroke();
        }

        if desc.text.is_empty() || desc.font_size <= 0.0 {
            return Ok(DrawStatus::Drawn);
        }

        p.set_font(&desc.font());
        p.set_fill_style(&desc.color);
        p.set_text_align(desc.text_align);
        p.set_text_baseline(TextBaseline::Top);

        let lines = wrap_text(p, &desc.text, elem.w)?;
        let line_height = desc.line_height();
        let total = line_height * lines.len() as f64;
        let top = rect.y0 + (rect.height() - total) / 2.0;
        // Glyphs sit in the middle of their line box.
        let glyph_offset = (line_height - desc.font_size) / 2.0;
        let x = match desc.text_align {
            TextAlign::Left => rect.x0,
            TextAlign::Center => rect.center().x,
            TextAlign::Right => rect.x1,
        };
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = top + line_height * i as f64 + glyph_offset;
            p.fill_text(line, Point::new(x, y))?;
        }
        Ok(DrawStatus::Drawn)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingPainter};

    fn filled_text(painter: &RecordingPainter) -> Vec<(String, Point)> {
        painter
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText(text, at) => Some((text.clone(), *at)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_wrap_by_width() {
        // 10px font: each glyph is 6px wide.
        let mut painter = RecordingPainter::new();
        painter.set_font("10px sans-serif");
        let lines = wrap_text(&mut painter, "abcdefgh", 30.0).unwrap();
        assert_eq!(lines, vec!["abcde".to_string(), "fgh".to_string()]);
    }

    #[test]
    fn test_wrap_keeps_newlines() {
        let mut painter = RecordingPainter::new();
        painter.set_font("10px sans-serif");
        let lines = wrap_text(&mut painter, "ab\n\ncd", 100.0).unwrap();
        assert_eq!(lines, vec!["ab".to_string(), String::new(), "cd".to_string()]);
    }

    #[test]
    fn test_wrap_narrow_box_one_char_per_line() {
        let mut painter = RecordingPainter::new();
        painter.set_font("10px sans-serif");
        let lines = wrap_text(&mut painter, "abc", 1.0).unwrap();
        assert_eq!(lines, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_text_centred_vertically() {
        let mut desc = TextDesc::new("abcdefgh");
        desc.font_size = 10.0;
        desc.line_height = Some(20.0);
        let elem = Element::new(0.0, 0.0, 30.0, 100.0, desc.clone());
        let mut painter = RecordingPainter::new();
        draw_text(&mut painter, &elem, &desc).unwrap();

        let texts = filled_text(&painter);
        assert_eq!(texts.len(), 2);
        // Two 20px lines in a 100px box start at 30; glyphs offset by 5.
        assert!((texts[0].1.y - 35.0).abs() < 1e-9);
        assert!((texts[1].1.y - 55.0).abs() < 1e-9);
        assert!(texts[0].1.x.abs() < 1e-9);
    }

    #[test]
    fn test_alignment_anchor() {
        let mut desc = TextDesc::new("hi");
        desc.text_align = TextAlign::Right;
        let elem = Element::new(10.0, 0.0, 50.0, 20.0, desc.clone());
        let mut painter = RecordingPainter::new();
        draw_text(&mut painter, &elem, &desc).unwrap();
        assert!(painter.commands().contains(&DrawCommand::TextAlign(TextAlign::Right)));
        let texts = filled_text(&painter);
        assert!((texts[0].1.x - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_background_box() {
        let mut desc = TextDesc::new("");
        desc.bg_color = Some("#eeeeee".into());
        let elem = Element::new(0.0, 0.0, 50.0, 20.0, desc.clone());
        let mut painter = RecordingPainter::new();
        assert_eq!(draw_text(&mut painter, &elem, &desc).unwrap(), DrawStatus::Drawn);
        assert!(painter.commands().contains(&DrawCommand::FillStyle("#eeeeee".into())));
        assert!(filled_text(&painter).is_empty());
    }
}
