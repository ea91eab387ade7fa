use super::{DrawStatus, with_rotation};
use crate::error::RenderResult;
use crate::painter::Painter;
use crate::resource::ResourceSource;
use sketchboard_core::element::{Element, HtmlDesc, ImageDesc, SvgDesc};

fn draw_source(painter: &mut dyn Painter, elem: &Element, source: ResourceSource<'_>) -> RenderResult<DrawStatus> {
    let url = source.to_url();
    with_rotation(painter, elem, |p| {
        if p.draw_image(&elem.uuid, &url, elem.rect())? {
            Ok(DrawStatus::Drawn)
        } else {
            Ok(DrawStatus::Pending)
        }
    })
}

/// Draw a raster image stretched to the element box.
pub fn draw_image(painter: &mut dyn Painter, elem: &Element, desc: &ImageDesc) -> RenderResult<DrawStatus> {
    draw_source(painter, elem, ResourceSource::Url(&desc.src))
}

/// Draw inline svg markup stretched to the element box.
pub fn draw_svg(painter: &mut dyn Painter, elem: &Element, desc: &SvgDesc) -> RenderResult<DrawStatus> {
    draw_source(painter, elem, ResourceSource::Svg(&desc.svg))
}

/// Draw inline html, rendered through an svg `foreignObject`.
pub fn draw_html(painter: &mut dyn Painter, elem: &Element, desc: &HtmlDesc) -> RenderResult<DrawStatus> {
    draw_source(
        painter,
        elem,
        ResourceSource::Html {
            html: &desc.html,
            width: desc.width.unwrap_or(elem.w),
            height: desc.height.unwrap_or(elem.h),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingPainter};
    use crate::resource::svg_data_url;
    use kurbo::Rect;

    #[test]
    fn test_image_pending_then_drawn() {
        let desc = ImageDesc { src: "cat.png".into() };
        let elem = Element::new(5.0, 5.0, 20.0, 10.0, desc.clone());
        let mut painter = RecordingPainter::new();
        assert_eq!(draw_image(&mut painter, &elem, &desc).unwrap(), DrawStatus::Pending);
        painter.mark_loaded("cat.png");
        assert_eq!(draw_image(&mut painter, &elem, &desc).unwrap(), DrawStatus::Drawn);
        assert!(painter.commands().contains(&DrawCommand::DrawImage(
            "cat.png".into(),
            Rect::new(5.0, 5.0, 25.0, 15.0)
        )));
        assert_eq!(painter.depth(), 0);
    }

    #[test]
    fn test_svg_drawn_from_data_url() {
        let desc = SvgDesc { svg: "<svg/>".into() };
        let elem = Element::new(0.0, 0.0, 10.0, 10.0, desc.clone());
        let mut painter = RecordingPainter::new().with_all_images_loaded();
        draw_svg(&mut painter, &elem, &desc).unwrap();
        let url = svg_data_url("<svg/>");
        assert_eq!(painter.count(|c| matches!(c, DrawCommand::DrawImage(u, _) if *u == url)), 1);
    }

    #[test]
    fn test_failed_load_restores_state() {
        let desc = HtmlDesc {
            html: "<p>x</p>".into(),
            ..HtmlDesc::default()
        };
        let elem = Element::new(0.0, 0.0, 10.0, 10.0, desc.clone()).with_angle(45.0);
        let url = ResourceSource::from_element(&elem).unwrap().to_url();
        let mut painter = RecordingPainter::new();
        painter.fail_image(url);
        assert!(draw_html(&mut painter, &elem, &desc).is_err());
        assert_eq!(painter.depth(), 0);
    }

    #[test]
    fn test_resized_html_keeps_last_image_until_reloaded() {
        use kurbo::Point;
        use sketchboard_core::data::Data;
        use sketchboard_core::helper::DotPosition;
        use sketchboard_core::manipulate::transform_element;

        let desc = HtmlDesc {
            html: "<p>hi</p>".into(),
            ..HtmlDesc::default()
        };
        let mut data = Data::new();
        data.add_element(Element::new(0.0, 0.0, 100.0, 50.0, desc.clone()).with_uuid("h"));
        let first_url = ResourceSource::from_element(data.get("h").unwrap()).unwrap().to_url();

        let mut painter = RecordingPainter::new();
        painter.mark_loaded(first_url.clone());
        assert_eq!(draw_html(&mut painter, data.get("h").unwrap(), &desc).unwrap(), DrawStatus::Drawn);

        for step in 1..=5 {
            let x = 100.0 + step as f64;
            let (point, prev) = (Point::new(x, 50.0), Point::new(x - 1.0, 50.0));
            transform_element(&mut data, "h", DotPosition::BottomRight, point, prev, 1.0).unwrap();
            let elem = data.get("h").unwrap();
            assert!((elem.w - x).abs() < 1e-9);
            assert_eq!(draw_html(&mut painter, elem, &desc).unwrap(), DrawStatus::Drawn);
            assert_eq!(
                painter.commands().last(),
                Some(&DrawCommand::DrawImage(first_url.clone(), elem.rect()))
            );
        }
        assert_eq!(painter.shown_keys(), 1);
    }
}
