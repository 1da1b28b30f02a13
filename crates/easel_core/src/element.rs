//! Elements and per-kind drawing
//!
//! An element is a tagged shape record: an [`ElementKind`] plus an
//! [`Attributes`] payload. Rendering dispatches on the kind with an
//! exhaustive `match`, so adding a kind without a drawing routine does not
//! compile. Kinds arriving as strings are validated once, at creation.

use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use easel_paint::{
    Color, DrawContext, FillStyle, Path, PathBuilder, Point, ScopedTransform, Size, StrokeStyle,
    TextBaseline, TextStyle, Transform2D,
};
use slotmap::new_key_type;

use crate::attributes::Attributes;
use crate::error::{CanvasError, Result};
use crate::layer::LayerId;
use crate::normalize::Normalizer;

new_key_type! {
    /// Handle to an element owned by a canvas
    pub struct ElementId;
}

/// Default font size in logical units
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Default font family
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// The fixed set of drawable element kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Line,
    Rect,
    Circle,
    Ellipse,
    Polygon,
    Text,
    Image,
}

impl ElementKind {
    pub const ALL: [ElementKind; 7] = [
        ElementKind::Line,
        ElementKind::Rect,
        ElementKind::Circle,
        ElementKind::Ellipse,
        ElementKind::Polygon,
        ElementKind::Text,
        ElementKind::Image,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Line => "line",
            ElementKind::Rect => "rect",
            ElementKind::Circle => "circle",
            ElementKind::Ellipse => "ellipse",
            ElementKind::Polygon => "polygon",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CanvasError::InvalidElementKind(s.to_string()))
    }
}

/// A shape record bound to exactly one layer
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    kind: ElementKind,
    attributes: Attributes,
    layer: LayerId,
}

impl Element {
    pub(crate) fn new(kind: ElementKind, attributes: Attributes, layer: LayerId) -> Self {
        Self {
            kind,
            attributes,
            layer,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// The layer whose stack holds this element
    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// Draw the element into `ctx`, mapping logical units through `normalizer`
    pub fn render(&self, ctx: &mut dyn DrawContext, normalizer: &Normalizer) -> Result<()> {
        tracing::trace!(kind = %self.kind, "render element");
        let attrs = &self.attributes;
        match self.kind {
            ElementKind::Line => draw_line(attrs, ctx, normalizer),
            ElementKind::Rect => draw_rect(attrs, ctx, normalizer),
            ElementKind::Circle => draw_circle(attrs, ctx, normalizer),
            ElementKind::Ellipse => draw_ellipse(attrs, ctx, normalizer),
            ElementKind::Polygon => draw_polygon(attrs, ctx, normalizer),
            ElementKind::Text => draw_text(attrs, ctx, normalizer),
            ElementKind::Image => draw_image(attrs, ctx, normalizer),
        }
    }

    /// Move the anchor to (x, y) in logical units.
    ///
    /// Lines keep their length and direction, polygons translate rigidly;
    /// every other kind only has its anchor replaced.
    pub(crate) fn move_anchor(&mut self, x: f32, y: f32, logical: Size) {
        let attrs = &mut self.attributes;
        let old = attrs.origin();

        match self.kind {
            ElementKind::Line => {
                let end = line_end(attrs, logical);
                attrs.end_x = Some(end.x + (x - old.x));
                attrs.end_y = Some(end.y + (y - old.y));
            }
            ElementKind::Polygon => {
                if let Some(&[first_x, first_y]) = attrs.points.first() {
                    let (dx, dy) = (x - first_x, y - first_y);
                    for point in attrs.points.iter_mut().skip(1) {
                        point[0] += dx;
                        point[1] += dy;
                    }
                    attrs.points[0] = [x, y];
                }
            }
            ElementKind::Rect
            | ElementKind::Circle
            | ElementKind::Ellipse
            | ElementKind::Text
            | ElementKind::Image => {}
        }

        attrs.x = Some(x);
        attrs.y = Some(y);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Drawing routines
// ─────────────────────────────────────────────────────────────────────────────

fn line_end(attrs: &Attributes, logical: Size) -> Point {
    Point::new(
        attrs.end_x.unwrap_or(logical.width),
        attrs.end_y.unwrap_or(logical.height),
    )
}

/// Fill with `fill` (or `color`), stroke with `stroke`; a shape with neither
/// gets the default black fill.
fn apply_style(ctx: &mut dyn DrawContext, path: &Path, attrs: &Attributes, n: &Normalizer) {
    let fill = attrs.fill.or(attrs.color);

    if let Some(color) = fill {
        ctx.fill_path(path, &FillStyle::from(color));
    }
    if let Some(color) = attrs.stroke {
        ctx.stroke_path(
            path,
            &StrokeStyle {
                color,
                width: n.normalize_radius(attrs.stroke_width.unwrap_or(1.0)),
            },
        );
    }
    if fill.is_none() && attrs.stroke.is_none() {
        ctx.fill_path(path, &FillStyle::default());
    }
}

fn draw_line(attrs: &Attributes, ctx: &mut dyn DrawContext, n: &Normalizer) -> Result<()> {
    let start = n.normalize_point(attrs.origin());
    let end = n.normalize_point(line_end(attrs, n.logical()));

    let path = PathBuilder::new()
        .move_to(start.x, start.y)
        .line_to(end.x, end.y)
        .build();

    let style = StrokeStyle {
        color: attrs.color.or(attrs.stroke).unwrap_or(Color::BLACK),
        width: n.normalize_radius(attrs.stroke_width.unwrap_or(1.0)),
    };
    ctx.stroke_path(&path, &style);
    Ok(())
}

fn draw_rect(attrs: &Attributes, ctx: &mut dyn DrawContext, n: &Normalizer) -> Result<()> {
    let width = attrs
        .width
        .ok_or_else(|| CanvasError::missing(ElementKind::Rect, "width"))?;
    let height = attrs
        .height
        .ok_or_else(|| CanvasError::missing(ElementKind::Rect, "height"))?;

    let origin = n.normalize_point(attrs.origin());
    let size = n.normalize_size(Size::new(width, height));

    let path = PathBuilder::new()
        .rect(origin.x, origin.y, size.width, size.height)
        .build();
    apply_style(ctx, &path, attrs, n);
    Ok(())
}

fn draw_circle(attrs: &Attributes, ctx: &mut dyn DrawContext, n: &Normalizer) -> Result<()> {
    let radius = attrs
        .radius
        .ok_or_else(|| CanvasError::missing(ElementKind::Circle, "radius"))?;
    circle_at(attrs.origin(), radius, attrs, ctx, n);
    Ok(())
}

/// Shared by circles and equal-radius ellipses
fn circle_at(
    center: Point,
    radius: f32,
    attrs: &Attributes,
    ctx: &mut dyn DrawContext,
    n: &Normalizer,
) {
    let center = n.normalize_point(center);
    let path = PathBuilder::new()
        .arc(center.x, center.y, n.normalize_radius(radius), 0.0, TAU)
        .build();
    apply_style(ctx, &path, attrs, n);
}

fn draw_ellipse(attrs: &Attributes, ctx: &mut dyn DrawContext, n: &Normalizer) -> Result<()> {
    let radius_x = attrs
        .radius_x
        .ok_or_else(|| CanvasError::missing(ElementKind::Ellipse, "radius_x"))?;
    let radius_y = attrs
        .radius_y
        .ok_or_else(|| CanvasError::missing(ElementKind::Ellipse, "radius_y"))?;

    if radius_x == radius_y {
        circle_at(attrs.origin(), radius_x, attrs, ctx, n);
        return Ok(());
    }

    let minor = radius_x.min(radius_y);
    if minor <= 0.0 {
        tracing::trace!(radius_x, radius_y, "skipping degenerate ellipse");
        return Ok(());
    }

    // Stretch a circle of the minor radius along the major axis.
    let (sx, sy) = if radius_x > radius_y {
        (radius_x / radius_y, 1.0)
    } else {
        (1.0, radius_y / radius_x)
    };

    // Fill and stroke are both issued under the scale, so a stroke widens
    // along the major axis.
    let center = n.normalize_point(attrs.origin());
    let mut scope = ScopedTransform::new(ctx, Transform2D::scale(sx, sy));
    let path = PathBuilder::new()
        .arc(
            center.x / sx,
            center.y / sy,
            n.normalize_radius(minor),
            0.0,
            TAU,
        )
        .build();
    apply_style(&mut *scope, &path, attrs, n);
    Ok(())
}

fn draw_polygon(attrs: &Attributes, ctx: &mut dyn DrawContext, n: &Normalizer) -> Result<()> {
    let [first, rest @ ..] = attrs.points.as_slice() else {
        return Ok(());
    };
    if rest.is_empty() {
        tracing::trace!("skipping single-point polygon");
        return Ok(());
    }

    let start = n.normalize_point(Point::from(*first));
    let mut builder = PathBuilder::new().move_to(start.x, start.y);
    for point in rest {
        let to = n.normalize_point(Point::from(*point));
        builder = builder.line_to(to.x, to.y);
    }
    let path = builder.line_to(start.x, start.y).close().build();

    apply_style(ctx, &path, attrs, n);
    Ok(())
}

fn draw_text(attrs: &Attributes, ctx: &mut dyn DrawContext, n: &Normalizer) -> Result<()> {
    let text = attrs
        .text
        .as_deref()
        .ok_or_else(|| CanvasError::missing(ElementKind::Text, "text"))?;

    let style = TextStyle {
        size: n.normalize_y(attrs.size.unwrap_or(DEFAULT_FONT_SIZE)),
        family: attrs
            .font
            .clone()
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
        color: attrs.color.or(attrs.fill).unwrap_or(Color::BLACK),
        align: attrs.align.unwrap_or_default(),
        baseline: TextBaseline::Top,
    };
    ctx.fill_text(text, n.normalize_point(attrs.origin()), &style);
    Ok(())
}

fn draw_image(attrs: &Attributes, ctx: &mut dyn DrawContext, n: &Normalizer) -> Result<()> {
    let image = attrs
        .image
        .as_ref()
        .ok_or_else(|| CanvasError::missing(ElementKind::Image, "image"))?;
    ctx.draw_image(image, n.normalize_point(attrs.origin()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_paint::{PaintCommand, PaintContext, PathCommand, TextAlign};

    fn normalizer(scale: f32) -> Normalizer {
        Normalizer::new(Size::new(100.0, 100.0), Size::new(100.0, 100.0).scale(scale))
    }

    fn render(kind: ElementKind, attrs: Attributes) -> Result<Vec<PaintCommand>> {
        let element = Element::new(kind, attrs, LayerId::new(1));
        let mut ctx = PaintContext::new();
        element.render(&mut ctx, &normalizer(1.0))?;
        Ok(ctx.take_commands())
    }

    fn only_path(commands: &[PaintCommand]) -> &[PathCommand] {
        match commands {
            [PaintCommand::FillPath { path, .. }] | [PaintCommand::StrokePath { path, .. }] => {
                path.commands()
            }
            other => panic!("expected a single path command, got {other:?}"),
        }
    }

    #[test]
    fn test_kind_from_str() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.name().parse::<ElementKind>().unwrap(), kind);
        }
        let err = "hexagon".parse::<ElementKind>().unwrap_err();
        assert!(matches!(err, CanvasError::InvalidElementKind(name) if name == "hexagon"));
        assert!("Rect".parse::<ElementKind>().is_err());
    }

    #[test]
    fn test_line_defaults_span_the_canvas() {
        let commands = render(ElementKind::Line, Attributes::new()).unwrap();
        match &commands[..] {
            [PaintCommand::StrokePath { path, style }] => {
                assert_eq!(
                    path.commands(),
                    &[
                        PathCommand::MoveTo(Point::ZERO),
                        PathCommand::LineTo(Point::new(100.0, 100.0)),
                    ]
                );
                assert_eq!(style.color, Color::BLACK);
                assert_eq!(style.width, 1.0);
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_line_color_overrides_stroke() {
        let attrs = Attributes::new()
            .with_color(Color::RED)
            .with_stroke(Color::BLUE, 3.0);
        let commands = render(ElementKind::Line, attrs).unwrap();
        match &commands[..] {
            [PaintCommand::StrokePath { style, .. }] => {
                assert_eq!(style.color, Color::RED);
                assert_eq!(style.width, 3.0);
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_rect_requires_size() {
        let err = render(ElementKind::Rect, Attributes::new().with_position(1.0, 1.0)).unwrap_err();
        assert!(matches!(
            err,
            CanvasError::MissingAttribute {
                kind: ElementKind::Rect,
                attribute: "width"
            }
        ));
    }

    #[test]
    fn test_rect_is_normalized() {
        let element = Element::new(
            ElementKind::Rect,
            Attributes::new()
                .with_position(10.0, 10.0)
                .with_size(20.0, 20.0),
            LayerId::new(1),
        );
        let mut ctx = PaintContext::new();
        element.render(&mut ctx, &normalizer(2.0)).unwrap();

        assert_eq!(
            only_path(ctx.commands()),
            &[PathCommand::Rect(easel_paint::Rect::new(
                20.0, 20.0, 40.0, 40.0
            ))]
        );
    }

    #[test]
    fn test_fill_and_stroke_are_both_applied() {
        let attrs = Attributes::new()
            .with_size(5.0, 5.0)
            .with_fill(Color::GREEN)
            .with_stroke(Color::BLUE, 2.0);
        let commands = render(ElementKind::Rect, attrs).unwrap();

        assert!(matches!(
            &commands[..],
            [PaintCommand::FillPath { .. }, PaintCommand::StrokePath { .. }]
        ));
    }

    #[test]
    fn test_circle_requires_radius() {
        let err = render(ElementKind::Circle, Attributes::new()).unwrap_err();
        assert!(matches!(
            err,
            CanvasError::MissingAttribute {
                attribute: "radius",
                ..
            }
        ));
    }

    #[test]
    fn test_equal_radius_ellipse_matches_circle() {
        let base = Attributes::new()
            .with_position(40.0, 30.0)
            .with_fill(Color::RED);
        let circle = render(ElementKind::Circle, base.clone().with_radius(12.0)).unwrap();
        let ellipse = render(ElementKind::Ellipse, base.with_radii(12.0, 12.0)).unwrap();

        assert_eq!(circle, ellipse);
    }

    #[test]
    fn test_ellipse_scale_is_scoped() {
        let attrs = Attributes::new()
            .with_position(40.0, 20.0)
            .with_radii(20.0, 10.0);
        let element = Element::new(ElementKind::Ellipse, attrs, LayerId::new(1));
        let mut ctx = PaintContext::new();
        element.render(&mut ctx, &normalizer(1.0)).unwrap();

        assert_eq!(ctx.transform_depth(), 0);
        match ctx.commands() {
            [PaintCommand::PushTransform { transform }, PaintCommand::FillPath { path, .. }, PaintCommand::PopTransform] =>
            {
                assert_eq!(*transform, Transform2D::scale(2.0, 1.0));
                match path.commands() {
                    [PathCommand::Arc { center, radius, .. }] => {
                        assert_eq!(*center, Point::new(20.0, 20.0));
                        assert_eq!(*radius, 10.0);
                    }
                    other => panic!("expected arc, got {other:?}"),
                }
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_ellipse_stroke_shares_the_scale() {
        let attrs = Attributes::new()
            .with_position(40.0, 20.0)
            .with_radii(20.0, 10.0)
            .with_stroke(Color::BLUE, 2.0);
        let commands = render(ElementKind::Ellipse, attrs).unwrap();

        match commands.as_slice() {
            [PaintCommand::PushTransform { transform }, PaintCommand::StrokePath { style, .. }, PaintCommand::PopTransform] =>
            {
                assert_eq!(*transform, Transform2D::scale(2.0, 1.0));
                assert_eq!(style.color, Color::BLUE);
                assert_eq!(style.width, 2.0);
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_tall_ellipse_scales_vertically() {
        let attrs = Attributes::new().with_radii(5.0, 15.0);
        let commands = render(ElementKind::Ellipse, attrs).unwrap();
        assert!(matches!(
            commands.first(),
            Some(PaintCommand::PushTransform { transform }) if *transform == Transform2D::scale(1.0, 3.0)
        ));
    }

    #[test]
    fn test_polygon_closes_back_to_first_point() {
        let attrs = Attributes::new().with_points([[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]);
        let commands = render(ElementKind::Polygon, attrs).unwrap();

        assert_eq!(
            only_path(&commands),
            &[
                PathCommand::MoveTo(Point::ZERO),
                PathCommand::LineTo(Point::new(10.0, 0.0)),
                PathCommand::LineTo(Point::new(10.0, 10.0)),
                PathCommand::LineTo(Point::ZERO),
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn test_degenerate_polygons_draw_nothing() {
        assert!(render(ElementKind::Polygon, Attributes::new())
            .unwrap()
            .is_empty());
        let single = Attributes::new().with_points([[3.0, 3.0]]);
        assert!(render(ElementKind::Polygon, single).unwrap().is_empty());
    }

    #[test]
    fn test_text_defaults() {
        let commands = render(ElementKind::Text, Attributes::new().with_text("hello")).unwrap();
        match &commands[..] {
            [PaintCommand::FillText {
                text,
                position,
                style,
            }] => {
                assert_eq!(text, "hello");
                assert_eq!(*position, Point::ZERO);
                assert_eq!(style.size, 16.0);
                assert_eq!(style.family, "sans-serif");
                assert_eq!(style.color, Color::BLACK);
                assert_eq!(style.align, TextAlign::Start);
                assert_eq!(style.baseline, TextBaseline::Top);
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_text_requires_text() {
        assert!(render(ElementKind::Text, Attributes::new()).is_err());
    }

    #[test]
    fn test_image_requires_image() {
        let err = render(ElementKind::Image, Attributes::new()).unwrap_err();
        assert!(matches!(
            err,
            CanvasError::MissingAttribute {
                kind: ElementKind::Image,
                ..
            }
        ));
    }

    #[test]
    fn test_move_line_keeps_length() {
        let mut element = Element::new(
            ElementKind::Line,
            Attributes::new()
                .with_position(10.0, 10.0)
                .with_end(20.0, 30.0),
            LayerId::new(1),
        );
        element.move_anchor(15.0, 5.0, Size::new(100.0, 100.0));

        let attrs = element.attributes();
        assert_eq!(attrs.origin(), Point::new(15.0, 5.0));
        assert_eq!((attrs.end_x, attrs.end_y), (Some(25.0), Some(25.0)));
    }

    #[test]
    fn test_move_line_with_default_end() {
        let mut element = Element::new(ElementKind::Line, Attributes::new(), LayerId::new(1));
        element.move_anchor(10.0, 0.0, Size::new(100.0, 50.0));

        let attrs = element.attributes();
        assert_eq!((attrs.end_x, attrs.end_y), (Some(110.0), Some(50.0)));
    }

    #[test]
    fn test_move_polygon_translates_rigidly() {
        let mut element = Element::new(
            ElementKind::Polygon,
            Attributes::new().with_points([[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]),
            LayerId::new(1),
        );
        element.move_anchor(5.0, 5.0, Size::new(100.0, 100.0));

        assert_eq!(
            element.attributes().points,
            vec![[5.0, 5.0], [15.0, 5.0], [15.0, 15.0]]
        );
    }

    #[test]
    fn test_move_rect_only_replaces_anchor() {
        let mut element = Element::new(
            ElementKind::Rect,
            Attributes::new().with_size(4.0, 4.0),
            LayerId::new(1),
        );
        element.move_anchor(7.0, 8.0, Size::new(100.0, 100.0));

        let attrs = element.attributes();
        assert_eq!(attrs.origin(), Point::new(7.0, 8.0));
        assert_eq!((attrs.width, attrs.height), (Some(4.0), Some(4.0)));
    }
}
