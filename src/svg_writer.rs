//! Streaming SVG primitive writer
//!
//! Every operation maps its coordinates through the canvas transform,
//! resolves colors and writes exactly one finished element (or nothing, for
//! empty input) to the output. Nothing is retained after a call returns.

use std::fmt::{self, Write as _};
use std::io::Write;

use svg::node::element::{Circle, Element, Line, Path, Polygon, Rectangle};

use crate::color::{rainbow_gradient, Color, Rgb8};
use crate::error::CanvasResult;
use crate::geometry::CoordinateTransform;
use crate::types::Point;

/// Font size of the coordinate labels written next to points
const COORD_FONT_SIZE: u32 = 10;

/// Dash pattern used by [`SvgWriter::write_dashed_line`]
const DASH_PATTERN: &str = "5,5";

/// Writes SVG elements straight into `W`
pub struct SvgWriter<W: Write> {
    out: W,
    transform: CoordinateTransform,
}

impl<W: Write> SvgWriter<W> {
    pub fn new(out: W, transform: CoordinateTransform) -> Self {
        Self { out, transform }
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn flush(&mut self) -> CanvasResult<()> {
        self.out.flush()?;
        Ok(())
    }

    fn emit(&mut self, element: impl Into<Element>) -> CanvasResult<()> {
        writeln!(self.out, "{}", element.into())?;
        Ok(())
    }

    /// `<text>` on one line, so renderers see no leading or trailing whitespace
    fn emit_text(&mut self, x: f64, y: f64, font_size: u32, fill: Option<String>, content: &str) -> CanvasResult<()> {
        write!(self.out, "<text x=\"{}\" y=\"{}\" font-size=\"{}\"", x, y, font_size)?;
        if let Some(fill_color) = fill {
            write!(self.out, " fill=\"{}\"", fill_color)?;
        }
        writeln!(self.out, ">{}</text>", escape_text(content))?;
        Ok(())
    }

    /// Write pre-formatted text verbatim.
    ///
    /// Nothing is validated: the caller is responsible for producing a
    /// well-formed fragment. Prefer the typed operations.
    pub fn write_raw(&mut self, args: fmt::Arguments<'_>) -> CanvasResult<()> {
        self.out.write_fmt(args)?;
        Ok(())
    }

    /// Write an XML comment. `--` is not allowed inside comments and is
    /// broken up so the comment cannot end early.
    pub fn write_comment(&mut self, comment: &str) -> CanvasResult<()> {
        let comment = comment.replace("--", "- -");
        writeln!(self.out, "<!-- {} -->", comment)?;
        Ok(())
    }

    /// Fill the whole canvas, ignoring the border
    pub fn write_canvas_rect(&mut self, fill: Color) -> CanvasResult<()> {
        let size = self.transform.canvas_size();
        let mut rect = Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width)
            .set("height", size.height);
        if let Some(fill_color) = fill.encode() {
            rect = rect.set("fill", fill_color);
        }
        self.emit(rect)
    }

    /// Filled, outlined area from a single closed ring
    pub fn write_area(&mut self, ring: &[Point], fill: Color, outline: Color, stroke_width: f32) -> CanvasResult<()> {
        if ring.is_empty() {
            return Ok(());
        }

        let mut points = String::new();
        for p in ring {
            let fp = self.transform.transform_f(*p);
            if !points.is_empty() {
                points.push(' ');
            }
            let _ = write!(points, "{},{}", fp.x, fp.y);
        }

        let mut polygon = Polygon::new().set("points", points);
        if let Some(fill_color) = fill.encode() {
            polygon = polygon.set("fill", fill_color);
        }
        if let Some(stroke_color) = outline.encode() {
            polygon = polygon.set("stroke", stroke_color).set("stroke-width", stroke_width);
        }
        self.emit(polygon)
    }

    /// Filled, outlined area from a set of rings written as one even-odd path,
    /// so rings nested inside others show up as holes
    pub fn write_areas<R: AsRef<[Point]>>(&mut self, rings: &[R], fill: Color, outline: Color, stroke_width: f32) -> CanvasResult<()> {
        let mut d = String::new();
        for ring in rings {
            let ring = ring.as_ref();
            for (i, p) in ring.iter().enumerate() {
                let fp = self.transform.transform_f(*p);
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{}{},{} ", cmd, fp.x, fp.y);
            }
            if !ring.is_empty() {
                d.push_str("Z ");
            }
        }
        if d.is_empty() {
            return Ok(());
        }

        let mut path = Path::new().set("d", d.trim_end()).set("fill-rule", "evenodd");
        if let Some(fill_color) = fill.encode() {
            path = path.set("fill", fill_color);
        }
        if let Some(stroke_color) = outline.encode() {
            path = path.set("stroke", stroke_color).set("stroke-width", stroke_width);
        }
        self.emit(path)
    }

    /// Round marker of radius `size` canvas units, optionally labelled with
    /// the point's real-space coordinates
    pub fn write_point(&mut self, p: Point, write_coords: bool, size: u32, color: Color) -> CanvasResult<()> {
        let fp = self.transform.transform_f(p);
        let mut circle = Circle::new()
            .set("cx", fp.x)
            .set("cy", fp.y)
            .set("r", size)
            .set("stroke-width", 1);
        if let Some(c) = color.encode() {
            circle = circle.set("stroke", c.as_str()).set("fill", c);
        }
        self.emit(circle)?;

        if write_coords {
            let label = format!("{},{}", p.x, p.y);
            self.emit_text(fp.x, fp.y, COORD_FONT_SIZE, Some("black".to_string()), &label)?;
        }
        Ok(())
    }

    pub fn write_points(&mut self, ring: &[Point], write_coords: bool, size: u32, color: Color) -> CanvasResult<()> {
        for p in ring {
            self.write_point(*p, write_coords, size, color)?;
        }
        Ok(())
    }

    pub fn write_points_multi<R: AsRef<[Point]>>(&mut self, rings: &[R], write_coords: bool, size: u32, color: Color) -> CanvasResult<()> {
        for ring in rings {
            self.write_points(ring.as_ref(), write_coords, size, color)?;
        }
        Ok(())
    }

    /// Open polyline through consecutive points; needs at least two points
    pub fn write_lines(&mut self, polyline: &[Point], color: Color, stroke_width: f32) -> CanvasResult<()> {
        if polyline.len() < 2 {
            return Ok(());
        }

        let mut d = String::new();
        for (i, p) in polyline.iter().enumerate() {
            let cp = self.transform.transform(*p);
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{}{},{}", cmd, cp.x, cp.y);
        }

        let mut path = Path::new().set("d", d).set("fill", "none").set("stroke-width", stroke_width);
        if let Some(stroke_color) = color.encode() {
            path = path.set("stroke", stroke_color);
        }
        self.emit(path)
    }

    fn line_element(&self, a: Point, b: Point, stroke_width: f32) -> Line {
        let fa = self.transform.transform_f(a);
        let fb = self.transform.transform_f(b);
        Line::new()
            .set("x1", fa.x)
            .set("y1", fa.y)
            .set("x2", fb.x)
            .set("y2", fb.y)
            .set("stroke-width", stroke_width)
    }

    pub fn write_line(&mut self, a: Point, b: Point, color: Color, stroke_width: f32) -> CanvasResult<()> {
        let mut line = self.line_element(a, b, stroke_width);
        if let Some(stroke_color) = color.encode() {
            line = line.set("stroke", stroke_color);
        }
        self.emit(line)
    }

    /// Line with literal channel values, bypassing the named palette
    pub fn write_line_rgb(&mut self, from: Point, to: Point, rgb: Rgb8, stroke_width: f32) -> CanvasResult<()> {
        let line = self.line_element(from, to, stroke_width).set("stroke", rgb.to_string());
        self.emit(line)
    }

    /// Dashed line, for spotting segments that overlap other geometry
    pub fn write_dashed_line(&mut self, a: Point, b: Point, color: Color) -> CanvasResult<()> {
        let mut line = self.line_element(a, b, 1.0).set("stroke-dasharray", DASH_PATTERN);
        if let Some(stroke_color) = color.encode() {
            line = line.set("stroke", stroke_color);
        }
        self.emit(line)
    }

    pub fn write_text(&mut self, p: Point, txt: &str, color: Color, font_size: u32) -> CanvasResult<()> {
        let fp = self.transform.transform_f(p);
        self.emit_text(fp.x, fp.y, font_size, color.encode(), txt)
    }

    /// Closed ring outline, one line per edge including last -> first.
    /// In rainbow mode the edges run through [`rainbow_gradient`].
    pub fn write_polygon(&mut self, ring: &[Point], color: Color, stroke_width: f32) -> CanvasResult<()> {
        let Some(&last) = ring.last() else {
            return Ok(());
        };
        let count = ring.len();
        let mut p0 = last;
        for (i, &p1) in ring.iter().enumerate() {
            if color.is_rainbow() {
                self.write_line_rgb(p0, p1, rainbow_gradient(i, count), stroke_width)?;
            } else {
                self.write_line(p0, p1, color, stroke_width)?;
            }
            p0 = p1;
        }
        Ok(())
    }

    pub fn write_polygons<R: AsRef<[Point]>>(&mut self, rings: &[R], color: Color, stroke_width: f32) -> CanvasResult<()> {
        for ring in rings {
            self.write_polygon(ring.as_ref(), color, stroke_width)?;
        }
        Ok(())
    }
}

/// Escape the characters that would end or corrupt XML character data
fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NamedColor;
    use crate::types::{Aabb, CanvasSize};

    /// 10x10 region on a borderless 100x100 canvas: one real unit = 10 canvas units
    fn writer() -> SvgWriter<Vec<u8>> {
        let transform = CoordinateTransform::new(Aabb::new((0, 0), (10, 10)), CanvasSize::new(100, 100), 0, false);
        SvgWriter::new(Vec::new(), transform)
    }

    fn output(w: SvgWriter<Vec<u8>>) -> String {
        String::from_utf8(w.into_inner()).unwrap()
    }

    fn square() -> Vec<Point> {
        vec![Point::new(0, 0), Point::new(10, 0), Point::new(10, 10), Point::new(0, 10)]
    }

    #[test]
    fn test_point_marker() {
        let mut w = writer();
        w.write_point(Point::new(5, 5), false, 5, Color::BLACK).unwrap();
        let out = output(w);
        assert!(out.starts_with("<circle"));
        assert!(out.contains(r#"cx="50""#));
        assert!(out.contains(r#"cy="50""#));
        assert!(out.contains(r#"r="5""#));
        assert!(out.contains(r#"fill="black""#));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_point_with_coords() {
        let mut w = writer();
        w.write_point(Point::new(2, 7), true, 3, Color::Named(NamedColor::Red)).unwrap();
        let out = output(w);
        assert_eq!(out.matches("<circle").count(), 1);
        assert_eq!(out.matches("<text").count(), 1);
        assert!(out.contains(">2,7</text>"));
    }

    #[test]
    fn test_points_over_rings() {
        let mut w = writer();
        let rings = vec![square(), vec![Point::new(1, 1)]];
        w.write_points_multi(&rings, false, 2, Color::BLACK).unwrap();
        assert_eq!(output(w).matches("<circle").count(), 5);
    }

    #[test]
    fn test_empty_inputs_write_nothing() {
        let mut w = writer();
        let empty: Vec<Point> = Vec::new();
        w.write_area(&empty, Color::GRAY, Color::BLACK, 1.0).unwrap();
        w.write_areas(&[empty.clone(), empty.clone()], Color::GRAY, Color::BLACK, 1.0).unwrap();
        w.write_lines(&empty, Color::BLACK, 1.0).unwrap();
        w.write_lines(&[Point::new(1, 1)], Color::BLACK, 1.0).unwrap();
        w.write_polygon(&empty, Color::BLACK, 1.0).unwrap();
        w.write_points(&empty, true, 5, Color::BLACK).unwrap();
        assert!(output(w).is_empty());
    }

    #[test]
    fn test_single_area() {
        let mut w = writer();
        w.write_area(&square(), Color::GRAY, Color::BLACK, 2.0).unwrap();
        let out = output(w);
        assert!(out.starts_with("<polygon"));
        assert!(out.contains(r#"points="0,0 100,0 100,100 0,100""#));
        assert!(out.contains(r#"fill="gray""#));
        assert!(out.contains(r#"stroke="black""#));
        assert!(out.contains(r#"stroke-width="2""#));
    }

    #[test]
    fn test_areas_use_even_odd_path() {
        let mut w = writer();
        let hole = vec![Point::new(4, 4), Point::new(6, 4), Point::new(6, 6)];
        w.write_areas(&[square(), hole], Color::GRAY, Color::NONE, 1.0).unwrap();
        let out = output(w);
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains(r#"fill-rule="evenodd""#));
        assert!(out.contains("M0,0 L100,0 L100,100 L0,100 Z M40,40 L60,40 L60,60 Z"));
        assert!(!out.contains("stroke="));
    }

    #[test]
    fn test_polyline_is_open() {
        let mut w = writer();
        w.write_lines(&[Point::new(0, 0), Point::new(5, 5), Point::new(10, 0)], Color::Named(NamedColor::Blue), 1.0).unwrap();
        let out = output(w);
        assert!(out.contains(r#"d="M0,0L50,50L100,0""#));
        assert!(out.contains(r#"fill="none""#));
        assert!(out.contains(r#"stroke="blue""#));
    }

    #[test]
    fn test_line_variants() {
        let mut w = writer();
        w.write_line(Point::new(0, 0), Point::new(10, 10), Color::Gray(1.0), 1.5).unwrap();
        w.write_line_rgb(Point::new(0, 0), Point::new(1, 0), Rgb8::new(1, 2, 3), 1.0).unwrap();
        w.write_dashed_line(Point::new(0, 0), Point::new(0, 1), Color::Named(NamedColor::Green)).unwrap();
        let out = output(w);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains(r#"x2="100""#));
        assert!(lines[0].contains(r#"stroke="rgb(255,255,255)""#));
        assert!(lines[0].contains(r#"stroke-width="1.5""#));
        assert!(lines[1].contains(r#"stroke="rgb(1,2,3)""#));
        assert!(lines[2].contains(r#"stroke-dasharray="5,5""#));
        assert!(lines[2].contains(r#"stroke="green""#));
    }

    #[test]
    fn test_unset_color_omits_stroke() {
        let mut w = writer();
        w.write_line(Point::new(0, 0), Point::new(1, 1), Color::NONE, 1.0).unwrap();
        assert!(!output(w).contains("stroke="));
    }

    #[test]
    fn test_text() {
        let mut w = writer();
        w.write_text(Point::new(1, 2), "layer 3", Color::Named(NamedColor::Red), 12).unwrap();
        let out = output(w);
        assert!(out.contains(r#"x="10""#));
        assert!(out.contains(r#"y="20""#));
        assert!(out.contains(r#"font-size="12""#));
        assert!(out.contains(r#"fill="red""#));
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains(">layer 3</text>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut w = writer();
        w.write_text(Point::new(1, 2), "a<b & c>d", Color::BLACK, 12).unwrap();
        w.write_point(Point::new(-3, 4), true, 2, Color::BLACK).unwrap();
        let out = output(w);
        assert!(out.contains(">a&lt;b &amp; c&gt;d</text>"));
        assert!(!out.contains("a<b"));
        assert!(out.contains(">-3,4</text>"));
    }

    #[test]
    fn test_polygon_closes_ring() {
        let mut w = writer();
        w.write_polygon(&square(), Color::BLACK, 1.0).unwrap();
        let out = output(w);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        // first edge runs from the last vertex back to the first
        assert!(lines[0].contains(r#"x1="0""#) && lines[0].contains(r#"y1="100""#));
        assert!(lines[0].contains(r#"x2="0""#) && lines[0].contains(r#"y2="0""#));
    }

    #[test]
    fn test_rainbow_polygon_uses_gradient() {
        let mut w = writer();
        w.write_polygons(&[square()], Color::Named(NamedColor::Rainbow), 1.0).unwrap();
        let out = output(w);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains(r#"stroke="rgb(0,0,0)""#));
        assert!(lines[1].contains(r#"stroke="rgb(63,191,192)""#));
    }

    #[test]
    fn test_comment_and_raw() {
        let mut w = writer();
        w.write_comment("pass 2 -- inner walls").unwrap();
        w.write_raw(format_args!("<g id=\"{}\">\n", "walls")).unwrap();
        let out = output(w);
        assert_eq!(out, "<!-- pass 2 - - inner walls -->\n<g id=\"walls\">\n");
    }

    #[test]
    fn test_canvas_rect() {
        let mut w = writer();
        w.write_canvas_rect(Color::Named(NamedColor::White)).unwrap();
        let out = output(w);
        assert!(out.starts_with("<rect"));
        assert!(out.contains(r#"width="100""#));
        assert!(out.contains(r#"fill="white""#));
    }
}
