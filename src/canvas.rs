//! SVG debug canvas: document lifecycle
//!
//! Opening a canvas writes the document frame (and background) right away;
//! every draw call appends one element; closing writes the footer. The
//! footer is written exactly once, on `close`, `finish` or drop, whichever
//! comes first.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, warn};

use crate::color::{Color, Rgb8};
use crate::config::{CanvasConfig, HostFrame};
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::CoordinateTransform;
use crate::svg_writer::SvgWriter;
use crate::types::{Aabb, CanvasSize, Point, PointF};

/// Streaming SVG document mapped onto a real-space region
pub struct SvgCanvas<W: Write> {
    /// `None` once the document is closed
    writer: Option<SvgWriter<W>>,
    transform: CoordinateTransform,
    frame: HostFrame,
}

impl SvgCanvas<BufWriter<File>> {
    /// Create the file at `path` and open a document in it.
    ///
    /// Unless the config pins a frame, `.html`/`.htm` destinations get the
    /// HTML wrapper.
    pub fn create(path: impl AsRef<Path>, region: Aabb, mut config: CanvasConfig) -> CanvasResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            warn!("The file {} could not be opened for writing: {}", path.display(), e);
            e
        })?;
        if config.frame.is_none() {
            config.frame = Some(HostFrame::for_path(path));
        }
        debug!("Opening SVG canvas at {}", path.display());
        Self::from_writer(BufWriter::new(file), region, config)
    }
}

impl<W: Write> SvgCanvas<W> {
    /// Open a document on an arbitrary writer. Without an explicit frame in
    /// the config this writes bare SVG.
    pub fn from_writer(out: W, region: Aabb, config: CanvasConfig) -> CanvasResult<Self> {
        validate(&region, &config)?;

        let transform = CoordinateTransform::new(region, config.canvas_size, config.effective_border(), config.flip_y());
        let frame = config.frame.unwrap_or(HostFrame::Svg);
        let mut writer = SvgWriter::new(out, transform);

        write_header(&mut writer, frame, config.canvas_size)?;
        if !config.background.is_unset() {
            writer.write_canvas_rect(config.background)?;
        }

        debug!(
            "SVG canvas opened: {}x{}, scale={}, frame={:?}",
            config.canvas_size.width,
            config.canvas_size.height,
            transform.scale(),
            frame
        );

        Ok(Self {
            writer: Some(writer),
            transform,
            frame,
        })
    }

    /// Scaling factor applied to convert real space to canvas space
    pub fn scale(&self) -> f64 {
        self.transform.scale()
    }

    pub fn region(&self) -> Aabb {
        self.transform.region()
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.transform.canvas_size()
    }

    /// Transform a point in real space to canvas space
    pub fn transform(&self, p: Point) -> Point {
        self.transform.transform(p)
    }

    /// Transform a point in real space to canvas space with more precision
    pub fn transform_f(&self, p: Point) -> PointF {
        self.transform.transform_f(p)
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    fn writer(&mut self) -> CanvasResult<&mut SvgWriter<W>> {
        self.writer.as_mut().ok_or(CanvasError::Closed)
    }

    pub fn write_comment(&mut self, comment: &str) -> CanvasResult<()> {
        self.writer()?.write_comment(comment)
    }

    pub fn write_area(&mut self, ring: &[Point], fill: Color, outline: Color, stroke_width: f32) -> CanvasResult<()> {
        self.writer()?.write_area(ring, fill, outline, stroke_width)
    }

    pub fn write_areas<R: AsRef<[Point]>>(&mut self, rings: &[R], fill: Color, outline: Color, stroke_width: f32) -> CanvasResult<()> {
        self.writer()?.write_areas(rings, fill, outline, stroke_width)
    }

    pub fn write_point(&mut self, p: Point, write_coords: bool, size: u32, color: Color) -> CanvasResult<()> {
        self.writer()?.write_point(p, write_coords, size, color)
    }

    pub fn write_points(&mut self, ring: &[Point], write_coords: bool, size: u32, color: Color) -> CanvasResult<()> {
        self.writer()?.write_points(ring, write_coords, size, color)
    }

    pub fn write_points_multi<R: AsRef<[Point]>>(&mut self, rings: &[R], write_coords: bool, size: u32, color: Color) -> CanvasResult<()> {
        self.writer()?.write_points_multi(rings, write_coords, size, color)
    }

    /// Draw the segments between each pair of consecutive points
    pub fn write_lines(&mut self, polyline: &[Point], color: Color, stroke_width: f32) -> CanvasResult<()> {
        self.writer()?.write_lines(polyline, color, stroke_width)
    }

    pub fn write_line(&mut self, a: Point, b: Point, color: Color, stroke_width: f32) -> CanvasResult<()> {
        self.writer()?.write_line(a, b, color, stroke_width)
    }

    pub fn write_line_rgb(&mut self, from: Point, to: Point, rgb: Rgb8, stroke_width: f32) -> CanvasResult<()> {
        self.writer()?.write_line_rgb(from, to, rgb, stroke_width)
    }

    pub fn write_dashed_line(&mut self, a: Point, b: Point, color: Color) -> CanvasResult<()> {
        self.writer()?.write_dashed_line(a, b, color)
    }

    pub fn write_text(&mut self, p: Point, txt: &str, color: Color, font_size: u32) -> CanvasResult<()> {
        self.writer()?.write_text(p, txt, color, font_size)
    }

    pub fn write_polygon(&mut self, ring: &[Point], color: Color, stroke_width: f32) -> CanvasResult<()> {
        self.writer()?.write_polygon(ring, color, stroke_width)
    }

    pub fn write_polygons<R: AsRef<[Point]>>(&mut self, rings: &[R], color: Color, stroke_width: f32) -> CanvasResult<()> {
        self.writer()?.write_polygons(rings, color, stroke_width)
    }

    /// Inject pre-formatted markup, e.g. `canvas.write_raw(format_args!("<g id=\"{}\">\n", id))`.
    ///
    /// Unchecked: a malformed fragment produces a malformed document.
    pub fn write_raw(&mut self, args: fmt::Arguments<'_>) -> CanvasResult<()> {
        self.writer()?.write_raw(args)
    }

    /// Write the closing frame and flush. Further calls return
    /// [`CanvasError::Closed`].
    pub fn close(&mut self) -> CanvasResult<()> {
        let mut writer = self.writer.take().ok_or(CanvasError::Closed)?;
        write_footer(&mut writer, self.frame)?;
        debug!("SVG canvas closed");
        Ok(())
    }

    /// Close the document and hand back the underlying writer
    pub fn finish(mut self) -> CanvasResult<W> {
        let mut writer = self.writer.take().ok_or(CanvasError::Closed)?;
        write_footer(&mut writer, self.frame)?;
        Ok(writer.into_inner())
    }
}

impl<W: Write> Drop for SvgCanvas<W> {
    fn drop(&mut self) {
        if self.writer.is_some() {
            if let Err(e) = self.close() {
                warn!("Failed to close SVG document: {}", e);
            }
        }
    }
}

fn validate(region: &Aabb, config: &CanvasConfig) -> CanvasResult<()> {
    let size = config.canvas_size;
    if size.width == 0 || size.height == 0 {
        return Err(CanvasError::InvalidCanvas(format!("canvas size must be positive, got {}x{}", size.width, size.height)));
    }
    let border = config.effective_border() as u64 * 2;
    if border >= size.width as u64 || border >= size.height as u64 {
        return Err(CanvasError::InvalidCanvas(format!(
            "border {} leaves no drawable area on a {}x{} canvas",
            config.effective_border(),
            size.width,
            size.height
        )));
    }
    if !region.is_valid() {
        return Err(CanvasError::InvalidRegion(format!("min {:?} exceeds max {:?}", region.min, region.max)));
    }
    Ok(())
}

fn write_header<W: Write>(writer: &mut SvgWriter<W>, frame: HostFrame, size: CanvasSize) -> CanvasResult<()> {
    match frame {
        HostFrame::Html => writer.write_raw(format_args!("<!DOCTYPE html><html><body>\n"))?,
        HostFrame::Svg => writer.write_raw(format_args!("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n"))?,
    }
    writer.write_raw(format_args!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = size.width,
        h = size.height
    ))
}

fn write_footer<W: Write>(writer: &mut SvgWriter<W>, frame: HostFrame) -> CanvasResult<()> {
    writer.write_raw(format_args!("</svg>\n"))?;
    if frame == HostFrame::Html {
        writer.write_raw(format_args!("</body></html>\n"))?;
    }
    writer.flush()
}
