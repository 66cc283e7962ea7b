//! SVG debug canvas for 2D geometry
//!
//! Renders contours, toolpaths and point sets from a geometry pipeline into
//! an SVG (optionally HTML-wrapped) document for visual inspection.
//!
//! ## Data Flow
//!
//! ```text
//! draw call → CoordinateTransform → Color::encode → SvgWriter → output stream
//! ```
//!
//! Nothing is retained: each primitive is serialized and written as soon as
//! it is drawn, and the document footer is written when the canvas is closed
//! or dropped.
//!
//! ```no_run
//! use debug_svg::{Aabb, CanvasConfig, Color, NamedColor, Point, SvgCanvas};
//!
//! let outline = vec![Point::new(0, 0), Point::new(2000, 0), Point::new(1000, 1500)];
//! let region = Aabb::from_points(&outline).unwrap();
//! let mut canvas = SvgCanvas::create("layer_0.svg", region, CanvasConfig::default())?;
//! canvas.write_area(&outline, Color::GRAY, Color::BLACK, 1.0)?;
//! canvas.write_points(&outline, true, 5, Color::Named(NamedColor::Red))?;
//! canvas.close()?;
//! # Ok::<(), debug_svg::CanvasError>(())
//! ```

mod canvas;
mod color;
mod config;
mod error;
mod geometry;
mod svg_writer;
mod types;

pub use canvas::SvgCanvas;
pub use color::{rainbow_gradient, Color, NamedColor, Rgb8, RAINBOW_PALETTE};
pub use config::{CanvasConfig, CanvasFlags, HostFrame, DEFAULT_BORDER};
pub use error::{CanvasError, CanvasResult};
pub use geometry::CoordinateTransform;
pub use svg_writer::SvgWriter;
pub use types::{Aabb, CanvasSize, Point, PointF};
