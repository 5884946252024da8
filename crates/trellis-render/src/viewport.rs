use serde::{Deserialize, Serialize};
use trellis_layout::Point;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportOptions {
    pub width: f64,
    pub height: f64,
    pub fit_padding: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            fit_padding: 30.0,
            min_zoom: 0.05,
            max_zoom: 10.0,
        }
    }
}

/// Model -> screen transform of the rendering surface: `screen = model * zoom + pan`.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    zoom: f64,
    pan: Point,
    min_zoom: f64,
    max_zoom: f64,
    padding: f64,
}

impl Viewport {
    pub fn new(options: &ViewportOptions) -> Self {
        let min_zoom = options.min_zoom.max(f64::MIN_POSITIVE);
        let width = options.width.max(1.0);
        let height = options.height.max(1.0);
        Self {
            width,
            height,
            zoom: 1.0_f64.clamp(min_zoom, options.max_zoom.max(min_zoom)),
            pan: Point::new(width / 2.0, height / 2.0),
            min_zoom,
            max_zoom: options.max_zoom.max(min_zoom),
            padding: options.fit_padding.max(0.0),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Changes the surface size, keeping the model point at the old center in the middle.
    pub fn resize(&mut self, width: f64, height: f64) {
        let center = self.to_model(self.width / 2.0, self.height / 2.0);
        self.width = width.max(1.0);
        self.height = height.max(1.0);
        self.center_on(center);
    }

    pub fn to_model(&self, screen_x: f64, screen_y: f64) -> Point {
        Point::new(
            (screen_x - self.pan.x) / self.zoom,
            (screen_y - self.pan.y) / self.zoom,
        )
    }

    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.zoom + self.pan.x, p.y * self.zoom + self.pan.y)
    }

    /// Model-space rectangle currently on screen.
    pub fn visible_bounds(&self) -> Bounds {
        let tl = self.to_model(0.0, 0.0);
        let br = self.to_model(self.width, self.height);
        Bounds {
            min_x: tl.x,
            min_y: tl.y,
            max_x: br.x,
            max_y: br.y,
        }
    }

    /// Zooms and pans so `bounds` fills the surface minus the fit padding on every side. Empty
    /// content resets to zoom 1 centered on the origin.
    pub(crate) fn fit(&mut self, bounds: Option<Bounds>) {
        let padding = self.padding;
        let Some(b) = bounds else {
            self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
            self.pan = Point::new(self.width / 2.0, self.height / 2.0);
            return;
        };
        let avail_w = (self.width - 2.0 * padding).max(1.0);
        let avail_h = (self.height - 2.0 * padding).max(1.0);
        let zx = if b.width() > 0.0 {
            avail_w / b.width()
        } else {
            self.max_zoom
        };
        let zy = if b.height() > 0.0 {
            avail_h / b.height()
        } else {
            self.max_zoom
        };
        self.zoom = zx.min(zy).clamp(self.min_zoom, self.max_zoom);
        self.center_on(b.center());
    }

    /// Pans (zoom unchanged) so `p` sits in the middle of the surface.
    pub(crate) fn center_on(&mut self, p: Point) {
        self.pan = Point::new(
            self.width / 2.0 - p.x * self.zoom,
            self.height / 2.0 - p.y * self.zoom,
        );
    }
}
