//! SVG -> pixels for image export.

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color: {0}")]
    Background(String),
    #[error("JPG export requires an opaque background color (e.g. white)")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

/// JPG has no alpha channel, so a missing background means white.
pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let bg = options.background.as_deref().unwrap_or("white");
    let color = parse_color(bg).ok_or_else(|| RasterError::Background(bg.to_string()))?;
    if color.alpha() != 1.0 {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }

    let pixmap = svg_to_pixmap(svg, options.scale, Some(bg))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // Opaque fill underneath means alpha is always 255 here.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    let mut enc =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // Scene SVG always carries width/height matching its viewBox.
    let size = tree.size();
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    };
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::PixmapAlloc { width, height })?;

    if let Some(bg) = background {
        let color = parse_color(bg).ok_or_else(|| RasterError::Background(bg.to_string()))?;
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

/// Named colors `transparent`, `white` and `black`, plus `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`.
pub fn parse_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::WHITE),
        "black" => return Some(tiny_skia::Color::BLACK),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    let digit = |c: u8| (c as char).to_digit(16).map(|v| v as u8);
    let short = |c: u8| digit(c).map(|v| (v << 4) | v);
    let long = |hi: u8, lo: u8| Some((digit(hi)? << 4) | digit(lo)?);

    let b = hex.as_bytes();
    let (r, g, bl, a) = match b.len() {
        3 => (short(b[0])?, short(b[1])?, short(b[2])?, 255),
        4 => (short(b[0])?, short(b[1])?, short(b[2])?, short(b[3])?),
        6 => (long(b[0], b[1])?, long(b[2], b[3])?, long(b[4], b[5])?, 255),
        8 => (
            long(b[0], b[1])?,
            long(b[2], b[3])?,
            long(b[4], b[5])?,
            long(b[6], b[7])?,
        ),
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, bl, a))
}
