use crate::domain::model::TracedPoint;
use crate::math::Complex;
use crate::utils::error::{FractalError, Result};
use tracing::debug;

pub const DEFAULT_WIDTH: u32 = 800;
pub const MIN_WIDTH: u32 = 16;
pub const MAX_WIDTH: u32 = 8192;

/// 高度最多是寬度的幾倍
const MAX_ASPECT: u32 = 8;

/// 包含原點的最小矩形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub re_min: f64,
    pub re_max: f64,
    pub im_min: f64,
    pub im_max: f64,
}

impl Bounds {
    pub fn of<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Complex>,
    {
        points.into_iter().fold(
            Bounds {
                re_min: 0.0,
                re_max: 0.0,
                im_min: 0.0,
                im_max: 0.0,
            },
            |b, z| Bounds {
                re_min: b.re_min.min(z.re),
                re_max: b.re_max.max(z.re),
                im_min: b.im_min.min(z.im),
                im_max: b.im_max.max(z.im),
            },
        )
    }

    /// 寬度為零時視為 1
    pub fn span_re(&self) -> f64 {
        non_degenerate(self.re_max - self.re_min)
    }

    pub fn span_im(&self) -> f64 {
        non_degenerate(self.im_max - self.im_min)
    }
}

fn non_degenerate(span: f64) -> f64 {
    if span.is_finite() && span > 0.0 {
        span
    } else {
        1.0
    }
}

/// 8-bit RGB 點陣圖，逐列儲存
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbImage {
    pub fn new_white(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0xff; width as usize * height as usize * 3],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.offset(x as i64, y as i64)
            .map(|i| [self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 3)
    }

    /// 畫布外的部分直接略過
    fn put(&mut self, x: i64, y: i64, rgb: [u8; 3]) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + 3].copy_from_slice(&rgb);
        }
    }
}

/// 圖片高度依邊界的長寬比決定，最多是寬度的 [`MAX_ASPECT`] 倍
pub fn image_size(bounds: &Bounds, width: u32) -> (u32, u32) {
    let ratio = bounds.span_re() / bounds.span_im();
    let height = width as f64 / ratio;

    let max_height = (width as u64 * MAX_ASPECT as u64).min(u32::MAX as u64);
    let height = if height.is_finite() && height >= 1.0 {
        (height as u64).min(max_height) as u32
    } else {
        width
    };

    (width, height)
}

pub fn validate_width(width: u32) -> Result<()> {
    if (MIN_WIDTH..=MAX_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(FractalError::InvalidArgument {
            message: format!(
                "Image width must be between {} and {}, got {}",
                MIN_WIDTH, MAX_WIDTH, width
            ),
        })
    }
}

/// 白底，每個點畫成一個 2x2 的黑色方塊；虛軸朝上。
pub fn plot(points: &[Complex], width: u32) -> Result<RgbImage> {
    validate_width(width)?;

    let bounds = Bounds::of(points);
    let (width, height) = image_size(&bounds, width);

    let mx = width as f64 / bounds.span_re();
    let bx = -mx * bounds.re_min;
    let my = -(height as f64) / bounds.span_im();
    let by = -my * (bounds.im_min + bounds.span_im());

    debug!(
        "🖼️ Plotting {} points on {}x{} canvas",
        points.len(),
        width,
        height
    );

    let mut image = RgbImage::new_white(width, height);
    for z in points.iter().filter(|z| z.re.is_finite() && z.im.is_finite()) {
        let x = (mx * z.re + bx) as i64;
        let y = (my * z.im + by) as i64;
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            image.put(x + dx, y + dy, [0, 0, 0]);
        }
    }

    Ok(image)
}

pub fn plot_traced(points: &[TracedPoint], width: u32) -> Result<RgbImage> {
    let numbers: Vec<Complex> = points.iter().map(|p| p.number).collect();
    plot(&numbers, width)
}

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width, image.height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.data)?;
        writer.finish()?;
    }
    Ok(buf)
}

/// 欄位 `re,im`
pub fn points_csv(points: &[Complex]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["re", "im"])?;
    for z in points {
        writer.write_record([z.re.to_string(), z.im.to_string()])?;
    }
    into_string(writer)
}

/// 欄位 `id,depth,re,im`
pub fn traced_csv(points: &[TracedPoint]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "depth", "re", "im"])?;
    for p in points {
        writer.write_record([
            p.id.to_string(),
            p.depth.to_string(),
            p.number.re.to_string(),
            p.number.im.to_string(),
        ])?;
    }
    into_string(writer)
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| FractalError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| FractalError::ParseError {
        input: "csv output".to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const BLACK: [u8; 3] = [0, 0, 0];
    const WHITE: [u8; 3] = [0xff, 0xff, 0xff];

    #[test]
    fn test_bounds_contain_origin() {
        let b = Bounds::of(&[Complex::new(1.0, 2.0), Complex::new(3.0, 4.0)]);
        assert_eq!(
            b,
            Bounds {
                re_min: 0.0,
                re_max: 3.0,
                im_min: 0.0,
                im_max: 4.0
            }
        );

        let b = Bounds::of(&[] as &[Complex]);
        assert_eq!((b.span_re(), b.span_im()), (1.0, 1.0));
    }

    #[test]
    fn test_image_size_follows_aspect_ratio() {
        let b = Bounds::of(&[Complex::new(2.0, 1.0)]);
        assert_eq!(image_size(&b, 800), (800, 400));

        // 只有實軸上的點：虛部寬度視為 1
        let b = Bounds::of(&[Complex::real(4.0)]);
        assert_eq!(image_size(&b, 800), (800, 200));

        // 非常瘦高的邊界會被限制
        let b = Bounds::of(&[Complex::new(1e-6, 1.0)]);
        assert_eq!(image_size(&b, 100), (100, 800));

        // 高度不到一列時改用寬度
        let b = Bounds::of(&[Complex::new(1e6, 1.0)]);
        assert_eq!(image_size(&b, 100), (100, 100));
    }

    #[test]
    fn test_plot_draws_corners() {
        let points = [Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0)];
        let image = plot(&points, 100).unwrap();
        assert_eq!((image.width(), image.height()), (100, 100));

        // 左上角是 -1 + i
        assert_eq!(image.pixel(0, 0), Some(BLACK));
        assert_eq!(image.pixel(1, 1), Some(BLACK));
        // 原點沒有點
        assert_eq!(image.pixel(50, 50), Some(WHITE));
        // 1 - i 剛好落在畫布外
        assert_eq!(image.pixel(99, 99), Some(WHITE));
        assert_eq!(image.pixel(100, 100), None);
    }

    #[test]
    fn test_plot_rejects_width_out_of_range() {
        for width in [0, 4, MIN_WIDTH - 1, MAX_WIDTH + 1, 100_000] {
            assert!(matches!(
                plot(&[Complex::new(1e-6, 1.0)], width),
                Err(FractalError::InvalidArgument { .. })
            ));
        }
        assert!(plot(&[Complex::ONE], MIN_WIDTH).is_ok());
    }

    #[test]
    fn test_image_size_height_fits_u32() {
        let b = Bounds::of(&[Complex::new(1e-6, 1.0)]);
        assert_eq!(image_size(&b, 1_000_000_000), (1_000_000_000, u32::MAX));
        assert_eq!(image_size(&b, MAX_WIDTH), (MAX_WIDTH, 8 * MAX_WIDTH));
    }

    #[test]
    fn test_encode_png_roundtrip_header() {
        let image = plot(&[Complex::new(0.5, 0.25)], 64).unwrap();
        let bytes = encode_png(&image).unwrap();

        let decoder = png::Decoder::new(Cursor::new(bytes));
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 64);
        assert_eq!(reader.info().height, 32);
        assert_eq!(reader.info().color_type, png::ColorType::Rgb);
    }

    #[test]
    fn test_csv_export() {
        let csv = points_csv(&[Complex::new(1.5, -2.0)]).unwrap();
        assert_eq!(csv, "re,im\n1.5,-2\n");

        let csv = traced_csv(&[TracedPoint::new(1, 2, Complex::new(0.25, 0.0))]).unwrap();
        assert_eq!(csv, "id,depth,re,im\n1,2,0.25,0\n");
    }
}
