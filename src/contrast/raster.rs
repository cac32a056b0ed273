//! Decoded page rasters and the regions cut from them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::BoundingBox;

/// Row-major grid of RGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbRaster {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl RgbRaster {
    /// Wrap `pixels`, which must hold exactly `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::InvalidRegion(format!(
                "{} pixels given for a {}x{} raster",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Raster of a single colour.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Build from packed RGBA bytes, discarding alpha.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 4 != 0 {
            return Err(Error::InvalidRegion(format!(
                "RGBA buffer length {} is not a multiple of 4",
                bytes.len()
            )));
        }
        let pixels = bytes.chunks_exact(4).map(|p| [p[0], p[1], p[2]]).collect();
        Self::new(width, height, pixels)
    }

    /// Convert a decoded image, discarding alpha.
    pub fn from_image(image: &image::DynamicImage) -> Self {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb.pixels().map(|p| p.0).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode a PNG or JPEG file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path.as_ref())?;
        Ok(Self::from_image(&image))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        if x < self.width && y < self.height {
            let index = y as usize * self.width as usize + x as usize;
            self.pixels[index] = color;
        }
    }

    /// Fill a rectangle, clipped to the raster.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: [u8; 3]) {
        let right = x.saturating_add(width).min(self.width);
        let bottom = y.saturating_add(height).min(self.height);
        for row in y.min(bottom)..bottom {
            for col in x.min(right)..right {
                self.set_pixel(col, row, color);
            }
        }
    }

    /// The whole raster as one region.
    pub fn full_region(&self) -> RasterRegion<'_> {
        RasterRegion {
            raster: self,
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }

    /// A rectangle of the raster; it must lie inside the raster.
    pub fn region(&self, x: u32, y: u32, width: u32, height: u32) -> Result<RasterRegion<'_>> {
        let fits_x = x.checked_add(width).is_some_and(|r| r <= self.width);
        let fits_y = y.checked_add(height).is_some_and(|b| b <= self.height);
        if !fits_x || !fits_y {
            return Err(Error::InvalidRegion(format!(
                "{}x{}+{}+{} outside {}x{} raster",
                width, height, x, y, self.width, self.height
            )));
        }
        Ok(RasterRegion {
            raster: self,
            x,
            y,
            width,
            height,
        })
    }
}

/// Borrowed rectangular view into an [`RgbRaster`].
#[derive(Debug, Clone, Copy)]
pub struct RasterRegion<'a> {
    raster: &'a RgbRaster,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl<'a> RasterRegion<'a> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Pixels of row `row` (relative to the region).
    pub fn row(&self, row: u32) -> &'a [[u8; 3]] {
        if row >= self.height {
            return &[];
        }
        let stride = self.raster.width as usize;
        let start = (self.y + row) as usize * stride + self.x as usize;
        &self.raster.pixels[start..start + self.width as usize]
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [[u8; 3]]> + '_ {
        (0..self.height).map(move |r| self.row(r))
    }
}

/// A rendered page and the page size it was rendered from.
#[derive(Debug, Clone)]
pub struct PageRaster {
    raster: RgbRaster,
    page_width: f64,
    page_height: f64,
}

impl PageRaster {
    /// `page_width`/`page_height` are in page units (points).
    pub fn new(raster: RgbRaster, page_width: f64, page_height: f64) -> Self {
        Self {
            raster,
            page_width,
            page_height,
        }
    }

    /// Raster rendered at one pixel per point.
    pub fn at_native_scale(raster: RgbRaster) -> Self {
        let (w, h) = (raster.width() as f64, raster.height() as f64);
        Self::new(raster, w, h)
    }

    pub fn raster(&self) -> &RgbRaster {
        &self.raster
    }

    pub fn page_size(&self) -> (f64, f64) {
        (self.page_width, self.page_height)
    }

    /// Pixels covered by `bbox`, clamped to the raster.
    ///
    /// Page space has its origin at the bottom left; pixel rows count down
    /// from the top. Returns `None` when nothing of the box is visible.
    pub fn crop(&self, bbox: &BoundingBox) -> Option<RasterRegion<'_>> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return None;
        }
        let sx = self.raster.width() as f64 / self.page_width;
        let sy = self.raster.height() as f64 / self.page_height;
        let clamp_x = |v: f64| (v * sx).clamp(0.0, self.raster.width() as f64);
        let clamp_y = |v: f64| ((self.page_height - v) * sy).clamp(0.0, self.raster.height() as f64);

        let left = clamp_x(bbox.left_x()).floor() as u32;
        let right = clamp_x(bbox.right_x()).ceil() as u32;
        let top = clamp_y(bbox.top_y()).floor() as u32;
        let bottom = clamp_y(bbox.bottom_y()).ceil() as u32;
        if right <= left || bottom <= top {
            return None;
        }
        self.raster
            .region(left, top, right - left, bottom - top)
            .ok()
    }
}

/// Supplies rendered pages by page number.
pub trait RasterSource {
    fn page_raster(&self, page_number: u32) -> Result<PageRaster>;
}

/// Pages rendered ahead of time into image files.
///
/// The path template contains `{page}`, replaced by the page number.
/// Files are assumed to be rendered at one pixel per point unless a page
/// size is given.
#[derive(Debug, Clone)]
pub struct DirectoryRasterSource {
    template: String,
    page_size: Option<(f64, f64)>,
}

impl DirectoryRasterSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            page_size: None,
        }
    }

    /// Page size in points every file was rendered from.
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_size = Some((width, height));
        self
    }

    pub fn path_for(&self, page_number: u32) -> PathBuf {
        PathBuf::from(self.template.replace("{page}", &page_number.to_string()))
    }
}

impl RasterSource for DirectoryRasterSource {
    fn page_raster(&self, page_number: u32) -> Result<PageRaster> {
        let path = self.path_for(page_number);
        if !path.exists() {
            return Err(Error::PageNotRendered(page_number));
        }
        let raster = RgbRaster::open(&path)?;
        log::debug!(
            "Loaded page {} raster {}x{} from {}",
            page_number,
            raster.width(),
            raster.height(),
            path.display()
        );
        Ok(match self.page_size {
            Some((w, h)) => PageRaster::new(raster, w, h),
            None => PageRaster::at_native_scale(raster),
        })
    }
}

/// Page rasters held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRasterSource {
    pages: HashMap<u32, PageRaster>,
}

impl MemoryRasterSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page_number: u32, raster: PageRaster) -> Self {
        self.pages.insert(page_number, raster);
        self
    }

    pub fn insert(&mut self, page_number: u32, raster: PageRaster) {
        self.pages.insert(page_number, raster);
    }
}

impl RasterSource for MemoryRasterSource {
    fn page_raster(&self, page_number: u32) -> Result<PageRaster> {
        self.pages
            .get(&page_number)
            .cloned()
            .ok_or(Error::PageNotRendered(page_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(RgbRaster::new(2, 2, vec![[0, 0, 0]; 3]).is_err());
        assert!(RgbRaster::new(2, 2, vec![[0, 0, 0]; 4]).is_ok());
    }

    #[test]
    fn test_from_rgba_discards_alpha() {
        let raster = RgbRaster::from_rgba_bytes(2, 1, &[1, 2, 3, 255, 4, 5, 6, 0]).unwrap();
        assert_eq!(raster.pixel(0, 0), Some([1, 2, 3]));
        assert_eq!(raster.pixel(1, 0), Some([4, 5, 6]));
    }

    #[test]
    fn test_region_rows() {
        let mut raster = RgbRaster::filled(4, 3, [255, 255, 255]);
        raster.set_pixel(1, 1, [0, 0, 0]);
        let region = raster.region(1, 1, 2, 2).unwrap();
        assert_eq!(region.pixel_count(), 4);
        assert_eq!(region.row(0), &[[0, 0, 0], [255, 255, 255]]);
        assert_eq!(region.rows().count(), 2);
        assert!(raster.region(3, 0, 2, 1).is_err());
    }

    #[test]
    fn test_crop_flips_vertical_axis() {
        let mut raster = RgbRaster::filled(100, 200, [255, 255, 255]);
        // Top-left 10x10 pixels are page y 190..200
        raster.fill_rect(0, 0, 10, 10, [0, 0, 0]);
        let page = PageRaster::at_native_scale(raster);

        let region = page
            .crop(&BoundingBox::new(0.0, 190.0, 10.0, 200.0))
            .unwrap();
        assert_eq!((region.width(), region.height()), (10, 10));
        assert!(region.rows().all(|row| row.iter().all(|p| *p == [0, 0, 0])));
    }

    #[test]
    fn test_crop_scales_and_clamps() {
        let raster = RgbRaster::filled(200, 400, [255, 255, 255]);
        let page = PageRaster::new(raster, 100.0, 200.0);

        let region = page
            .crop(&BoundingBox::new(-10.0, 150.0, 20.0, 250.0))
            .unwrap();
        assert_eq!((region.width(), region.height()), (40, 100));
        assert!(page.crop(&BoundingBox::new(150.0, 0.0, 160.0, 10.0)).is_none());
    }

    #[test]
    fn test_memory_source_missing_page() {
        let source = MemoryRasterSource::new().with_page(
            0,
            PageRaster::at_native_scale(RgbRaster::filled(1, 1, [0, 0, 0])),
        );
        assert!(source.page_raster(0).is_ok());
        assert!(matches!(
            source.page_raster(3),
            Err(Error::PageNotRendered(3))
        ));
    }

    #[test]
    fn test_directory_source_path_template() {
        let source = DirectoryRasterSource::new("/tmp/render/page-{page}.png");
        assert_eq!(
            source.path_for(7),
            PathBuf::from("/tmp/render/page-7.png")
        );
        assert!(matches!(
            DirectoryRasterSource::new("/nonexistent/{page}.png").page_raster(1),
            Err(Error::PageNotRendered(1))
        ));
    }
}
