//! Learning-curve plots of a training history.
//!
//! A [`TrainingHistory`] holds one value per epoch for every tracked metric,
//! e.g. `loss`, `bag_accuracy`, `val_loss`. [`plot_history`] draws all series
//! into a single line chart with a fixed vertical range and writes it as PNG.

use std::{
    cmp::Ordering,
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use ab_glyph::{FontVec, PxScale};
use burn::prelude::*;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::{
    drawing::{
        draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut,
        text_size,
    },
    rect::Rect,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{MilkitError, MilkitResult};

/// Series colors, cycled when there are more series than colors.
const PALETTE: [[u8; 3]; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([224, 224, 224]);
const FRAME: Rgb<u8> = Rgb([0, 0, 0]);

/// Per-epoch metric values of a training run, keyed by metric name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingHistory {
    series: BTreeMap<String, Vec<f64>>,
}

impl TrainingHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the value of `metric` for the next epoch.
    pub fn push(&mut self, metric: impl Into<String>, value: f64) {
        self.series.entry(metric.into()).or_default().push(value);
    }

    /// Set all values of `metric`, replacing earlier ones.
    pub fn insert(&mut self, metric: impl Into<String>, values: Vec<f64>) {
        self.series.insert(metric.into(), values);
    }

    /// Values of one metric.
    pub fn get(&self, metric: &str) -> Option<&[f64]> {
        self.series.get(metric).map(Vec::as_slice)
    }

    /// All series in metric-name order.
    pub fn series(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.series
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of tracked metrics.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Number of epochs, shared by every series.
    pub fn epochs(&self) -> MilkitResult<usize> {
        let mut lengths = self.series.iter().map(|(name, values)| (name, values.len()));
        let Some((first_name, epochs)) = lengths.next() else {
            return Err(MilkitError::InvalidHistory {
                reason: "history has no series".to_owned(),
            });
        };

        if let Some((name, len)) = lengths.find(|(_, len)| *len != epochs) {
            return Err(MilkitError::InvalidHistory {
                reason: format!(
                    "series {name:?} has {len} epochs but {first_name:?} has {epochs}"
                ),
            });
        }
        if epochs == 0 {
            return Err(MilkitError::InvalidHistory {
                reason: "history has no epochs".to_owned(),
            });
        }
        Ok(epochs)
    }

    /// Load a history from a JSON object of metric arrays.
    pub fn load(path: impl AsRef<Path>) -> MilkitResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| MilkitError::HistoryIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save the history as a JSON object of metric arrays.
    pub fn save(&self, path: impl AsRef<Path>) -> MilkitResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| MilkitError::HistoryIo {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Appearance of a history plot.
#[derive(Config, Debug, PartialEq)]
pub struct PlotConfig {
    /// Image width in pixels.
    #[config(default = 800)]
    pub width: u32,
    /// Image height in pixels.
    #[config(default = 500)]
    pub height: u32,
    /// Space around the plot area in pixels; the legend sits in the top margin.
    #[config(default = 40)]
    pub margin: u32,
    /// Value drawn at the bottom edge of the plot area.
    #[config(default = 0.0)]
    pub y_min: f64,
    /// Value drawn at the top edge of the plot area.
    #[config(default = 1.0)]
    pub y_max: f64,
    /// Number of grid cells along each axis.
    #[config(default = 10)]
    pub grid_lines: u32,
    /// TrueType or OpenType font for the legend labels.
    ///
    /// Without a font the legend shows the color swatches only.
    #[config(default = "None")]
    pub legend_font: Option<PathBuf>,
}

impl PlotConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> MilkitResult<()> {
        if i32::try_from(self.width.max(self.height)).is_err() {
            return Err(MilkitError::InvalidConfiguration {
                reason: format!(
                    "Plot of {}x{} pixels exceeds the drawable size",
                    self.width, self.height
                ),
            });
        }
        let framed = self.margin.saturating_mul(2).saturating_add(1);
        if self.width <= framed || self.height <= framed {
            return Err(MilkitError::InvalidConfiguration {
                reason: format!(
                    "Plot of {}x{} pixels leaves no room inside a margin of {}",
                    self.width, self.height, self.margin
                ),
            });
        }
        if self.y_min.partial_cmp(&self.y_max) != Some(Ordering::Less) {
            return Err(MilkitError::InvalidConfiguration {
                reason: format!("Vertical range [{}, {}] is empty", self.y_min, self.y_max),
            });
        }
        Ok(())
    }
}

/// Pixel bounds of the plot area and the mapping from data to pixels.
///
/// Built from a validated [`PlotConfig`], so every bound fits in `i32`.
struct PlotArea {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
    y_min: f64,
    y_max: f64,
    epochs: usize,
}

impl PlotArea {
    fn new(config: &PlotConfig, epochs: usize) -> Self {
        let margin = config.margin as i32;
        Self {
            left: margin,
            right: config.width as i32 - margin - 1,
            top: margin,
            bottom: config.height as i32 - margin - 1,
            y_min: config.y_min,
            y_max: config.y_max,
            epochs,
        }
    }

    fn x(&self, epoch: usize) -> i32 {
        if self.epochs <= 1 {
            return (self.left + self.right) / 2;
        }
        let fraction = epoch as f64 / (self.epochs - 1) as f64;
        self.left + (fraction * f64::from(self.right - self.left)).round() as i32
    }

    /// Values outside the vertical range stick to the frame.
    fn y(&self, value: f64) -> i32 {
        let clamped = value.clamp(self.y_min, self.y_max);
        let fraction = (clamped - self.y_min) / (self.y_max - self.y_min);
        self.bottom - (fraction * f64::from(self.bottom - self.top)).round() as i32
    }

    /// The frame, both edges included.
    fn frame(&self) -> Rect {
        Rect::at(self.left, self.top).of_size(
            (self.right - self.left + 1) as u32,
            (self.bottom - self.top + 1) as u32,
        )
    }
}

/// Legend entries laid out left to right in the top margin.
struct Legend<'a> {
    font: Option<&'a FontVec>,
    scale: PxScale,
    swatch: i32,
    center: i32,
    cursor: i32,
}

impl<'a> Legend<'a> {
    fn new(config: &PlotConfig, font: Option<&'a FontVec>) -> Self {
        let margin = config.margin as i32;
        Self {
            font,
            scale: PxScale::from((config.margin as f32 * 0.4).max(1.0)),
            swatch: (margin / 4).max(1),
            center: margin / 2,
            cursor: margin,
        }
    }

    fn draw_entry(&mut self, image: &mut RgbImage, name: &str, color: Rgb<u8>) {
        let swatch = Rect::at(self.cursor, self.center - self.swatch / 2)
            .of_size(self.swatch as u32 * 2, self.swatch as u32);
        draw_filled_rect_mut(image, swatch, color);
        self.cursor += self.swatch * 2;

        if let Some(font) = self.font {
            let x = self.cursor + (self.swatch / 2).max(1);
            let (width, height) = text_size(self.scale, font, name);
            let y = self.center - height as i32 / 2;
            draw_text_mut(image, FRAME, x, y, self.scale, font, name);
            self.cursor = x + width as i32;
        }
        self.cursor += self.swatch;
    }
}

/// Render every series of `history` into an image.
pub fn render_history(history: &TrainingHistory, config: &PlotConfig) -> MilkitResult<RgbImage> {
    config.validate()?;
    let epochs = history.epochs()?;
    let font = config.legend_font.as_deref().map(load_font).transpose()?;
    let area = PlotArea::new(config, epochs);

    let mut image = RgbImage::from_pixel(config.width, config.height, BACKGROUND);
    draw_grid(&mut image, &area, config.grid_lines);
    draw_hollow_rect_mut(&mut image, area.frame(), FRAME);

    let mut legend = Legend::new(config, font.as_ref());
    for (index, (name, values)) in history.series().enumerate() {
        let color = Rgb(PALETTE[index % PALETTE.len()]);
        debug!("Series {name:?} drawn in color {:?}", color.0);

        draw_series(&mut image, &area, values, color);
        legend.draw_entry(&mut image, name, color);
    }

    Ok(image)
}

/// Plot `history` and write the chart to `path` as PNG.
pub fn plot_history(
    history: &TrainingHistory,
    path: impl AsRef<Path>,
    config: &PlotConfig,
) -> MilkitResult<PathBuf> {
    let path = path.as_ref();
    let image = render_history(history, config)?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| MilkitError::Image {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        "Plotted {} series over {} epochs to {}",
        history.len(),
        history.epochs()?,
        path.display()
    );
    Ok(path.to_path_buf())
}

fn load_font(path: &Path) -> MilkitResult<FontVec> {
    let bytes = fs::read(path).map_err(|source| MilkitError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    FontVec::try_from_vec(bytes).map_err(|source| MilkitError::FontFormat {
        path: path.to_path_buf(),
        source,
    })
}

fn draw_grid(image: &mut RgbImage, area: &PlotArea, cells: u32) {
    let cells = i64::from(cells.max(1));
    let (left, right) = (i64::from(area.left), i64::from(area.right));
    let (top, bottom) = (i64::from(area.top), i64::from(area.bottom));
    for i in 1..cells {
        let y = (top + i * (bottom - top) / cells) as f32;
        draw_line_segment_mut(image, (left as f32, y), (right as f32, y), GRID);
        let x = (left + i * (right - left) / cells) as f32;
        draw_line_segment_mut(image, (x, top as f32), (x, bottom as f32), GRID);
    }
}

/// Connect consecutive finite values; a non-finite value breaks the line.
fn draw_series(image: &mut RgbImage, area: &PlotArea, values: &[f64], color: Rgb<u8>) {
    let points: Vec<Option<(i32, i32)>> = values
        .iter()
        .enumerate()
        .map(|(epoch, value)| value.is_finite().then(|| (area.x(epoch), area.y(*value))))
        .collect();

    for (i, point) in points.iter().enumerate() {
        let Some((x, y)) = *point else { continue };
        let next = points.get(i + 1).copied().flatten();
        let previous = i.checked_sub(1).and_then(|j| points[j]);

        match next {
            Some((next_x, next_y)) => draw_line_segment_mut(
                image,
                (x as f32, y as f32),
                (next_x as f32, next_y as f32),
                color,
            ),
            // Isolated values get a 3x3 dot.
            None if previous.is_none() => {
                draw_filled_rect_mut(image, Rect::at(x - 1, y - 1).of_size(3, 3), color);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn history(series: &[(&str, &[f64])]) -> TrainingHistory {
        let mut history = TrainingHistory::new();
        for (name, values) in series {
            history.insert(*name, values.to_vec());
        }
        history
    }

    #[test]
    fn test_history_from_json() {
        let history: TrainingHistory =
            serde_json::from_str(r#"{"loss": [0.7, 0.5], "bag_accuracy": [0.4, 0.6]}"#).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.get("loss"), Some(&[0.7, 0.5][..]));
        assert_eq!(history.epochs().unwrap(), 2);
    }

    #[test]
    fn test_history_push() {
        let mut history = TrainingHistory::new();
        history.push("loss", 0.9);
        history.push("loss", 0.8);

        assert_eq!(history.get("loss"), Some(&[0.9, 0.8][..]));
    }

    #[test]
    fn test_empty_history_is_invalid() {
        let result = render_history(&TrainingHistory::new(), &PlotConfig::new());

        assert!(matches!(result, Err(MilkitError::InvalidHistory { .. })));
    }

    #[test]
    fn test_ragged_history_is_invalid() {
        let history = history(&[("loss", &[0.5, 0.4]), ("val_loss", &[0.6])]);

        match history.epochs() {
            Err(MilkitError::InvalidHistory { reason }) => assert!(reason.contains("val_loss")),
            other => panic!("Expected InvalidHistory error, got {other:?}"),
        }
    }

    #[test]
    fn test_render_dimensions() {
        let history = history(&[("loss", &[0.9, 0.5, 0.3])]);

        let image = render_history(&history, &PlotConfig::new()).unwrap();

        assert_eq!(image.dimensions(), (800, 500));
    }

    #[test]
    fn test_series_colors_and_clamping() {
        let config = PlotConfig::new();
        // "a" runs along the top edge; "b" is clamped onto the bottom edge.
        let history = history(&[("a", &[1.0, 1.0, 1.0]), ("b", &[0.0, 0.0, -2.0])]);

        let image = render_history(&history, &config).unwrap();

        assert_eq!(image.get_pixel(200, 40), &Rgb(PALETTE[0]));
        assert_eq!(image.get_pixel(200, 459), &Rgb(PALETTE[1]));
        assert_eq!(image.get_pixel(600, 459), &Rgb(PALETTE[1]));
        // Frame edge and untouched background outside the plot area.
        assert_eq!(image.get_pixel(40, 100), &FRAME);
        assert_eq!(image.get_pixel(5, 495), &BACKGROUND);
    }

    #[test]
    fn test_legend_swatches_follow_series_order() {
        let history = history(&[("loss", &[0.5, 0.4]), ("val_loss", &[0.6, 0.5])]);

        let image = render_history(&history, &PlotConfig::new()).unwrap();

        // Swatches are 20x10 pixels with a 10 pixel gap, starting at the margin.
        assert_eq!(image.get_pixel(45, 20), &Rgb(PALETTE[0]));
        assert_eq!(image.get_pixel(75, 20), &Rgb(PALETTE[1]));
        assert_eq!(image.get_pixel(65, 20), &BACKGROUND);
    }

    #[test]
    fn test_legend_labels_drawn_with_font() {
        let font = Path::new("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf");
        if !font.exists() {
            return;
        }
        let history = history(&[("loss", &[0.5, 0.4])]);
        let legend_text = |image: &RgbImage| {
            (62..200)
                .flat_map(|x| (0..36).map(move |y| (x, y)))
                .filter(|&(x, y)| image.get_pixel(x, y) != &BACKGROUND)
                .count()
        };

        let plain = render_history(&history, &PlotConfig::new()).unwrap();
        let labeled = render_history(
            &history,
            &PlotConfig::new().with_legend_font(Some(font.to_path_buf())),
        )
        .unwrap();

        assert_eq!(legend_text(&plain), 0);
        assert!(legend_text(&labeled) > 0);
        assert_eq!(labeled.get_pixel(45, 20), &Rgb(PALETTE[0]));
    }

    #[test]
    fn test_invalid_legend_font() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("font.ttf");
        fs::write(&path, b"not a font").unwrap();
        let history = history(&[("loss", &[0.5])]);

        let config = PlotConfig::new().with_legend_font(Some(path.clone()));
        match render_history(&history, &config) {
            Err(MilkitError::FontFormat { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected FontFormat error, got {other:?}"),
        }

        let missing = PlotConfig::new().with_legend_font(Some(dir.path().join("missing.ttf")));
        assert!(matches!(
            render_history(&history, &missing),
            Err(MilkitError::FontRead { .. })
        ));
    }

    #[test]
    fn test_single_epoch_draws_point() {
        let history = history(&[("loss", &[0.5])]);

        let image = render_history(&history, &PlotConfig::new()).unwrap();

        let area = PlotArea::new(&PlotConfig::new(), 1);
        let (x, y) = (area.x(0) as u32, area.y(0.5) as u32);
        assert_eq!(image.get_pixel(x, y), &Rgb(PALETTE[0]));
        assert_eq!(image.get_pixel(x + 1, y + 1), &Rgb(PALETTE[0]));
    }

    #[test]
    fn test_plot_history_writes_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.png");
        let history = history(&[("loss", &[0.8, 0.4]), ("bag_accuracy", &[0.5, 0.75])]);

        plot_history(&history, &path, &PlotConfig::new().with_width(320).with_height(240))
            .unwrap();

        let written = image::open(&path).unwrap();
        assert_eq!((written.width(), written.height()), (320, 240));
    }

    #[test]
    fn test_history_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let history = history(&[("loss", &[0.8, 0.4])]);

        history.save(&path).unwrap();

        assert_eq!(TrainingHistory::load(&path).unwrap(), history);
    }

    #[test]
    fn test_invalid_plot_config() {
        let config = PlotConfig::new().with_y_min(1.0).with_y_max(1.0);

        assert!(matches!(
            config.validate(),
            Err(MilkitError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_huge_margin_is_rejected() {
        let config = PlotConfig::new().with_margin(u32::MAX);

        match config.validate() {
            Err(MilkitError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("margin"))
            }
            other => panic!("Expected InvalidConfiguration error, got {other:?}"),
        }

        let history = history(&[("loss", &[0.5])]);
        assert!(render_history(&history, &PlotConfig::new().with_width(u32::MAX)).is_err());
    }
}
