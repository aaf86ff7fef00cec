use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Rgb, RgbImage};

use crate::consts::{
    FIGURE_BACKGROUND, GLYPH_SIZE, MAX_FIGURE_HEIGHT, MAX_FIGURE_WIDTH, PANEL_TITLES, TITLE_COLOR,
};

/// Spacing of the three-panel figure, derived from the panel size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FigureLayout {
    pub panel_width: u32,
    pub panel_height: u32,
    /// Outer border on every side.
    pub margin: u32,
    /// Horizontal space between panels.
    pub gap: u32,
    /// Pixel size of one font dot.
    pub title_scale: u32,
    /// Height reserved above the panels for titles.
    pub title_band: u32,
}

impl FigureLayout {
    pub fn for_panel(panel_width: u32, panel_height: u32) -> Self {
        let margin = (panel_width / 40).max(8);
        let gap = (panel_width / 10).max(8);
        let longest = PANEL_TITLES.iter().map(|t| t.len()).max().unwrap_or(1) as u32;
        // The longest title spans roughly 60% of a panel.
        let title_scale = (panel_width * 3 / 5 / (longest * GLYPH_SIZE)).max(1);
        let title_band = GLYPH_SIZE * title_scale + margin;

        Self {
            panel_width,
            panel_height,
            margin,
            gap,
            title_scale,
            title_band,
        }
    }

    /// Layout for panels of `panel_width x panel_height`, shrinking the
    /// panels until the whole canvas fits in `max_width x max_height`.
    ///
    /// Panels never shrink below 1x1, so a canvas that cannot fit even
    /// then is returned at that size.
    pub fn fitted(panel_width: u32, panel_height: u32, max_width: u32, max_height: u32) -> Self {
        let mut layout = Self::for_panel(panel_width, panel_height);
        loop {
            let (cw, ch) = layout.canvas_size();
            let smallest = layout.panel_width <= 1 && layout.panel_height <= 1;
            if (cw <= max_width && ch <= max_height) || smallest {
                return layout;
            }
            let scale = (max_width as f64 / cw as f64).min(max_height as f64 / ch as f64);
            // Every side above 1 loses at least a pixel per round.
            let shrink = |v: u32| {
                ((v as f64 * scale).floor() as u32).clamp(1, v.saturating_sub(1).max(1))
            };
            layout = Self::for_panel(shrink(layout.panel_width), shrink(layout.panel_height));
        }
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (
            2 * self.margin + 3 * self.panel_width + 2 * self.gap,
            2 * self.margin + self.title_band + self.panel_height,
        )
    }

    /// Top-left corner of panel `index` (0..3).
    pub fn panel_origin(&self, index: u32) -> (u32, u32) {
        (
            self.margin + index * (self.panel_width + self.gap),
            self.margin + self.title_band,
        )
    }
}

/// Lay out original, edges and annotated image side by side with titles.
///
/// All three inputs are expected to share the dimensions of `original`.
/// Panels are scaled down when the figure would exceed
/// [`MAX_FIGURE_WIDTH`] x [`MAX_FIGURE_HEIGHT`].
pub fn compose_figure(original: &RgbImage, edges: &GrayImage, annotated: &RgbImage) -> RgbImage {
    let (w, h) = original.dimensions();
    let layout = FigureLayout::fitted(w, h, MAX_FIGURE_WIDTH, MAX_FIGURE_HEIGHT);
    let (pw, ph) = (layout.panel_width, layout.panel_height);
    let (cw, ch) = layout.canvas_size();
    let mut canvas = RgbImage::from_pixel(cw, ch, Rgb(FIGURE_BACKGROUND));

    let edges_rgb = DynamicImage::ImageLuma8(edges.clone()).to_rgb8();
    let panels: [RgbImage; 3] = [original, &edges_rgb, annotated].map(|panel| {
        if panel.dimensions() == (pw, ph) {
            panel.clone()
        } else {
            imageops::resize(panel, pw, ph, FilterType::Triangle)
        }
    });

    for (i, (panel, title)) in panels.iter().zip(PANEL_TITLES).enumerate() {
        let (x, y) = layout.panel_origin(i as u32);
        imageops::replace(&mut canvas, panel, x as i64, y as i64);

        let text_width = title.chars().count() as u32 * GLYPH_SIZE * layout.title_scale;
        let tx = x + pw.saturating_sub(text_width) / 2;
        draw_text(&mut canvas, title, tx, layout.margin, layout.title_scale);
    }

    canvas
}

/// Render `text` with the 8x8 bitmap font, each dot `scale` pixels wide.
/// Pixels falling outside the canvas are clipped.
fn draw_text(canvas: &mut RgbImage, text: &str, x0: u32, y0: u32, scale: u32) {
    let (cw, ch) = canvas.dimensions();
    let color = Rgb(TITLE_COLOR);

    for (ci, c) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(c) else {
            continue;
        };
        for (gy, bits) in glyph.iter().enumerate() {
            for gx in 0..GLYPH_SIZE {
                if bits & (1u8 << gx) == 0 {
                    continue;
                }
                let px = x0 + (ci as u32 * GLYPH_SIZE + gx) * scale;
                let py = y0 + gy as u32 * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        let (x, y) = (px + sx, py + sy);
                        if x < cw && y < ch {
                            canvas.put_pixel(x, y, color);
                        }
                    }
                }
            }
        }
    }
}
