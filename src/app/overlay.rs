//! Overlay painting on top of the rendered frame: axes, legend, hover.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Stroke};

use crate::color_scheme::ColorScheme;
use crate::config::ScatterConfig;
use crate::data::dataset::Point;
use crate::render::Hit;
use crate::session::ScatterSession;
use crate::ticks::{format_tick, nice_ticks};

const TICK_LEN: f32 = 5.0;
const TARGET_TICKS: usize = 6;

/// Axis lines along the left and bottom plot edges with ticks for the
/// visible data range.
pub(super) fn draw_axes(
    painter: &egui::Painter,
    session: &ScatterSession,
    plot_rect: Rect,
    scheme: ColorScheme,
) {
    let ink = scheme.foreground().to_color32();
    let stroke = Stroke::new(1.0, ink);
    let font = FontId::proportional(11.0);

    painter.line_segment([plot_rect.left_bottom(), plot_rect.right_bottom()], stroke);
    painter.line_segment([plot_rect.left_top(), plot_rect.left_bottom()], stroke);

    let (x_min, x_max, y_min, y_max) = session.visible_data_bounds();

    let xs = nice_ticks(x_min, x_max, TARGET_TICKS);
    let x_step = tick_step(&xs);
    for v in xs {
        let (sx, _) = session.data_to_screen(v, 0.0);
        let x = plot_rect.min.x + sx as f32;
        if x < plot_rect.min.x || x > plot_rect.max.x {
            continue;
        }
        let base = Pos2::new(x, plot_rect.max.y);
        painter.line_segment([base, base + egui::vec2(0.0, TICK_LEN)], stroke);
        painter.text(
            base + egui::vec2(0.0, TICK_LEN + 2.0),
            Align2::CENTER_TOP,
            format_tick(v, x_step),
            font.clone(),
            ink,
        );
    }

    let ys = nice_ticks(y_min, y_max, TARGET_TICKS);
    let y_step = tick_step(&ys);
    for v in ys {
        let (_, sy) = session.data_to_screen(0.0, v);
        let y = plot_rect.min.y + sy as f32;
        if y < plot_rect.min.y || y > plot_rect.max.y {
            continue;
        }
        let base = Pos2::new(plot_rect.min.x, y);
        painter.line_segment([base, base - egui::vec2(TICK_LEN, 0.0)], stroke);
        painter.text(
            base - egui::vec2(TICK_LEN + 2.0, 0.0),
            Align2::RIGHT_CENTER,
            format_tick(v, y_step),
            font.clone(),
            ink,
        );
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => b - a,
        _ => 1.0,
    }
}

/// Ring around the hovered point.
pub(super) fn draw_hover_ring(
    painter: &egui::Painter,
    hit: &Hit,
    config: &ScatterConfig,
    plot_rect: Rect,
) {
    let center = plot_rect.min + egui::vec2(hit.screen_x as f32, hit.screen_y as f32);
    if !plot_rect.contains(center) {
        return;
    }
    let radius = (config.points.size_px as f32 * 0.5 + 3.0).max(4.0);
    let ink = config.color_scheme.foreground().to_color32();
    painter.circle_stroke(center, radius, Stroke::new(1.5, ink));
}

/// Category and data coordinates of the hovered point.
pub(super) fn draw_tooltip(
    painter: &egui::Painter,
    point: &Point,
    hit: &Hit,
    plot_rect: Rect,
    scheme: ColorScheme,
) {
    let text = format!("{}\nx: {:.4}\ny: {:.4}", point.category, point.x, point.y);
    let ink = scheme.foreground().to_color32();
    let galley = painter.layout_no_wrap(text, FontId::proportional(12.0), ink);
    let anchor = plot_rect.min + egui::vec2(hit.screen_x as f32 + 10.0, hit.screen_y as f32 + 10.0);
    let size = galley.size() + egui::vec2(12.0, 8.0);
    // keep the box inside the plot area
    let min = Pos2::new(
        anchor.x.min(plot_rect.max.x - size.x).max(plot_rect.min.x),
        anchor.y.min(plot_rect.max.y - size.y).max(plot_rect.min.y),
    );
    let rect = Rect::from_min_size(min, size);
    painter.rect_filled(rect, 4.0, panel_fill(scheme));
    painter.rect_stroke(rect, 4.0, Stroke::new(1.0, ink), egui::StrokeKind::Inside);
    painter.galley(rect.min + egui::vec2(6.0, 4.0), galley, ink);
}

/// Category swatches with record counts, top-right of the plot.
pub(super) fn draw_legend(
    painter: &egui::Painter,
    session: &ScatterSession,
    plot_rect: Rect,
    scheme: ColorScheme,
) {
    let entries = session.color_table().entries();
    if entries.is_empty() {
        return;
    }
    let ink = scheme.foreground().to_color32();
    let font = FontId::proportional(12.0);
    let counts = session.dataset().category_counts();

    let galleys: Vec<_> = entries
        .iter()
        .map(|(cat, _)| {
            let n = counts.get(cat.as_str()).copied().unwrap_or(0);
            painter.layout_no_wrap(format!("{cat} ({n})"), font.clone(), ink)
        })
        .collect();
    let row_h = galleys
        .iter()
        .map(|g| g.size().y)
        .fold(12.0_f32, f32::max)
        + 4.0;
    let text_w = galleys.iter().map(|g| g.size().x).fold(0.0_f32, f32::max);
    let swatch = 10.0;
    let size = egui::vec2(swatch + 8.0 + text_w + 16.0, row_h * entries.len() as f32 + 8.0);
    let rect = Rect::from_min_size(
        Pos2::new(plot_rect.max.x - size.x - 8.0, plot_rect.min.y + 8.0),
        size,
    );
    painter.rect_filled(rect, 4.0, panel_fill(scheme));

    for (i, ((_, color), galley)) in entries.iter().zip(galleys).enumerate() {
        let top = rect.min.y + 4.0 + i as f32 * row_h;
        let sw = Rect::from_min_size(
            Pos2::new(rect.min.x + 8.0, top + (row_h - swatch) * 0.5),
            egui::vec2(swatch, swatch),
        );
        painter.rect_filled(sw, 2.0, color.to_color32());
        let text_pos = Pos2::new(sw.max.x + 8.0, top + (row_h - galley.size().y) * 0.5);
        painter.galley(text_pos, galley, ink);
    }
}

fn panel_fill(scheme: ColorScheme) -> Color32 {
    let bg = scheme.plot_background();
    Color32::from_rgba_unmultiplied(bg.r, bg.g, bg.b, 230)
}
