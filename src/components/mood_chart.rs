//! Mood Chart Component
//!
//! Mood-frequency bar chart using HTML5 Canvas. Counts are integers, so
//! the y axis only ever shows integer ticks. Rendering is a pure function
//! of the input counts.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::MoodCount;

const BAR_COLOR: &str = "#8b5cf6";

/// Mood frequency bar chart
#[component]
pub fn MoodChart(#[prop(into)] counts: Signal<Vec<MoodCount>>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let counts = counts.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_mood_chart(&canvas, &counts);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-80 rounded-lg"
            />
        </div>
    }
}

/// Integer tick step so the axis shows at most about five ticks.
fn tick_step(max_count: u32) -> u32 {
    ((max_count + 4) / 5).max(1)
}

/// Axis maximum: the highest count rounded up to a tick multiple.
fn axis_max(max_count: u32) -> u32 {
    let step = tick_step(max_count);
    let max = max_count.max(1);
    max.div_ceil(step) * step
}

/// Horizontal geometry for bar `index` of `len`: (x, bar width).
fn bar_geometry(index: usize, len: usize, left: f64, width: f64) -> (f64, f64) {
    let slot = width / len as f64;
    let bar_width = slot * 0.6;
    (left + index as f64 * slot + slot * 0.2, bar_width)
}

/// Draw the chart on canvas
fn draw_mood_chart(canvas: &HtmlCanvasElement, counts: &[MoodCount]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 50.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0);
    let top_value = axis_max(max_count);
    let step = tick_step(max_count);

    // Integer grid lines with y labels
    ctx.set_stroke_style(&"#374151".into());
    ctx.set_line_width(1.0);

    let mut tick = 0u32;
    while tick <= top_value {
        let y = margin_top + (top_value - tick) as f64 / top_value as f64 * chart_height;

        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&tick.to_string(), 15.0, y + 4.0);

        tick += step;
    }

    if counts.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No moods logged yet", width / 2.0 - 70.0, height / 2.0);
        return;
    }

    // Bars with mood labels under each
    for (i, entry) in counts.iter().enumerate() {
        let (x, bar_width) = bar_geometry(i, counts.len(), margin_left, chart_width);
        let bar_height = entry.count as f64 / top_value as f64 * chart_height;
        let y = margin_top + chart_height - bar_height;

        ctx.set_fill_style(&BAR_COLOR.into());
        ctx.fill_rect(x, y, bar_width, bar_height);

        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&entry.mood, x, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_counts_use_unit_ticks() {
        assert_eq!(tick_step(0), 1);
        assert_eq!(tick_step(3), 1);
        assert_eq!(tick_step(5), 1);
    }

    #[test]
    fn test_larger_counts_stay_integer() {
        assert_eq!(tick_step(12), 3);
        assert_eq!(tick_step(23), 5);
    }

    #[test]
    fn test_axis_max_covers_data() {
        assert_eq!(axis_max(3), 3);
        assert_eq!(axis_max(0), 1);
        // 12 with step 3 rounds to 12; 13 with step 3 rounds to 15
        assert_eq!(axis_max(12), 12);
        assert_eq!(axis_max(13), 15);
    }

    #[test]
    fn test_bars_do_not_overlap() {
        let (x0, w0) = bar_geometry(0, 4, 50.0, 720.0);
        let (x1, _) = bar_geometry(1, 4, 50.0, 720.0);
        assert!(x0 + w0 < x1);
    }
}
