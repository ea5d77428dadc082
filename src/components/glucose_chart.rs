//! Glucose Chart Component
//!
//! CGM history line chart using HTML5 Canvas. The vertical domain is fixed
//! at [50, 350] mg/dL; readings outside it are clipped visually, never
//! rejected. Rendering is a pure function of the input series.

use leptos::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::GlucosePoint;

/// Fixed chart domain in mg/dL
pub const GLUCOSE_MIN: f64 = 50.0;
pub const GLUCOSE_MAX: f64 = 350.0;

/// Readings outside this band trigger the alert banner, matching the
/// backend's own alert thresholds.
const NORMAL_LOW: f64 = 85.0;
const NORMAL_HIGH: f64 = 200.0;

const GLUCOSE_COLOR: &str = "#ef4444";
const TARGET_COLOR: &str = "#10b981";

/// Glucose history chart with target line and out-of-range alert banner
#[component]
pub fn GlucoseChart(#[prop(into)] series: Signal<Vec<GlucosePoint>>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the series changes
    create_effect(move |_| {
        let points = series.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_glucose_chart(&canvas, &points);
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

            // Legend
            <div class="flex justify-center gap-6 mt-4">
                <LegendSwatch color=GLUCOSE_COLOR label="Glucose (mg/dL)" />
                <LegendSwatch color=TARGET_COLOR label="Target" />
            </div>

            // Out-of-range alert
            {move || {
                out_of_range_alert(&series.get()).map(|alert| view! {
                    <div class="mt-4 bg-red-900/40 border-l-4 border-red-500 p-3 rounded">
                        <span class="text-red-300 text-sm font-semibold">
                            "\u{26a0} " {alert}
                        </span>
                    </div>
                })
            }}
        </div>
    }
}

#[component]
fn LegendSwatch(color: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-2">
            <div
                class="w-3 h-3 rounded-full"
                style=format!("background-color: {}", color)
            />
            <span class="text-sm text-gray-300">{label}</span>
        </div>
    }
}

/// Find the first reading outside the normal band, for the alert banner.
pub fn out_of_range_alert(series: &[GlucosePoint]) -> Option<String> {
    series.iter().find_map(|point| {
        let value = point.value?;
        if value > NORMAL_HIGH || value < NORMAL_LOW {
            Some(format!(
                "Alert: {} reading {:.0} mg/dL is outside the normal range ({:.0}-{:.0})",
                point.label, value, NORMAL_LOW, NORMAL_HIGH
            ))
        } else {
            None
        }
    })
}

/// Project a glucose value onto the canvas y axis, clipped to the fixed
/// domain. Canvas y grows downward.
fn project_y(value: f64, top: f64, height: f64) -> f64 {
    let clipped = value.clamp(GLUCOSE_MIN, GLUCOSE_MAX);
    top + (GLUCOSE_MAX - clipped) / (GLUCOSE_MAX - GLUCOSE_MIN) * height
}

/// X position for point `index` in a series of `len` points. A single
/// point sits centered.
fn project_x(index: usize, len: usize, left: f64, width: f64) -> f64 {
    if len <= 1 {
        left + width / 2.0
    } else {
        left + (index as f64 / (len - 1) as f64) * width
    }
}

/// Draw the chart on canvas
fn draw_glucose_chart(canvas: &HtmlCanvasElement, series: &[GlucosePoint]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 60.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    // Grid lines every 50 mg/dL with y labels
    ctx.set_stroke_style(&"#374151".into());
    ctx.set_line_width(1.0);

    let steps = ((GLUCOSE_MAX - GLUCOSE_MIN) / 50.0) as i32;
    for i in 0..=steps {
        let value = GLUCOSE_MAX - i as f64 * 50.0;
        let y = project_y(value, margin_top, chart_height);

        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    let len = series.len();

    // Target line, dashed
    let targets: Vec<(usize, f64)> = series
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.target.map(|t| (i, t)))
        .collect();

    if !targets.is_empty() {
        let dash = js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(6.0));
        let _ = ctx.set_line_dash(&dash);

        ctx.set_stroke_style(&TARGET_COLOR.into());
        ctx.set_line_width(2.0);
        ctx.begin_path();

        for (drawn, (i, target)) in targets.iter().enumerate() {
            let x = project_x(*i, len, margin_left, chart_width);
            let y = project_y(*target, margin_top, chart_height);
            if drawn == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();

        let _ = ctx.set_line_dash(&js_sys::Array::new());
    }

    // Glucose line; points with a missing value are skipped as unknown
    let readings: Vec<(usize, f64)> = series
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.value.map(|v| (i, v)))
        .collect();

    if !readings.is_empty() {
        ctx.set_stroke_style(&GLUCOSE_COLOR.into());
        ctx.set_line_width(3.0);
        ctx.begin_path();

        for (drawn, (i, value)) in readings.iter().enumerate() {
            let x = project_x(*i, len, margin_left, chart_width);
            let y = project_y(*value, margin_top, chart_height);
            if drawn == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();

        // Point markers
        ctx.set_fill_style(&GLUCOSE_COLOR.into());
        for (i, value) in &readings {
            let x = project_x(*i, len, margin_left, chart_width);
            let y = project_y(*value, margin_top, chart_height);
            ctx.begin_path();
            let _ = ctx.arc(x, y, 4.0, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
        }
    }

    // X-axis labels
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");

    let label_stride = (len / 7).max(1);
    for (i, point) in series.iter().enumerate() {
        if i % label_stride != 0 {
            continue;
        }
        let x = project_x(i, len, margin_left, chart_width);
        let _ = ctx.fill_text(&point.label, x - 12.0, height - 10.0);
    }

    // Empty state message
    if readings.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No readings yet", width / 2.0 - 55.0, height / 2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP: f64 = 20.0;
    const HEIGHT: f64 = 340.0;

    #[test]
    fn test_projection_is_monotonic_and_distinct() {
        // A 280 reading must land strictly above a 100 target (canvas y
        // grows downward, so its y is smaller).
        let reading_y = project_y(280.0, TOP, HEIGHT);
        let target_y = project_y(100.0, TOP, HEIGHT);
        assert!(reading_y < target_y);
    }

    #[test]
    fn test_projection_clips_to_domain() {
        assert_eq!(project_y(400.0, TOP, HEIGHT), project_y(GLUCOSE_MAX, TOP, HEIGHT));
        assert_eq!(project_y(20.0, TOP, HEIGHT), project_y(GLUCOSE_MIN, TOP, HEIGHT));
        assert_eq!(project_y(GLUCOSE_MAX, TOP, HEIGHT), TOP);
        assert_eq!(project_y(GLUCOSE_MIN, TOP, HEIGHT), TOP + HEIGHT);
    }

    #[test]
    fn test_projection_is_pure() {
        for _ in 0..3 {
            assert_eq!(project_y(142.0, TOP, HEIGHT), project_y(142.0, TOP, HEIGHT));
        }
    }

    #[test]
    fn test_single_point_is_centered() {
        assert_eq!(project_x(0, 1, 60.0, 720.0), 60.0 + 360.0);
    }

    #[test]
    fn test_points_span_the_chart_width() {
        assert_eq!(project_x(0, 7, 60.0, 720.0), 60.0);
        assert_eq!(project_x(6, 7, 60.0, 720.0), 780.0);
    }

    #[test]
    fn test_alert_flags_sample_spike() {
        let series = GlucosePoint::sample_week();
        let alert = out_of_range_alert(&series).expect("spike should be flagged");
        assert!(alert.contains("Wed"));
        assert!(alert.contains("280"));
    }

    #[test]
    fn test_no_alert_for_normal_readings() {
        let series = vec![GlucosePoint {
            label: "Mon".to_string(),
            value: Some(110.0),
            target: Some(100.0),
        }];
        assert!(out_of_range_alert(&series).is_none());
    }

    #[test]
    fn test_alert_skips_unknown_values() {
        let series = vec![GlucosePoint {
            label: "Mon".to_string(),
            value: None,
            target: None,
        }];
        assert!(out_of_range_alert(&series).is_none());
    }
}
