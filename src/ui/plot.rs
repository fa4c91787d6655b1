use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, FontId, Ui, Vec2};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, GridMark, Legend, MarkerShape, Plot, PlotPoint,
    PlotResponse, PlotUi, Points, Text,
};

use crate::figure::{Axis, ChartKind, Figure, Trace};

/// Vertical room reserved under a plot for rotated category labels.
const ROTATED_LABEL_SPACE: f32 = 110.0;

// ---------------------------------------------------------------------------
// Figure rendering
// ---------------------------------------------------------------------------

/// Draw a declarative figure with egui_plot.
pub fn figure_plot(ui: &mut Ui, id: &str, figure: &Figure) {
    if let Some(title) = &figure.title {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.strong(title.as_str());
        });
    }
    let caption = match &figure.size_label {
        Some(size) => format!("Color: {}   Tamaño: {size}", figure.legend_title),
        None => format!("Color: {}", figure.legend_title),
    };
    ui.horizontal(|ui: &mut Ui| {
        ui.label(egui::RichText::new(caption).small().color(Color32::DARK_GRAY));
        if figure.is_empty() {
            ui.label(egui::RichText::new("Sin datos para esta selección").small().weak());
        }
    });

    let x_axis = figure.x_axis.clone();
    let hover_axis = figure.x_axis.clone();
    let rotated = figure.x_axis.is_rotated();

    let mut plot = Plot::new(id)
        .legend(Legend::default())
        .width(figure.width.min(ui.available_width()))
        .height(figure.height)
        .y_axis_label(figure.y_axis.title.as_str())
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            if rotated {
                String::new()
            } else {
                category_at(&x_axis, mark.value).unwrap_or_default()
            }
        })
        .label_formatter(move |name: &str, value: &PlotPoint| {
            let category = category_at(&hover_axis, value.x).unwrap_or_default();
            if name.is_empty() {
                format!("{category}: {:.0}", value.y)
            } else {
                format!("{name}\n{category}: {:.0}", value.y)
            }
        })
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false);
    if let Some(title) = plot_axis_title(&figure.x_axis) {
        plot = plot.x_axis_label(title);
    }

    let response = plot.show(ui, |plot_ui| match figure.kind {
        ChartKind::Scatter => {
            for trace in &figure.traces {
                scatter_trace(plot_ui, &figure.x_axis, trace);
            }
        }
        ChartKind::Bar => {
            for trace in &figure.traces {
                bar_trace(plot_ui, &figure.x_axis, trace);
            }
        }
    });

    if rotated {
        rotated_category_labels(ui, &figure.x_axis, &response);
    }
}

fn scatter_trace(plot_ui: &mut PlotUi, axis: &Axis, trace: &Trace) {
    let color: Color32 = trace.color.into();

    // One item per datum so each marker keeps its own size; items sharing a
    // name collapse into one legend entry.
    for datum in &trace.data {
        let Some(x) = axis.category_index(&datum.x) else {
            continue;
        };
        let diameter = match (trace.sizing, datum.size) {
            (Some(sizing), Some(size)) => sizing.diameter(size),
            _ => 8.0,
        };
        let position = [x as f64, datum.y];

        let points = Points::new(vec![position])
            .name(&trace.name)
            .shape(MarkerShape::Circle)
            .radius(diameter / 2.0)
            .color(color)
            .filled(!trace.highlight);
        plot_ui.points(points);

        if let Some(text) = &datum.text {
            plot_ui.text(
                Text::new(PlotPoint::new(x as f64, datum.y), text.as_str())
                    .color(color)
                    .anchor(egui::Align2::CENTER_BOTTOM),
            );
        }
    }
}

fn bar_trace(plot_ui: &mut PlotUi, axis: &Axis, trace: &Trace) {
    let color: Color32 = trace.color.into();
    let bars: Vec<Bar> = trace
        .data
        .iter()
        .filter_map(|datum| {
            let x = axis.category_index(&datum.x)?;
            Some(Bar::new(x as f64, datum.y).width(0.8).fill(color).name(&datum.x))
        })
        .collect();

    plot_ui.bar_chart(BarChart::new(bars).name(&trace.name).color(color));
}

/// Paint category labels under the plot, rotated by the axis tick angle.
fn rotated_category_labels(ui: &mut Ui, axis: &Axis, response: &PlotResponse<()>) {
    let frame = response.transform.frame();
    let angle = axis.tick_angle.to_radians();
    let painter = ui.painter().clone();

    for (i, label) in axis.categories.iter().enumerate() {
        let anchor = response
            .transform
            .position_from_point(&PlotPoint::new(i as f64, 0.0));
        if anchor.x < frame.left() || anchor.x > frame.right() {
            continue;
        }
        let galley = painter.layout_no_wrap(
            label.clone(),
            FontId::proportional(12.0),
            Color32::DARK_GRAY,
        );
        let pos = egui::pos2(anchor.x, frame.bottom() + 4.0);
        painter.add(egui::epaint::TextShape::new(pos, galley, Color32::DARK_GRAY).with_angle(angle));
    }

    ui.allocate_space(Vec2::new(ui.available_width(), ROTATED_LABEL_SPACE));
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(axis.title.as_str());
    });
}

/// Axis title egui_plot draws itself. Rotated axes get theirs painted below
/// the rotated labels instead.
fn plot_axis_title(axis: &Axis) -> Option<&str> {
    if axis.is_rotated() {
        None
    } else {
        Some(axis.title.as_str())
    }
}

/// Label of the category nearest to `value`, if `value` sits on one.
fn category_at(axis: &Axis, value: f64) -> Option<String> {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return None;
    }
    axis.categories.get(rounded as usize).cloned()
}
