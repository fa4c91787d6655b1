//! Declarative chart descriptions.
//!
//! A [`Figure`] is plain data: the projection layer builds it from the
//! filtered rows and the UI layer draws it. Nothing here knows about egui.

use serde::Serialize;

use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Scatter,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    /// Discrete axis: evenly spaced labels at positions 0, 1, 2, ...
    Category,
    Linear,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    pub kind: AxisKind,
    /// Ordered labels of a category axis; empty for linear axes.
    pub categories: Vec<String>,
    /// Tick label rotation in degrees, clockwise.
    pub tick_angle: f32,
}

impl Axis {
    pub fn category(title: &str, categories: Vec<String>) -> Self {
        Axis {
            title: title.to_string(),
            kind: AxisKind::Category,
            categories,
            tick_angle: 0.0,
        }
    }

    pub fn linear(title: &str) -> Self {
        Axis {
            title: title.to_string(),
            kind: AxisKind::Linear,
            categories: Vec::new(),
            tick_angle: 0.0,
        }
    }

    pub fn with_tick_angle(mut self, degrees: f32) -> Self {
        self.tick_angle = degrees;
        self
    }

    pub fn is_rotated(&self) -> bool {
        self.tick_angle.abs() > f32::EPSILON
    }

    /// Position of `label` on a category axis.
    pub fn category_index(&self, label: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == label)
    }
}

/// Size encoding of a scatter trace (plotly "area" sizing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerSizing {
    /// Diameter in px of the marker with the largest size value.
    pub size_max: f32,
    /// Largest size value the trace is scaled against.
    pub size_ref: f64,
}

impl MarkerSizing {
    /// Marker diameter for `size`: area proportional to the value.
    /// Zero, negative and non-finite sizes get no marker area.
    pub fn diameter(&self, size: f64) -> f32 {
        if self.size_ref <= 0.0 {
            return self.size_max;
        }
        if !size.is_finite() || size <= 0.0 {
            return 0.0;
        }
        self.size_max * (size / self.size_ref).sqrt() as f32
    }
}

/// One plotted observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datum {
    /// Category label on the x axis.
    pub x: String,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Annotation drawn next to the point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub kind: ChartKind,
    pub color: Rgb,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizing: Option<MarkerSizing>,
    /// Drawn with a contrasting outline on top of the other traces.
    pub highlight: bool,
    pub data: Vec<Datum>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub kind: ChartKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend_title: String,
    /// Label of the size encoding, shown in the chart caption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_label: Option<String>,
    pub width: f32,
    pub height: f32,
    pub traces: Vec<Trace>,
}

impl Figure {
    /// Total number of points/bars across all traces.
    pub fn point_count(&self) -> usize {
        self.traces.iter().map(|t| t.data.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_area_scaling() {
        let sizing = MarkerSizing {
            size_max: 25.0,
            size_ref: 400.0,
        };
        assert_eq!(sizing.diameter(400.0), 25.0);
        assert_eq!(sizing.diameter(100.0), 12.5);
        assert_eq!(sizing.diameter(0.0), 0.0);
        assert_eq!(sizing.diameter(-3.0), 0.0);
        assert_eq!(sizing.diameter(f64::NAN), 0.0);
        assert!(sizing.diameter(1.0) < sizing.diameter(100.0));

        let degenerate = MarkerSizing {
            size_max: 20.0,
            size_ref: 0.0,
        };
        assert_eq!(degenerate.diameter(10.0), 20.0);
    }

    #[test]
    fn test_category_index() {
        let axis = Axis::category("Año", vec!["2019".into(), "2021".into()]);
        assert_eq!(axis.category_index("2021"), Some(1));
        assert_eq!(axis.category_index("2020"), None);
        assert_eq!(Axis::linear("y").category_index("2019"), None);
        assert!(!axis.is_rotated());
        assert!(axis.with_tick_angle(45.0).is_rotated());
    }

    #[test]
    fn test_json_shape() {
        let fig = Figure {
            kind: ChartKind::Bar,
            title: Some("t".into()),
            x_axis: Axis::category("Estado", vec!["Jalisco".into()]).with_tick_angle(45.0),
            y_axis: Axis::linear("Sueldo Promedio"),
            legend_title: "Estado".into(),
            size_label: None,
            width: 900.0,
            height: 500.0,
            traces: vec![Trace {
                name: "Jalisco".into(),
                kind: ChartKind::Bar,
                color: Rgb(1, 2, 3),
                sizing: None,
                highlight: false,
                data: vec![Datum {
                    x: "Jalisco".into(),
                    y: 9000.0,
                    size: None,
                    text: None,
                }],
            }],
        };

        let json = serde_json::to_value(&fig).unwrap();
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["x_axis"]["kind"], "category");
        assert_eq!(json["x_axis"]["tick_angle"], 45.0);
        assert_eq!(json["traces"][0]["color"], "#010203");
        assert!(json.get("size_label").is_none());
        assert!(json["traces"][0]["data"][0].get("size").is_none());
    }
}
