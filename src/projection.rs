use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::color::{ColorMap, Rgb};
use crate::config::DashboardConfig;
use crate::data::filter;
use crate::data::model::{Selection, WageDataset, WageRecord};
use crate::figure::{Axis, ChartKind, Datum, Figure, MarkerSizing, Trace};

const YEAR_TITLE: &str = "Año";
const SALARY_TITLE: &str = "Sueldo promedio por profesionista";
const STATE_TITLE: &str = "Estado";
const WORKERS_TITLE: &str = "Profesionistas";
const SNAPSHOT_SALARY_TITLE: &str = "Sueldo Promedio";

// ---------------------------------------------------------------------------
// Filter-projection engine
// ---------------------------------------------------------------------------

/// Both dashboard charts for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFigures {
    pub selection: Selection,
    pub trend: Figure,
    pub snapshot: Figure,
}

/// Read-only inputs shared by every recomputation.
#[derive(Debug, Clone)]
pub struct Engine {
    pub dataset: Arc<WageDataset>,
    pub colors: ColorMap,
    pub config: DashboardConfig,
}

impl Engine {
    pub fn new(dataset: Arc<WageDataset>, config: DashboardConfig) -> Self {
        let colors = ColorMap::new(dataset.states());
        Engine {
            dataset,
            colors,
            config,
        }
    }

    /// Recompute both charts. Selections that match no rows produce figures
    /// without traces.
    pub fn project(&self, selection: &Selection) -> DashboardFigures {
        let career_rows = filter::by_career(self.dataset.records(), &selection.career);
        let year_rows = filter::by_year(&career_rows, selection.year);

        log::debug!(
            "Projecting career={:?} year={}: {} career rows, {} year rows",
            selection.career,
            selection.year,
            career_rows.len(),
            year_rows.len()
        );

        DashboardFigures {
            selection: selection.clone(),
            trend: trend_figure(&career_rows, &self.colors, &self.config),
            snapshot: snapshot_figure(&year_rows, selection.year, &self.colors, &self.config),
        }
    }
}

// ---------------------------------------------------------------------------
// Trend view: salary over years, one trace per state + reference overlay
// ---------------------------------------------------------------------------

/// Scatter of salary by year for career-filtered rows.
pub fn trend_figure(rows: &[&WageRecord], colors: &ColorMap, config: &DashboardConfig) -> Figure {
    let years: BTreeSet<i32> = rows.iter().map(|r| r.year).collect();
    let categories = years.into_iter().map(|y| y.to_string()).collect();

    let sizing = MarkerSizing {
        size_max: config.trend_size_max,
        size_ref: max_workers(rows),
    };
    let mut traces = traces_by_state(rows, ChartKind::Scatter, colors, |r| Datum {
        x: r.year.to_string(),
        y: r.avg_salary,
        size: Some(r.workers),
        text: None,
    });
    for trace in &mut traces {
        trace.sizing = Some(sizing);
    }

    if let Some(overlay) = reference_overlay(rows, config) {
        traces.push(overlay);
    }

    Figure {
        kind: ChartKind::Scatter,
        title: None,
        x_axis: Axis::category(YEAR_TITLE, categories),
        y_axis: Axis::linear(SALARY_TITLE),
        legend_title: STATE_TITLE.to_string(),
        size_label: Some(WORKERS_TITLE.to_string()),
        width: config.figure_width,
        height: config.figure_height,
        traces,
    }
}

/// Highlighted, labelled copy of the reference state's rows; `None` when the
/// reference state has no rows in `rows`.
fn reference_overlay(rows: &[&WageRecord], config: &DashboardConfig) -> Option<Trace> {
    let state = config.reference_state.as_str();
    let reference = filter::by_state(rows, state);
    if reference.is_empty() {
        return None;
    }

    // Own name so the legend keeps it apart from the state's regular trace.
    Some(Trace {
        name: format!("{state} (referencia)"),
        kind: ChartKind::Scatter,
        color: Rgb::BLACK,
        sizing: Some(MarkerSizing {
            size_max: config.overlay_size_max,
            size_ref: max_workers(&reference),
        }),
        highlight: true,
        data: reference
            .iter()
            .map(|r| Datum {
                x: r.year.to_string(),
                y: r.avg_salary,
                size: Some(r.workers),
                text: Some(state.to_string()),
            })
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Snapshot view: salary per state for one year
// ---------------------------------------------------------------------------

/// Bar chart of salary by state for rows already narrowed to one career and `year`.
pub fn snapshot_figure(
    rows: &[&WageRecord],
    year: i32,
    colors: &ColorMap,
    config: &DashboardConfig,
) -> Figure {
    let traces = traces_by_state(rows, ChartKind::Bar, colors, |r| Datum {
        x: r.state.clone(),
        y: r.avg_salary,
        size: None,
        text: None,
    });
    let categories = traces.iter().map(|t| t.name.clone()).collect();

    Figure {
        kind: ChartKind::Bar,
        title: Some(format!("Sueldo Promedio por Estado en {year}")),
        x_axis: Axis::category(STATE_TITLE, categories).with_tick_angle(config.snapshot_tick_angle),
        y_axis: Axis::linear(SNAPSHOT_SALARY_TITLE),
        legend_title: STATE_TITLE.to_string(),
        size_label: None,
        width: config.figure_width,
        height: config.figure_height,
        traces,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// One trace per state in order of first appearance, rows kept in order.
fn traces_by_state(
    rows: &[&WageRecord],
    kind: ChartKind,
    colors: &ColorMap,
    to_datum: impl Fn(&WageRecord) -> Datum,
) -> Vec<Trace> {
    let mut traces: Vec<Trace> = Vec::new();
    for row in rows {
        let datum = to_datum(*row);
        match traces.iter_mut().find(|t| t.name == row.state) {
            Some(trace) => trace.data.push(datum),
            None => traces.push(Trace {
                name: row.state.clone(),
                kind,
                color: colors.color_for(&row.state),
                sizing: None,
                highlight: false,
                data: vec![datum],
            }),
        }
    }
    traces
}

fn max_workers(rows: &[&WageRecord]) -> f64 {
    rows.iter()
        .map(|r| r.workers)
        .filter(|w| w.is_finite())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::data::loader::tests::fixture;

    const ADMIN: &str = "Administración y negocios";

    fn engine() -> Engine {
        Engine::new(Arc::new(fixture()), DashboardConfig::default())
    }

    fn select(career: &str, year: i32) -> Selection {
        Selection {
            career: career.to_string(),
            year,
        }
    }

    fn trace<'a>(fig: &'a Figure, name: &str) -> &'a Trace {
        fig.traces.iter().find(|t| t.name == name).unwrap()
    }

    fn main_traces(fig: &Figure) -> impl Iterator<Item = &Trace> {
        fig.traces.iter().filter(|t| !t.highlight)
    }

    #[test]
    fn test_every_valid_selection_projects() {
        let engine = engine();
        for career in engine.dataset.careers() {
            for &year in engine.dataset.years() {
                let figs = engine.project(&select(career, year));
                assert_eq!(figs.trend.kind, ChartKind::Scatter);
                assert_eq!(figs.snapshot.kind, ChartKind::Bar);
                for trace in &figs.snapshot.traces {
                    for d in &trace.data {
                        assert!(figs.snapshot.x_axis.category_index(&d.x).is_some());
                    }
                }
                for trace in &figs.trend.traces {
                    for d in &trace.data {
                        assert!(figs.trend.x_axis.category_index(&d.x).is_some());
                    }
                }
            }
        }
    }

    #[test]
    fn test_trend_point_count_matches_year_state_pairs() {
        let engine = engine();
        let figs = engine.project(&select(ADMIN, 2019));

        let rows = filter::by_career(engine.dataset.records(), ADMIN);
        let pairs: HashSet<(i32, &str)> = rows.iter().map(|r| (r.year, r.state.as_str())).collect();

        let plotted: usize = main_traces(&figs.trend).map(|t| t.data.len()).sum();
        assert_eq!(plotted, pairs.len());
        assert_eq!(
            main_traces(&figs.trend).map(|t| t.name.as_str()).collect::<Vec<_>>(),
            vec!["Guanajuato", "Jalisco", "Nuevo León"]
        );
        assert_eq!(figs.trend.x_axis.categories, vec!["2019", "2020", "2021"]);
    }

    #[test]
    fn test_reference_overlay_one_point_per_year() {
        let figs = engine().project(&select(ADMIN, 2019));
        let overlay = figs.trend.traces.last().unwrap();

        assert!(overlay.highlight);
        assert_eq!(overlay.name, "Guanajuato (referencia)");
        assert!(main_traces(&figs.trend).all(|t| t.name != overlay.name));
        assert_eq!(
            overlay.data.iter().map(|d| d.x.as_str()).collect::<Vec<_>>(),
            vec!["2019", "2020", "2021"]
        );
        assert!(overlay.data.iter().all(|d| d.text.as_deref() == Some("Guanajuato")));
        assert_eq!(overlay.sizing.unwrap().size_max, 20.0);
        assert_eq!(overlay.sizing.unwrap().size_ref, 1300.0);
    }

    #[test]
    fn test_overlay_absent_without_reference_rows() {
        let figs = engine().project(&select("Salud", 2020));
        assert!(figs.trend.traces.iter().all(|t| !t.highlight));
        assert_eq!(figs.trend.point_count(), 3);
    }

    #[test]
    fn test_snapshot_one_bar_per_state() {
        let figs = engine().project(&select(ADMIN, 2020));
        let snap = &figs.snapshot;

        assert_eq!(snap.point_count(), 2);
        assert_eq!(snap.x_axis.categories, vec!["Guanajuato", "Jalisco"]);
        assert_eq!(snap.x_axis.tick_angle, 45.0);
        assert_eq!(snap.title.as_deref(), Some("Sueldo Promedio por Estado en 2020"));
        assert_eq!(trace(snap, "Jalisco").data[0].y, 9300.0);
    }

    #[test]
    fn test_year_change_keeps_trend() {
        let engine = engine();
        let a = engine.project(&select(ADMIN, 2019));
        let b = engine.project(&select(ADMIN, 2021));

        assert_eq!(a.trend, b.trend);
        assert_ne!(a.snapshot, b.snapshot);
    }

    #[test]
    fn test_career_change_alters_both() {
        let engine = engine();
        let a = engine.project(&select(ADMIN, 2021));
        let b = engine.project(&select("Salud", 2021));

        assert_ne!(a.trend, b.trend);
        assert_ne!(a.snapshot, b.snapshot);
    }

    #[test]
    fn test_empty_intersection_renders_empty() {
        let engine = engine();
        let figs = engine.project(&select("Educación", 2019));
        assert!(figs.snapshot.is_empty());
        assert_eq!(figs.snapshot.point_count(), 0);
        assert!(!figs.trend.is_empty());

        let unknown = engine.project(&select("Artes", 1990));
        assert!(unknown.trend.is_empty());
        assert!(unknown.snapshot.is_empty());
        assert!(unknown.trend.x_axis.categories.is_empty());
    }

    #[test]
    fn test_state_colors_stable_across_selections() {
        let engine = engine();
        let a = engine.project(&select(ADMIN, 2019));
        let b = engine.project(&select("Salud", 2019));
        assert_eq!(
            trace(&a.snapshot, "Jalisco").color,
            trace(&b.snapshot, "Jalisco").color
        );
    }

    #[test]
    fn test_trend_sizing_uses_largest_weight() {
        let figs = engine().project(&select(ADMIN, 2019));
        let sizing = figs.trend.traces[0].sizing.unwrap();
        assert_eq!(sizing.size_max, 25.0);
        assert_eq!(sizing.size_ref, 2250.0);
    }
}
