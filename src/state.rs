use anyhow::{Context, Result};

use crate::data::model::{Selection, WageDataset};
use crate::projection::{DashboardFigures, Engine};

// ---------------------------------------------------------------------------
// Reactive bindings: input control → pure recomputation
// ---------------------------------------------------------------------------

/// Input controls that can trigger a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    CareerDropdown,
    YearDropdown,
}

/// A new value coming from one of the controls.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Career(String),
    Year(i32),
}

impl Input {
    pub fn control(&self) -> ControlId {
        match self {
            Input::Career(_) => ControlId::CareerDropdown,
            Input::Year(_) => ControlId::YearDropdown,
        }
    }
}

pub type Handler = fn(&Engine, &Selection) -> DashboardFigures;

/// A handler and the controls it listens on.
#[derive(Clone, Copy)]
pub struct Binding {
    pub inputs: &'static [ControlId],
    pub handler: Handler,
}

/// Recompute both charts from the current selection.
pub fn update_figures(engine: &Engine, selection: &Selection) -> DashboardFigures {
    engine.project(selection)
}

/// Both selectors drive both charts.
pub const FIGURE_BINDING: Binding = Binding {
    inputs: &[ControlId::CareerDropdown, ControlId::YearDropdown],
    handler: update_figures,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset, colours and layout settings; never mutated after startup.
    pub engine: Engine,

    /// Current selector values.
    pub selection: Selection,

    /// Figures produced by the last recomputation.
    pub figures: DashboardFigures,

    /// Status message shown in the top bar.
    pub status_message: Option<String>,

    bindings: Vec<Binding>,
}

impl AppState {
    /// Initial state with the default figure binding registered.
    pub fn new(engine: Engine) -> Result<Self> {
        Self::with_bindings(engine, vec![FIGURE_BINDING])
    }

    /// Initial state with the given bindings; every binding runs once on the
    /// startup selection.
    pub fn with_bindings(engine: Engine, bindings: Vec<Binding>) -> Result<Self> {
        let selection = engine
            .dataset
            .default_selection(&engine.config.default_career)
            .context("dataset offers no career/year to select")?;
        let figures = engine.project(&selection);

        let mut state = AppState {
            engine,
            selection,
            figures,
            status_message: None,
            bindings: Vec::new(),
        };
        for binding in bindings {
            state.register(binding);
        }
        Ok(state)
    }

    /// Add a binding and run it against the current selection.
    pub fn register(&mut self, binding: Binding) {
        self.figures = (binding.handler)(&self.engine, &self.selection);
        self.bindings.push(binding);
    }

    pub fn dataset(&self) -> &WageDataset {
        &self.engine.dataset
    }

    /// Apply a control change and run every binding listening on it.
    /// Returns the number of handlers that ran.
    pub fn on_input(&mut self, input: Input) -> usize {
        let control = input.control();
        match input {
            Input::Career(career) => self.selection.career = career,
            Input::Year(year) => self.selection.year = year,
        }

        let mut ran = 0;
        for binding in &self.bindings {
            if binding.inputs.contains(&control) {
                self.figures = (binding.handler)(&self.engine, &self.selection);
                ran += 1;
            }
        }
        log::debug!("{control:?} changed, {ran} handler(s) ran");
        ran
    }

    /// Serialise the current figures for the clipboard.
    pub fn figures_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.figures).context("serialising figures")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::loader::tests::fixture;

    fn engine() -> Engine {
        Engine::new(Arc::new(fixture()), DashboardConfig::default())
    }

    #[test]
    fn test_startup_selection_and_figures() {
        let state = AppState::new(engine()).unwrap();
        assert_eq!(state.selection.career, "Administración y negocios");
        assert_eq!(state.selection.year, 2019);
        assert_eq!(state.figures.selection, state.selection);
        assert_eq!(state.figures.snapshot.point_count(), 3);
    }

    #[test]
    fn test_inputs_recompute_figures() {
        let mut state = AppState::new(engine()).unwrap();
        let trend_before = state.figures.trend.clone();

        assert_eq!(state.on_input(Input::Year(2020)), 1);
        assert_eq!(state.figures.selection.year, 2020);
        assert_eq!(state.figures.trend, trend_before);
        assert_eq!(state.figures.snapshot.point_count(), 2);

        assert_eq!(state.on_input(Input::Career("Salud".into())), 1);
        assert_eq!(state.figures.selection.career, "Salud");
        assert_ne!(state.figures.trend, trend_before);
        assert_eq!(state.figures.snapshot.point_count(), 1);
    }

    #[test]
    fn test_binding_runs_only_for_its_controls() {
        const YEAR_ONLY: Binding = Binding {
            inputs: &[ControlId::YearDropdown],
            handler: update_figures,
        };
        let mut state = AppState::with_bindings(engine(), vec![YEAR_ONLY]).unwrap();

        assert_eq!(state.on_input(Input::Career("Salud".into())), 0);
        assert_eq!(state.selection.career, "Salud");
        assert_eq!(state.figures.selection.career, "Administración y negocios");

        assert_eq!(state.on_input(Input::Year(2021)), 1);
        assert_eq!(state.figures.selection.career, "Salud");
        assert_eq!(state.figures.selection.year, 2021);
    }

    #[test]
    fn test_figures_json() {
        let state = AppState::new(engine()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&state.figures_json().unwrap()).unwrap();
        assert_eq!(json["selection"]["year"], 2019);
        assert_eq!(json["trend"]["kind"], "scatter");
        assert_eq!(json["snapshot"]["x_axis"]["tick_angle"], 45.0);
    }
}
