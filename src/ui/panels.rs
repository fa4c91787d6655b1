use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Input};

const TITLE: &str =
    "Sueldo promedio por profesionista en México (con licenciatura entre 20 y 30 años)";
const SUBTITLE: &str = "Proporción por número de profesionistas en cada estado";
const SOURCE_NOTE: &str = "Con datos de ENOE(INEGI). Registros con sueldos declarados";
const SELECTOR_WIDTH: f32 = 500.0;

// ---------------------------------------------------------------------------
// Header and selectors
// ---------------------------------------------------------------------------

/// Centred title and subtitle.
pub fn header(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(TITLE).size(30.0).strong().color(Color32::BLUE));
        ui.label(RichText::new(SUBTITLE).color(Color32::BLACK));
    });
    ui.add_space(8.0);
}

/// Career and year dropdowns. A changed value is dispatched to the
/// registered bindings before returning.
pub fn selectors(ui: &mut Ui, state: &mut AppState) {
    // Separate handle so `state` can be mutated after the dropdowns.
    let dataset = Arc::clone(&state.engine.dataset);
    let mut changed: Option<Input> = None;

    egui::ComboBox::from_id_salt("career_dropdown")
        .width(SELECTOR_WIDTH)
        .selected_text(state.selection.career.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for career in dataset.careers() {
                let selected = state.selection.career == *career;
                let mut item = ui.selectable_label(selected, career.as_str());
                if let Some(code) = dataset.field_code(career) {
                    item = item.on_hover_text(format!("Campo amplio {code}"));
                }
                if item.clicked() && !selected {
                    changed = Some(Input::Career(career.clone()));
                }
            }
        });

    egui::ComboBox::from_id_salt("year_dropdown")
        .width(SELECTOR_WIDTH)
        .selected_text(state.selection.year.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &year in dataset.years() {
                let selected = state.selection.year == year;
                if ui.selectable_label(selected, year.to_string()).clicked() && !selected {
                    changed = Some(Input::Year(year));
                }
            }
        });

    if let Some(input) = changed {
        state.on_input(input);
    }
}

/// Data source note under the charts.
pub fn footer(ui: &mut Ui) {
    ui.label(RichText::new(SOURCE_NOTE).color(Color32::BLACK));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Export", |ui: &mut Ui| {
            if ui.button("Copy figures as JSON").clicked() {
                copy_figures(ui, state);
                ui.close_menu();
            }
        });

        ui.separator();

        let ds = state.dataset();
        ui.label(format!(
            "{} records, {} careers, {} years · trend {} points, snapshot {} bars",
            ds.len(),
            ds.careers().len(),
            ds.years().len(),
            state.figures.trend.point_count(),
            state.figures.snapshot.point_count()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg.as_str()).color(Color32::DARK_GREEN));
        }
    });
}

fn copy_figures(ui: &Ui, state: &mut AppState) {
    match state.figures_json() {
        Ok(json) => {
            ui.ctx().copy_text(json);
            state.status_message = Some("Figures copied to clipboard".to_string());
        }
        Err(e) => {
            log::error!("Failed to export figures: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
