// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Published ENOE extract: one row per broad career field, state and year.
pub const DATA_URL: &str = "https://raw.githubusercontent.com/aleEco1/aplicacion/main/datos.csv";

/// Compile-time settings for data source, reference region and figure layout.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_url: String,
    /// State always drawn as a highlighted overlay on the trend chart.
    pub reference_state: String,
    /// Career selected on startup when it exists in the dataset.
    pub default_career: String,
    /// Largest marker diameter (px) on the trend chart.
    pub trend_size_max: f32,
    /// Largest marker diameter (px) of the reference-state overlay.
    pub overlay_size_max: f32,
    pub figure_width: f32,
    pub figure_height: f32,
    /// Rotation of the snapshot chart's state labels, in degrees.
    pub snapshot_tick_angle: f32,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_url: DATA_URL.to_string(),
            reference_state: "Guanajuato".to_string(),
            default_career: "Administración y negocios".to_string(),
            trend_size_max: 25.0,
            overlay_size_max: 20.0,
            figure_width: 900.0,
            figure_height: 500.0,
            snapshot_tick_angle: 45.0,
            window_size: [1000.0, 1200.0],
        }
    }
}
