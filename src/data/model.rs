use std::collections::{BTreeSet, HashSet};

// ---------------------------------------------------------------------------
// WageRecord – one row of the survey extract
// ---------------------------------------------------------------------------

/// One observed combination of career field, state and year.
#[derive(Debug, Clone, PartialEq)]
pub struct WageRecord {
    /// Broad-field code (`Campo_amplio`), absent in older extracts.
    pub field_code: Option<String>,
    /// Broad-field description, the value offered in the career selector.
    pub career: String,
    /// State name.
    pub state: String,
    pub year: i32,
    /// Average declared monthly salary.
    pub avg_salary: f64,
    /// Expansion factor: number of workers the sample row stands for.
    pub workers: f64,
}

// ---------------------------------------------------------------------------
// WageDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The user's current (career, year) choice.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Selection {
    pub career: String,
    pub year: i32,
}

/// The full parsed dataset with pre-computed selector values.
#[derive(Debug, Clone)]
pub struct WageDataset {
    records: Vec<WageRecord>,
    /// Distinct careers in order of first appearance.
    careers: Vec<String>,
    /// Distinct years, ascending.
    years: Vec<i32>,
    /// Distinct states in order of first appearance.
    states: Vec<String>,
}

impl WageDataset {
    /// Build the distinct-value indices from the loaded rows.
    pub fn from_records(records: Vec<WageRecord>) -> Self {
        let careers = distinct_in_order(records.iter().map(|r| r.career.as_str()));
        let states = distinct_in_order(records.iter().map(|r| r.state.as_str()));
        let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();

        WageDataset {
            records,
            careers,
            years: years.into_iter().collect(),
            states,
        }
    }

    pub fn records(&self) -> &[WageRecord] {
        &self.records
    }

    pub fn careers(&self) -> &[String] {
        &self.careers
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Broad-field code of a career, when the extract carries one.
    pub fn field_code(&self, career: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.career == career)
            .and_then(|r| r.field_code.as_deref())
    }

    /// Startup selection: `preferred` career if present (else the first one)
    /// and the earliest year.
    pub fn default_selection(&self, preferred: &str) -> Option<Selection> {
        let career = self
            .careers
            .iter()
            .find(|c| c.as_str() == preferred)
            .or_else(|| self.careers.first())?;
        let year = *self.years.first()?;
        Some(Selection {
            career: career.clone(),
            year,
        })
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
