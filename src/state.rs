use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::loader::load_file;
use crate::data::model::LaunchTable;
use crate::data::pipeline::{self, PipelineOutput, Selection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The table is shared read-only; every selection change re-runs the
/// pipeline and replaces `output`.
#[derive(Default)]
pub struct AppState {
    /// Loaded table (None until a load succeeds).
    pub dataset: Option<Arc<LaunchTable>>,

    /// Where `dataset` came from.
    pub source: Option<PathBuf>,

    /// Current drill-down choices.
    pub selection: Selection,

    /// Views for the current selection.
    pub output: PipelineOutput,

    /// Colours for the status chart, rebuilt with each output.
    pub status_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load `path` and, on success, replace the current table.
    /// On failure the previous table stays and the error is shown.
    pub fn load(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => {
                log::info!("Loaded {} launch records from {}", table.len(), path.display());
                self.source = Some(path.to_path_buf());
                self.set_dataset(Arc::new(table));
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a table and reset the drill-down to its defaults.
    pub fn set_dataset(&mut self, dataset: Arc<LaunchTable>) {
        self.dataset = Some(dataset);
        self.selection = Selection::default();
        self.status_message = None;
        self.recompute();
    }

    pub fn select_country(&mut self, country: String) {
        self.selection.country = Some(country);
        self.selection.year = None;
        self.selection.status = None;
        self.recompute();
    }

    pub fn select_year(&mut self, year: i32) {
        self.selection.year = Some(year);
        self.selection.status = None;
        self.recompute();
    }

    pub fn select_status(&mut self, status: String) {
        self.selection.status = Some(status);
        self.recompute();
    }

    /// Re-run the pipeline, settling each unset or stale selection on the
    /// first entry of its stage (like a select box with nothing picked).
    pub fn recompute(&mut self) {
        let Some(table) = self.dataset.clone() else {
            self.output = PipelineOutput::default();
            self.status_colors = None;
            return;
        };

        // Each pass can fill at most one more stage.
        loop {
            let output = pipeline::run(&table, &self.selection);
            let settled = settle(
                &mut self.selection.country,
                output.country_counts.iter().map(|c| c.country.clone()),
            ) && settle(
                &mut self.selection.year,
                output.yearly_counts.iter().map(|y| y.year),
            ) && settle(
                &mut self.selection.status,
                output.status_counts.iter().map(|s| s.status.clone()),
            );

            if settled {
                self.status_colors = Some(ColorMap::new(
                    output.status_counts.iter().map(|s| s.status.as_str()),
                ));
                self.output = output;
                return;
            }
        }
    }
}

/// Keep `current` if it is in `domain`, otherwise move it to the first key
/// (or `None` for an empty domain). Returns whether it was left unchanged.
fn settle<T: PartialEq>(current: &mut Option<T>, mut domain: impl Iterator<Item = T>) -> bool {
    let first = match current.as_ref() {
        Some(value) => {
            let mut first = None;
            for key in domain.by_ref() {
                if &key == value {
                    return true;
                }
                first.get_or_insert(key);
            }
            first
        }
        None => domain.next(),
    };

    let changed = first.is_some();
    let was_set = current.is_some();
    *current = first;
    !changed && !was_set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, RawRow};

    fn rec(owner: &str, status: &str, launch: &str) -> LaunchRecord {
        LaunchRecord::from_raw(RawRow {
            name: Some(format!("{owner}-{launch}")),
            owner: Some(owner.into()),
            status: Some(status.into()),
            launch_date: Some(launch.into()),
            flight_ended: None,
            norad_id: Some("9".into()),
        })
    }

    fn state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(Arc::new(LaunchTable::from_records(vec![
            rec("US", "Active", "2018-01-01"),
            rec("US", "Decayed", "2018-06-01"),
            rec("US", "Decayed", "2018-07-01"),
            rec("US", "Active", "2020-01-01"),
            rec("Japan", "Active", "2015-01-01"),
            rec("Japan", "Active", "bad"),
        ])));
        state
    }

    #[test]
    fn test_defaults_follow_first_keys() {
        let state = state();
        assert_eq!(
            state.selection,
            Selection {
                country: Some("US".into()),
                year: Some(2018),
                status: Some("Decayed".into()),
            }
        );
        assert_eq!(state.output.records.len(), 2);
    }

    #[test]
    fn test_changing_country_resets_later_stages() {
        let mut state = state();
        state.select_country("Japan".into());
        assert_eq!(state.selection.year, Some(2015));
        assert_eq!(state.selection.status.as_deref(), Some("Active"));
        assert_eq!(state.output.records.len(), 1);
    }

    #[test]
    fn test_select_year_and_status() {
        let mut state = state();
        state.select_year(2020);
        assert_eq!(state.selection.status.as_deref(), Some("Active"));
        state.select_year(2018);
        state.select_status("Active".into());
        assert_eq!(state.output.records.len(), 1);
        assert_eq!(state.output.records[0].launch_date, "Jan 01, 2018");
    }

    #[test]
    fn test_stale_selection_falls_back() {
        let mut state = state();
        state.select_country("Atlantis".into());
        assert_eq!(state.selection.country.as_deref(), Some("US"));
        assert!(!state.output.records.is_empty());
    }

    #[test]
    fn test_country_without_years_stops_cascade() {
        let mut state = AppState::default();
        state.set_dataset(Arc::new(LaunchTable::from_records(vec![rec(
            "Chile", "Active", "never",
        )])));
        assert_eq!(state.selection.country.as_deref(), Some("Chile"));
        assert_eq!(state.selection.year, None);
        assert!(state.output.yearly_counts.is_empty());
        assert!(state.output.records.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let mut state = AppState::default();
        state.set_dataset(Arc::new(LaunchTable::default()));
        assert_eq!(state.selection, Selection::default());
        assert_eq!(state.output, PipelineOutput::default());
    }

    #[test]
    fn test_failed_load_keeps_previous_table() {
        let mut state = state();
        state.load(Path::new("/no/such/launches.csv"));
        assert!(state.status_message.is_some());
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(6));
    }

    #[test]
    fn test_settle() {
        let mut v = Some(3);
        assert!(settle(&mut v, [1, 2, 3].into_iter()));
        assert_eq!(v, Some(3));

        let mut v = Some(9);
        assert!(!settle(&mut v, [1, 2].into_iter()));
        assert_eq!(v, Some(1));

        let mut v = None;
        assert!(!settle(&mut v, [4].into_iter()));
        assert_eq!(v, Some(4));

        let mut v: Option<i32> = None;
        assert!(settle(&mut v, std::iter::empty()));

        let mut v = Some(9);
        assert!(!settle(&mut v, std::iter::empty()));
        assert_eq!(v, None);
    }
}
