//! The immutable action catalog.

use super::action::ActionType;
use super::sampler::WeightedSampler;
use crate::error::{PlanError, Result};
use rand::Rng;
use std::collections::HashMap;
use std::time::Duration;

/// Code reserved for the implicit refresh action.
pub const REFRESH_CODE: &str = "SKIP";

/// Leading columns of every catalog table, before the cost/gain columns.
pub const BASE_COLUMNS: [&str; 3] = ["code", "duration", "rate"];

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Static attributes of one action type.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Stable identifier used in persisted policies.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Time the action occupies the actor.
    pub duration: Duration,
    /// Non-negative occurrence weight.
    pub weight: f64,
    /// Cost/gain vector, one value per catalog dimension.
    pub cost_gain: Vec<f64>,
}

impl CatalogEntry {
    /// Creates an entry whose display name equals its code.
    pub fn new(code: impl Into<String>, duration: Duration, weight: f64, cost_gain: Vec<f64>) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            duration,
            weight,
            cost_gain,
        }
    }

    /// Creates an entry from a duration expressed in hours.
    ///
    /// # Panics
    /// Panics if `hours` is negative, not finite, or too large for a
    /// `Duration`.
    pub fn with_hours(code: impl Into<String>, hours: f64, weight: f64, cost_gain: Vec<f64>) -> Self {
        Self::new(code, hours_to_duration(hours), weight, cost_gain)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn refresh(dimensions: usize) -> Self {
        Self::new(REFRESH_CODE, Duration::ZERO, 0.0, vec![0.0; dimensions]).with_name("refresh")
    }
}

fn hours_to_duration(hours: f64) -> Duration {
    Duration::from_secs_f64(hours * SECONDS_PER_HOUR)
}

/// Ordered, immutable list of action types.
///
/// Slot 0 always holds the refresh action; the projects given at
/// construction follow in order. The catalog also owns the weighted sampler
/// built from the entries' occurrence weights. Share it with
/// `Arc<Catalog>`.
///
/// # Examples
///
/// ```
/// use u_offerplan::catalog::{ActionType, Catalog};
///
/// let table = "code,duration,rate,gain-A\nA1,1,0.5,2\nB1,2.5,0.5,4\n";
/// let catalog = Catalog::from_table(table).unwrap();
/// assert_eq!(catalog.len(), 3);
/// assert_eq!(catalog.lookup("B1"), Some(ActionType::Project(2)));
/// assert_eq!(catalog.dimensions(), ["gain-A"]);
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    dimensions: Vec<String>,
    by_code: HashMap<String, usize>,
    sampler: WeightedSampler,
}

impl Catalog {
    /// Builds a catalog from named cost/gain dimensions and project entries.
    ///
    /// The refresh action is prepended automatically.
    pub fn new(dimensions: Vec<String>, projects: Vec<CatalogEntry>) -> Result<Self> {
        if projects.is_empty() {
            return Err(PlanError::EmptyCatalog);
        }

        let d = dimensions.len();
        let mut entries = Vec::with_capacity(projects.len() + 1);
        entries.push(CatalogEntry::refresh(d));
        entries.extend(projects);

        let mut by_code = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if entry.cost_gain.len() != d {
                return Err(PlanError::DimensionMismatch {
                    what: "cost/gain vector",
                    expected: d,
                    found: entry.cost_gain.len(),
                });
            }
            if by_code.insert(entry.code.clone(), i).is_some() {
                return Err(PlanError::DuplicateCode(entry.code.clone()));
            }
        }

        let weights: Vec<f64> = entries.iter().map(|e| e.weight).collect();
        let sampler = WeightedSampler::new(&weights)?;

        tracing::debug!(
            actions = entries.len(),
            dimensions = d,
            "catalog initialized"
        );

        Ok(Self {
            entries,
            dimensions,
            by_code,
            sampler,
        })
    }

    /// Parses a comma-separated table whose header is
    /// `code,duration,rate,<dimension>...`.
    ///
    /// Durations are hours and may be fractional. Blank lines are skipped;
    /// columns beyond the header width are ignored.
    pub fn from_table(text: &str) -> Result<Self> {
        parse_table(text, None)
    }

    /// Like [`from_table`](Self::from_table), but the cost/gain columns must
    /// be exactly `dimensions`, in order.
    pub fn from_table_with_schema(text: &str, dimensions: &[&str]) -> Result<Self> {
        parse_table(text, Some(dimensions))
    }

    /// Number of action types, refresh included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a catalog holds at least refresh and one project.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cost/gain dimension count `D`.
    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// All action types in catalog order.
    pub fn actions(&self) -> impl Iterator<Item = ActionType> + '_ {
        (0..self.entries.len()).map(ActionType::from_index)
    }

    pub fn entry(&self, action: ActionType) -> &CatalogEntry {
        &self.entries[action.index()]
    }

    pub fn code(&self, action: ActionType) -> &str {
        &self.entry(action).code
    }

    pub fn duration(&self, action: ActionType) -> Duration {
        self.entry(action).duration
    }

    pub fn cost_gain(&self, action: ActionType) -> &[f64] {
        &self.entry(action).cost_gain
    }

    /// Finds an action by its code.
    pub fn lookup(&self, code: &str) -> Option<ActionType> {
        self.by_code.get(code).copied().map(ActionType::from_index)
    }

    pub fn sampler(&self) -> &WeightedSampler {
        &self.sampler
    }

    /// Draws one offer set of `k` actions.
    pub fn sample_offers<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Vec<ActionType> {
        self.sampler
            .sample_n(k, rng)
            .into_iter()
            .map(ActionType::from_index)
            .collect()
    }
}

fn parse_table(text: &str, schema: Option<&[&str]>) -> Result<Catalog> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let header: Vec<&str> = match lines.next() {
        Some((_, line)) => split_row(line),
        None => return Err(PlanError::EmptyCatalog),
    };

    let base_ok = header.len() > BASE_COLUMNS.len() && header[..BASE_COLUMNS.len()] == BASE_COLUMNS;
    let dims_ok = match schema {
        Some(dims) => header.len() == BASE_COLUMNS.len() + dims.len() && header[BASE_COLUMNS.len()..] == *dims,
        None => true,
    };
    if !base_ok || !dims_ok {
        let expected = match schema {
            Some(dims) => BASE_COLUMNS.iter().chain(dims).copied().collect::<Vec<_>>().join(","),
            None => format!("{},<dimension>...", BASE_COLUMNS.join(",")),
        };
        return Err(PlanError::Schema {
            expected,
            found: header.join(","),
        });
    }

    let n_cols = header.len();
    let dimensions: Vec<String> = header[BASE_COLUMNS.len()..]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut projects = Vec::new();
    for (line_no, line) in lines {
        let row = line_no + 1;
        let cells = split_row(line);
        if cells.len() < n_cols {
            return Err(PlanError::RowLength {
                row,
                expected: n_cols,
                found: cells.len(),
            });
        }

        let hours = parse_number(row, header[1], cells[1])?;
        let duration = Duration::try_from_secs_f64(hours * SECONDS_PER_HOUR).map_err(|_| PlanError::Parse {
            row,
            field: header[1].to_string(),
            value: cells[1].to_string(),
        })?;
        let weight = parse_number(row, header[2], cells[2])?;
        let cost_gain = (BASE_COLUMNS.len()..n_cols)
            .map(|c| parse_number(row, header[c], cells[c]))
            .collect::<Result<Vec<f64>>>()?;

        projects.push(CatalogEntry::new(cells[0], duration, weight, cost_gain));
    }

    Catalog::new(dimensions, projects)
}

fn split_row(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

fn parse_number(row: usize, field: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PlanError::Parse {
            row,
            field: field.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
code,duration,rate,cost-Coins,gain-BP
C05,0.5,0.2,1500,1
B2,2,0.5,0,3.5

D4,4,0.3,4000,8
";

    #[test]
    fn test_parse_table() {
        let catalog = Catalog::from_table(TABLE).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.dimension_count(), 2);
        assert_eq!(catalog.code(ActionType::Refresh), REFRESH_CODE);
        assert_eq!(catalog.duration(ActionType::Refresh), Duration::ZERO);
        assert_eq!(catalog.cost_gain(ActionType::Refresh), &[0.0, 0.0]);

        let c05 = catalog.lookup("C05").unwrap();
        assert_eq!(c05, ActionType::Project(1));
        assert_eq!(catalog.duration(c05), Duration::from_secs(1800));
        assert_eq!(catalog.cost_gain(c05), &[1500.0, 1.0]);
        assert_eq!(catalog.entry(c05).name, "C05");
    }

    #[test]
    fn test_refresh_never_sampled() {
        let catalog = Catalog::from_table(TABLE).unwrap();
        let mut rng = crate::random::create_rng(3);
        let offers = catalog.sample_offers(500, &mut rng);
        assert!(offers.iter().all(|a| !a.is_refresh()));
    }

    #[test]
    fn test_schema_match() {
        let catalog = Catalog::from_table_with_schema(TABLE, &["cost-Coins", "gain-BP"]);
        assert!(catalog.is_ok());
    }

    #[test]
    fn test_schema_mismatch() {
        let err = Catalog::from_table_with_schema(TABLE, &["cost-Coins", "gain-UR"]).unwrap_err();
        assert!(matches!(err, PlanError::Schema { .. }));

        let err = Catalog::from_table("name,duration,rate,x\nA,1,1,1\n").unwrap_err();
        assert!(matches!(err, PlanError::Schema { .. }));
    }

    #[test]
    fn test_short_row() {
        let err = Catalog::from_table("code,duration,rate,x\nA,1,1\n").unwrap_err();
        assert!(matches!(
            err,
            PlanError::RowLength {
                row: 2,
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn test_bad_number() {
        let err = Catalog::from_table("code,duration,rate,x\nA,one,1,1\n").unwrap_err();
        assert!(matches!(err, PlanError::Parse { row: 2, .. }));

        let err = Catalog::from_table("code,duration,rate,x\nA,-1,1,1\n").unwrap_err();
        assert!(matches!(err, PlanError::Parse { .. }));
    }

    #[test]
    fn test_oversized_duration() {
        let err = Catalog::from_table("code,duration,rate,x\nA,1e300,1,1\n").unwrap_err();
        assert!(matches!(
            err,
            PlanError::Parse { row: 2, ref field, ref value } if field == "duration" && value == "1e300"
        ));
    }

    #[test]
    fn test_duplicate_code() {
        let err = Catalog::from_table("code,duration,rate,x\nA,1,1,1\nA,2,1,1\n").unwrap_err();
        assert!(matches!(err, PlanError::DuplicateCode(code) if code == "A"));

        let err = Catalog::from_table("code,duration,rate,x\nSKIP,1,1,1\n").unwrap_err();
        assert!(matches!(err, PlanError::DuplicateCode(_)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Catalog::new(
            vec!["x".into(), "y".into()],
            vec![CatalogEntry::with_hours("A", 1.0, 1.0, vec![1.0])],
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::DimensionMismatch { expected: 2, found: 1, .. }));
    }

    #[test]
    fn test_zero_total_weight() {
        let err = Catalog::from_table("code,duration,rate,x\nA,1,0,1\n").unwrap_err();
        assert!(matches!(err, PlanError::InvalidWeights(_)));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(Catalog::from_table(""), Err(PlanError::EmptyCatalog)));
        assert!(matches!(
            Catalog::from_table("code,duration,rate,x\n"),
            Err(PlanError::EmptyCatalog)
        ));
    }
}
