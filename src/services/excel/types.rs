use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A single worksheet cell as it moves through normalization.
///
/// The loader only produces `Empty`, `Text` and `Number`. `Missing` is the
/// explicit "no data" marker written by the normalizer; it is distinct from
/// zero and from the empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Missing,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty | Cell::Missing => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Worksheet contents: header labels plus rectangular data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Rows are padded with `Empty` (or truncated) to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Numeric columns of the canonical layout, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountColumn {
    PerkotaanSem1,
    PerkotaanSem2,
    PerdesaanSem1,
    PerdesaanSem2,
    JumlahSem1,
    JumlahSem2,
}

impl CountColumn {
    pub const ALL: [CountColumn; 6] = [
        CountColumn::PerkotaanSem1,
        CountColumn::PerkotaanSem2,
        CountColumn::PerdesaanSem1,
        CountColumn::PerdesaanSem2,
        CountColumn::JumlahSem1,
        CountColumn::JumlahSem2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CountColumn::PerkotaanSem1 => "Perkotaan_Sem1",
            CountColumn::PerkotaanSem2 => "Perkotaan_Sem2",
            CountColumn::PerdesaanSem1 => "Perdesaan_Sem1",
            CountColumn::PerdesaanSem2 => "Perdesaan_Sem2",
            CountColumn::JumlahSem1 => "Jumlah_Sem1",
            CountColumn::JumlahSem2 => "Jumlah_Sem2",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

pub const LABEL_COLUMN: &str = "Provinsi";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Label,
    Count(CountColumn),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub source_index: usize,
    pub name: &'static str,
    pub role: ColumnRole,
}

/// Source position → canonical name → role. Positions 3 and 6 are not
/// mapped and are dropped during normalization.
pub const COLUMN_MAP: [ColumnSpec; 7] = [
    ColumnSpec { source_index: 0, name: LABEL_COLUMN, role: ColumnRole::Label },
    ColumnSpec { source_index: 1, name: "Perkotaan_Sem1", role: ColumnRole::Count(CountColumn::PerkotaanSem1) },
    ColumnSpec { source_index: 2, name: "Perkotaan_Sem2", role: ColumnRole::Count(CountColumn::PerkotaanSem2) },
    ColumnSpec { source_index: 4, name: "Perdesaan_Sem1", role: ColumnRole::Count(CountColumn::PerdesaanSem1) },
    ColumnSpec { source_index: 5, name: "Perdesaan_Sem2", role: ColumnRole::Count(CountColumn::PerdesaanSem2) },
    ColumnSpec { source_index: 7, name: "Jumlah_Sem1", role: ColumnRole::Count(CountColumn::JumlahSem1) },
    ColumnSpec { source_index: 8, name: "Jumlah_Sem2", role: ColumnRole::Count(CountColumn::JumlahSem2) },
];

pub fn canonical_names() -> [&'static str; 7] {
    COLUMN_MAP.map(|spec| spec.name)
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub label: Cell,
    pub counts: [Cell; 6],
}

impl NormalizedRow {
    pub fn get(&self, column: CountColumn) -> &Cell {
        &self.counts[column.slot()]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedTable {
    pub rows: Vec<NormalizedRow>,
}

/// Numeric cell after coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Present(f64),
    Missing,
}

impl Measure {
    pub fn value(self) -> Option<f64> {
        match self {
            Measure::Present(v) => Some(v),
            Measure::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Measure::Missing)
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Measure::Present(v) => serializer.serialize_f64(*v),
            Measure::Missing => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoercedRow {
    pub provinsi: String,
    pub counts: [Measure; 6],
}

impl CoercedRow {
    pub fn get(&self, column: CountColumn) -> Measure {
        self.counts[column.slot()]
    }
}

impl Serialize for CoercedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(COLUMN_MAP.len()))?;
        map.serialize_entry(LABEL_COLUMN, &self.provinsi)?;
        for column in CountColumn::ALL {
            map.serialize_entry(column.name(), &self.get(column))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoercedTable {
    pub rows: Vec<CoercedRow>,
}

impl CoercedTable {
    pub fn column(&self, column: CountColumn) -> impl Iterator<Item = Measure> + '_ {
        self.rows.iter().map(move |row| row.get(column))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|row| row.provinsi.as_str())
    }
}
