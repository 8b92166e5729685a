use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Dataset, Track};

pub const ARTISTS: &str = "artists";
pub const TRACK_GENRE: &str = "track_genre";
pub const DURATION_MS: &str = "duration_ms";
pub const POPULARITY: &str = "popularity";
pub const EXPLICIT: &str = "explicit";

/// Text stored for a missing string cell, so it never matches a genre filter.
pub const MISSING_TEXT: &str = "nan";

/// Cell contents read as missing, the same set pandas' `read_csv` uses.
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why the source table could not be turned into a [`Dataset`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the track table from a CSV file and keep only pop genres.
///
/// The header row must name the five track columns; an `Unnamed: 0` index
/// column and any other extra column are ignored. Rows shorter than the
/// header read their trailing cells as missing.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let tracks = load_csv(path)?;

    let total = tracks.len();
    let dataset = Dataset::from_tracks(tracks);
    log::info!(
        "Loaded {total} tracks from {}, {} in {} pop subgenres",
        path.display(),
        dataset.len(),
        dataset.genres.len()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Positions of the required columns within a CSV header row.
struct ColumnIndex {
    artists: usize,
    track_genre: usize,
    duration_ms: usize,
    popularity: usize,
    explicit: usize,
}

impl ColumnIndex {
    fn from_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Result<Self, LoadError> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (idx, name) in headers.enumerate() {
            if is_index_artifact(name) {
                log::debug!("Dropping index column '{name}'");
                continue;
            }
            positions.entry(name).or_insert(idx);
        }

        let find = |name: &str| {
            positions
                .get(name)
                .copied()
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        Ok(ColumnIndex {
            artists: find(ARTISTS)?,
            track_genre: find(TRACK_GENRE)?,
            duration_ms: find(DURATION_MS)?,
            popularity: find(POPULARITY)?,
            explicit: find(EXPLICIT)?,
        })
    }
}

/// Residual index columns from dataframe exports: `Unnamed: 0` or a blank header.
fn is_index_artifact(name: &str) -> bool {
    name.is_empty() || name.starts_with("Unnamed: ")
}

fn load_csv(path: &Path) -> Result<Vec<Track>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(open(path)?);
    let columns = ColumnIndex::from_headers(reader.headers()?.iter())?;

    let mut tracks = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        tracks.push(Track::new(
            text_cell(cell(columns.artists)),
            text_cell(cell(columns.track_genre)),
            parse_number(cell(columns.duration_ms), row, DURATION_MS)?,
            parse_number(cell(columns.popularity), row, POPULARITY)?,
            parse_bool(cell(columns.explicit), row, EXPLICIT)?,
        ));
    }
    Ok(tracks)
}

fn is_missing(s: &str) -> bool {
    MISSING_TOKENS.contains(&s)
}

fn text_cell(s: &str) -> String {
    if is_missing(s) {
        MISSING_TEXT.to_string()
    } else {
        s.to_string()
    }
}

/// Missing cells become NaN, like a dataframe's missing numeric value.
fn parse_number(s: &str, row: usize, column: &str) -> Result<f64, LoadError> {
    let trimmed = s.trim();
    if is_missing(trimmed) {
        return Ok(f64::NAN);
    }
    trimmed.parse::<f64>().map_err(|_| invalid(row, column, s))
}

/// Missing cells are `None`; they fall into neither content group.
fn parse_bool(s: &str, row: usize, column: &str) -> Result<Option<bool>, LoadError> {
    match s.trim() {
        "True" | "true" | "TRUE" | "1" => Ok(Some(true)),
        "False" | "false" | "FALSE" | "0" => Ok(Some(false)),
        other if is_missing(other) => Ok(None),
        _ => Err(invalid(row, column, s)),
    }
}

fn invalid(row: usize, column: &str, value: &str) -> LoadError {
    LoadError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}
