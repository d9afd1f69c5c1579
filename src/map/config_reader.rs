use crate::map::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const DEFAULT_START_MARKER: &str =
    "    /* ---------- DATA: keep exactly as-is from your app ---------- */";
pub const DEFAULT_END_MARKER: &str = "    // Country website mappings for click navigation";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ProgramSource {
    /// "xlsx" or "csv"
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "headerRowIndex")]
    _header_row_index: Option<JSValue>,
}

impl ProgramSource {
    pub fn new(provider: &str, file_path: &str) -> ProgramSource {
        ProgramSource {
            provider: provider.to_string(),
            file_path: file_path.to_string(),
            excel_worksheet_name: None,
            _header_row_index: None,
        }
    }

    /// Zero-based index of the header row. Defaults to the first row.
    pub fn header_row_index(&self) -> MapResult<usize> {
        read_row_index(&self._header_row_index)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ScholarSource {
    pub year: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "headerRowIndex")]
    _header_row_index: Option<JSValue>,
    #[serde(rename = "countryColumn")]
    pub country_column: Option<String>,
    #[serde(rename = "nameColumn")]
    pub name_column: Option<String>,
}

impl ScholarSource {
    pub fn new(year: &str, file_path: &str, header_row: u64) -> ScholarSource {
        ScholarSource {
            year: year.to_string(),
            file_path: file_path.to_string(),
            _header_row_index: Some(JSValue::from(header_row)),
            country_column: None,
            name_column: None,
        }
    }

    pub fn header_row_index(&self) -> MapResult<usize> {
        read_row_index(&self._header_row_index)
    }

    pub fn country_column(&self) -> String {
        self.country_column
            .clone()
            .unwrap_or_else(|| "Country".to_string())
    }

    pub fn name_column(&self) -> String {
        self.name_column.clone().unwrap_or_else(|| "Name".to_string())
    }
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "htmlFile")]
    pub html_file: Option<String>,
    #[serde(rename = "startMarker")]
    pub start_marker: Option<String>,
    #[serde(rename = "endMarker")]
    pub end_marker: Option<String>,
    #[serde(rename = "markerRadius")]
    pub marker_radius: Option<f64>,
}

impl OutputSettings {
    pub fn html_file(&self) -> String {
        self.html_file
            .clone()
            .unwrap_or_else(|| "index.html".to_string())
    }

    pub fn start_marker(&self) -> String {
        self.start_marker
            .clone()
            .unwrap_or_else(|| DEFAULT_START_MARKER.to_string())
    }

    pub fn end_marker(&self) -> String {
        self.end_marker
            .clone()
            .unwrap_or_else(|| DEFAULT_END_MARKER.to_string())
    }

    pub fn marker_radius(&self) -> f64 {
        self.marker_radius.unwrap_or(DEFAULT_MARKER_RADIUS)
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(rename = "programSources")]
    pub program_sources: Vec<ProgramSource>,
    #[serde(rename = "scholarSources", default)]
    pub scholar_sources: Vec<ScholarSource>,
    #[serde(rename = "coordinatesFile")]
    pub coordinates_file: Option<String>,
    #[serde(rename = "linksFile")]
    pub links_file: Option<String>,
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
}

impl MapConfig {
    /// The layout used when no configuration file is given: everything under `data/`,
    /// the page in `index.html`.
    pub fn default_layout() -> MapConfig {
        MapConfig {
            program_sources: vec![ProgramSource::new("xlsx", "data/input_data.xlsx")],
            scholar_sources: vec![
                ScholarSource::new("2024", "data/BIG_scholars_2024_entry.csv", 1),
                // The 2025 export has a grouping row above the real header.
                ScholarSource::new("2025", "data/Big_scholars_list_2025.csv", 2),
            ],
            coordinates_file: None,
            links_file: Some("data/country_links.csv".to_string()),
            output_settings: OutputSettings::default(),
        }
    }
}

pub fn read_config(path: &str) -> MapResult<MapConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: MapConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_reference(path: &str) -> MapResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

// Row indexes start at 1 to respect most conventions in the excel world.
fn read_row_index(x: &Option<JSValue>) -> MapResult<usize> {
    let idx = match x {
        None => 1,
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {})?,
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<usize>()
            .ok()
            .context(ParsingJsonNumberSnafu {})?,
        _ => None.context(ParsingJsonNumberSnafu {})?,
    };
    ensure!(idx >= 1, ParsingJsonNumberSnafu {});
    Ok(idx - 1)
}
