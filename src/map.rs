use log::{debug, info, warn};

use program_map::*;
use snafu::{prelude::*, Snafu};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Reader, Xlsx};

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::map::config_reader::*;

pub mod config_reader;
mod coordinates;
mod io_common;
mod io_csv;
mod io_excel;
mod output;

#[derive(Debug, Snafu)]
pub enum MapError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet named {name:?} in {path}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("The spreadsheet {path} has no data"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("The CSV file {path} has no header row"))]
    CsvEmpty { path: String },
    #[snafu(display("Error parsing line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error writing CSV file {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Cannot find column {column:?} in the header of {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a row number (starting at 1)"))]
    ParsingJsonNumber {},
    #[snafu(display("Error reading file {path}"))]
    ReadingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Cannot find the data markers in {path}"))]
    MissingMarkers { path: String },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type MapResult<T> = Result<T, MapError>;

fn read_program_data(root: &Path, src: &ProgramSource) -> MapResult<Vec<ProgramColumn>> {
    let path = io_common::resolve_path(root, &src.file_path);
    info!("Attempting to read program file {:?}", path);
    let columns = match src.provider.as_str() {
        "xlsx" | "excel" => io_excel::read_excel_programs(&path, src)?,
        "csv" => io_csv::read_csv_programs(&path, src)?,
        x => whatever!("Provider not implemented {:?}", x),
    };
    debug!("read_program_data: {:?}", columns);
    Ok(columns)
}

fn read_all_scholars(
    root: &Path,
    sources: &[ScholarSource],
) -> MapResult<BTreeMap<String, ScholarRecord>> {
    let mut res: BTreeMap<String, ScholarRecord> = BTreeMap::new();
    for src in sources {
        let path = io_common::resolve_path(root, &src.file_path);
        if !Path::new(&path).exists() {
            warn!("Scholar file {:?} not found, skipping year {}", path, src.year);
            continue;
        }
        info!("Attempting to read scholar file {:?}", path);
        for (country, names) in io_csv::read_scholars(&path, src)? {
            res.entry(country)
                .or_default()
                .entry(src.year.clone())
                .or_default()
                .extend(names);
        }
    }
    Ok(res)
}

fn read_links(root: &Path, config: &MapConfig) -> MapResult<BTreeMap<String, CountryLink>> {
    let path = match &config.links_file {
        Some(f) => io_common::resolve_path(root, f),
        None => return Ok(BTreeMap::new()),
    };
    if !Path::new(&path).exists() {
        warn!("Links file {:?} not found, no country will be clickable", path);
        return Ok(BTreeMap::new());
    }
    io_csv::read_country_links(&path)
}

fn check_reference(reference_path: &str, doc: &JSValue) -> MapResult<()> {
    let reference = read_reference(reference_path)?;
    let pretty_ref = serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    let pretty_doc = serde_json::to_string_pretty(doc).context(ParsingJsonSnafu {})?;
    if pretty_ref != pretty_doc {
        warn!("Found differences with the reference document");
        print_diff(pretty_ref.as_str(), pretty_doc.as_str(), "\n");
        whatever!("Difference detected between the generated data and the reference data")
    }
    Ok(())
}

/// Reads all the inputs and writes the map data, either into the page or to `out`.
///
/// Arguments:
/// * `config_path` a JSON configuration. Without it, the default layout is used,
/// relative to the current directory.
/// * `out` a file path or `stdout`. When set, the page is left untouched.
/// * `reference` a JSON document the output must be identical to.
/// * `links_template` where to write a links table covering all the placed countries.
pub fn run_process(
    config_path: Option<String>,
    out: Option<String>,
    reference: Option<String>,
    links_template: Option<String>,
) -> MapResult<()> {
    let (config, root): (MapConfig, PathBuf) = match config_path {
        Some(p) => {
            let config = read_config(&p)?;
            let root = Path::new(&p)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, root)
        }
        None => (MapConfig::default_layout(), PathBuf::from(".")),
    };
    info!("config: {:?}", config);

    if config.program_sources.is_empty() {
        whatever!("No program sources configured")
    }

    let mut columns: Vec<ProgramColumn> = Vec::new();
    for src in config.program_sources.iter() {
        let mut file_columns = read_program_data(&root, src)?;
        columns.append(&mut file_columns);
    }
    let membership = build_membership(&columns);
    info!("Found {} countries in the program data", membership.len());

    let scholars = read_all_scholars(&root, &config.scholar_sources)?;

    let coordinates = match &config.coordinates_file {
        Some(f) => io_csv::read_coordinates(&io_common::resolve_path(&root, f))?,
        None => coordinates::reference_coordinates(),
    };

    let placement = assemble_entries(&membership, &scholars, &coordinates);
    if !placement.unmatched.is_empty() {
        warn!(
            "Missing coordinates for: {}",
            placement.unmatched.join(", ")
        );
    }

    let stats = aggregate(&placement.membership());
    for tier in Tier::LEGEND {
        info!("Tier {}: {} countries", tier, stats.count(tier));
    }

    let links = read_links(&root, &config)?;
    let clickable = placement
        .entries
        .iter()
        .filter(|e| resolve_link(&links, &e.name).is_some())
        .count();
    info!(
        "{} of {} countries have an active link",
        clickable,
        placement.entries.len()
    );
    let orphans = orphan_links(&links, &placement);
    if !orphans.is_empty() {
        warn!("Links without a country on the map: {}", orphans.join(", "));
    }

    if let Some(template_path) = links_template {
        let names: Vec<String> = placement.entries.iter().map(|e| e.name.clone()).collect();
        let pending = io_csv::write_links_template(&template_path, &names, &links)?;
        info!(
            "Wrote links template {:?} ({} pending countries)",
            template_path, pending
        );
    }

    let doc = output::build_document(
        &placement,
        &stats,
        config.output_settings.marker_radius(),
    );

    match out {
        Some(out_path) => output::write_json(&out_path, &doc)?,
        None => {
            let html_path = io_common::resolve_path(&root, &config.output_settings.html_file());
            output::update_html(&html_path, &config.output_settings, &doc)?;
            info!("Updated {:?}", html_path);
        }
    }

    if let Some(reference_path) = reference {
        check_reference(&reference_path, &doc)?;
    }

    info!(
        "Generated data for {} countries ({} program entries)",
        stats.total_countries, stats.total_programs
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PAGE: &str = "<script>\n    /* ---------- DATA: keep exactly as-is from your app ---------- */\n    const programData = {};\n\n    // Country website mappings for click navigation\n    let countryWebsites = {};\n</script>\n";

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut f = fs::File::create(dir.join(name)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    fn setup() -> tempfile::TempDir {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "programs.csv",
            "STAR students,NATIONS,EXCL,big\n\
             Kenya,Kenya,Kenya,\n\
             Peru,UK,,\n\
             Atlantis,,,\n\
             Kenya,,,\n",
        );
        write_file(
            dir.path(),
            "scholars_2024.csv",
            "Name,Country\nAsha,India\nRavi,India\n,Peru\n",
        );
        write_file(
            dir.path(),
            "links.csv",
            "Country,Website_URL,Link_Type,Active,Notes\n\
             India,https://www.globtalent.org/country-collection/india,globtalent,Yes,\n\
             Mongolia,https://www.globtalent.org/country-collection/mongolia,globtalent,Yes,\n",
        );
        write_file(dir.path(), "index.html", PAGE);
        write_file(
            dir.path(),
            "config.json",
            r#"{
                "programSources": [{"provider": "csv", "filePath": "programs.csv"}],
                "scholarSources": [
                    {"year": "2024", "filePath": "scholars_2024.csv"},
                    {"year": "2025", "filePath": "missing_2025.csv"}
                ],
                "linksFile": "links.csv"
            }"#,
        );
        dir
    }

    fn config_path(dir: &tempfile::TempDir) -> Option<String> {
        Some(dir.path().join("config.json").display().to_string())
    }

    #[test]
    fn process_to_json() {
        let dir = setup();
        let out = dir.path().join("out.json").display().to_string();
        run_process(config_path(&dir), Some(out.clone()), None, None).unwrap();

        let doc: JSValue = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        let data = &doc["programData"];
        assert_eq!(
            data["Kenya"]["programs"],
            serde_json::json!(["EXCL", "NATIONS", "STAR"])
        );
        assert_eq!(data["United Kingdom"]["programs"], serde_json::json!(["NATIONS"]));
        assert_eq!(data["India"]["programs"], serde_json::json!(["BIG"]));
        assert_eq!(
            data["India"]["bigScholars"],
            serde_json::json!({"2024": ["Asha", "Ravi"]})
        );
        assert!(data.get("Atlantis").is_none());
        assert!(data["Peru"].get("bigScholars").is_none());

        assert_eq!(
            doc["programStats"],
            serde_json::json!({
                "active": 3,
                "high": 0,
                "elite": 1,
                "none": 0,
                "totalCountries": 4,
                "totalPrograms": 6
            })
        );
        assert_eq!(doc["programMarkers"]["Kenya"].as_array().map(|v| v.len()), Some(3));
    }

    #[test]
    fn process_into_page_and_compare() {
        let dir = setup();
        run_process(config_path(&dir), None, None, None).unwrap();
        let page = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(page.contains("    const programData = {\n      \"India\": {"));
        assert!(page.contains("    const programStats = {"));
        assert!(page.ends_with(
            "    // Country website mappings for click navigation\n    let countryWebsites = {};\n</script>\n"
        ));

        // A second run produces the same page.
        run_process(config_path(&dir), None, None, None).unwrap();
        assert_eq!(
            page,
            fs::read_to_string(dir.path().join("index.html")).unwrap()
        );

        let out = dir.path().join("reference.json").display().to_string();
        run_process(config_path(&dir), Some(out.clone()), None, None).unwrap();
        let other = dir.path().join("other.json").display().to_string();
        run_process(config_path(&dir), Some(other.clone()), Some(out), None).unwrap();

        write_file(dir.path(), "reference.json", "{\"programData\": {}}");
        let res = run_process(
            config_path(&dir),
            Some(other),
            Some(dir.path().join("reference.json").display().to_string()),
            None,
        );
        assert!(matches!(res, Err(MapError::Whatever { .. })));
    }

    #[test]
    fn links_template_covers_placed_countries() {
        let dir = setup();
        let template = dir.path().join("template.csv").display().to_string();
        let out = dir.path().join("out.json").display().to_string();
        run_process(config_path(&dir), Some(out), None, Some(template.clone())).unwrap();
        let links = io_csv::read_country_links(&template).unwrap();
        assert_eq!(
            links.keys().collect::<Vec<_>>(),
            vec!["India", "Kenya", "Mongolia", "Peru", "United Kingdom"]
        );
        assert_eq!(
            resolve_link(&links, "India"),
            Some("https://www.globtalent.org/country-collection/india")
        );
        assert_eq!(resolve_link(&links, "Kenya"), None);
    }

    #[test]
    fn missing_program_file_is_fatal() {
        let dir = setup();
        fs::remove_file(dir.path().join("programs.csv")).unwrap();
        let res = run_process(config_path(&dir), None, None, None);
        assert!(matches!(res, Err(MapError::CsvOpen { .. })));
        // Nothing was written.
        assert_eq!(
            fs::read_to_string(dir.path().join("index.html")).unwrap(),
            PAGE
        );
    }

    #[test]
    fn missing_markers_is_fatal() {
        let dir = setup();
        write_file(dir.path(), "index.html", "<html></html>");
        let res = run_process(config_path(&dir), None, None, None);
        assert!(matches!(res, Err(MapError::MissingMarkers { .. })));
    }
}
