// Primitives for reading and writing CSV files.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;

use crate::map::{
    io_common::{assemble_columns, get_col_index_mapping, is_placeholder_name, simplify_file_name},
    *,
};

const LINK_HEADER: [&str; 5] = ["Country", "Website_URL", "Link_Type", "Active", "Notes"];

/// Reads a wide program table: the header row holds the program labels, and each
/// column lists country names downwards.
pub fn read_csv_programs(path: &str, src: &ProgramSource) -> MapResult<Vec<ProgramColumn>> {
    let (header, records, header_idx) = get_header_and_records(path, src.header_row_index()?)?;
    debug!("read_csv_programs: header: {:?}", header);

    let mut rows: Vec<(usize, Vec<Option<String>>)> = Vec::new();
    for (lineno, line) in parsed_lines(path, records, header_idx) {
        rows.push((lineno, line.iter().map(non_empty).collect()));
    }
    Ok(assemble_columns(&header, rows.into_iter(), path))
}

/// Reads one year of scholars. Returns the names of the scholars for each country,
/// in file order.
pub fn read_scholars(path: &str, src: &ScholarSource) -> MapResult<BTreeMap<String, Vec<String>>> {
    let (header, records, header_idx) = get_header_and_records(path, src.header_row_index()?)?;
    let col_indexes =
        get_col_index_mapping(&[src.country_column(), src.name_column()], &header, path)?;
    let (country_idx, name_idx) = (col_indexes[0].0, col_indexes[1].0);
    let file_name = simplify_file_name(path);

    let mut res: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (lineno, line) in parsed_lines(path, records, header_idx) {
        let country = line.get(country_idx).and_then(canonical_country_name);
        let name = line.get(name_idx).and_then(non_empty);
        let (country, name) = match (country, name) {
            (Some(c), Some(n)) => (c, n),
            _ => {
                warn!(
                    "{}: line {}: missing country or name, skipping row {:?}",
                    file_name, lineno, line
                );
                continue;
            }
        };
        if is_placeholder_name(&name) {
            debug!("read_scholars: line {}: placeholder {:?}", lineno, name);
            continue;
        }
        res.entry(country).or_default().push(name);
    }
    info!(
        "Read {} scholars from {} for {}",
        res.values().map(|v| v.len()).sum::<usize>(),
        file_name,
        src.year
    );
    Ok(res)
}

/// Reads the country links table. Rows without a country are skipped.
pub fn read_country_links(path: &str) -> MapResult<BTreeMap<String, CountryLink>> {
    let (header, records, header_idx) = get_header_and_records(path, 0)?;
    let required: Vec<String> = ["Country", "Website_URL", "Active"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let col_indexes = get_col_index_mapping(&required, &header, path)?;
    let (country_idx, url_idx, active_idx) =
        (col_indexes[0].0, col_indexes[1].0, col_indexes[2].0);
    let optional_col = |name: &str| {
        header
            .iter()
            .position(|h| h.as_deref().map(str::trim) == Some(name))
    };
    let type_idx = optional_col("Link_Type");
    let notes_idx = optional_col("Notes");

    let mut res: BTreeMap<String, CountryLink> = BTreeMap::new();
    for (lineno, line) in parsed_lines(path, records, header_idx) {
        let country = match line.get(country_idx).and_then(canonical_country_name) {
            Some(c) => c,
            None => {
                warn!("{}: line {}: missing country, skipping", path, lineno);
                continue;
            }
        };
        let field = |idx: Option<usize>| {
            idx.and_then(|i| line.get(i))
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };
        let link = CountryLink {
            url: field(Some(url_idx)),
            active: field(Some(active_idx)).eq_ignore_ascii_case("yes"),
            link_type: LinkType::from_label(&field(type_idx)),
            notes: field(notes_idx),
        };
        if res.insert(country.clone(), link).is_some() {
            warn!("{}: line {}: duplicate row for {}, keeping the last one", path, lineno, country);
        }
    }
    Ok(res)
}

/// Writes a links table covering all the given countries. Existing rows are kept as
/// they are, the other countries get a pending row to be filled in by hand.
///
/// Returns the number of pending rows.
pub fn write_links_template(
    path: &str,
    countries: &[String],
    existing: &BTreeMap<String, CountryLink>,
) -> MapResult<usize> {
    let mut wtr = csv::Writer::from_path(path).context(CsvWriteSnafu { path })?;
    wtr.write_record(LINK_HEADER)
        .context(CsvWriteSnafu { path })?;

    let all: BTreeSet<&String> = countries.iter().chain(existing.keys()).collect();
    let mut pending = 0;
    for country in all {
        let record: [String; 5] = match existing.get(country) {
            Some(link) => [
                country.clone(),
                link.url.clone(),
                link.link_type.label().to_string(),
                if link.active { "Yes" } else { "No" }.to_string(),
                link.notes.clone(),
            ],
            None => {
                pending += 1;
                [
                    country.clone(),
                    String::new(),
                    LinkType::Pending.label().to_string(),
                    "No".to_string(),
                    "Please add globtalent.org link when available".to_string(),
                ]
            }
        };
        wtr.write_record(&record).context(CsvWriteSnafu { path })?;
    }
    wtr.flush().context(WritingFileSnafu { path })?;
    Ok(pending)
}

/// Reads a coordinate table with `Country`, `Latitude` and `Longitude` columns.
pub fn read_coordinates(path: &str) -> MapResult<BTreeMap<String, Coordinate>> {
    let (header, records, header_idx) = get_header_and_records(path, 0)?;
    let required: Vec<String> = ["Country", "Latitude", "Longitude"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let col_indexes = get_col_index_mapping(&required, &header, path)?;

    let mut res: BTreeMap<String, Coordinate> = BTreeMap::new();
    for (lineno, line) in parsed_lines(path, records, header_idx) {
        let country = line.get(col_indexes[0].0).and_then(canonical_country_name);
        let number = |idx: usize, bound: f64| {
            line.get(idx)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|x| x.is_finite() && x.abs() <= bound)
        };
        match (
            country,
            number(col_indexes[1].0, 90.0),
            number(col_indexes[2].0, 180.0),
        ) {
            (Some(country), Some(lat), Some(lng)) => {
                res.insert(country, Coordinate { lat, lng });
            }
            _ => {
                warn!("{}: line {}: malformed row {:?}, skipping", path, lineno, line);
            }
        }
    }
    Ok(res)
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim_start_matches('\u{feff}').trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Yields the records below the header with their line number. Lines that fail to
/// parse are skipped with a warning.
fn parsed_lines<'a>(
    path: &'a str,
    records: csv::StringRecordsIntoIter<File>,
    header_idx: usize,
) -> impl Iterator<Item = (usize, csv::StringRecord)> + 'a {
    records
        .enumerate()
        .filter_map(move |(idx, line_r)| {
            // The header sits on line header_idx + 1.
            let lineno = header_idx + idx + 2;
            match line_r {
                Ok(line) => Some((lineno, line)),
                Err(e) => {
                    warn!("{}: line {}: could not parse, skipping: {}", path, lineno, e);
                    None
                }
            }
        })
}

fn get_header_and_records(
    path: &str,
    header_idx: usize,
) -> MapResult<(Vec<Option<String>>, csv::StringRecordsIntoIter<File>, usize)> {
    let (mut records, header_idx) = get_records(path, header_idx)?;
    let header = records
        .next()
        .context(CsvEmptySnafu { path })?
        .context(CsvLineParseSnafu {
            path,
            lineno: header_idx + 1,
        })?;
    let header: Vec<Option<String>> = header.iter().map(non_empty).collect();
    Ok((header, records, header_idx))
}

fn get_records(path: &str, header_idx: usize) -> MapResult<(csv::StringRecordsIntoIter<File>, usize)> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();
    for _ in 0..header_idx {
        _ = records.next();
    }
    Ok((records, header_idx))
}
