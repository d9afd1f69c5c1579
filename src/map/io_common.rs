use std::collections::HashMap;

use crate::map::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Joins a path from the configuration to the directory the configuration lives in.
pub fn resolve_path(root: &Path, file_path: &str) -> String {
    let p: PathBuf = [root, Path::new(file_path)].iter().collect();
    p.as_path().display().to_string()
}

/// Given the header of a file (names of each of the columns), and the names of the
/// required columns, finds the position of each of them.
pub fn get_col_index_mapping(
    req_col_names: &[String],
    header: &[Option<String>],
    path: &str,
) -> MapResult<Vec<(usize, String)>> {
    // The first column wins when a name is repeated.
    let mut col_names: HashMap<String, usize> = HashMap::new();
    for (idx, x) in header.iter().enumerate() {
        if let Some(s) = x {
            col_names.entry(s.trim().to_string()).or_insert(idx);
        }
    }

    debug!("get_col_index_mapping: col_names: {:?}", col_names);

    let mut col_indexes: Vec<(usize, String)> = Vec::new();
    for cname in req_col_names {
        let idx = col_names.get(cname).context(MissingColumnSnafu {
            column: cname,
            path,
        })?;
        col_indexes.push((*idx, cname.clone()));
    }
    Ok(col_indexes)
}

/// Turns a wide table (one program per column, countries listed downwards) into
/// program columns.
///
/// `rows` yields the line number and the cells of each row below the header. Cells
/// that could not be read as text are passed as `None` by the readers.
pub fn assemble_columns(
    header: &[Option<String>],
    rows: impl Iterator<Item = (usize, Vec<Option<String>>)>,
    path: &str,
) -> Vec<ProgramColumn> {
    let mut columns: Vec<ProgramColumn> = header
        .iter()
        .map(|h| ProgramColumn {
            label: h.clone().unwrap_or_default(),
            countries: vec![],
        })
        .collect();
    for (lineno, cells) in rows {
        for (idx, cell) in cells.into_iter().enumerate() {
            let name = match cell {
                Some(s) if !s.trim().is_empty() => s,
                _ => continue,
            };
            match columns.get_mut(idx) {
                Some(col) if !col.label.trim().is_empty() => col.countries.push(name),
                _ => {
                    warn!(
                        "{}: line {}: value {:?} in column {} has no program header, skipping",
                        simplify_file_name(path),
                        lineno,
                        name,
                        idx + 1
                    );
                }
            }
        }
    }
    columns.retain(|c| !c.label.trim().is_empty());
    debug!("assemble_columns: {} columns from {}", columns.len(), path);
    columns
}

/// Rows left over by the people maintaining the scholar sheets.
pub fn is_placeholder_name(name: &str) -> bool {
    name == "Name" || name.contains("Do not contact")
}
