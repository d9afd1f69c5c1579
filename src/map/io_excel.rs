use calamine::DataType;

use crate::map::{
    io_common::{assemble_columns, simplify_file_name},
    *,
};

/// Reads the wide program sheet of an Excel workbook.
pub fn read_excel_programs(path: &str, src: &ProgramSource) -> MapResult<Vec<ProgramColumn>> {
    let wrange = get_range(path, src)?;
    let header_idx = src.header_row_index()?;

    let mut iter = wrange.rows().enumerate().skip(header_idx);
    let (_, header) = iter.next().context(EmptyExcelSnafu { path })?;
    let header: Vec<Option<String>> = header.iter().map(header_label).collect();
    debug!("read_excel_programs: header: {:?}", header);

    let file_name = simplify_file_name(path);
    let rows = iter.map(|(idx, row)| {
        // Line numbers as displayed by spreadsheet programs.
        let lineno = idx + 1;
        let cells: Vec<Option<String>> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| read_country_cell(cell, &file_name, lineno, col))
            .collect();
        (lineno, cells)
    });
    Ok(assemble_columns(&header, rows, path))
}

fn header_label(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => Some(s.clone()),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

fn read_country_cell(cell: &DataType, file_name: &str, lineno: usize, col: usize) -> Option<String> {
    match cell {
        DataType::String(s) => Some(s.clone()),
        DataType::Empty => None,
        other => {
            warn!(
                "{}: line {} column {}: expected a country name, found {:?}, skipping",
                file_name,
                lineno,
                col + 1,
                other
            );
            None
        }
    }
}

fn get_range(path: &str, src: &ProgramSource) -> MapResult<calamine::Range<DataType>> {
    debug!(
        "read_excel_programs: path: {:?} worksheet: {:?}",
        path, &src.excel_worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = src.excel_worksheet_name.clone() {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(MissingWorksheetSnafu {
                path,
                name: worksheet_name.clone(),
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        // The program table is expected on the first sheet.
        let wrange = workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    }
}
