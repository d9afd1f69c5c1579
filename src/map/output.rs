use serde::Serialize;
use serde_json::json;
use serde_json::Map as JSMap;

use crate::map::*;

/// The per-country data consumed by the page, keyed by country name.
pub fn program_data_to_json(placement: &Placement) -> JSValue {
    let mut data: JSMap<String, JSValue> = JSMap::new();
    for entry in placement.entries.iter() {
        let programs: Vec<&str> = entry.programs.iter().map(|p| p.code()).collect();
        let mut country = json!({
            "programs": programs,
            "lat": entry.coordinate.lat,
            "lng": entry.coordinate.lng,
        });
        if let Some(scholars) = &entry.scholars {
            country["bigScholars"] = json!(scholars);
        }
        data.insert(entry.name.clone(), country);
    }
    JSValue::Object(data)
}

pub fn stats_to_json(stats: &AggregateStats) -> JSValue {
    json!({
        "active": stats.active,
        "high": stats.high,
        "elite": stats.elite,
        "none": stats.none,
        "totalCountries": stats.total_countries,
        "totalPrograms": stats.total_programs,
    })
}

pub fn markers_to_json(placement: &Placement, radius: f64) -> JSValue {
    let mut data: JSMap<String, JSValue> = JSMap::new();
    for entry in placement.entries.iter() {
        let markers: Vec<JSValue> = place_markers(&entry.coordinate, &entry.programs, radius)
            .iter()
            .map(|m| {
                json!({
                    "program": m.program.code(),
                    "color": m.program.color(),
                    "angle": m.angle_deg,
                    "lat": m.lat,
                    "lng": m.lng,
                })
            })
            .collect();
        data.insert(entry.name.clone(), JSValue::Array(markers));
    }
    JSValue::Object(data)
}

pub fn build_document(placement: &Placement, stats: &AggregateStats, radius: f64) -> JSValue {
    json!({
        "programData": program_data_to_json(placement),
        "programStats": stats_to_json(stats),
        "programMarkers": markers_to_json(placement, radius),
    })
}

/// The javascript declarations inserted in the page, one constant per entry of the document.
pub fn render_js_block(doc: &JSValue) -> MapResult<String> {
    let mut lines: Vec<String> = Vec::new();
    if let JSValue::Object(entries) = doc {
        for (name, value) in entries.iter() {
            lines.push(format!("    const {} = {};", name, to_indented_string(value)?));
        }
    }
    Ok(lines.join("\n"))
}

/// Replaces what sits between the two markers. Returns `None` when the markers are
/// missing or out of order.
pub fn splice_block(content: &str, start_marker: &str, end_marker: &str, block: &str) -> Option<String> {
    let start_idx = content.find(start_marker)?;
    let end_idx = start_idx + content[start_idx..].find(end_marker)?;
    Some(format!(
        "{}{}\n{}\n\n{}",
        &content[..start_idx],
        start_marker,
        block,
        &content[end_idx..]
    ))
}

pub fn update_html(path: &str, settings: &OutputSettings, doc: &JSValue) -> MapResult<()> {
    let content = fs::read_to_string(path).context(ReadingFileSnafu { path })?;
    let block = render_js_block(doc)?;
    let new_content = splice_block(
        &content,
        &settings.start_marker(),
        &settings.end_marker(),
        &block,
    )
    .context(MissingMarkersSnafu { path })?;
    fs::write(path, new_content).context(WritingFileSnafu { path })?;
    Ok(())
}

pub fn write_json(out: &str, doc: &JSValue) -> MapResult<()> {
    let pretty = serde_json::to_string_pretty(doc).context(ParsingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty);
    } else {
        fs::write(out, pretty).context(WritingFileSnafu { path: out })?;
    }
    Ok(())
}

// Matches the indentation of the surrounding script in the page.
fn to_indented_string(value: &JSValue) -> MapResult<String> {
    let mut buf: Vec<u8> = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"      ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).context(ParsingJsonSnafu {})?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
