mod config;
use log::{debug, info, warn};

use std::collections::{BTreeMap, BTreeSet};

pub use crate::config::*;

pub mod builder;

// Qualifier words that show up around program codes in spreadsheet headers.
const LABEL_NOISE: [&str; 8] = [
    "PROGRAM",
    "PROGRAMME",
    "STUDENT",
    "STUDENTS",
    "SCHOLAR",
    "SCHOLARS",
    "PARTICIPANTS",
    "COUNTRIES",
];

// Spelling variants found in the inputs, mapped to the names used by the coordinate table.
const COUNTRY_ALIASES: [(&str, &str); 8] = [
    ("Bosnia", "Bosnia and Herzegovina"),
    ("UK", "United Kingdom"),
    ("Cameroun", "Cameroon"),
    ("Côte d'Ivoire", "Ivory Coast"),
    ("DRC", "Democratic Republic of the Congo"),
    ("Macedonia", "North Macedonia"),
    ("Salvador", "El Salvador"),
    ("Swaziland", "Eswatini"),
];

/// Default distance between a marker and the center of its country, in degrees.
pub const DEFAULT_MARKER_RADIUS: f64 = 1.5;

/// Reduces a program label from a spreadsheet header to its canonical uppercase code.
///
/// `"BIG students"`, `"big"` and `"Program BIG"` all give `"BIG"`. When no known code
/// appears in the label, the first word that is not a qualifier is used.
pub fn canonical_program_code(label: &str) -> Option<String> {
    let tokens: Vec<String> = label
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .map(|t| {
            t.trim_matches(|c: char| !c.is_alphanumeric())
                .to_uppercase()
        })
        .filter(|t| !t.is_empty())
        .collect();
    if let Some(known) = tokens.iter().find(|t| Program::from_code(t).is_some()) {
        return Some(known.clone());
    }
    tokens
        .iter()
        .find(|t| !LABEL_NOISE.contains(&t.as_str()))
        .or_else(|| tokens.first())
        .cloned()
}

pub fn parse_program_label(label: &str) -> Result<Program, MapErrors> {
    let code = canonical_program_code(label).ok_or(MapErrors::EmptyProgramLabel)?;
    Program::from_code(&code).ok_or(MapErrors::UnknownProgram(code))
}

/// Trims a country name and applies the known aliases. Blank names give `None`.
pub fn canonical_country_name(raw: &str) -> Option<String> {
    let name = raw.trim();
    if name.is_empty() {
        return None;
    }
    let name = COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| name.to_string());
    Some(name)
}

/// Builds the country -> programs mapping from the wide program columns.
///
/// Columns whose label does not name a known program are skipped with a warning.
pub fn build_membership(columns: &[ProgramColumn]) -> Membership {
    let mut builder = builder::Builder::new();
    for column in columns {
        if let Err(e) = builder.add_column(&column.label, &column.countries) {
            warn!(
                "build_membership: skipping column {:?} ({} rows): {}",
                column.label,
                column.countries.len(),
                e
            );
        }
    }
    let membership = builder.build();
    debug!("build_membership: {:?}", membership);
    membership
}

pub fn participation_tier(program_count: usize) -> Tier {
    match program_count {
        0 => Tier::None,
        n if n >= 3 => Tier::Elite,
        2 => Tier::High,
        _ => Tier::Active,
    }
}

pub fn tier_of(programs: &BTreeSet<Program>) -> Tier {
    participation_tier(programs.len())
}

pub fn aggregate(membership: &Membership) -> AggregateStats {
    let mut stats = AggregateStats::default();
    for programs in membership.values() {
        match tier_of(programs) {
            Tier::None => stats.none += 1,
            Tier::Active => stats.active += 1,
            Tier::High => stats.high += 1,
            Tier::Elite => stats.elite += 1,
        }
        stats.total_programs += programs.len() as u64;
    }
    stats.total_countries = membership.len() as u64;
    info!(
        "aggregate: {} countries, {} program entries",
        stats.total_countries, stats.total_programs
    );
    stats
}

/// The angles (clockwise from north, in degrees) of the markers of a country with
/// `count` programs. A single marker stays on the center.
pub fn marker_angles(count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![0.0],
        2 => vec![320.0, 40.0],
        3 => vec![300.0, 0.0, 60.0],
        4 => vec![0.0, 90.0, 180.0, 270.0],
        n => (0..n).map(|i| 360.0 * (i as f64) / (n as f64)).collect(),
    }
}

/// Places one marker per program around the base coordinate.
///
/// Programs are taken in code order, so the same set always produces the same markers.
pub fn place_markers(base: &Coordinate, programs: &BTreeSet<Program>, radius: f64) -> Vec<Marker> {
    let angles = marker_angles(programs.len());
    // A lone marker sits on the country itself.
    let radius = if programs.len() == 1 { 0.0 } else { radius };
    programs
        .iter()
        .zip(angles)
        .map(|(program, angle_deg)| {
            let theta = angle_deg.to_radians();
            Marker {
                program: *program,
                angle_deg,
                lat: base.lat + radius * theta.cos(),
                lng: base.lng + radius * theta.sin(),
            }
        })
        .collect()
}

/// Joins the membership with the scholar lists and the coordinate table.
///
/// Any country with scholars is a member of the scholar program. Countries without a
/// coordinate are left out of the entries and reported in `unmatched`.
pub fn assemble_entries(
    membership: &Membership,
    scholars: &BTreeMap<String, ScholarRecord>,
    coordinates: &BTreeMap<String, Coordinate>,
) -> Placement {
    let merged = merge_scholar_membership(membership, scholars);
    let mut res = Placement::default();
    for (name, programs) in merged.iter() {
        match coordinates.get(name) {
            Some(coordinate) => res.entries.push(CountryEntry {
                name: name.clone(),
                programs: programs.clone(),
                coordinate: *coordinate,
                scholars: scholars.get(name).filter(|s| !s.is_empty()).cloned(),
            }),
            None => res.unmatched.push(name.clone()),
        }
    }
    info!(
        "assemble_entries: {} placed, {} without coordinates",
        res.entries.len(),
        res.unmatched.len()
    );
    res
}

/// Adds the scholar program to every country that has at least one scholar.
pub fn merge_scholar_membership(
    membership: &Membership,
    scholars: &BTreeMap<String, ScholarRecord>,
) -> Membership {
    let mut merged = membership.clone();
    for (name, record) in scholars.iter() {
        if record.values().any(|names| !names.is_empty()) {
            merged
                .entry(name.clone())
                .or_default()
                .insert(Program::SCHOLARS);
        }
    }
    merged
}

/// The URL to open when a country is clicked, if any.
///
/// Missing rows, inactive rows and URLs that are not http(s) all resolve to no link.
pub fn resolve_link<'a>(links: &'a BTreeMap<String, CountryLink>, country: &str) -> Option<&'a str> {
    links
        .get(country)
        .filter(|l| l.active && l.url.starts_with("http"))
        .map(|l| l.url.as_str())
}

/// Link rows that do not correspond to any placed country, sorted.
pub fn orphan_links(links: &BTreeMap<String, CountryLink>, placement: &Placement) -> Vec<String> {
    let placed: BTreeSet<&str> = placement.entries.iter().map(|e| e.name.as_str()).collect();
    links
        .keys()
        .filter(|k| !placed.contains(k.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn col(label: &str, countries: &[&str]) -> ProgramColumn {
        ProgramColumn {
            label: label.to_string(),
            countries: countries.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn set(ps: &[Program]) -> BTreeSet<Program> {
        ps.iter().copied().collect()
    }

    #[test]
    fn program_labels_are_canonicalized() {
        assert_eq!(canonical_program_code("BIG students"), Some("BIG".to_string()));
        assert_eq!(canonical_program_code("big"), Some("BIG".to_string()));
        assert_eq!(canonical_program_code("  Star  "), Some("STAR".to_string()));
        assert_eq!(canonical_program_code("program X students"), Some("X".to_string()));
        assert_eq!(canonical_program_code("Program NATIONS"), Some("NATIONS".to_string()));
        assert_eq!(canonical_program_code("   "), None);
        assert_eq!(parse_program_label("excl scholars"), Ok(Program::Excl));
        assert_eq!(
            parse_program_label("program X students"),
            Err(MapErrors::UnknownProgram("X".to_string()))
        );
        assert_eq!(parse_program_label(""), Err(MapErrors::EmptyProgramLabel));
    }

    #[test]
    fn country_names_are_trimmed_and_aliased() {
        assert_eq!(canonical_country_name(" Kenya "), Some("Kenya".to_string()));
        assert_eq!(
            canonical_country_name("Bosnia"),
            Some("Bosnia and Herzegovina".to_string())
        );
        assert_eq!(canonical_country_name("UK"), Some("United Kingdom".to_string()));
        assert_eq!(canonical_country_name("  "), None);
    }

    #[test]
    fn tiers_are_exhaustive() {
        let labels: Vec<&str> = (0..7).map(|n| participation_tier(n).label()).collect();
        assert_eq!(
            labels,
            vec!["none", "active", "high", "elite", "elite", "elite", "elite"]
        );
        assert_eq!(tier_of(&BTreeSet::new()), Tier::None);
    }

    #[test]
    fn membership_example() {
        init();
        let columns = vec![
            col("STAR", &["A", "B"]),
            col("NATIONS", &["A"]),
            col("EXCL", &[]),
        ];
        let membership = build_membership(&columns);
        assert_eq!(membership.len(), 2);
        assert_eq!(membership["A"], set(&[Program::Nations, Program::Star]));
        assert_eq!(membership["B"], set(&[Program::Star]));
        assert_eq!(tier_of(&membership["A"]), Tier::High);
        assert_eq!(tier_of(&membership["B"]), Tier::Active);

        let stats = aggregate(&membership);
        assert_eq!(
            stats,
            AggregateStats {
                none: 0,
                active: 1,
                high: 1,
                elite: 0,
                total_countries: 2,
                total_programs: 3,
            }
        );
    }

    #[test]
    fn duplicates_collapse() {
        let membership = build_membership(&[
            col("STAR", &["Kenya", "Kenya", " Kenya"]),
            col("star students", &["Kenya"]),
        ]);
        assert_eq!(membership["Kenya"], set(&[Program::Star]));
        assert_eq!(aggregate(&membership).total_programs, 1);
    }

    #[test]
    fn blank_names_and_unknown_columns_are_skipped() {
        init();
        let membership = build_membership(&[
            col("STAR", &["", "  ", "Peru"]),
            col("Notes", &["Chile"]),
        ]);
        assert_eq!(membership.keys().cloned().collect::<Vec<_>>(), vec!["Peru"]);
    }

    #[test]
    fn aggregate_is_order_independent() {
        let a = vec![
            col("STAR", &["A", "B", "C"]),
            col("BIG", &["C", "A"]),
            col("EXCL", &["C"]),
        ];
        let mut b = a.clone();
        b.reverse();
        for c in b.iter_mut() {
            c.countries.reverse();
        }
        assert_eq!(aggregate(&build_membership(&a)), aggregate(&build_membership(&b)));
        let stats = aggregate(&build_membership(&a));
        assert_eq!(stats.elite, 1);
        assert_eq!(stats.high, 1);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.total_programs, 6);
    }

    #[test]
    fn empty_country_counts_as_none() {
        let mut b = builder::Builder::new();
        b.add_empty_country("Iceland");
        b.add_country(Program::Star, "Peru");
        let stats = aggregate(&b.build());
        assert_eq!(stats.none, 1);
        assert_eq!(stats.count(Tier::Active), 1);
        assert_eq!(stats.total_countries, 2);
        assert_eq!(stats.total_programs, 1);
    }

    #[test]
    fn markers_follow_angle_table() {
        assert_eq!(marker_angles(2), vec![320.0, 40.0]);
        assert_eq!(marker_angles(3), vec![300.0, 0.0, 60.0]);
        assert_eq!(marker_angles(5), vec![0.0, 72.0, 144.0, 216.0, 288.0]);

        let base = Coordinate { lat: 10.0, lng: 20.0 };
        let single = place_markers(&base, &set(&[Program::Star]), DEFAULT_MARKER_RADIUS);
        assert_eq!(single.len(), 1);
        assert_eq!((single[0].lat, single[0].lng), (10.0, 20.0));

        let all = set(&Program::ALL);
        let markers = place_markers(&base, &all, 2.0);
        let programs: Vec<Program> = markers.iter().map(|m| m.program).collect();
        assert_eq!(programs, Program::ALL.to_vec());
        // BIG points north, EXCL east.
        assert!((markers[0].lat - 12.0).abs() < 1e-9);
        assert!((markers[0].lng - 20.0).abs() < 1e-9);
        assert!((markers[1].lat - 10.0).abs() < 1e-9);
        assert!((markers[1].lng - 22.0).abs() < 1e-9);
        assert_eq!(markers, place_markers(&base, &all, 2.0));
    }

    #[test]
    fn unmatched_countries_are_reported() {
        let membership = build_membership(&[col("STAR", &["Kenya", "Atlantis"])]);
        let mut coordinates = BTreeMap::new();
        coordinates.insert(
            "Kenya".to_string(),
            Coordinate {
                lat: -0.0236,
                lng: 37.9062,
            },
        );
        let placement = assemble_entries(&membership, &BTreeMap::new(), &coordinates);
        assert_eq!(placement.entries.len(), 1);
        assert_eq!(placement.entries[0].name, "Kenya");
        assert_eq!(placement.unmatched, vec!["Atlantis".to_string()]);
    }

    #[test]
    fn scholars_imply_membership() {
        let membership = build_membership(&[col("STAR", &["India"])]);
        let mut record = ScholarRecord::new();
        record.insert("2024".to_string(), vec!["Asha".to_string()]);
        let mut scholars = BTreeMap::new();
        scholars.insert("India".to_string(), record.clone());
        scholars.insert("Nepal".to_string(), record);
        let mut coordinates = BTreeMap::new();
        for name in ["India", "Nepal"] {
            coordinates.insert(name.to_string(), Coordinate { lat: 1.0, lng: 2.0 });
        }
        let placement = assemble_entries(&membership, &scholars, &coordinates);
        assert_eq!(placement.entries.len(), 2);
        assert_eq!(
            placement.entries[0].programs,
            set(&[Program::Big, Program::Star])
        );
        assert_eq!(placement.entries[0].tier(), Tier::High);
        assert_eq!(placement.entries[1].programs, set(&[Program::Big]));
        assert!(placement.entries[1].scholars.is_some());
    }

    #[test]
    fn links_resolve_only_when_active() {
        let mut links = BTreeMap::new();
        links.insert(
            "India".to_string(),
            CountryLink {
                url: "https://www.globtalent.org/country-collection/india".to_string(),
                active: true,
                link_type: LinkType::Globtalent,
                notes: String::new(),
            },
        );
        links.insert(
            "Peru".to_string(),
            CountryLink {
                url: "https://www.globtalent.org/country-collection/latin-america".to_string(),
                active: false,
                link_type: LinkType::Globtalent,
                notes: String::new(),
            },
        );
        links.insert(
            "Chile".to_string(),
            CountryLink {
                url: "ftp://example.org".to_string(),
                active: true,
                link_type: LinkType::External,
                notes: String::new(),
            },
        );
        assert_eq!(
            resolve_link(&links, "India"),
            Some("https://www.globtalent.org/country-collection/india")
        );
        assert_eq!(resolve_link(&links, "Peru"), None);
        assert_eq!(resolve_link(&links, "Chile"), None);
        assert_eq!(resolve_link(&links, "Kenya"), None);

        let placement = Placement {
            entries: vec![CountryEntry {
                name: "India".to_string(),
                programs: set(&[Program::Star]),
                coordinate: Coordinate { lat: 0.0, lng: 0.0 },
                scholars: None,
            }],
            unmatched: vec![],
        };
        assert_eq!(orphan_links(&links, &placement), vec!["Chile", "Peru"]);
    }
}
