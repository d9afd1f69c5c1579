// ********* Input data structures ***********

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::Display;

/// The programs a country can take part in.
///
/// The variants are declared in the alphabetical order of their codes, so that the
/// derived ordering matches the order in which markers are laid out.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Program {
    Big,
    Excl,
    Nations,
    Star,
}

impl Program {
    pub const ALL: [Program; 4] = [Program::Big, Program::Excl, Program::Nations, Program::Star];

    /// The program that carries per-year scholar lists.
    pub const SCHOLARS: Program = Program::Big;

    pub fn code(&self) -> &'static str {
        match self {
            Program::Big => "BIG",
            Program::Excl => "EXCL",
            Program::Nations => "NATIONS",
            Program::Star => "STAR",
        }
    }

    /// Looks up a canonical (already uppercased) code.
    pub fn from_code(code: &str) -> Option<Program> {
        Program::ALL.iter().copied().find(|p| p.code() == code)
    }

    pub fn color(&self) -> &'static str {
        match self {
            Program::Big => "#10b981",
            Program::Excl => "#ef4444",
            Program::Nations => "#f59e0b",
            Program::Star => "#3b82f6",
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One column of the wide input: a program label as written in the header, and
/// the country names listed below it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ProgramColumn {
    pub label: String,
    pub countries: Vec<String>,
}

/// Country name -> the programs this country takes part in.
pub type Membership = BTreeMap<String, BTreeSet<Program>>;

/// Year label -> scholar names, in input order.
pub type ScholarRecord = BTreeMap<String, Vec<String>>;

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum LinkType {
    Globtalent,
    External,
    Pending,
}

impl LinkType {
    pub fn label(&self) -> &'static str {
        match self {
            LinkType::Globtalent => "globtalent",
            LinkType::External => "external",
            LinkType::Pending => "pending",
        }
    }

    /// Unknown tags are treated as external links.
    pub fn from_label(s: &str) -> LinkType {
        match s.trim().to_lowercase().as_str() {
            "globtalent" => LinkType::Globtalent,
            "pending" | "" => LinkType::Pending,
            _ => LinkType::External,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CountryLink {
    pub url: String,
    pub active: bool,
    pub link_type: LinkType,
    pub notes: String,
}

// ******** Output data structures *********

/// Participation level of a country, derived from how many programs it belongs to.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Tier {
    None,
    Active,
    High,
    Elite,
}

impl Tier {
    /// Legend order, from the strongest participation down.
    pub const LEGEND: [Tier; 4] = [Tier::Elite, Tier::High, Tier::Active, Tier::None];

    pub fn label(&self) -> &'static str {
        match self {
            Tier::None => "none",
            Tier::Active => "active",
            Tier::High => "high",
            Tier::Elite => "elite",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct CountryEntry {
    pub name: String,
    pub programs: BTreeSet<Program>,
    pub coordinate: Coordinate,
    pub scholars: Option<ScholarRecord>,
}

impl CountryEntry {
    pub fn tier(&self) -> Tier {
        crate::tier_of(&self.programs)
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct Marker {
    pub program: Program,
    /// Clockwise from north.
    pub angle_deg: f64,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct AggregateStats {
    pub none: u64,
    pub active: u64,
    pub high: u64,
    pub elite: u64,
    pub total_countries: u64,
    pub total_programs: u64,
}

impl AggregateStats {
    pub fn count(&self, tier: Tier) -> u64 {
        match tier {
            Tier::None => self.none,
            Tier::Active => self.active,
            Tier::High => self.high,
            Tier::Elite => self.elite,
        }
    }
}

/// The renderable entries, and the countries that could not be placed on the map.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Placement {
    pub entries: Vec<CountryEntry>,
    // Sorted
    pub unmatched: Vec<String>,
}

impl Placement {
    /// The membership of the placed countries only.
    pub fn membership(&self) -> Membership {
        self.entries
            .iter()
            .map(|e| (e.name.clone(), e.programs.clone()))
            .collect()
    }
}

/// Errors raised while normalizing the input.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum MapErrors {
    EmptyProgramLabel,
    UnknownProgram(String),
}

impl Error for MapErrors {}

impl Display for MapErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapErrors::EmptyProgramLabel => write!(f, "empty program label"),
            MapErrors::UnknownProgram(label) => write!(f, "unknown program: {:?}", label),
        }
    }
}
