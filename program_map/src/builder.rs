pub use crate::config::*;

use log::debug;

/// A builder for assembling program membership one column at a time.
///
/// ```
/// use program_map::builder::Builder;
/// # use program_map::MapErrors;
/// use program_map::{tier_of, Tier};
///
/// let mut builder = Builder::new();
/// builder.add_column("STAR", &["Kenya".to_string(), "Peru".to_string()])?;
/// builder.add_column("nations students", &["Kenya".to_string()])?;
///
/// let membership = builder.build();
/// assert_eq!(tier_of(&membership["Kenya"]), Tier::High);
///
/// # Ok::<(), MapErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _membership: Membership,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _membership: Membership::new(),
        }
    }

    /// Adds all the countries listed under one program label.
    ///
    /// The label is reduced to its canonical code first. Blank country names are
    /// skipped, and a country listed twice is only recorded once.
    pub fn add_column(&mut self, label: &str, countries: &[String]) -> Result<(), MapErrors> {
        let program = crate::parse_program_label(label)?;
        for raw in countries {
            self.add_country(program, raw);
        }
        Ok(())
    }

    /// Records a single (program, country) pair.
    pub fn add_country(&mut self, program: Program, raw_name: &str) {
        match crate::canonical_country_name(raw_name) {
            Some(name) => {
                self._membership.entry(name).or_default().insert(program);
            }
            None => {
                debug!("add_country: skipping blank country under {}", program);
            }
        }
    }

    /// Registers a country without any program. It will count in the `none` tier.
    pub fn add_empty_country(&mut self, raw_name: &str) {
        if let Some(name) = crate::canonical_country_name(raw_name) {
            self._membership.entry(name).or_default();
        }
    }

    pub fn build(self) -> Membership {
        self._membership
    }
}
