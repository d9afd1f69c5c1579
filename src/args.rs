use clap::Parser;

/// Builds the data behind the talent map: which country takes part in which program.
///
/// Without any option, reads the files under `data/` and updates `index.html` in place.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the input sources and the output page.
    /// All the paths in this file are relative to the directory of the file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the map data is written in JSON format
    /// to the given location instead of being inserted in the page.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected map data in JSON format. If
    /// provided, the program fails when the generated data differs from the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path) If specified, writes a country links table covering every country on
    /// the map. Existing links are kept, missing ones are added as pending.
    #[clap(long, value_parser)]
    pub links_template: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
