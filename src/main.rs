use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;
use zone_geojson::{
    convert, CollectionMetadata, ConvertOptions, DirectorySink, NumericPolicy, OutputFormat,
    RowErrorPolicy, ZoneMode,
};

fn cli() -> Command {
    Command::new("zone-geojson")
        .version("0.1.0")
        .about("Converts a ward boundary CSV export into a GeoJSON FeatureCollection")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Input CSV file"),
        )
        .arg(
            Arg::new("fd-mode")
                .short('d')
                .long("fd-mode")
                .default_value("0")
                .value_parser(value_parser!(u8).range(0..=1))
                .help("0: normal / 1: FD zone mode"),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .help("Directory the GeoJSON file is written to"),
        )
        .arg(
            Arg::new("group-districts")
                .short('g')
                .long("group-districts")
                .action(ArgAction::SetTrue)
                .help("Merge adjacent wards of the same district into MultiPolygons"),
        )
        .arg(
            Arg::new("zero-fill")
                .long("zero-fill")
                .action(ArgAction::SetTrue)
                .help("Replace unparsable coordinates with 0.0 instead of failing"),
        )
        .arg(
            Arg::new("skip-bad-rows")
                .long("skip-bad-rows")
                .action(ArgAction::SetTrue)
                .help("Skip malformed CSV rows instead of aborting"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("Pretty-print the JSON output"),
        )
        .arg(
            Arg::new("metadata")
                .short('m')
                .long("metadata")
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with the collection's localized names"),
        )
}

fn main() {
    pretty_env_logger::init();
    let matches = cli().get_matches();

    // `file` is required and `fd-mode` has a default, so clap guarantees both
    let Some(input) = matches.get_one::<PathBuf>("file") else {
        std::process::exit(2);
    };
    let mode = ZoneMode::from_flag(matches.get_one::<u8>("fd-mode").copied().unwrap_or(0));

    let mut options = ConvertOptions::new(input, mode);
    if matches.get_flag("zero-fill") {
        options.numeric_policy = NumericPolicy::ZeroFill;
    }
    if matches.get_flag("skip-bad-rows") {
        options.row_policy = RowErrorPolicy::Skip;
    }
    if matches.get_flag("pretty") {
        options.format = OutputFormat::Pretty;
    }
    options.group_districts = matches.get_flag("group-districts");

    if let Some(path) = matches.get_one::<PathBuf>("metadata") {
        match CollectionMetadata::from_toml_path(path) {
            Ok(metadata) => options.metadata = metadata,
            Err(e) => {
                eprintln!("Error loading metadata: {}", e);
                std::process::exit(1);
            }
        }
    }

    let output_dir = matches
        .get_one::<PathBuf>("output-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let mut sink = DirectorySink::new(&output_dir);

    match convert(&options, &mut sink) {
        Ok(file_name) => println!("Wrote {}", sink.path_for(file_name).display()),
        Err(e) => {
            eprintln!("Error converting {}: {}", options.input.display(), e);
            std::process::exit(1);
        }
    }
}
