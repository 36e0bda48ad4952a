//! # wordfreq
//!
//! A CLI tool for counting token frequencies in text.
//!
//! ## Overview
//!
//! wordfreq is built on top of wordfreqlib. It gathers text from arguments,
//! files and JSON record dumps, runs the configured filters and prints a
//! frequency table.
//!
//! ## Usage
//!
//! ```bash
//! # Count tokens in a string
//! wordfreq "This is a test string. This is a second test string"
//!
//! # Count a file, most frequent first, top 20
//! wordfreq --source-file notes.txt --sort-frequency desc --top 20
//!
//! # Drop stop words and punctuation
//! wordfreq --source-file notes.txt --assets assets \
//!     --black-list-file blacklist_en.txt --substitution-file punctuation_en.json
//!
//! # Count record fields
//! wordfreq --records posts.json --select title,body --where status=published
//!
//! # Output as JSON
//! wordfreq "a b a" -o json
//! ```

mod render;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use env_logger::Builder;
use log::LevelFilter;
use serde_json::Value;
use wordfreqlib::{
    CaseMode, FilterFamily, FrequencyView, MemoryRecordStore, Pattern, ProviderRegistry,
    RecordQuery, SortDirection, WordFrequency, WordFrequencyConfig,
};

use render::{render_table, render_warnings, JsonReport};

/// Provider name used for `--records`
const RECORDS_PROVIDER: &str = "records";

const DEFAULT_STAGES: [FilterFamily; 3] = [
    FilterFamily::Substitution,
    FilterFamily::BlackList,
    FilterFamily::WhiteList,
];

fn repeated(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .action(ArgAction::Append)
        .help(help)
}

fn flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .action(ArgAction::SetTrue)
        .help(help)
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("wordfreq")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Token frequency tables with blacklist, whitelist and substitution filters")
        .arg(
            Arg::new("text")
                .action(ArgAction::Append)
                .help("Text sources to count"),
        )
        .arg(
            repeated("source-file", "Newline-delimited source file or glob")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("JSON configuration file; flags add to it"),
        )
        .arg(
            Arg::new("delimiter")
                .short('d')
                .long("delimiter")
                .help("Literal token delimiter [default: \" \"]"),
        )
        .arg(
            Arg::new("case")
                .long("case")
                .value_parser(["upper", "lower", "preserve"])
                .help("Force token case"),
        )
        .arg(repeated("black-list", "Drop this term"))
        .arg(repeated("black-list-file", "Drop terms listed in this file"))
        .arg(repeated("black-list-regex", "Drop tokens matching this pattern"))
        .arg(repeated("black-list-regex-file", "Drop tokens matching patterns in this file"))
        .arg(flag("black-list-case-sensitive", "Compare blacklist terms with case"))
        .arg(repeated("white-list", "Keep this term"))
        .arg(repeated("white-list-file", "Keep terms listed in this file"))
        .arg(repeated("white-list-regex", "Keep tokens matching this pattern"))
        .arg(repeated("white-list-regex-file", "Keep tokens matching patterns in this file"))
        .arg(flag("white-list-case-sensitive", "Compare whitelist terms with case"))
        .arg(repeated("substitute", "Replace text: KEY=VALUE"))
        .arg(repeated("substitution-file", "JSON object of replacements"))
        .arg(repeated("substitute-regex", "Replace pattern matches: PATTERN=VALUE"))
        .arg(repeated("substitution-regex-file", "JSON object of pattern replacements"))
        .arg(flag(
            "substitution-case-insensitive",
            "Match substitution keys without case",
        ))
        .arg(flag("remove-numeric", "Drop purely numeric tokens"))
        .arg(
            Arg::new("sort-token")
                .long("sort-token")
                .value_parser(["asc", "desc", "none"])
                .help("Sort by token"),
        )
        .arg(
            Arg::new("sort-frequency")
                .long("sort-frequency")
                .value_parser(["asc", "desc", "none"])
                .help("Sort by frequency; token order breaks ties"),
        )
        .arg(
            Arg::new("locale")
                .long("locale")
                .help("Locale for token ordering, e.g. de_DE or \"sv_SE,sv\""),
        )
        .arg(
            Arg::new("assets")
                .long("assets")
                .value_parser(value_parser!(PathBuf))
                .help("Directory for list, pattern and substitution files"),
        )
        .arg(
            Arg::new("records")
                .long("records")
                .value_parser(value_parser!(PathBuf))
                .help("JSON array of records to count"),
        )
        .arg(
            Arg::new("select")
                .long("select")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .requires("records")
                .help("Record fields to count (comma-separated)"),
        )
        .arg(
            repeated("where", "Only records where FIELD=VALUE")
                .requires("records"),
        )
        .arg(
            Arg::new("stages")
                .long("stages")
                .value_delimiter(',')
                .value_parser(["substitution", "black", "white"])
                .help("Filter stages to run, in order [default: substitution,black,white]"),
        )
        .arg(
            Arg::new("top")
                .long("top")
                .value_parser(value_parser!(usize))
                .help("Show only the first N rows"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("More log output (-v info, -vv debug)"),
        )
}

fn strings(matches: &ArgMatches, name: &str) -> Vec<String> {
    matches
        .get_many::<String>(name)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn paths(matches: &ArgMatches, name: &str) -> Vec<PathBuf> {
    strings(matches, name).into_iter().map(PathBuf::from).collect()
}

fn split_pair(text: &str) -> Option<(&str, &str)> {
    text.split_once('=')
}

fn parse_pairs(
    matches: &ArgMatches,
    name: &str,
    split: fn(&str) -> Option<(&str, &str)>,
) -> anyhow::Result<Vec<(String, String)>> {
    strings(matches, name)
        .into_iter()
        .map(|pair| {
            split(&pair)
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| anyhow!("--{} expects KEY=VALUE, got '{}'", name, pair))
        })
        .collect()
}

/// Layer command-line options over the configuration file (or defaults).
fn build_config(matches: &ArgMatches) -> anyhow::Result<WordFrequencyConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => WordFrequencyConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => WordFrequencyConfig::default(),
    };

    config
        .sources
        .extend(strings(matches, "text").into_iter().map(Value::String));
    config.file_sources.extend(
        matches
            .get_many::<PathBuf>("source-file")
            .into_iter()
            .flatten()
            .cloned(),
    );

    if let Some(delimiter) = matches.get_one::<String>("delimiter") {
        config.delimiter = delimiter.clone();
    }
    if let Some(case) = matches.get_one::<String>("case") {
        config.force_case = case.parse::<CaseMode>().map_err(|e| anyhow!(e))?;
    }
    if matches.get_flag("remove-numeric") {
        config.remove_numeric = true;
    }
    if let Some(direction) = matches.get_one::<String>("sort-token") {
        config.sort_by_token = direction.parse::<SortDirection>().map_err(|e| anyhow!(e))?;
    }
    if let Some(direction) = matches.get_one::<String>("sort-frequency") {
        config.sort_by_frequency = direction.parse::<SortDirection>().map_err(|e| anyhow!(e))?;
    }
    if let Some(locale) = matches.get_one::<String>("locale") {
        config.locale = Some(locale.clone());
    }
    if let Some(dir) = matches.get_one::<PathBuf>("assets") {
        config.assets_dir = Some(dir.clone());
    }

    for (list, prefix) in [
        (&mut config.black_list, "black-list"),
        (&mut config.white_list, "white-list"),
    ] {
        list.terms.extend(strings(matches, prefix));
        list.files.extend(paths(matches, &format!("{}-file", prefix)));
        list.patterns
            .extend(strings(matches, &format!("{}-regex", prefix)));
        list.pattern_files
            .extend(paths(matches, &format!("{}-regex-file", prefix)));
        if matches.get_flag(&format!("{}-case-sensitive", prefix)) {
            list.case_sensitive = Some(true);
        }
    }

    let substitution = &mut config.substitution;
    substitution
        .pairs
        .0
        .extend(parse_pairs(matches, "substitute", split_pair)?);
    substitution.files.extend(paths(matches, "substitution-file"));
    substitution.patterns.0.extend(parse_pairs(
        matches,
        "substitute-regex",
        Pattern::split_assignment,
    )?);
    substitution
        .pattern_files
        .extend(paths(matches, "substitution-regex-file"));
    if matches.get_flag("substitution-case-insensitive") {
        substitution.case_sensitive = Some(false);
    }

    Ok(config)
}

fn record_query(matches: &ArgMatches) -> anyhow::Result<RecordQuery> {
    let mut query = RecordQuery::new().select_many(strings(matches, "select"));
    for (field, value) in parse_pairs(matches, "where", split_pair)? {
        query = query.where_in(field, [value]);
    }
    Ok(query)
}

fn stages(matches: &ArgMatches) -> anyhow::Result<Vec<FilterFamily>> {
    match matches.get_many::<String>("stages") {
        None => Ok(DEFAULT_STAGES.to_vec()),
        Some(names) => names
            .map(|name| name.parse::<FilterFamily>().map_err(|e| anyhow!(e)))
            .collect(),
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = build_config(matches)?;

    let mut registry = ProviderRegistry::new();
    if let Some(path) = matches.get_one::<PathBuf>("records") {
        let store = MemoryRecordStore::from_file(RECORDS_PROVIDER, path)
            .with_context(|| format!("loading records from {}", path.display()))?;
        registry.register(Arc::new(store));
    }

    let mut wf = WordFrequency::from_config(config, &registry)?;
    if registry.get(RECORDS_PROVIDER).is_some() {
        wf.add_record_source(RECORDS_PROVIDER, record_query(matches)?);
    }

    wf.accumulate_sources()?;
    for family in stages(matches)? {
        wf.run_filter(family)?;
    }

    let sort = wf.sort_spec();
    wf.generate(None);

    let table = wf.frequency_table();
    let shown = matches
        .get_one::<usize>("top")
        .copied()
        .unwrap_or(table.len());

    let mut stdout = std::io::stdout().lock();
    match matches.get_one::<String>("output").map(String::as_str) {
        Some("json") => {
            let report = JsonReport::new(table, shown, wf.warnings());
            writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        _ => {
            let view = FrequencyView::from_table(table, Some(shown)).with_sort_title(&sort);
            write!(stdout, "{}", render_table(&view))?;
            if !log::log_enabled!(log::Level::Warn) {
                eprint!("{}", render_warnings(wf.warnings()));
            }
        }
    }
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["wordfreq"];
        argv.extend_from_slice(args);
        build_command().try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_flags_layer_into_config() {
        let m = matches(&[
            "one two",
            "-d",
            ",",
            "--case",
            "lower",
            "--black-list",
            "this",
            "--black-list-case-sensitive",
            "--substitute",
            ".=",
            "--substitute-regex",
            "#[Tt]#=XXX",
            "--sort-frequency",
            "desc",
        ]);
        let config = build_config(&m).unwrap();
        assert_eq!(config.sources, vec![Value::from("one two")]);
        assert_eq!(config.delimiter, ",");
        assert_eq!(config.force_case, CaseMode::Lower);
        assert_eq!(config.black_list.terms, vec!["this"]);
        assert_eq!(config.black_list.case_sensitive, Some(true));
        assert_eq!(
            config.substitution.pairs.0,
            vec![(".".to_string(), String::new())]
        );
        assert_eq!(config.substitution.patterns.0[0].1, "XXX");
        assert_eq!(config.sort_by_frequency, SortDirection::Descending);
    }

    #[test]
    fn test_regex_pair_with_equals_in_pattern() {
        let m = matches(&["--substitute-regex", "#a=b#=X", "--substitute", "k=v=w"]);
        let config = build_config(&m).unwrap();
        assert_eq!(
            config.substitution.patterns.0,
            vec![("#a=b#".to_string(), "X".to_string())]
        );
        assert_eq!(
            config.substitution.pairs.0,
            vec![("k".to_string(), "v=w".to_string())]
        );
    }

    #[test]
    fn test_bad_pair() {
        let m = matches(&["--substitute", "no-equals-sign"]);
        assert!(build_config(&m).is_err());
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(stages(&matches(&[])).unwrap(), DEFAULT_STAGES.to_vec());
        assert_eq!(
            stages(&matches(&["--stages", "white,black"])).unwrap(),
            vec![FilterFamily::WhiteList, FilterFamily::BlackList]
        );
    }

    #[test]
    fn test_record_query() {
        let m = matches(&[
            "--records",
            "r.json",
            "--select",
            "col1,col2",
            "--where",
            "id=1",
        ]);
        let query = record_query(&m).unwrap();
        assert_eq!(query.select, vec!["col1", "col2"]);
        assert_eq!(query.conditions["id"], vec!["1"]);
    }
}
