use clap::{App, Arg};
use failure::{err_msg, Error};

#[derive(PartialEq, Debug)]
pub struct AccessLogAnalyzerArgs {
    pub path: String,
    pub extension: String,
    pub suffix: String,
    pub quiet: bool,
}

pub fn parse_args<T>(args: T) -> Result<AccessLogAnalyzerArgs, Error>
where
    T: IntoIterator<Item = String>,
{
    let app = App::new("Access Log Analyzer")
        .author(crate_authors!())
        .version(crate_version!())
        .after_help(crate_description!())
        .arg(
            Arg::with_name("path")
                .index(1)
                .value_name("PATH")
                .required(true)
                .help("Log file, or directory containing log files, to analyze")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("extension")
                .value_name("EXTENSION")
                .short("e")
                .long("extension")
                .help("Extension of the log files looked for in a directory")
                .takes_value(true)
                .default_value("log"),
        )
        .arg(
            Arg::with_name("suffix")
                .value_name("SUFFIX")
                .short("s")
                .long("suffix")
                .help("Appended to the log file name to name the JSON output file")
                .takes_value(true)
                .default_value("_stats"),
        )
        .arg(Arg::with_name("quiet").short("q").long("quiet").help(
            "Don't output results to stdout",
        ))
        .get_matches_from_safe(args)?;

    let path = match app.value_of("path") {
        Some(value) => String::from(value),
        None => return Err(err_msg("PATH is required")),
    };

    let extension = match app.value_of("extension") {
        Some(value) => value.trim_start_matches('.'),
        None => "log",
    };

    if extension.is_empty() || extension.contains('/') || extension.contains('\\') {
        return Err(err_msg(format!(
            "--extension must be a file extension like 'log' (got '{}')",
            extension
        )));
    }

    let suffix = match app.value_of("suffix") {
        Some(value) => String::from(value),
        None => String::from("_stats"),
    };

    if suffix.contains('/') || suffix.contains('\\') {
        return Err(err_msg(format!(
            "--suffix must not contain a path separator (got '{}')",
            suffix
        )));
    }

    let quiet = app.is_present("quiet");

    Ok(AccessLogAnalyzerArgs {
        path,
        extension: String::from(extension),
        suffix,
        quiet,
    })
}
