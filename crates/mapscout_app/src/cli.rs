use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use mapscout_engine::RunRequest;

use crate::platform::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "mapscout", about = "Collect business listings from a map directory")]
pub struct Cli {
    /// Comma-separated categories to search for (prompted when absent)
    #[arg(long)]
    pub categories: Option<String>,
    /// Comma-separated cities to search in (prompted when absent)
    #[arg(long)]
    pub cities: Option<String>,
    /// Keep only listings whose address names the searched city
    #[arg(long, value_name = "yes|no")]
    pub filter_address: Option<String>,
    /// RON file with run settings
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory for the output file (overrides the config file)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,
}

/// Splits a comma-separated answer into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn is_yes(answer: &str) -> bool {
    answer
        .trim()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Builds the run request from flags, asking on `input` for anything missing.
pub fn resolve_request<R: BufRead, W: Write>(
    cli: &Cli,
    input: &mut R,
    output: &mut W,
) -> Result<RunRequest> {
    let mut answer = |given: &Option<String>, question: &str| -> Result<String> {
        match given {
            Some(value) => Ok(value.clone()),
            None => prompt(input, output, question).context("failed to read answer"),
        }
    };

    let categories = split_list(&answer(
        &cli.categories,
        "Enter categories separated by comma: ",
    )?);
    let cities = split_list(&answer(&cli.cities, "Enter cities separated by comma: ")?);
    let filter_address = is_yes(&answer(
        &cli.filter_address,
        "Enable city-based filtering? (Yes/No): ",
    )?);

    if categories.is_empty() {
        bail!("no categories given");
    }
    if cities.is_empty() {
        bail!("no cities given");
    }

    Ok(RunRequest {
        categories,
        cities,
        filter_address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("mapscout").chain(args.iter().copied()))
    }

    #[test]
    fn split_list_trims_and_drops_empty_items() {
        assert_eq!(
            split_list(" кафе , стоматология,, ,салон "),
            vec!["кафе", "стоматология", "салон"]
        );
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn only_answers_starting_with_y_enable_filtering() {
        assert!(is_yes("Yes"));
        assert!(is_yes("y"));
        assert!(is_yes(" YEP"));
        assert!(!is_yes("No"));
        assert!(!is_yes(""));
        assert!(!is_yes("да"));
    }

    #[test]
    fn flags_need_no_prompts() {
        let cli = cli(&[
            "--categories",
            "cafe, bakery",
            "--cities",
            "Kazan",
            "--filter-address",
            "no",
        ]);
        let mut output: Vec<u8> = Vec::new();

        let request = resolve_request(&cli, &mut io::empty(), &mut output).unwrap();

        assert_eq!(request.categories, vec!["cafe", "bakery"]);
        assert_eq!(request.cities, vec!["Kazan"]);
        assert!(!request.filter_address);
        assert!(output.is_empty());
    }

    #[test]
    fn missing_values_are_prompted_for() {
        let cli = cli(&["--categories", "cafe"]);
        let mut input = "Kazan, Samara\nyes\n".as_bytes();
        let mut output: Vec<u8> = Vec::new();

        let request = resolve_request(&cli, &mut input, &mut output).unwrap();

        assert_eq!(request.cities, vec!["Kazan", "Samara"]);
        assert!(request.filter_address);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Enter cities separated by comma: Enable city-based filtering? (Yes/No): "
        );
    }

    #[test]
    fn empty_city_list_is_rejected() {
        let cli = cli(&["--categories", "cafe", "--cities", " , ", "--filter-address", "no"]);

        let err = resolve_request(&cli, &mut io::empty(), &mut Vec::<u8>::new()).unwrap_err();

        assert!(err.to_string().contains("no cities"), "{err}");
    }
}
