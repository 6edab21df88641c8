use std::env;
use std::process;

use anyhow::Result;

use sheetload::{load, LoadConfig, LoadReport, DEFAULT_DB_FILE};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = env::args().skip(1).collect::<Vec<String>>();
    if args.is_empty() || is_help_request(&args) {
        print_help();
        return Ok(());
    }

    let config = parse_args(&args)?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let report = load(&config)?;
    print_report(&report);
    Ok(())
}

fn parse_args(args: &[String]) -> Result<LoadConfig> {
    if !(args.len() == 3 || args.len() == 4) {
        anyhow::bail!("usage: sheetload <excel_file> <sheet_name> <table_name> [db_file]");
    }
    let mut config = LoadConfig::new(&args[0], &args[1], &args[2]);
    if let Some(db_file) = args.get(3) {
        config.db_file = db_file.to_owned();
    }
    Ok(config)
}

fn is_help_request(args: &[String]) -> bool {
    matches!(
        args.first().map(String::as_str),
        Some("help" | "-h" | "--help")
    )
}

fn print_help() {
    println!("sheetload - load a spreadsheet sheet into a DuckDB table");
    println!();
    println!("usage:");
    println!("  sheetload <excel_file> <sheet_name> <table_name> [db_file]");
    println!("  sheetload help");
    println!();
    println!("The database file defaults to '{DEFAULT_DB_FILE}' and is created when");
    println!("missing. Any existing table with the same name is replaced.");
    println!();
    println!("example:");
    println!("  sheetload ./data.xlsx Sheet1 sales ./analytics.duckdb");
}

fn print_report(report: &LoadReport) {
    println!("Load complete.");
    println!("- rows inserted: {}", report.rows);
    println!("- table structure:");
    for (name, kind) in &report.columns {
        println!("  - {name}: {kind}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parse_with_default_database() {
        let config = parse_args(&args(&["data.xlsx", "Sheet1", "sales"])).expect("parse");
        assert_eq!(config.excel_file, "data.xlsx");
        assert_eq!(config.sheet_name, "Sheet1");
        assert_eq!(config.table_name, "sales");
        assert_eq!(config.db_file, DEFAULT_DB_FILE);
    }

    #[test]
    fn parse_with_explicit_database() {
        let config =
            parse_args(&args(&["data.xlsx", "Sheet1", "sales", "store.duckdb"])).expect("parse");
        assert_eq!(config.db_file, "store.duckdb");
    }

    #[test]
    fn parse_rejects_wrong_arity() {
        assert!(parse_args(&args(&["data.xlsx"])).is_err());
        assert!(parse_args(&args(&["a", "b", "c", "d", "e"])).is_err());
    }

    #[test]
    fn help_is_recognized() {
        assert!(is_help_request(&args(&["help"])));
        assert!(is_help_request(&args(&["--help"])));
        assert!(!is_help_request(&args(&["data.xlsx", "Sheet1", "t"])));
    }
}
