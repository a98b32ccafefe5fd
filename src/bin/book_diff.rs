//! Snapshot CSV comparison CLI.
//!
//! Two positional files run the keyed diff (rows keyed by their first
//! column); three files treat the last as a reference and check which
//! key-column combinations of the first two appear in it.
//!
//! ```bash
//! book_diff left.csv right.csv
//! book_diff a.csv b.csv reference.csv --key-cols 0,1
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use lob_replay::diff::{diff_keyed, membership_check, CsvTable};

struct Args {
    files: Vec<PathBuf>,
    key_cols: Vec<usize>,
}

fn parse_args() -> Result<Args, String> {
    let argv: Vec<String> = std::env::args().collect();

    let mut files = Vec::new();
    let mut key_cols = vec![0, 1];

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--key-cols" | "-k" => {
                i += 1;
                let list = argv.get(i).ok_or("--key-cols requires a column list")?;
                key_cols = list
                    .split(',')
                    .map(|s| s.trim().parse::<usize>())
                    .collect::<Result<_, _>>()
                    .map_err(|e| format!("bad --key-cols value: {e}"))?;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown argument: {arg}"));
            }
            arg => files.push(PathBuf::from(arg)),
        }
        i += 1;
    }

    if files.len() != 2 && files.len() != 3 {
        return Err("expected two or three CSV files".to_string());
    }

    Ok(Args { files, key_cols })
}

fn print_help() {
    eprintln!(
        r#"Compare snapshot CSV files.

USAGE:
    book_diff <LEFT> <RIGHT>
    book_diff <FILE1> <FILE2> <REFERENCE> [--key-cols 0,1]

MODES:
    Two files    Keyed row diff: unique rows, differing rows with
                 per-column detail, count of exact matches.
    Three files  Membership check: report which key-column combinations
                 of FILE1 and FILE2 appear in REFERENCE.

OPTIONS:
    -k, --key-cols <LIST>  Comma-separated column indices forming the
                           membership key (default: 0,1)
    -h, --help             Print this help message
"#
    );
}

fn run_two_file(left_path: &PathBuf, right_path: &PathBuf) -> Result<(), String> {
    let left = CsvTable::load(left_path).map_err(|e| e.to_string())?;
    let right = CsvTable::load(right_path).map_err(|e| e.to_string())?;

    println!("File 1 ({}): {} rows", left_path.display(), left.len());
    println!("File 2 ({}): {} rows", right_path.display(), right.len());

    let report = diff_keyed(&left, &right);

    println!();
    if report.headers_match {
        println!("Headers match");
    } else {
        println!("Headers differ!");
        println!("  File 1: {}", left.headers.join(","));
        println!("  File 2: {}", right.headers.join(","));
    }

    println!("\n--- Keys only in file 1 ({}) ---", report.only_left.len());
    for key in &report.only_left {
        println!("  {key}");
    }

    println!("\n--- Keys only in file 2 ({}) ---", report.only_right.len());
    for key in &report.only_right {
        println!("  {key}");
    }

    println!("\n--- Keys with differing content ({}) ---", report.differing.len());
    for diff in &report.differing {
        println!("  key {}", diff.key);
        for cell in &diff.cells {
            println!(
                "    [{}]: \"{}\" vs \"{}\"",
                cell.column, cell.left, cell.right
            );
        }
    }

    println!("\n--- Summary ---");
    println!("Unique to file 1: {}", report.only_left.len());
    println!("Unique to file 2: {}", report.only_right.len());
    println!("Differing rows:   {}", report.differing.len());
    println!("Matching rows:    {}", report.matching);

    Ok(())
}

fn run_three_file(paths: &[PathBuf], key_cols: &[usize]) -> Result<(), String> {
    let reference = CsvTable::load(&paths[2]).map_err(|e| e.to_string())?;
    println!(
        "Reference ({}): {} rows, key columns {:?}",
        paths[2].display(),
        reference.len(),
        key_cols
    );

    for path in &paths[..2] {
        let probe = CsvTable::load(path).map_err(|e| e.to_string())?;
        let report = membership_check(&probe, &reference, key_cols);

        println!("\n--- {} ---", path.display());
        println!("Found in reference:   {}", report.found.len());
        println!("Missing from reference: {}", report.missing.len());
        for key in &report.missing {
            println!("  missing: {key}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Use --help for usage information");
            return ExitCode::FAILURE;
        }
    };

    let result = if args.files.len() == 2 {
        run_two_file(&args.files[0], &args.files[1])
    } else {
        run_three_file(&args.files, &args.key_cols)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("Error: {msg}");
            ExitCode::FAILURE
        }
    }
}
