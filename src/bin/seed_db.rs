use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use sales_dashboard::{
    count_transactions, initialize_db, parse_transactions_json, replace_all_transactions,
};

/// A utility for loading sale records into the sales dashboard database.
///
/// Any records already in the database are replaced.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database. It is created if it does not exist.
    #[arg(long)]
    db_path: String,

    /// File path to a JSON array of sale records.
    #[arg(long, short)]
    input: String,
}

/// Replace the records in a database with the records in a JSON file.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let input_path = Path::new(&args.input);

    if !input_path.is_file() {
        eprintln!("No file found at {input_path:#?}!");
        exit(1);
    }

    println!("Reading sale records from {input_path:#?}");
    let json = fs::read_to_string(input_path)?;
    let transactions = parse_transactions_json(&json)?;

    println!("Opening database at {:#?}", args.db_path);
    let mut conn = Connection::open(&args.db_path)?;
    initialize_db(&conn)?;

    let inserted = replace_all_transactions(transactions, &mut conn)?;
    println!("Inserted {inserted} transactions.");

    let total = count_transactions(&conn)?;
    println!("The database now holds {total} transactions.");

    Ok(())
}
