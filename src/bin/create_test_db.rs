use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{Category, NewExpense, create_expense, initialize_db};

/// A utility for creating a test database for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const SAMPLE_EXPENSES: [(&str, f64, Category, i64); 12] = [
    ("Weekly groceries", 142.35, Category::Food, 1),
    ("Coffee with a friend", 9.5, Category::Food, 3),
    ("Monthly bus pass", 80.0, Category::Transport, 4),
    ("Petrol", 65.2, Category::Transport, 12),
    ("Cinema tickets", 36.0, Category::Entertainment, 6),
    ("Concert", 120.0, Category::Entertainment, 40),
    ("Electricity bill", 154.78, Category::Bills, 9),
    ("Internet", 79.99, Category::Bills, 38),
    ("GP visit", 55.0, Category::Healthcare, 15),
    ("Running shoes", 189.0, Category::Shopping, 21),
    ("Birthday present for a colleague who is leaving", 45.0, Category::Shopping, 27),
    ("Haircut", 35.0, Category::Other, 33),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path
        .extension()
        .filter(|extension| !extension.is_empty())
        .is_none()
    {
        eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    let today = OffsetDateTime::now_utc().date();

    for (description, amount, category, days_ago) in SAMPLE_EXPENSES {
        create_expense(
            NewExpense {
                description: description.to_owned(),
                amount,
                category,
                date: today - Duration::days(days_ago),
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
