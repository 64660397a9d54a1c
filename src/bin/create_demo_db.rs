//! A utility for creating a database populated with demo data.

use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use finsight::{
    Goal, Transaction, TransactionType, create_account, create_goal, create_transaction,
    get_or_create_user, initialize_db,
};

/// A utility for creating a demo database for the Finsight web server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The email of the demo profile to create.
    #[arg(long, default_value = "demo@example.com")]
    user_email: String,
}

const EXPENSE_CATEGORIES: [(&str, f64); 6] = [
    ("Rent", 900.0),
    ("Groceries", 80.0),
    ("Transport", 35.0),
    ("Eating Out", 45.0),
    ("Utilities", 60.0),
    ("Entertainment", 25.0),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating demo user {}...", args.user_email);
    let user_id = get_or_create_user(&args.user_email, &conn)?.id;

    println!("Creating demo accounts...");
    create_account(user_id, "Checking", 2500.0, &conn)?;
    create_account(user_id, "Savings", 8000.0, &conn)?;
    create_account(user_id, "Credit card", -450.0, &conn)?;

    println!("Creating demo transactions...");
    let today = OffsetDateTime::now_utc().date();

    // Six months of history: salary on the 1st, rent on the 3rd, and a
    // rotating spread of smaller expenses through the month.
    for days_ago in 0..180i64 {
        let date = today - Duration::days(days_ago);

        if date.day() == 1 {
            create_transaction(
                Transaction::build(user_id, 4200.0, TransactionType::Income, date)
                    .category(Some("Salary".to_owned())),
                &conn,
            )?;
        }

        let (category, base_amount) =
            EXPENSE_CATEGORIES[days_ago as usize % EXPENSE_CATEGORIES.len()];

        if category == "Rent" {
            if date.day() == 3 {
                create_transaction(
                    Transaction::build(user_id, base_amount, TransactionType::Expense, date)
                        .category(Some(category.to_owned())),
                    &conn,
                )?;
            }
            continue;
        }

        // A cheap deterministic wobble so the charts are not flat lines.
        let amount = base_amount + (days_ago % 7) as f64 * 3.5;
        create_transaction(
            Transaction::build(user_id, amount, TransactionType::Expense, date)
                .category(Some(category.to_owned())),
            &conn,
        )?;
    }

    println!("Creating demo goals...");
    create_goal(
        Goal::build(user_id, "Emergency fund", 5000.0).current_amount(1250.0),
        &conn,
    )?;
    create_goal(
        Goal::build(user_id, "Holiday", 1800.0).current_amount(300.0),
        &conn,
    )?;

    println!("Success!");

    Ok(())
}
