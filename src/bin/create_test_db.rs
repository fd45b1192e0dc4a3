use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Month, OffsetDateTime};

use fintrack::{
    Expense, ExpenseCategory, Income, IncomeCategory, PasswordHash, RecordDraft, RecordKind,
    UserID, ValidatedPassword, create_record, create_user, initialize_db,
};

/// A utility for creating a test database for the REST API server of fintrack.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The year to create sample records for.
    #[arg(long, short, default_value_t = 2024)]
    year: i32,
}

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "demo";

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

    println!("Creating test user {DEMO_EMAIL} with the password \"{DEMO_PASSWORD}\"...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked(DEMO_PASSWORD),
        PasswordHash::DEFAULT_COST,
    )?;
    let user = create_user("Demo User", DEMO_EMAIL, password_hash, &conn)?;

    println!("Creating sample records for {}...", args.year);
    let count = create_sample_records(user.id, args.year, &conn)?;

    println!("Created {count} records.");
    println!("Success!");

    Ok(())
}

/// Insert a year of regular income and spending, with some variation between months.
fn create_sample_records(
    owner: UserID,
    year: i32,
    conn: &Connection,
) -> Result<usize, Box<dyn Error>> {
    let mut count = 0;

    for month_number in 1..=12u8 {
        let month = Month::try_from(month_number)?;
        let day = |day: u8| Date::from_calendar_date(year, month, day);
        let variation = f64::from(month_number % 4) * 15.0;

        insert::<Income>(
            owner,
            "Monthly salary",
            4200.0,
            IncomeCategory::Salary,
            day(25)?,
            conn,
        )?;
        insert::<Expense>(
            owner,
            "Rent",
            1650.0,
            ExpenseCategory::Housing,
            day(1)?,
            conn,
        )?;
        insert::<Expense>(
            owner,
            "Groceries",
            320.0 + variation,
            ExpenseCategory::Food,
            day(7)?,
            conn,
        )?;
        insert::<Expense>(
            owner,
            "Power and internet",
            180.0 + variation / 2.0,
            ExpenseCategory::Utilities,
            day(12)?,
            conn,
        )?;
        insert::<Expense>(
            owner,
            "Bus pass",
            95.0,
            ExpenseCategory::Transportation,
            day(3)?,
            conn,
        )?;
        count += 5;

        if month_number % 3 == 0 {
            insert::<Income>(
                owner,
                "Freelance project",
                750.0 + variation * 10.0,
                IncomeCategory::Freelance,
                day(15)?,
                conn,
            )?;
            insert::<Expense>(
                owner,
                "Concert tickets",
                120.0,
                ExpenseCategory::Entertainment,
                day(20)?,
                conn,
            )?;
            count += 2;
        }
    }

    Ok(count)
}

fn insert<K: RecordKind>(
    owner: UserID,
    title: &str,
    amount: f64,
    category: K::Category,
    date: Date,
    conn: &Connection,
) -> Result<(), Box<dyn Error>> {
    create_record::<K>(
        owner,
        RecordDraft {
            title: title.to_owned(),
            amount,
            category,
            date,
            description: None,
        },
        OffsetDateTime::now_utc(),
        conn,
    )?;

    Ok(())
}
