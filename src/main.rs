//! Command line frontend for the spendlog expense tracker.
//!
//! The binary owns everything the library's store deliberately does not:
//! input validation, date parsing, amount formatting and the composition
//! of the query pipeline (search → category filter → sort).

use std::{path::PathBuf, process::ExitCode, sync::OnceLock};

use clap::{Parser, Subcommand};
use numfmt::{Formatter, Precision};
use time::{
    Date, Month, OffsetDateTime, format_description::well_known::Rfc3339,
    macros::format_description,
};
use tracing_subscriber::EnvFilter;

use spendlog::{
    Error,
    models::{Category, ExpenseDraft},
    query::{self, CategoryFilter, SortKey},
    stores::{
        ExpenseStore,
        kv::{FileBackend, KvExpenseStore},
    },
};

/// A local, single-user expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory where the expense data file is kept.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List expenses, optionally searched, filtered and sorted.
    List {
        /// Case-insensitive substring to match against titles.
        #[arg(long, default_value = "")]
        search: String,

        /// Category to keep: all, food, transport or other.
        #[arg(long, default_value = "all")]
        category: CategoryFilter,

        /// Sort key: date-desc, date-asc, amount-desc or amount-asc.
        #[arg(long, default_value = "date-desc")]
        sort: SortKey,
    },
    /// Record a new expense.
    Add {
        /// A short description of what the money was spent on.
        #[arg(long)]
        title: String,

        /// The amount spent. Must be positive.
        #[arg(long)]
        amount: f64,

        /// The category: food, transport or other.
        #[arg(long)]
        category: Category,

        /// The date of the expense as an RFC 3339 timestamp or YYYY-MM-DD.
        /// Defaults to now.
        #[arg(long)]
        date: Option<String>,
    },
    /// Replace an existing expense. All fields except the ID are taken
    /// from the arguments.
    Update {
        /// The ID of the expense to replace.
        id: String,

        /// A short description of what the money was spent on.
        #[arg(long)]
        title: String,

        /// The amount spent. Must be positive.
        #[arg(long)]
        amount: f64,

        /// The category: food, transport or other.
        #[arg(long)]
        category: Category,

        /// The date of the expense as an RFC 3339 timestamp or YYYY-MM-DD.
        /// Defaults to now.
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an expense by ID. Deleting an unknown ID is not an error.
    Delete {
        /// The ID of the expense to delete.
        id: String,
    },
    /// Show the total spent in a calendar month, over every expense
    /// regardless of search and filter settings.
    Summary {
        /// Month number 1-12. Defaults to the current month.
        #[arg(long)]
        month: Option<u8>,

        /// Calendar year. Defaults to the current year.
        #[arg(long)]
        year: Option<i32>,
    },
    /// Populate an empty store with a few sample expenses.
    Seed,
}

fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let backend = FileBackend::new(&args.data_dir)?;
    let mut store = KvExpenseStore::new(backend);

    match args.command {
        Command::List {
            search,
            category,
            sort,
        } => list(&store, &search, category, sort),
        Command::Add {
            title,
            amount,
            category,
            date,
        } => {
            let expense = store.add(build_draft(title, amount, category, date)?)?;
            println!("Added expense {}", expense.id());
            Ok(())
        }
        Command::Update {
            id,
            title,
            amount,
            category,
            date,
        } => {
            store.update(&id, build_draft(title, amount, category, date)?)?;
            println!("Updated expense {id}");
            Ok(())
        }
        Command::Delete { id } => {
            store.delete(&id)?;
            println!("Deleted expense {id}");
            Ok(())
        }
        Command::Summary { month, year } => summary(&store, month, year),
        Command::Seed => seed(&mut store),
    }
}

fn list(
    store: &impl ExpenseStore,
    search: &str,
    category: CategoryFilter,
    sort: SortKey,
) -> Result<(), Error> {
    let expenses = store.list()?;
    let results = query::sort_by(
        &query::filter_by_category(&query::search(&expenses, search), category),
        sort,
    );

    if results.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    for expense in &results {
        println!(
            "{}  {}  {:>14}  {:<9}  {}",
            expense.id(),
            expense.date().date(),
            format_amount(expense.amount()),
            expense.category(),
            expense.title(),
        );
    }

    Ok(())
}

fn summary(store: &impl ExpenseStore, month: Option<u8>, year: Option<i32>) -> Result<(), Error> {
    let today = now();
    let month = match month {
        Some(number) => Month::try_from(number)
            .map_err(|error| Error::InvalidDateFormat(error.to_string(), number.to_string()))?,
        None => today.month(),
    };
    let year = year.unwrap_or_else(|| today.year());

    let expenses = store.list()?;
    let total = query::monthly_total(&expenses, month, year);

    println!("Total for {}/{year}: {}", u8::from(month), format_amount(total));

    Ok(())
}

fn seed(store: &mut impl ExpenseStore) -> Result<(), Error> {
    if !store.list()?.is_empty() {
        println!("Store already has expenses; nothing seeded.");
        return Ok(());
    }

    let date = now();
    let samples = [
        ("Ăn sáng", 35_000.0, Category::Food),
        ("Xe bus", 7_000.0, Category::Transport),
        ("Mua sách", 150_000.0, Category::Other),
    ];

    for (title, amount, category) in samples {
        store.add(ExpenseDraft {
            title: title.to_string(),
            amount,
            date,
            category,
        })?;
    }

    println!("Seeded {} sample expenses.", samples.len());

    Ok(())
}

fn build_draft(
    title: String,
    amount: f64,
    category: Category,
    date: Option<String>,
) -> Result<ExpenseDraft, Error> {
    let date = match date {
        Some(text) => parse_date(&text)?,
        None => now(),
    };

    let draft = ExpenseDraft {
        title,
        amount,
        date,
        category,
    };
    draft.validate()?;

    Ok(draft)
}

/// Parse an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date taken as
/// midnight UTC.
fn parse_date(text: &str) -> Result<OffsetDateTime, Error> {
    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(date_time);
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc())
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), text.to_string()))
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn format_amount(amount: f64) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::currency("₫")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    fmt.fmt_string(amount)
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use spendlog::Error;

    use super::parse_date;

    #[test]
    fn parse_date_accepts_rfc3339_timestamps() {
        assert_eq!(
            parse_date("2024-03-01T07:30:00Z").unwrap(),
            datetime!(2024-03-01 07:30 UTC)
        );
        assert_eq!(
            parse_date("2024-03-01T07:30:00.000Z").unwrap(),
            datetime!(2024-03-01 07:30 UTC)
        );
    }

    #[test]
    fn parse_date_accepts_bare_dates_as_midnight_utc() {
        assert_eq!(
            parse_date("2024-03-01").unwrap(),
            datetime!(2024-03-01 00:00 UTC)
        );
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("yesterday"),
            Err(Error::InvalidDateFormat(_, date)) if date == "yesterday"
        ));
    }
}
