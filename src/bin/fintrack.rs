use std::{error::Error, fs::File, io::BufWriter, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand, error::ErrorKind};
use serde::Serialize;
use time::Date;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fintrack::{
    PeriodKind, Snapshot,
    budget::{BudgetProgress, evaluate_all, goals_for_period},
    config::{Config, DEFAULT_TIMEZONE, parse_date},
    dashboard::Dashboard,
    format::{format_currency, format_currency_rounded, format_percentage},
    loan::{Amortization, LoanInputs, YearlyRow, yearly},
    period::{PeriodNavigation, Step, shift_reference, window_label},
    report::{WindowReport, aggregate, export_csv, export_file_name, report_rows},
    transaction::date_bounds,
};

/// Summaries, budgets, reports and loan schedules for personal finances.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to a JSON array of transactions.
    #[arg(long, global = true)]
    transactions: Option<PathBuf>,

    /// File path to a JSON array of budget goals.
    #[arg(long, global = true)]
    budgets: Option<PathBuf>,

    /// Canonical time zone used to determine today's date, e.g. "Pacific/Auckland".
    #[arg(long, global = true, env = "FINTRACK_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// Use this date (YYYY-MM-DD) as today instead of the system clock.
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<Date>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Income, expenses and balance for one period.
    Summary {
        /// weekly, monthly or yearly.
        #[arg(long, default_value = "monthly")]
        period: PeriodKind,

        /// A date inside the period to show, today by default.
        #[arg(long, value_parser = parse_date)]
        anchor: Option<Date>,

        /// Move one period back (-1) or forward (1) from the anchor.
        #[arg(long, allow_negative_numbers = true)]
        step: Option<i64>,
    },
    /// Progress of each budget goal in its current period.
    Budgets {
        /// Only show goals that reset with this period.
        #[arg(long)]
        period: Option<PeriodKind>,
    },
    /// The overview of totals, this week, budgets and recent activity.
    Dashboard,
    /// A fixed-rate loan repayment schedule.
    Loan {
        /// The amount borrowed.
        #[arg(long)]
        principal: String,

        /// The annual interest rate as a percentage.
        #[arg(long)]
        rate: String,

        /// The loan term in years.
        #[arg(long)]
        years: String,

        /// Show one row per year instead of per month.
        #[arg(long)]
        yearly: bool,
    },
    /// Write the transactions in a date range to a CSV file.
    Export {
        /// The first date to include (YYYY-MM-DD).
        #[arg(long, value_parser = parse_date)]
        from: Date,

        /// The last date to include (YYYY-MM-DD).
        #[arg(long, value_parser = parse_date)]
        to: Date,

        /// Where to write the CSV, a name based on the range by default.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct SummaryOutput {
    navigation: PeriodNavigation,
    report: WindowReport,
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    let command = match args.command {
        Command::Loan {
            principal,
            rate,
            years,
            yearly,
        } => return run_loan(&principal, &rate, &years, yearly, args.json),
        Command::Summary {
            period,
            anchor,
            step,
        } => DataCommand::Summary {
            period,
            anchor,
            step,
        },
        Command::Budgets { period } => DataCommand::Budgets { period },
        Command::Dashboard => DataCommand::Dashboard,
        Command::Export { from, to, out } => DataCommand::Export { from, to, out },
    };

    let Some(transactions_path) = args.transactions else {
        Args::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "--transactions <PATH> is required for this command",
            )
            .exit();
    };

    let config = Config {
        transactions_path,
        budgets_path: args.budgets,
        timezone: args.timezone,
        today: args.today,
    };

    run_with_data(command, &config, args.json)
}

/// The commands that read the transaction and budget files.
enum DataCommand {
    Summary {
        period: PeriodKind,
        anchor: Option<Date>,
        step: Option<i64>,
    },
    Budgets {
        period: Option<PeriodKind>,
    },
    Dashboard,
    Export {
        from: Date,
        to: Date,
        out: Option<PathBuf>,
    },
}

fn run_with_data(command: DataCommand, config: &Config, json: bool) -> Result<(), Box<dyn Error>> {
    let today = config.today()?;
    let snapshot = config.load_snapshot()?;

    match command {
        DataCommand::Summary {
            period,
            anchor,
            step,
        } => run_summary(&snapshot, period, anchor.unwrap_or(today), step, json),
        DataCommand::Budgets { period } => run_budgets(&snapshot, period, today, json),
        DataCommand::Dashboard => run_dashboard(&snapshot, today, json),
        DataCommand::Export { from, to, out } => run_export(&snapshot, from, to, out),
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_log)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_summary(
    snapshot: &Snapshot,
    period: PeriodKind,
    anchor: Date,
    step: Option<i64>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let reference = match step {
        Some(direction) => {
            let step = Step::from_direction(direction)
                .ok_or_else(|| format!("--step must be -1 or 1, got {direction}"))?;
            shift_reference(period, anchor, step)
        }
        None => anchor,
    };

    let navigation = PeriodNavigation::new(period, reference, date_bounds(&snapshot.transactions));
    let report = aggregate(&snapshot.transactions, period, navigation.window);

    if json {
        return print_json(&SummaryOutput { navigation, report });
    }

    println!("{} ({})", period.label(), window_label(report.window));
    println!("  Income:  {}", format_currency(report.totals.income));
    println!("  Expense: {}", format_currency(report.totals.expense));
    println!("  Net:     {}", format_currency(report.totals.net));
    println!();

    for bucket in &report.buckets {
        println!(
            "  {:>4}  in {:>12}  out {:>12}  balance {:>12}",
            bucket.label,
            format_currency(bucket.income),
            format_currency(bucket.expense),
            format_currency(bucket.balance)
        );
    }

    if !report.expense_by_category.is_empty() {
        println!();
        println!("Expenses by category");
        for (category, amount) in &report.expense_by_category {
            println!("  {category:<20} {}", format_currency(*amount));
        }
    }

    if let Some(prev) = navigation.prev {
        println!("\nPrevious: {}", window_label(prev));
    }
    if let Some(next) = navigation.next {
        println!("Next:     {}", window_label(next));
    }

    Ok(())
}

fn run_budgets(
    snapshot: &Snapshot,
    period: Option<PeriodKind>,
    today: Date,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let goals = match period {
        Some(period) => goals_for_period(&snapshot.goals, period)
            .into_iter()
            .cloned()
            .collect(),
        None => snapshot.goals.clone(),
    };
    let progress = evaluate_all(&goals, &snapshot.transactions, today);

    if json {
        return print_json(&progress);
    }

    if progress.is_empty() {
        println!("No budget goals.");
    }

    for entry in &progress {
        print_budget(entry);
    }

    Ok(())
}

fn print_budget(progress: &BudgetProgress) {
    let inactive = if progress.active { "" } else { " (not started)" };

    println!(
        "{} [{}]{inactive}: {} of {} spent ({}), {} left - {}",
        progress.category,
        progress.period,
        format_currency(progress.spent),
        format_currency(progress.limit),
        format_percentage(progress.percentage),
        format_currency(progress.remaining),
        progress.status.label()
    );
}

fn run_dashboard(snapshot: &Snapshot, today: Date, json: bool) -> Result<(), Box<dyn Error>> {
    let dashboard = Dashboard::compute(snapshot, today);

    if json {
        return print_json(&dashboard);
    }

    println!("Dashboard for {today}");
    println!("  Balance:  {}", format_currency(dashboard.totals.net));
    println!("  Income:   {}", format_currency(dashboard.totals.income));
    println!("  Expenses: {}", format_currency(dashboard.totals.expense));

    println!("\nThis week ({})", window_label(dashboard.week.window));
    for bucket in &dashboard.week.buckets {
        println!(
            "  {}  in {:>8}  out {:>8}",
            bucket.label,
            format_currency_rounded(bucket.income),
            format_currency_rounded(bucket.expense)
        );
    }

    if !dashboard.today_by_category.is_empty() {
        println!("\nSpent today");
        for (category, amount) in &dashboard.today_by_category {
            println!("  {category:<20} {}", format_currency(*amount));
        }
    }

    if !dashboard.budgets.is_empty() {
        println!("\nBudgets");
        for progress in &dashboard.budgets {
            print!("  ");
            print_budget(progress);
        }
    }

    println!("\nRecent transactions");
    for transaction in &dashboard.recent {
        println!(
            "  {}  {:<8} {:<20} {:>12}  {}",
            transaction.date,
            transaction.kind,
            transaction.category,
            format_currency(transaction.amount),
            transaction.description.as_deref().unwrap_or_default()
        );
    }

    Ok(())
}

fn run_loan(
    principal: &str,
    rate: &str,
    years: &str,
    show_yearly: bool,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let Some(inputs) = LoanInputs::parse(principal, rate, years) else {
        return Err("principal, rate and years must be numbers greater than zero \
             and the term must be at least one month"
            .into());
    };
    let amortization = inputs.amortize();

    if json {
        return print_loan_json(&amortization, show_yearly);
    }

    let summary = amortization.summary;
    println!("Monthly installment: {}", format_currency(summary.installment));
    println!("Principal:           {}", format_currency(summary.principal));
    println!("Total interest:      {}", format_currency(summary.total_interest));
    println!("Total payment:       {}", format_currency(summary.total_payment));
    println!();

    if show_yearly {
        println!(
            "{:>4}  {:>14}  {:>14}  {:>14}  {:>14}",
            "Year", "Paid", "Principal", "Interest", "Balance"
        );
        for row in yearly(&amortization.schedule) {
            println!(
                "{:>4}  {:>14}  {:>14}  {:>14}  {:>14}",
                row.year,
                format_currency(row.installment),
                format_currency(row.principal_portion),
                format_currency(row.interest_portion),
                format_currency(row.remaining_balance)
            );
        }
    } else {
        println!(
            "{:>5}  {:>14}  {:>14}  {:>14}  {:>14}",
            "Month", "Installment", "Principal", "Interest", "Balance"
        );
        for row in &amortization.schedule {
            println!(
                "{:>5}  {:>14}  {:>14}  {:>14}  {:>14}",
                row.month,
                format_currency(row.installment),
                format_currency(row.principal_portion),
                format_currency(row.interest_portion),
                format_currency(row.remaining_balance)
            );
        }
    }

    Ok(())
}

fn print_loan_json(amortization: &Amortization, show_yearly: bool) -> Result<(), Box<dyn Error>> {
    if show_yearly {
        #[derive(Serialize)]
        struct YearlyOutput<'a> {
            #[serde(flatten)]
            amortization: &'a Amortization,
            yearly: Vec<YearlyRow>,
        }

        print_json(&YearlyOutput {
            amortization,
            yearly: yearly(&amortization.schedule),
        })
    } else {
        print_json(amortization)
    }
}

fn run_export(
    snapshot: &Snapshot,
    from: Date,
    to: Date,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let rows = report_rows(&snapshot.transactions, from, to);
    let path = out.unwrap_or_else(|| PathBuf::from(export_file_name(from, to)));

    let file = File::create(&path)?;
    export_csv(&rows, BufWriter::new(file))?;

    tracing::info!("Wrote {} transactions to {}", rows.len(), path.display());

    Ok(())
}
