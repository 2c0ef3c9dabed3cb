use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};
use financas_core::{
    Account, Category, ExpenseType, PaymentMethod, PurchaseInput, resolve_statement_month,
};
use financas_ledger::{CsvLedger, Ledger, MemoryLedger, submit};
use financas_report::{ReportFilter, ReportRow, build_dashboard, month_name_pt};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::debug;

mod config;
mod input;
mod logging;
mod render;
mod state;

use config::Config;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FINANCAS_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "financas", version = VERSION, about = "Personal expense ledger with credit-card statement months")]
struct Cli {
    /// Ledger CSV to use instead of the configured one
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record an expense (optionally split into installments)
    Add(AddArgs),

    /// Show which statement month a purchase is booked to
    Resolve {
        #[arg(long, value_parser = input::parse_date)]
        purchase_date: NaiveDate,

        #[arg(long, value_parser = input::parse_date)]
        closing_date: NaiveDate,
    },

    /// Totals, top category/method, income left over and breakdowns
    Dashboard {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List ledger rows matching the filters
    List {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.financas/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// How to record purchases so they land on the right statement
    Instructions,
}

#[derive(Args, Debug)]
struct AddArgs {
    /// What was bought
    #[arg(long, short)]
    description: String,

    /// Amount per row (per installment for recurring purchases)
    #[arg(long, short, value_parser = input::parse_amount)]
    amount: Decimal,

    /// Purchase date (default: today)
    #[arg(long, value_parser = input::parse_date)]
    purchase_date: Option<NaiveDate>,

    /// Statement closing date, in the purchase month
    #[arg(long, value_parser = input::parse_date, conflicts_with = "closing_day")]
    closing_date: Option<NaiveDate>,

    /// Statement closing day-of-month
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
    closing_day: Option<u32>,

    /// crédito, débito or pix
    #[arg(long, short)]
    method: PaymentMethod,

    /// inter, nubank, efi or meli
    #[arg(long)]
    account: Account,

    /// casa, transporte, lazer, "gastos pessoais", saúde or comida
    #[arg(long, short)]
    category: Category,

    /// fixo or variável
    #[arg(long = "type", short = 't')]
    expense_type: ExpenseType,

    /// Split the purchase into installments
    #[arg(long, requires = "installments")]
    recurring: bool,

    /// Number of installments (with --recurring)
    #[arg(long)]
    installments: Option<u32>,

    /// Show the rows without writing them
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long = "category")]
    categories: Vec<Category>,

    #[arg(long = "method")]
    methods: Vec<PaymentMethod>,

    #[arg(long = "type")]
    expense_types: Vec<ExpenseType>,

    #[arg(long = "account")]
    accounts: Vec<Account>,

    /// Statement year(s) (default: current year)
    #[arg(long = "year", conflicts_with = "all_years")]
    years: Vec<i32>,

    /// Month number or name, repeatable
    #[arg(long = "month", value_parser = input::parse_month_arg)]
    months: Vec<u32>,

    /// Do not restrict by year
    #[arg(long)]
    all_years: bool,
}

impl FilterArgs {
    fn into_filter(self, current_year: i32) -> ReportFilter {
        let years = if self.all_years {
            Vec::new()
        } else if self.years.is_empty() {
            vec![current_year]
        } else {
            self.years
        };

        ReportFilter {
            categories: self.categories,
            methods: self.methods,
            expense_types: self.expense_types,
            accounts: self.accounts,
            years,
            months: self.months,
        }
    }
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init_tracing(&cfg.log.level);

    let ledger_path = match cli.ledger {
        Some(p) => p,
        None => cfg.ledger_path(&state::financas_home()?),
    };
    debug!(ledger = %ledger_path.display(), "using ledger");

    match cli.command {
        Command::Add(args) => add(args, &cfg, ledger_path)?,

        Command::Resolve {
            purchase_date,
            closing_date,
        } => {
            let month = resolve_statement_month(purchase_date, closing_date)?;
            println!(
                "{} ({} {})",
                month,
                month_name_pt(month.month()).unwrap_or(""),
                month.year()
            );
        }

        Command::Dashboard { filters, json } => {
            let records = CsvLedger::new(&ledger_path)
                .read_all()
                .with_context(|| format!("reading {}", ledger_path.display()))?;
            let filter = filters.into_filter(cfg.today()?.year());
            let dash = build_dashboard(&records, &filter, cfg.report.monthly_income);

            if json {
                println!("{}", serde_json::to_string_pretty(&dash)?);
            } else {
                render::print_dashboard(&dash);
            }
        }

        Command::List { filters, json } => {
            let records = CsvLedger::new(&ledger_path)
                .read_all()
                .with_context(|| format!("reading {}", ledger_path.display()))?;
            let filter = filters.into_filter(cfg.today()?.year());
            let rows: Vec<ReportRow> =
                filter.apply(&records).into_iter().map(ReportRow::from).collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                render::print_rows(&rows);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}\n", config::config_path()?.display());
                println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
                println!("# ledger file: {}", ledger_path.display());
            }
        },

        Command::Instructions => print_instructions(),
    }

    Ok(())
}

fn add(args: AddArgs, cfg: &Config, ledger_path: PathBuf) -> Result<()> {
    let purchase_date = match args.purchase_date {
        Some(d) => d,
        None => cfg.today()?,
    };
    let closing = input::closing_date(
        purchase_date,
        args.method,
        args.closing_date,
        args.closing_day.or(cfg.statement.closing_day),
    )?;

    let purchase = PurchaseInput {
        purchase_date,
        statement_closing_date: closing,
        description: args.description,
        amount: args.amount,
        payment_method: args.method,
        account: args.account,
        category: args.category,
        expense_type: args.expense_type,
        is_recurring: args.recurring,
        installment_count: args.installments,
    };

    if args.dry_run {
        let records = submit(&mut MemoryLedger::new(), &purchase)
            .context("expense rejected")?;
        println!("Dry run, {} rows (not written):\n", records.len());
        render::print_records(&records);
        return Ok(());
    }

    let mut ledger = CsvLedger::new(&ledger_path);
    let records = submit(&mut ledger, &purchase).with_context(|| {
        format!("nothing was written to {}", ledger_path.display())
    })?;

    println!("Wrote {} rows to {}\n", records.len(), ledger_path.display());
    render::print_records(&records);
    Ok(())
}

fn print_instructions() {
    println!("# Instructions\n");
    println!("- Single credit purchase: `financas add --recurring --installments 1 ...`");
    println!("- Pix or debit purchase: leave out --recurring; it is booked to the purchase month");
    println!("- Installments: `--recurring --installments N`, with --amount set to one installment");
    println!("- The closing date must be in the same month as the purchase");
    println!("  (or use --closing-day / statement.closing_day in config.toml)");
    println!("- Purchases after the closing day are booked two months ahead");
}
