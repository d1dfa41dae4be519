use anyhow::Result;
use clap::{Parser, Subcommand};

use pocket_ledger::cli::{
    handle_backup_command, handle_budget_command, handle_export_command, handle_goal_command,
    handle_report_command, handle_transaction_command,
};
use pocket_ledger::config::{paths::LedgerPaths, settings::Settings};
use pocket_ledger::logging::init_tracing;
use pocket_ledger::Session;

#[derive(Parser)]
#[command(
    name = "pocket",
    version,
    about = "Personal finance ledger for the terminal",
    long_about = "pocket records income and expenses, tracks per-category budgets \
                  and savings goals, and reports on where the money went. The \
                  ledger is a single checksummed file with automatic backups."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(pocket_ledger::cli::TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(pocket_ledger::cli::BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(pocket_ledger::cli::GoalCommands),

    /// Reports
    #[command(subcommand)]
    Report(pocket_ledger::cli::ReportCommands),

    /// Export data to CSV
    #[command(subcommand)]
    Export(pocket_ledger::cli::ExportCommands),

    /// Backup management commands
    #[command(subcommand)]
    Backup(pocket_ledger::cli::BackupCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(Commands::Config) => {
            println!("pocket configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data file:        {}", paths.data_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Session backups kept: {}",
                settings.backup_retention.session_count
            );
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("pocket - personal finance ledger");
            println!();
            println!("Run 'pocket --help' for usage information.");
            return Ok(());
        }
    };

    let mut session = Session::open(paths, settings)?;
    if session.load_status().is_corrupt() {
        eprintln!("Warning: {}", session.load_status());
        if let Some(backup) = session.session_backup() {
            eprintln!("The unreadable file was copied to {}", backup.display());
        }
    }

    match command {
        Commands::Transaction(cmd) => handle_transaction_command(&mut session, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&mut session, cmd)?,
        Commands::Goal(cmd) => handle_goal_command(&mut session, cmd)?,
        Commands::Report(cmd) => handle_report_command(&session, cmd)?,
        Commands::Export(cmd) => handle_export_command(&session, cmd)?,
        Commands::Backup(cmd) => handle_backup_command(&mut session, cmd)?,
        Commands::Config => {}
    }

    Ok(())
}
