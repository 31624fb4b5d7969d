//! `regdesk` - CLI for the FutureTech2025 registration desk
//!
//! This binary hosts interactive registration sessions and provides
//! one-shot commands for submitting and inspecting registrations.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;

use regdesk::cli::{Cli, Command, ConfigCommand, ListCommand, RegisterCommand};
use regdesk::registration::resolve_faculty;
use regdesk::ui::{views, Terminal};
use regdesk::{
    init_logging, Config, Page, RegistrationDesk, RelationalStore, Session, SubmitOutcome,
    TabularStore, FACULTIES,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Run => handle_run(&config),
        Command::Register(cmd) => handle_register(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Faculties => {
            handle_faculties();
            Ok(())
        }
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Build the desk and run store setup, printing any setup failures.
fn start_desk(config: &Config, out: &mut impl Write) -> anyhow::Result<RegistrationDesk> {
    let desk = RegistrationDesk::from_config(config);
    views::storage_notices(out, &desk.start())?;
    Ok(desk)
}

fn handle_run(config: &Config) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let desk = start_desk(config, &mut stdout)?;
    let mut terminal = Terminal::new(&desk, &config.event, stdin.lock(), stdout.lock());
    terminal.run()?;
    Ok(())
}

fn handle_register(config: &Config, cmd: &RegisterCommand) -> anyhow::Result<()> {
    let faculty = resolve_faculty(&cmd.faculty)?;
    let mut stdout = io::stdout();

    let desk = start_desk(config, &mut stdout)?;
    let mut session = Session::new();
    session.navigate(Page::Registration);

    let outcome = session.submit(&desk, cmd.to_form(faculty));
    match &outcome {
        SubmitOutcome::Rejected(report) => {
            views::validation_errors(&mut stdout, report)?;
            return Err(regdesk::Error::from(report.clone()).into());
        }
        SubmitOutcome::Accepted {
            registration,
            persisted,
        } => {
            if cmd.json {
                let notices: Vec<String> =
                    persisted.notices.iter().map(ToString::to_string).collect();
                let value = serde_json::json!({
                    "registration": registration,
                    "row_id": persisted.row_id(),
                    "notices": notices,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                views::storage_notices(&mut stdout, outcome.notices())?;
                writeln!(stdout, "{}", views::SUBMITTED_MESSAGE)?;
                writeln!(stdout)?;
                views::confirmation(&mut stdout, session.confirmation())?;
            }
        }
    }
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = RelationalStore::new(config.database_path());
    let rows = store.list(cmd.limit)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No registrations yet.");
        return Ok(());
    }

    for row in &rows {
        let r = &row.registration;
        println!(
            "{:>5}  {}  <{}>  {}  {}  year {}  {}",
            row.id,
            r.full_name(),
            r.email(),
            r.student_id(),
            r.phone(),
            r.year_of_study(),
            r.faculty()
        );
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let csv = TabularStore::new(config.csv_path());
    let db = RelationalStore::new(config.database_path());

    let csv_rows = csv.count()?;
    // A failed count is reported and reads as not populated
    let db_rows = db.stored_count().map_err(|e| e.to_string());
    let populated = matches!(db_rows, Ok(n) if n > 0);

    if json {
        let status = serde_json::json!({
            "csv_path": csv.path(),
            "database_path": db.path(),
            "csv_rows": csv_rows,
            "database_rows": db_rows.as_ref().ok(),
            "database_error": db_rows.as_ref().err(),
            "database_populated": populated,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("regdesk status");
        println!("--------------");
        println!("CSV file:      {}", csv.path().display());
        println!("CSV rows:      {csv_rows}");
        println!("Database:      {}", db.path().display());
        match &db_rows {
            Ok(n) => println!("Database rows: {n}"),
            Err(e) => println!("Database rows: unavailable ({e})"),
        }
        println!("Populated:     {}", if populated { "yes" } else { "no" });
        if let Ok(n) = db_rows {
            if csv_rows != usize::try_from(n).unwrap_or(usize::MAX) {
                println!();
                println!("Note: the two stores hold different numbers of registrations.");
            }
        }
    }
    Ok(())
}

fn handle_faculties() {
    for (i, faculty) in FACULTIES.iter().enumerate() {
        println!("{}) {faculty}", i + 1);
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  CSV path:           {}", config.csv_path().display());
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Event]");
                println!("  Title:              {}", config.event.title);
                println!("  Footer:             {}", config.event.footer);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
