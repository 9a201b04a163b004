//! IntelliSQL - Ask questions about a SQLite database in plain English.

mod cli;

use std::io::Write;

use cli::Cli;
use intellisql::app::{is_exit_command, App, Reply};
use intellisql::config::Config;
use intellisql::db::{seed, SqliteClient};
use intellisql::error::{IntelliSqlError, Result};
use intellisql::llm::{create_client, Translator};
use intellisql::logging;
use intellisql::output::{format_error, format_table};
use intellisql::pipeline::Pipeline;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("{}", format_error(&e));
            std::process::exit(1);
        }
    }
}

/// Runs the application and returns the process exit code.
async fn run(cli: Cli) -> Result<i32> {
    let format = cli.parse_output_format().map_err(IntelliSqlError::config)?;

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = cli.apply_overrides(Config::load_from_file(&config_path)?);
    let db_path = config.database.path.clone();

    if cli.seed {
        let records = seed::reset_students(&db_path).await?;
        println!("The inserted records are:");
        print!("{}", format_table(&records));

        if cli.question.is_none() {
            return Ok(0);
        }
    }

    let pipeline = create_client(&config.llm, None).map(|client| {
        Pipeline::new(
            Translator::new(client),
            Box::new(SqliteClient::new(&db_path)),
        )
    });
    let app = App::new(pipeline, format);

    if let Some(message) = app.startup_error() {
        eprintln!("{}", message);
    }

    match cli.question {
        Some(question) => {
            let reply = app.respond(&question).await;
            show(&reply);
            Ok(if reply.is_failure() { 1 } else { 0 })
        }
        None => {
            interactive(&app).await?;
            Ok(0)
        }
    }
}

/// Reads one question per line until EOF or an exit command.
async fn interactive(app: &App) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("Enter your question: ");
        std::io::stdout()
            .flush()
            .map_err(|e| IntelliSqlError::internal(format!("Failed to write prompt: {}", e)))?;

        let line = lines
            .next_line()
            .await
            .map_err(|e| IntelliSqlError::internal(format!("Failed to read input: {}", e)))?;

        let Some(line) = line else {
            println!();
            return Ok(());
        };

        if is_exit_command(&line) {
            return Ok(());
        }

        show(&app.respond(&line).await);
    }
}

fn show(reply: &Reply) {
    match reply {
        Reply::Output(text) => println!("{}", text.trim_end()),
        Reply::Warning(text) | Reply::Failure(text) => eprintln!("{}", text),
    }
}
