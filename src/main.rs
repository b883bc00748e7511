//! windowlab - An interactive sandbox for learning SQL window functions.

mod cli;

use cli::{parse_category, Cli, Command};
use sql_windowlab::catalog::Catalog;
use sql_windowlab::config::Config;
use sql_windowlab::error::{LabError, Result};
use sql_windowlab::logging;
use sql_windowlab::output::Renderer;
use sql_windowlab::query::QueryOutcome;
use sql_windowlab::session::{ExampleRun, Session};
use tracing::{debug, error, info, warn};

fn main() {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    let config = Config::load_from_file(&config_path);

    let level = config
        .as_ref()
        .map(|c| c.logging.level.as_str())
        .unwrap_or("info");
    logging::init_stderr_logging(level);
    debug!("Config path: {}", config_path.display());

    match config.and_then(|config| run(cli, config)) {
        Ok(true) => {}
        // Failure already reported next to the results
        Ok(false) => std::process::exit(1),
        Err(e) => {
            match &e {
                LabError::Query(msg) => eprintln!("{}: {}", e.category(), msg),
                _ => error!("{}: {}", e.category(), e.message()),
            }
            std::process::exit(1);
        }
    }
}

/// Runs the parsed command. Returns `Ok(false)` when a catalog entry failed
/// after its output was printed.
fn run(cli: Cli, config: Config) -> Result<bool> {
    let format = cli
        .parse_output_format()
        .map_err(LabError::config)?
        .unwrap_or(config.display.format);
    let renderer = Renderer::new(format, config.display.max_rows);
    let catalog = Catalog::builtin();

    match cli.command {
        Command::Catalog { category } => {
            let category = category
                .as_deref()
                .map(parse_category)
                .transpose()
                .map_err(LabError::config)?;
            print!("{}", renderer.catalog(&catalog.list(category)));
            Ok(true)
        }
        Command::Show { id } => {
            let entry = catalog
                .get(&id)
                .ok_or_else(|| LabError::query(format!("Unknown example '{}'", id)))?;
            print!("{}", renderer.entry(entry));
            if let Some(other) = entry.paired_with.and_then(|other| catalog.get(other)) {
                println!();
                print!("{}", renderer.entry(other));
            }
            Ok(true)
        }
        Command::Guide => {
            print!("{}", renderer.use_cases(catalog.use_cases()));
            Ok(true)
        }
        command => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| LabError::internal(format!("Failed to start runtime: {e}")))?;
            runtime.block_on(run_in_session(command, &renderer, catalog))
        }
    }
}

/// Runs a command that needs the sandbox, closing the session on every path.
async fn run_in_session(
    command: Command,
    renderer: &Renderer,
    catalog: &Catalog,
) -> Result<bool> {
    let mut session = Session::start().await?;
    let result = execute(&mut session, command, renderer, catalog).await;
    finish(result, session.close().await)
}

/// Keeps the command's own result; a failed close is only logged.
fn finish(result: Result<bool>, closed: Result<()>) -> Result<bool> {
    if let Err(e) = closed {
        warn!("Failed to close session: {}", e.message());
    }
    result
}

async fn execute(
    session: &mut Session,
    command: Command,
    renderer: &Renderer,
    catalog: &Catalog,
) -> Result<bool> {
    match command {
        Command::Run { id } => {
            let run = session.run_example(catalog, &id).await?;
            Ok(print_run(renderer, &run))
        }
        Command::Query { sql } => {
            let sql = match sql {
                Some(sql) => sql,
                None => std::io::read_to_string(std::io::stdin())
                    .map_err(|e| LabError::internal(format!("Failed to read stdin: {e}")))?,
            };
            let outcome = session.run_sql(&sql).await?;
            print!("{}", renderer.result(&outcome));
            Ok(true)
        }
        Command::Tables { name } => {
            let names: Vec<String> = match name {
                Some(name) => {
                    let table = session
                        .tables()
                        .iter()
                        .find(|t| t.name.eq_ignore_ascii_case(&name))
                        .ok_or_else(|| LabError::query(format!("no such table: {}", name)))?;
                    vec![table.name.clone()]
                }
                None => session.tables().iter().map(|t| t.name.clone()).collect(),
            };
            for (i, name) in names.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("== {} ==", name);
                let outcome = session.run_sql(&format!("SELECT * FROM {}", name)).await?;
                print!("{}", renderer.result(&outcome));
            }
            Ok(true)
        }
        Command::Catalog { .. } | Command::Show { .. } | Command::Guide => Ok(true),
    }
}

/// Prints an entry's result, then its pair's. Returns false if the entry
/// itself failed.
fn print_run(renderer: &Renderer, run: &ExampleRun<'_>) -> bool {
    println!("== {} ({}) ==", run.entry.title, run.entry.variant);
    let succeeded = print_outcome(renderer, &run.outcome);

    if let Some((other, outcome)) = &run.pair {
        println!();
        println!("== {} ({}) ==", other.title, other.variant);
        print_outcome(renderer, outcome);
    }

    if succeeded {
        info!("Ran example {}", run.entry.id);
    }
    succeeded
}

fn print_outcome(renderer: &Renderer, outcome: &Result<QueryOutcome>) -> bool {
    match outcome {
        Ok(outcome) => {
            print!("{}", renderer.result(outcome));
            true
        }
        Err(e) => {
            println!("{}: {}", e.category(), e.message());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_keeps_command_result_when_close_fails() {
        let closed = Err(LabError::internal("engine already released"));
        assert_eq!(finish(Ok(false), closed.clone()), Ok(false));

        let failed = Err(LabError::query("no such table: missing"));
        assert_eq!(finish(failed.clone(), closed), failed);
    }

    #[test]
    fn test_finish_passes_through_on_clean_close() {
        assert_eq!(finish(Ok(true), Ok(())), Ok(true));
    }
}
