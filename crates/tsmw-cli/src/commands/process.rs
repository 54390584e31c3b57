use std::io::{self, BufRead, Write};

use colored::Colorize;
use tsmw_middleware::{Middleware, MiddlewareConfig};

pub fn run(config: MiddlewareConfig, line: Option<&str>) -> Result<(), String> {
    let mut middleware = Middleware::from_config(config);

    if let Some(line) = line {
        println!("{}", middleware.process_line(line));
        return Ok(());
    }

    println!("  {} {}", "Watching".bold(), middleware.store().path().display());
    println!("  Paste control lines; ':reload' re-reads the world, ':quit' exits.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            ":quit" | ":q" => break,
            ":reload" => match middleware.reload() {
                Ok(_) => println!("{}\n", "world reloaded".green()),
                Err(e) => println!("{}\n", e.to_string().yellow()),
            },
            _ => match middleware.process(input) {
                Ok(Some(response)) if response.is_error() => {
                    println!("{}\n", response.to_string().yellow());
                }
                Ok(Some(response)) => println!("{}\n", response.to_string().cyan()),
                Ok(None) => println!("{input}\n"),
                Err(e) => {
                    tracing::error!(error = %e, "request failed");
                    println!("{}\n", e.to_string().red());
                }
            },
        }
    }

    Ok(())
}
