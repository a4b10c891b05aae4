// stax: a stack-language interpreter with linear cell memory

use std::fs;
use std::io::{self, Read};
use std::process;

use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;

use stax::machine::engine::Machine;
use stax::parser::parser::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()?;

    // Program text comes from the file argument, or stdin when the
    // argument is absent or "-"
    let args: Vec<String> = std::env::args().collect();
    let source = match args.get(1).map(String::as_str) {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        Some(path) => match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error: cannot read '{}': {}", path, e);
                process::exit(1);
            }
        },
    };

    let mut parser = Parser::new(&source);
    let program = match parser.parse_program() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    debug!("parsed {} top-level statement(s)", program.statements.len());

    let mut machine = Machine::new();
    if let Err(e) = machine.execute(&program) {
        eprintln!("{}", e);
        process::exit(1);
    }

    println!("{}", serde_json::to_string(machine.stack())?);
    Ok(())
}
