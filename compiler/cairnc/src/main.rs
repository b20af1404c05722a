//! Cairn CLI.

use cairnc::commands::{check_input, lex_file, parse_file, run_files};
use cairnc::tracing_setup::init_tracing;
use cairnc::{Input, OutputFormat, RunConfig};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let ok = match command.as_str() {
        "run" => {
            let config = match RunConfig::from_args(&args[2..]) {
                Ok(config) => config,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!("Usage: cairn run <file.crn>... [--inline <source>] [options]");
                    std::process::exit(2);
                }
            };
            run_files(&config)
        }
        "check" => {
            let mut input = None;
            let mut format = OutputFormat::Human;
            let mut rest = args.iter().skip(2);
            while let Some(arg) = rest.next() {
                if let Some(value) = arg.strip_prefix("--format=") {
                    format = value.parse().unwrap_or_else(|msg: String| {
                        eprintln!("error: {msg}");
                        std::process::exit(2);
                    });
                } else if let Some(source) = arg.strip_prefix("--inline=") {
                    input = Some(Input::Inline(source.to_string()));
                } else if arg == "--inline" {
                    input = rest.next().map(|source| Input::Inline(source.clone()));
                } else if !arg.starts_with('-') && input.is_none() {
                    input = Some(Input::File(arg.clone()));
                }
            }
            let Some(input) = input else {
                eprintln!("Usage: cairn check <file.crn> | --inline <source> [--format=human|json]");
                std::process::exit(2);
            };
            check_input(&input, format)
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: cairn parse <file.crn>");
                std::process::exit(2);
            }
            parse_file(&args[2])
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: cairn lex <file.crn>");
                std::process::exit(2);
            }
            lex_file(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        "version" | "--version" | "-V" => {
            println!("cairn {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            // A bare `.crn` path runs it with default options.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("crn"))
            {
                match RunConfig::from_args(&args[1..]) {
                    Ok(config) => run_files(&config),
                    Err(msg) => {
                        eprintln!("error: {msg}");
                        false
                    }
                }
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(2);
            }
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Cairn: structured agents over a language model");
    println!();
    println!("Usage: cairn <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.crn>...    Check, load and run `main` of each file");
    println!("  check <file.crn>     Lex, parse, statically check and lint a file");
    println!("  parse <file.crn>     Print the parsed definitions");
    println!("  lex <file.crn>       Print the token stream");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --model=<spec>       echo (default), interactive, replay:<path>");
    println!("  --max-depth=<n>      Limit nested user calls");
    println!("  --stats              Report model invocations per file");
    println!("  --no-parallel        Run files one after another");
    println!("  --format=<fmt>       human (default) or json");
    println!("  --inline <source>    Run program text given on the command line");
    println!();
    println!("Environment:");
    println!("  CAIRN_MODEL          Model spec used when --model is absent");
    println!("  CAIRN_LOG            Tracing filter, e.g. cairn_eval=debug");
    println!();
    println!("Examples:");
    println!("  cairn run agent.crn");
    println!("  cairn run agent.crn --model=replay:answers.txt --stats");
    println!("  cairn run a.crn b.crn c.crn --max-depth=64");
    println!("  cairn check agent.crn --format=json");
    println!("  cairn run --inline 'fn main(ctx) -> i32 {{ return 6 * 7 }}'");
}
