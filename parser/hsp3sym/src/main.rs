//! HSP3 symbol dumper CLI.
//!
//! Thin driver over `hsp3_parse`: reads a source file, runs the outline
//! pipeline, and prints the result as text or JSON.

mod commands;

use commands::{run_lex, run_parse, run_symbols, CommandError, SymbolOptions};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "symbols" => {
            let mut options = SymbolOptions::default();
            let mut path = None;
            for arg in args.iter().skip(2) {
                if let Some(masks) = arg.strip_prefix("--mask=") {
                    options
                        .masks
                        .extend(masks.split(',').map(str::to_string));
                } else if arg == "--flush-open-modules" {
                    options.flush_open_modules = true;
                } else if arg == "--json" {
                    options.json = true;
                } else if !arg.starts_with('-') && path.is_none() {
                    path = Some(arg.as_str());
                }
            }
            let Some(path) = path else {
                eprintln!("Usage: hsp3sym symbols <file.hsp> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --mask=<kind,...>      Suppress outline kinds (label, define, ...)");
                eprintln!("  --flush-open-modules   Emit a module group left open at end of input");
                eprintln!("  --json                 Emit JSON instead of text");
                std::process::exit(1);
            };
            run_symbols(path, &options)
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: hsp3sym parse <file.hsp>");
                std::process::exit(1);
            }
            run_parse(&args[2])
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: hsp3sym lex <file.hsp>");
                std::process::exit(1);
            }
            run_lex(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-v" => {
            println!("hsp3sym {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(error) = result {
        report(&error);
        std::process::exit(1);
    }
}

fn report(error: &CommandError) {
    eprintln!("error: {error}");
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn print_usage() {
    println!("hsp3sym — outline symbols for HSP3 source files");
    println!();
    println!("Usage: hsp3sym <command> [options]");
    println!();
    println!("Commands:");
    println!("  symbols <file.hsp>   Print the assembled outline tree");
    println!("  parse <file.hsp>     Print the flat outline elements");
    println!("  lex <file.hsp>       Print the token stream");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Symbol options:");
    println!("  --mask=<kind,...>    Suppress outline kinds; any of:");
    println!("                       label, module, global, define, const, enum,");
    println!("                       deffunc, defcfunc, modfunc, modcfunc,");
    println!("                       modinit, modterm, func, cfunc, cmd");
    println!("  --flush-open-modules Emit a module group left open at end of input");
    println!("  --json               Emit JSON instead of text");
    println!();
    println!("Examples:");
    println!("  hsp3sym symbols main.hsp");
    println!("  hsp3sym symbols main.hsp --mask=label,define --json");
    println!("  RUST_LOG=debug hsp3sym symbols main.hsp");
}
