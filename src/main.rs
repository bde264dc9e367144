use std::{fs, io, thread};

use clap::Parser;
use linger::{
    config::{Config, DEFAULT_ENTRY_POINT},
    interpreter::lexer::tokenize,
    parse_source, run_program,
};
use tracing_subscriber::EnvFilter;

/// Stack size of the thread programs run on.
const STACK_SIZE: usize = 256 * 1024 * 1024;

/// linger runs small procedural programs: procedures, closures and
/// structured control flow.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat the argument as source code instead of a path.
    #[arg(short, long)]
    eval: bool,

    /// Name of the procedure to start in.
    #[arg(long, default_value = DEFAULT_ENTRY_POINT)]
    entry: String,

    /// Maximum number of nested calls.
    #[arg(long, default_value_t = 10_000)]
    max_depth: usize,

    /// Print the token stream and exit.
    #[arg(long)]
    dump_tokens: bool,

    /// Print the parsed program and exit.
    #[arg(long)]
    dump_ast: bool,

    /// Print the value returned by the entry procedure, unless it is void.
    #[arg(short, long)]
    print_result: bool,

    /// Raise the log level; repeat for more detail. `RUST_LOG` takes
    /// precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    contents: String,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let source = if args.eval {
        args.contents.clone()
    } else {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    };

    let runner = thread::Builder::new().stack_size(STACK_SIZE)
                                       .spawn(move || execute(&args, &source));
    let succeeded = match runner.map(thread::JoinHandle::join) {
        Ok(Ok(succeeded)) => succeeded,
        Ok(Err(_)) => false,
        Err(e) => {
            eprintln!("Failed to start the interpreter thread: {e}");
            false
        },
    };

    if !succeeded {
        std::process::exit(1);
    }
}

/// Runs one invocation, reporting any error on stderr.
fn execute(args: &Args, source: &str) -> bool {
    if args.dump_tokens {
        return match tokenize(source) {
            Ok(tokens) => {
                for (token, pos) in tokens {
                    println!("{pos}\t{token}");
                }
                true
            },
            Err(e) => report(&e),
        };
    }

    let program = match parse_source(source) {
        Ok(program) => program,
        Err(e) => return report(&e),
    };
    if args.dump_ast {
        println!("{program:#?}");
        return true;
    }

    let config = Config::default().with_entry_point(args.entry.as_str())
                                  .with_max_call_depth(args.max_depth);
    let mut stdout = io::stdout().lock();
    match run_program(&program, config, &mut stdout) {
        Ok(value) => {
            if args.print_result && !value.is_void() {
                println!("{value}");
            }
            true
        },
        Err(e) => report(&e),
    }
}

fn report(e: &dyn std::error::Error) -> bool {
    eprintln!("{e}");
    false
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(io::stderr)
                             .init();
}
