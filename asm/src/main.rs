use std::io::{BufReader, Write};

use ippasm::{parse, util, Config, Error, ExitCode, StatsGroup, StatsRequest};
use ippcode::GRAMMAR;
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Source program [default: stdin]
    #[clap(short, long)]
    source: Option<String>,

    /// XML output file [default: stdout]
    #[clap(short, long)]
    output: Option<String>,

    /// Statistics file and the counters written to it, e.g. `stats.txt=loc,jumps`
    #[clap(long, value_name = "FILE=STAT,...")]
    stats: Vec<StatsGroup>,

    /// YAML config with additional statistics files
    #[clap(short, long)]
    config: Option<String>,

    /// Dump accepted instructions and statistics to stderr
    #[clap(short, long)]
    dump: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    use clap::Parser;

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                err.exit()
            }
            _ => {
                let _ = err.print();
                std::process::exit(ExitCode::WrongParams.code());
            }
        },
    };

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let code = match run(&args) {
        Ok(()) => ExitCode::Ok,
        Err(code) => code,
    };
    std::process::exit(code.code());
}

fn fail(err: Error) -> ExitCode {
    err.print();
    err.exit_code()
}

fn run(args: &Args) -> Result<(), ExitCode> {
    // 1. Statistics destinations
    let mut request = StatsRequest::new();
    if let Some(path) = &args.config {
        let config = Config::load(path).map_err(fail)?;
        for group in config.stats {
            request.append(group).map_err(fail)?;
        }
    }
    for group in &args.stats {
        request.append(group.clone()).map_err(fail)?;
    }

    // 2. Read and validate the source
    let source_name = args.source.as_deref().unwrap_or("<stdin>");
    let parsed = match &args.source {
        Some(path) => {
            let file = std::fs::File::open(path)
                .map_err(|e| fail(Error::FileOpen(path.clone(), e)))?;
            parse(&GRAMMAR, BufReader::new(file))
        }
        None => parse(&GRAMMAR, std::io::stdin().lock()),
    };
    let (program, stats) = parsed.map_err(|err| {
        err.print_diag(source_name);
        err.exit_code()
    })?;

    if args.dump {
        util::print_dump(&program, &stats);
    }

    // 3. Open statistics files, then serialize
    let sink = request.open().map_err(fail)?;
    let xml = program.to_xml();
    let written = match &args.output {
        Some(path) => std::fs::write(path, xml).map_err(|e| Error::FileCreate(path.clone(), e)),
        None => std::io::stdout()
            .lock()
            .write_all(xml.as_bytes())
            .map_err(|e| Error::FileWrite("<stdout>".to_string(), e)),
    };
    if let Err(err) = written {
        sink.discard();
        return Err(fail(err));
    }

    // 4. Statistics
    sink.write(&stats).map_err(fail)
}
