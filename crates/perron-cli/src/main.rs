use perron::{Narrowing, RankBy, Solution, SolveOptions};
use serde::Serialize;
use std::io::{Read, Write};
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    InvalidSize(String),
    Io(std::io::Error),
    Perron(perron::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::InvalidSize(raw) => {
                write!(f, "Invalid size {raw:?}: expected a non-negative integer")
            }
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Perron(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<perron::Error> for CliError {
    fn from(value: perron::Error) -> Self {
        Self::Perron(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) | CliError::InvalidSize(_) => 2,
            CliError::Perron(perron::Error::InvalidLiteral { .. }) => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    size: String,
    adjacency: String,
    format: OutputFormat,
    pretty: bool,
    spectrum: bool,
    rank_by: RankBy,
    strict: bool,
}

#[derive(Serialize)]
struct ComplexOut {
    re: f64,
    im: f64,
}

#[derive(Serialize)]
struct SolutionOut<'a> {
    size: usize,
    eigenvalue: f64,
    eigenvector: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    spectrum: Option<Vec<ComplexOut>>,
}

fn usage() -> &'static str {
    "perron-cli\n\
\n\
USAGE:\n\
  perron-cli [--format text|json] [--pretty] [--spectrum] [--rank-by real|modulus] [--strict] <size> <adjacency-list|->\n\
\n\
ARGS:\n\
  <size>            number of vertices\n\
  <adjacency-list>  outgoing edges per vertex as a nested list literal, e.g. '[[1,2],[0],[]]'\n\
\n\
NOTES:\n\
  - If the adjacency list is '-', it is read from stdin.\n\
  - Text output is two lines: the dominant eigenvalue, then its eigenvector.\n\
  - --rank-by real (default) picks the largest real part; modulus picks the largest |lambda|.\n\
  - Imaginary parts are dropped on output; --strict fails instead when one is not negligible.\n\
  - --spectrum adds every eigenvalue to JSON output.\n\
  - Set RUST_LOG (e.g. RUST_LOG=perron=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut positional: Vec<String> = Vec::new();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--spectrum" => args.spectrum = true,
            "--strict" => args.strict = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--rank-by" => {
                let Some(rank) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.rank_by = rank
                    .parse::<RankBy>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--" => positional.extend(it.by_ref().cloned()),
            "-" => positional.push(a.clone()),
            other if other.starts_with('-') && other.parse::<i64>().is_err() => {
                return Err(CliError::Usage(usage()));
            }
            value => positional.push(value.to_string()),
        }
    }

    let mut positional = positional.into_iter();
    let (Some(size), Some(adjacency), None) =
        (positional.next(), positional.next(), positional.next())
    else {
        return Err(CliError::Usage(usage()));
    };
    args.size = size;
    args.adjacency = adjacency;
    Ok(args)
}

fn parse_size(raw: &str) -> Result<usize, CliError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| CliError::InvalidSize(raw.to_string()))
}

fn read_adjacency(arg: &str) -> Result<String, CliError> {
    match arg {
        "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        literal => Ok(literal.to_string()),
    }
}

fn write_output(solution: &Solution, size: usize, args: &Args) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Text => {
            write!(stdout, "{}", solution.dominant)?;
        }
        OutputFormat::Json => {
            let spectrum: Option<Vec<ComplexOut>> = args.spectrum.then(|| {
                solution
                    .decomposition
                    .values()
                    .map(|v| ComplexOut { re: v.re, im: v.im })
                    .collect()
            });
            let out = SolutionOut {
                size,
                eigenvalue: solution.dominant.eigenvalue,
                eigenvector: &solution.dominant.eigenvector,
                spectrum,
            };
            if args.pretty {
                serde_json::to_writer_pretty(&mut stdout, &out)?;
            } else {
                serde_json::to_writer(&mut stdout, &out)?;
            }
            writeln!(stdout)?;
        }
    }
    stdout.flush()?;
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let size = parse_size(&args.size)?;
    let literal = read_adjacency(&args.adjacency)?;

    let options = SolveOptions {
        rank_by: args.rank_by,
        narrowing: if args.strict {
            Narrowing::Strict
        } else {
            Narrowing::TakeReal
        },
    };
    let solution = perron::solve_literal(size, &literal, &options)?;
    tracing::info!(
        size,
        eigenvalue = solution.dominant.eigenvalue,
        "dominant eigenpair computed"
    );

    write_output(&solution, size, &args)
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
