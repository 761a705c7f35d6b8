use selkie::{ConvertOptions, DiagramTypeRequest, Direction, Engine};
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Convert(selkie::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Convert(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<selkie::Error> for CliError {
    fn from(value: selkie::Error) -> Self {
        Self::Convert(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    ToDrawio,
    ToMermaid,
    Pages,
    Graph,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    direction: Direction,
    diagram_type: DiagramTypeRequest,
    page: usize,
    pretty: bool,
}

fn usage() -> &'static str {
    "selkie-cli\n\
\n\
USAGE:\n\
  selkie-cli to-drawio [<path>|-]\n\
  selkie-cli to-mermaid [--direction TD|TB|BT|RL|LR] [--type flowchart|sequence|class|auto] [--page <n>] [<path>|-]\n\
  selkie-cli pages [<path>|-]\n\
  selkie-cli graph [--pretty] [--page <n>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - to-drawio takes Mermaid text; to-mermaid takes a Draw.io document.\n\
  - pages lists the pages of a Draw.io document as JSON.\n\
  - graph parses either format (auto-detected) and prints the shared\n\
    graph model as JSON.\n"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut rest = argv;

    match rest.first().map(String::as_str) {
        Some("to-drawio") => {
            args.command = Command::ToDrawio;
            rest = &rest[1..];
        }
        Some("to-mermaid") => {
            args.command = Command::ToMermaid;
            rest = &rest[1..];
        }
        Some("pages") => {
            args.command = Command::Pages;
            rest = &rest[1..];
        }
        Some("graph") => {
            args.command = Command::Graph;
            rest = &rest[1..];
        }
        Some("--help" | "-h") | None => return Err(CliError::Usage(usage())),
        Some(_) => return Err(CliError::Usage(usage())),
    }

    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--direction" => {
                let value = iter
                    .next()
                    .ok_or(CliError::Usage("--direction requires a value"))?;
                args.direction = Direction::from_str(value)
                    .map_err(|_| CliError::Usage("invalid --direction (TD|TB|BT|RL|LR)"))?;
            }
            "--type" => {
                let value = iter
                    .next()
                    .ok_or(CliError::Usage("--type requires a value"))?;
                args.diagram_type = DiagramTypeRequest::from_str(value).map_err(|_| {
                    CliError::Usage("invalid --type (flowchart|sequence|class|auto)")
                })?;
            }
            "--page" => {
                let value = iter.next().ok_or(CliError::Usage("--page requires a value"))?;
                args.page = value
                    .parse()
                    .map_err(|_| CliError::Usage("invalid --page (expected an index)"))?;
            }
            "--pretty" => args.pretty = true,
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            _ => {
                if args.input.is_some() {
                    return Err(CliError::Usage("multiple input paths given"));
                }
                args.input = Some(arg.clone());
            }
        }
    }

    Ok(args)
}

fn read_input(path: Option<&str>) -> Result<String, CliError> {
    match path {
        Some("-") | None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let engine = Engine::new();
    let input = read_input(args.input.as_deref())?;

    match args.command {
        Command::ToDrawio => {
            let xml = engine.mermaid_to_drawio_sync(&input)?;
            print!("{xml}");
        }
        Command::ToMermaid => {
            let options = ConvertOptions {
                direction: args.direction,
                diagram_type: args.diagram_type,
                page: args.page,
            };
            let text = engine.drawio_to_mermaid_sync(&input, &options)?;
            print!("{text}");
        }
        Command::Pages => {
            let pages = engine.list_pages(&input)?;
            println!("{}", serde_json::to_string_pretty(&pages)?);
        }
        Command::Graph => {
            // Draw.io documents start with markup; everything else is
            // treated as Mermaid text.
            let graph = if input.trim_start().starts_with('<') {
                engine.parse_drawio(&input, args.page)?
            } else {
                engine.parse_mermaid(&input)?.0
            };
            let out = if args.pretty {
                serde_json::to_string_pretty(&graph)?
            } else {
                serde_json::to_string(&graph)?
            };
            println!("{out}");
        }
    }

    Ok(())
}

fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
