use std::{fmt::Display, fs::File, str::FromStr, sync::Mutex};

use automata_lib::{
    automaton::{
        FiniteAutomaton,
        console::{ConsoleSpec, ToConsoleFormat, read_interactive},
        image::AutomatonImage,
    },
    config::{AutomataConfig, LoggerConfig},
    logger::{LogLevel, LogTarget},
};
use clap::{Parser, Subcommand};
use colored::Colorize;

/// How automata are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Text,
    Json,
    Dot,
    Console,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            "console" | "fa" => Ok(OutputFormat::Console),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Console => write!(f, "console"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "Finite Automata Tool")]
#[command(version = "0.1")]
#[command(about = "Compile, transform and decompile finite automata", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Overrides the alphabet of the config and of input files.
    #[arg(short, long, global = true)]
    alphabet: Option<String>,

    #[arg(long, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a regular expression into its minimal automaton.
    Compile {
        regex: String,

        /// Print the automaton straight from the construction, with epsilon
        /// transitions.
        #[arg(long)]
        raw: bool,
    },
    /// Check which of the words are accepted.
    Check {
        #[command(flatten)]
        input: InputArgs,

        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Bring an automaton into one letter form.
    Normalize {
        #[command(flatten)]
        input: InputArgs,
    },
    Determinize {
        #[command(flatten)]
        input: InputArgs,
    },
    Minimize {
        #[command(flatten)]
        input: InputArgs,
    },
    Complement {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Convert an automaton into a regular expression.
    ToRegex {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Enter an automaton interactively in the console format.
    Input,
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// A `.json` or `.fa` file.
    #[arg(short, long, conflicts_with = "regex")]
    file: Option<String>,

    #[arg(short, long)]
    regex: Option<String>,
}

impl InputArgs {
    /// Loads the automaton. Regular expressions are compiled without any
    /// further normalization.
    fn load(&self, alphabet: &[char], alphabet_override: bool) -> anyhow::Result<FiniteAutomaton> {
        match (&self.file, &self.regex) {
            (Some(file), _) => {
                let mut image = AutomatonImage::from_file(file)?;
                if alphabet_override {
                    image.alphabet = alphabet.iter().collect();
                }
                Ok(FiniteAutomaton::from_image(&image)?)
            }
            (None, Some(regex)) => Ok(FiniteAutomaton::from_regex_raw(regex, alphabet)?),
            (None, None) => Err(anyhow::anyhow!("Either --file or --regex is required")),
        }
    }
}

fn init_tracing(config: &LoggerConfig) -> anyhow::Result<()> {
    let Some(target) = LogTarget::from_config(config) else {
        return Ok(());
    };

    match &target.file_path {
        Some(path) => {
            std::fs::create_dir_all("./logs")?;
            let file = File::create(path)?;

            tracing_subscriber::fmt()
                .with_max_level(target.level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();

            eprintln!(
                "[{}] logging to {}",
                LogLevel::Info.to_string_short().bright_green(),
                path
            );
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(target.level)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn print_automaton(automaton: &FiniteAutomaton, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", automaton),
        OutputFormat::Json => println!("{}", automaton.to_json()?),
        OutputFormat::Dot => print!("{}", automaton.to_graphviz()),
        OutputFormat::Console => print!("{}", automaton.to_console_format()),
    }

    Ok(())
}

fn check_words(
    automaton: &mut FiniteAutomaton,
    words: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    if !automaton.is_one_letter() {
        automaton.to_one_letter_form();
    }

    let results = words
        .iter()
        .map(|word| Ok((word, automaton.accepts(word)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if format == OutputFormat::Json {
        let json = results
            .iter()
            .map(|(word, accepted)| serde_json::json!({ "word": word, "accepted": accepted }))
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    for (word, accepted) in results {
        let verdict = if accepted {
            "accepted".bright_green()
        } else {
            "rejected".bright_red()
        };
        println!("{:?}: {}", word, verdict);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AutomataConfig::from_optional_file(cli.config.as_ref())?;
    if let Some(alphabet) = &cli.alphabet {
        config.set_alphabet(alphabet.as_str());
    }

    init_tracing(config.get_logger())?;

    let alphabet = config.alphabet_symbols();
    let alphabet_override = cli.alphabet.is_some();

    match cli.command {
        Command::Compile { regex, raw } => {
            let automaton = if raw {
                FiniteAutomaton::from_regex_raw(&regex, &alphabet)?
            } else {
                FiniteAutomaton::from_regex(&regex, &alphabet)?
            };
            print_automaton(&automaton, cli.format)?;
        }
        Command::Check { input, words } => {
            let mut automaton = input.load(&alphabet, alphabet_override)?;
            check_words(&mut automaton, &words, cli.format)?;
        }
        Command::Normalize { input } => {
            let mut automaton = input.load(&alphabet, alphabet_override)?;
            automaton.to_one_letter_form();
            print_automaton(&automaton, cli.format)?;
        }
        Command::Determinize { input } => {
            let mut automaton = input.load(&alphabet, alphabet_override)?;
            automaton.determinize();
            print_automaton(&automaton, cli.format)?;
        }
        Command::Minimize { input } => {
            let mut automaton = input.load(&alphabet, alphabet_override)?;
            if !automaton.is_deterministic() {
                tracing::info!("input is not a complete DFA, determinizing first");
                automaton.determinize();
            }
            automaton.minimize();
            print_automaton(&automaton, cli.format)?;
        }
        Command::Complement { input } => {
            let mut automaton = input.load(&alphabet, alphabet_override)?;
            automaton.complement();
            print_automaton(&automaton, cli.format)?;
        }
        Command::ToRegex { input } => {
            let automaton = input.load(&alphabet, alphabet_override)?;
            println!("{}", automaton.to_regex());
        }
        Command::Input => {
            let text = read_interactive(std::io::stdin().lock(), std::io::stderr())?;
            let mut image = AutomatonImage::try_from(ConsoleSpec::parse(&text)?)?;
            image.alphabet = config.get_alphabet().clone();

            let automaton = FiniteAutomaton::from_image(&image)?;
            print_automaton(&automaton, cli.format)?;
        }
    }

    Ok(())
}
