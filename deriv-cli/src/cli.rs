use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use deriv_compute::{derive, numerical::Domain, Config, Derivation};
use deriv_graph::{ArtifactStore, GraphOptions, TimestampIds};
use log::{error, info};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{
    io::{self, BufRead, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};
use super::error::report_to_stderr;

#[cfg(feature = "png")]
use deriv_graph::Graph;

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// The kind of file written for each derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A rendered graph (requires the `png` feature).
    Png,

    /// The raw samples as `x,y` rows.
    Csv,
}

impl Default for OutputFormat {
    fn default() -> Self {
        if cfg!(feature = "png") {
            OutputFormat::Png
        } else {
            OutputFormat::Csv
        }
    }
}

/// deriv - Differentiate formulas symbolically and plot the result
#[derive(Parser, Debug)]
#[command(name = "deriv")]
#[command(about = "Differentiate a formula, explain the result in LaTeX, and plot the derivative")]
#[command(version)]
#[command(allow_negative_numbers = true)]
pub struct CliArgs {
    /// Formula to differentiate. Without it, formulas are read from stdin one per line, or
    /// interactively if stdin is a terminal
    pub formula: Option<String>,

    /// Variable to differentiate with respect to
    #[arg(long, default_value = "x")]
    pub var: String,

    /// Start of the sampling interval
    #[arg(long, default_value_t = -10.0)]
    pub from: f64,

    /// End of the sampling interval
    #[arg(long, default_value_t = 10.0)]
    pub to: f64,

    /// Number of evenly spaced samples, including both ends of the interval
    #[arg(long, default_value_t = 401, value_parser = clap::value_parser!(u32).range(2..))]
    pub samples: u32,

    /// Show the derivative exactly as computed, without simplifying it
    #[arg(long)]
    pub no_simplify: bool,

    /// Directory that plots are written to
    #[arg(long, default_value = "plots")]
    pub out_dir: PathBuf,

    /// Kind of plot file to write (default: png if supported, otherwise csv)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Do not write a plot file
    #[arg(long)]
    pub no_plot: bool,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

impl CliArgs {
    /// Builds the derivation options from the arguments.
    pub fn config(&self) -> Result<Config> {
        ensure!(self.from.is_finite() && self.to.is_finite(), "the sampling interval must be finite");
        ensure!(self.from < self.to, "--from ({}) must be less than --to ({})", self.from, self.to);

        Ok(Config::default()
            .with_variable(self.var.clone())
            .with_domain(Domain::new(self.from, self.to, self.samples as usize))
            .with_simplify(!self.no_simplify))
    }
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: LogLevel) {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
}

/// Writes a plot file for each derivative.
struct Plotter {
    store: ArtifactStore,
    format: OutputFormat,
    #[cfg(feature = "png")]
    options: GraphOptions,
}

impl Plotter {
    /// Creates the output directory.
    fn init(args: &CliArgs) -> Result<Self> {
        let format = args.format.unwrap_or_default();
        ensure!(
            cfg!(feature = "png") || format != OutputFormat::Png,
            "this build of deriv cannot render png plots; use `--format csv`",
        );

        let store = ArtifactStore::init(&args.out_dir, TimestampIds::default())
            .with_context(|| format!("could not create output directory `{}`", args.out_dir.display()))?;
        let options = GraphOptions::default().x_bounds(args.from, args.to);
        info!("plotting with {:?}", options);

        Ok(Self {
            store,
            format,
            #[cfg(feature = "png")]
            options,
        })
    }

    /// Writes the plot of the derivative and returns its path.
    fn save(&self, derivation: &Derivation) -> Result<PathBuf> {
        let path = match self.format {
            OutputFormat::Csv => self.store.save_csv(&derivation.samples)?,
            #[cfg(feature = "png")]
            OutputFormat::Png => {
                let graph = Graph::with_opts(&derivation.samples, self.options.clone());
                self.store.save_png(&graph)?
            },
            #[cfg(not(feature = "png"))]
            OutputFormat::Png => anyhow::bail!("this build of deriv cannot render png plots"),
        };
        Ok(path)
    }
}

/// Everything needed to process formulas, set up once.
struct Session {
    config: Config,
    plotter: Option<Plotter>,
}

impl Session {
    /// Differentiates one formula, printing the explanation and saving the plot. Returns false if
    /// the formula could not be differentiated.
    fn process(&self, input: &str) -> bool {
        let derivation = match derive(input, &self.config) {
            Ok(derivation) => derivation,
            Err(err) => {
                report_to_stderr(&err, input);
                return false;
            },
        };

        println!("{}", derivation.explanation());

        if let Some(plotter) = &self.plotter {
            match plotter.save(&derivation) {
                Ok(path) => println!("Plot: {}", path.display()),
                Err(err) => error!("could not save plot: {:#}", err),
            }
        }
        true
    }

    /// Runs the interactive prompt until Ctrl-C or Ctrl-D.
    fn repl(&self) -> Result<()> {
        let mut rl = DefaultEditor::new().context("could not start the line editor")?;

        loop {
            let input = match rl.readline("> ") {
                Ok(input) => input,
                Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
                Err(err) => return Err(err).context("could not read input"),
            };
            if input.trim().is_empty() {
                continue;
            }

            rl.add_history_entry(&input)?;
            self.process(input.trim());
        }
    }

    /// Processes every non-empty line of stdin. Returns the number of lines that failed.
    fn piped(&self) -> Result<usize> {
        let mut failed = 0;
        for line in io::stdin().lock().lines() {
            let line = line.context("could not read stdin")?;
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if !self.process(input) {
                failed += 1;
            }
        }
        Ok(failed)
    }
}

/// Run the main application logic
pub fn run() -> Result<ExitCode> {
    let args = CliArgs::parse();
    init_logging(args.log_level);

    let config = args.config()?;
    let plotter = if args.no_plot {
        None
    } else {
        Some(Plotter::init(&args)?)
    };
    let session = Session { config, plotter };

    let success = if let Some(formula) = &args.formula {
        session.process(formula)
    } else if !io::stdin().is_terminal() {
        session.piped()? == 0
    } else {
        session.repl()?;
        true
    };

    Ok(if success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
