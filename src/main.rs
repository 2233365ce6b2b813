//! Shielded gadgets circuit runner
//!
//! Synthesizes one of the sample circuits against a test constraint system and reports
//! its shape, whether the witness satisfies it, and its public outputs.
//!
//! Run with: cargo run --release -- merkle --mode expose --tamper

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use rand::{rngs::OsRng, rngs::StdRng, SeedableRng};
use shielded_gadgets::{
    circuit::{synthesize_with_shape, GadgetCircuit},
    metrics::CircuitReport,
    samples::{self, PourTamper},
    utils::field_from_decimal,
    CheckMode, EncryptionRandomness, FieldElement, Result,
};
use tracing::{error, info, info_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the circuit runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// How validity checks are built into the circuit
    #[arg(long, value_enum, default_value_t = ModeArg::Enforce, global = true)]
    mode: ModeArg,

    /// Print the report as JSON instead of a table
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Increase output verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Age-threshold proof against the digest of "25"
    Age {
        /// Private age witness
        #[arg(long, default_value_t = samples::SAMPLE_AGE)]
        age: u32,
    },
    /// ElGamal encryption followed by decryption
    Elgamal {
        /// Message as a decimal field element
        #[arg(long, default_value_t = samples::SAMPLE_MESSAGE.to_string())]
        message: String,
        /// Derive the encryption randomness from this seed instead of the OS RNG
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Merkle membership of ten 32-bit words in a height-2 tree
    Merkle {
        /// Corrupt one sibling word
        #[arg(long, default_value_t = false)]
        tamper: bool,
    },
    /// Note initialization: keys, serial number and commitments
    NoteInit,
    /// Pour of a committed note into a new note and a public value
    Pour {
        #[arg(long, value_enum, default_value_t = TamperArg::None)]
        tamper: TamperArg,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Enforce,
    Expose,
}

impl From<ModeArg> for CheckMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Enforce => CheckMode::Enforce,
            ModeArg::Expose => CheckMode::Expose,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum TamperArg {
    None,
    Path,
    SerialNumber,
    NewCommitment,
    Balance,
}

impl From<TamperArg> for PourTamper {
    fn from(tamper: TamperArg) -> Self {
        match tamper {
            TamperArg::None => PourTamper::None,
            TamperArg::Path => PourTamper::Path,
            TamperArg::SerialNumber => PourTamper::SerialNumber,
            TamperArg::NewCommitment => PourTamper::NewCommitment,
            TamperArg::Balance => PourTamper::Balance,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize report: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                info!("{}", report.format_table());
            }
            if !report.satisfied {
                std::process::exit(2);
            }
        }
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<CircuitReport> {
    let mode = CheckMode::from(cli.mode);
    let mode_label = format!("{:?}", mode).to_lowercase();

    match &cli.command {
        Command::Age { age } => {
            let _span = info_span!("age", age).entered();
            let circuit = samples::age_circuit(*age, mode);
            report(&circuit, mode_label)
        }
        Command::Elgamal { message, seed } => {
            let _span = info_span!("elgamal").entered();
            let message: FieldElement = field_from_decimal(message)?;
            let randomness = match seed {
                Some(seed) => EncryptionRandomness::fresh(&mut StdRng::seed_from_u64(*seed)),
                None => EncryptionRandomness::fresh(&mut OsRng),
            };
            let circuit = samples::elgamal_circuit(message, randomness, mode);
            report(&circuit, mode_label)
        }
        Command::Merkle { tamper } => {
            let _span = info_span!("merkle", tamper).entered();
            let circuit = samples::membership_circuit(mode, *tamper)?;
            report(&circuit, mode_label)
        }
        Command::NoteInit => {
            let _span = info_span!("note_init").entered();
            let circuit = samples::note_init_circuit();
            report(&circuit, "enforce")
        }
        Command::Pour { tamper } => {
            let _span = info_span!("pour", tamper = ?tamper).entered();
            let circuit = samples::pour_circuit(mode, PourTamper::from(*tamper))?;
            report(&circuit, mode_label)
        }
    }
}

fn report<C: GadgetCircuit<FieldElement>>(
    circuit: &C,
    mode: impl Into<String>,
) -> Result<CircuitReport> {
    info!("Synthesizing {} circuit", C::NAME);
    let synthesized = synthesize_with_shape::<FieldElement, C>(circuit)?;
    Ok(CircuitReport::new::<FieldElement, C>(mode, &synthesized))
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info,shielded_gadgets=info",
        1 => "debug,shielded_gadgets=debug",
        _ => "shielded_gadgets=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    use tracing_tree::HierarchicalLayer;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            HierarchicalLayer::new(2)
                .with_targets(false)
                .with_bracketed_fields(true),
        )
        .init();
}
