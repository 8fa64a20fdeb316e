use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use perceptron_nn::{ActivationFunction, GradientRule};

#[derive(Parser, Debug)]
#[command(name = "nn")]
#[command(version, about = "Perceptron, backpropagation and Elman network runner")]
pub struct Args {
    /// Log every epoch, not just the summaries.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a single perceptron on a labelled CSV file.
    Perceptron {
        data: PathBuf,

        #[arg(short, long, default_value_t = 0.01)]
        learning_rate: f64,

        #[arg(short, long, default_value_t = 100)]
        epochs: usize,

        #[command(flatten)]
        validation: ValidationArgs,
    },

    /// Validate a feed-forward network on a labelled CSV file.
    Mlp {
        data: PathBuf,

        /// Hidden layer sizes, comma separated.
        #[arg(long, value_delimiter = ',', default_value = "5")]
        hidden: Vec<usize>,

        #[arg(short, long, default_value_t = 0.1)]
        learning_rate: f64,

        #[arg(short, long, default_value_t = 500)]
        epochs: usize,

        #[arg(short, long, value_enum, default_value_t = Activation::Sigmoid)]
        activation: Activation,

        #[arg(short, long, value_enum, default_value_t = Gradient::Reference)]
        gradient: Gradient,

        /// Scale of the N(0, 1) initial weights. Defaults to the tiny
        /// reference scale.
        #[arg(long)]
        init_scale: Option<f64>,

        /// Seed for the initial weights.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Write the network spec used for every fold to this JSON file.
        #[arg(long)]
        save_spec: Option<PathBuf>,

        #[command(flatten)]
        validation: ValidationArgs,
    },

    /// Train an Elman network to add binary numbers.
    Elman {
        /// Width of each operand in bits.
        #[arg(long, default_value_t = 8)]
        bits: usize,

        #[arg(long, default_value_t = 100)]
        patterns: usize,

        #[arg(long, default_value_t = 16)]
        hidden: usize,

        #[arg(short, long, default_value_t = 0.1)]
        learning_rate: f64,

        #[arg(short, long, default_value_t = 10000)]
        epochs: usize,

        /// Log a decoded prediction every this many epochs.
        #[arg(long, default_value_t = 1000)]
        sample_every: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Write the trained network to this JSON file.
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
pub struct ValidationArgs {
    #[arg(long, value_enum, default_value_t = Method::KFold)]
    pub method: Method,

    /// Number of folds for k-fold validation.
    #[arg(short = 'k', long, default_value_t = 10)]
    pub folds: usize,

    /// Training fraction for random subsampling.
    #[arg(long, default_value_t = 0.7)]
    pub percentage: f64,

    /// Subsampling rounds.
    #[arg(long, default_value_t = 10)]
    pub rounds: usize,

    /// Shuffle splits with this seed. Without it splits keep file order.
    #[arg(long)]
    pub shuffle: Option<u64>,

    /// Substitute this value for unparseable feature cells instead of
    /// dropping the row.
    #[arg(long)]
    pub fill: Option<f64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Method {
    KFold,
    Subsampling,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Activation {
    Heaviside,
    Sigmoid,
    Tanh,
}

impl From<Activation> for ActivationFunction {
    fn from(a: Activation) -> Self {
        match a {
            Activation::Heaviside => ActivationFunction::Heaviside,
            Activation::Sigmoid => ActivationFunction::Sigmoid,
            Activation::Tanh => ActivationFunction::Tanh,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Gradient {
    Reference,
    Analytic,
}

impl From<Gradient> for GradientRule {
    fn from(g: Gradient) -> Self {
        match g {
            Gradient::Reference => GradientRule::Reference,
            Gradient::Analytic => GradientRule::Analytic,
        }
    }
}
