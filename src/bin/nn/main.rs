mod args;

use std::error::Error;
use std::path::Path;

use args::{Args, Command, Method, ValidationArgs};
use clap::Parser;
use log::{info, LevelFilter};
use perceptron_nn::dataset::{load_csv, patterns::binary_addition_patterns};
use perceptron_nn::validation::{MlpClassifier, PerceptronClassifier};
use perceptron_nn::{
    elman_train, k_fold_validation, random_subsampling_validation, Classifier, LabelEncoder,
    MalformedPolicy, NetworkSpec, NeuralError, Network, Record, TrainConfig, ValidationReport,
};
use simplelog::{Config, SimpleLogger};

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    match args.command {
        Command::Perceptron { data, learning_rate, epochs, validation } => {
            let (records, encoder) = load(&data, &validation)?;
            let mut model = PerceptronClassifier::new(feature_count(&records)?, learning_rate);
            let report = validate(&mut model, &records, epochs, &validation)?;
            summarize("perceptron", &encoder, &report);
        }
        Command::Mlp {
            data,
            hidden,
            learning_rate,
            epochs,
            activation,
            gradient,
            init_scale,
            seed,
            save_spec,
            validation,
        } => {
            let (records, encoder) = load(&data, &validation)?;

            let mut layers = vec![feature_count(&records)?];
            layers.extend(hidden);
            layers.push(encoder.len());

            let mut spec = NetworkSpec::feed_forward(layers, learning_rate, activation.into())
                .with_gradient(gradient.into())
                .with_seed(seed);
            if let Some(scale) = init_scale {
                spec = spec.with_init_scale(scale);
            }
            if let Some(path) = save_spec {
                spec.save_json(&path.to_string_lossy())?;
                info!("network spec written to {}", path.display());
            }

            let mut model = MlpClassifier::new(spec, encoder.len());
            let report = validate(&mut model, &records, epochs, &validation)?;
            summarize("mlp", &encoder, &report);
        }
        Command::Elman {
            bits,
            patterns,
            hidden,
            learning_rate,
            epochs,
            sample_every,
            seed,
            save,
        } => {
            let records = binary_addition_patterns(patterns, bits, seed);
            let mut network = Network::prepare_elman(
                2 * bits + hidden,
                hidden,
                hidden,
                bits + 1,
                learning_rate,
                perceptron_nn::ActivationFunction::Sigmoid,
                seed,
            )?;

            let config = TrainConfig::new(epochs).with_sampling(sample_every, seed);
            let history = elman_train(&mut network, &records, &config)?;
            if let Some(last) = history.last() {
                info!("final epoch {}: mean error {:.6}", last.epoch, last.mean_error);
            }
            if let Some(path) = save {
                network.save_json(&path.to_string_lossy())?;
                info!("network written to {}", path.display());
            }
        }
    }

    Ok(())
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    SimpleLogger::init(level, Config::default())?;
    Ok(args)
}

fn load(path: &Path, validation: &ValidationArgs) -> Result<(Vec<Record>, LabelEncoder), NeuralError> {
    let policy = match validation.fill {
        Some(value) => MalformedPolicy::Default(value),
        None => MalformedPolicy::Drop,
    };
    load_csv(path, policy)
}

fn feature_count(records: &[Record]) -> Result<usize, NeuralError> {
    records.first().map(|r| r.features.len()).ok_or(NeuralError::EmptyDataset)
}

fn validate<C: Classifier>(
    model: &mut C,
    records: &[Record],
    epochs: usize,
    validation: &ValidationArgs,
) -> Result<ValidationReport, NeuralError> {
    match validation.method {
        Method::KFold => k_fold_validation(model, records, epochs, validation.folds, validation.shuffle),
        Method::Subsampling => random_subsampling_validation(
            model,
            records,
            validation.percentage,
            epochs,
            validation.rounds,
            validation.shuffle,
        ),
    }
}

fn summarize(model: &str, encoder: &LabelEncoder, report: &ValidationReport) {
    info!("{} over classes {:?}", model, encoder.classes());
    for (i, score) in report.scores.iter().enumerate() {
        info!("  round {}: {:.2}%", i, score);
    }
    info!("mean accuracy: {:.2}%", report.mean);
}
