use log::LevelFilter;
use perceptron_nn::dataset::patterns::{binary_addition_patterns, from_binary, round_output};
use perceptron_nn::{elman_train, ActivationFunction, Network, TrainConfig};
use simplelog::{Config, SimpleLogger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Info, Config::default())?;

    let bits = 4;
    let hidden = 12;
    let records = binary_addition_patterns(64, bits, 3);

    let mut network = Network::prepare_elman(
        2 * bits + hidden,
        hidden,
        hidden,
        bits + 1,
        0.3,
        ActivationFunction::Sigmoid,
        3,
    )?;

    let config = TrainConfig::new(3000).with_sampling(500, 3);
    let history = elman_train(&mut network, &records, &config)?;
    if let (Some(first), Some(last)) = (history.first(), history.last()) {
        println!("mean error {:.6} -> {:.6}", first.mean_error, last.mean_error);
    }

    network.reset_context();
    for record in records.iter().take(8) {
        let (a, b) = record.features.split_at(bits);
        let output = network.execute(&record.features)?;
        println!(
            "{} + {} = {} (network: {})",
            from_binary(a),
            from_binary(b),
            from_binary(record.expected_vector()?),
            from_binary(&round_output(&output)),
        );
    }
    Ok(())
}
