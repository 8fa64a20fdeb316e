use crate::activation::{ActivationFunction, GradientRule};
use crate::dataset::loader::{parse_csv, MalformedPolicy};
use crate::dataset::patterns::binary_addition_patterns;
use crate::dataset::LabelEncoder;
use crate::network::{Network, NetworkSpec};
use crate::train::{elman_train, mlp_train, TrainConfig};
use crate::validation::{k_fold_validation, MlpClassifier, PerceptronClassifier};

/// Two well separated clusters labelled with text, as a CSV file would hold them.
fn labelled_csv() -> String {
    let mut text = String::new();
    for i in 0..12 {
        let jitter = (i % 4) as f64 * 0.05;
        text.push_str(&format!("{},{},low\n", 0.1 + jitter, 0.2 - jitter));
        text.push_str(&format!("{},{},high\n", 0.9 - jitter, 0.8 + jitter));
    }
    text
}

#[test]
fn csv_to_perceptron_k_fold() {
    let mut records = parse_csv(&labelled_csv(), MalformedPolicy::Drop).unwrap();
    let encoder = LabelEncoder::fit_records(&mut records);
    assert_eq!(encoder.classes(), &["low".to_string(), "high".to_string()]);

    let mut model = PerceptronClassifier::new(2, 0.05);
    let report = k_fold_validation(&mut model, &records, 30, 4, Some(5)).unwrap();
    assert_eq!(report.scores.len(), 4);
    assert!(report.mean > 90.0, "mean = {}", report.mean);
}

#[test]
fn csv_to_mlp_k_fold() {
    let mut records = parse_csv(&labelled_csv(), MalformedPolicy::Drop).unwrap();
    let encoder = LabelEncoder::fit_records(&mut records);

    let spec = NetworkSpec::feed_forward(vec![2, 3, encoder.len()], 0.5, ActivationFunction::Sigmoid)
        .with_gradient(GradientRule::Analytic)
        .with_init_scale(1.0)
        .with_seed(4);
    let mut model = MlpClassifier::new(spec, encoder.len());
    let report = k_fold_validation(&mut model, &records, 200, 3, Some(6)).unwrap();
    assert_eq!(report.scores.len(), 3);
    assert!(report.mean > 90.0, "mean = {}", report.mean);
}

#[test]
fn trained_network_survives_json() {
    let mut records = parse_csv(&labelled_csv(), MalformedPolicy::Drop).unwrap();
    let encoder = LabelEncoder::fit_records(&mut records);

    let mut net = Network::prepare(&[2, 3, encoder.len()], 0.2, ActivationFunction::Tanh, 10).unwrap();
    mlp_train(&mut net, &records, encoder.len(), &TrainConfig::new(20)).unwrap();

    let path = std::env::temp_dir().join("perceptron_nn_trained_network.json");
    let path = path.to_str().unwrap();
    net.save_json(path).unwrap();
    let mut loaded = Network::load_json(path).unwrap();
    std::fs::remove_file(path).ok();

    for r in &records {
        assert_eq!(net.execute(&r.features).unwrap(), loaded.execute(&r.features).unwrap());
    }
}

#[test]
fn elman_training_is_reproducible() {
    let bits = 4;
    let records = binary_addition_patterns(30, bits, 77);
    let build = || {
        let spec = NetworkSpec::elman(2 * bits + 5, 5, 5, bits + 1, 0.05, ActivationFunction::Sigmoid)
            .with_init_scale(0.1)
            .with_seed(13);
        Network::from_spec(&spec).unwrap()
    };

    let mut a = build();
    let mut b = build();
    let config = TrainConfig::new(5);
    let ha = elman_train(&mut a, &records, &config).unwrap();
    let hb = elman_train(&mut b, &records, &config).unwrap();

    let errors = |h: &[crate::train::EpochStats]| h.iter().map(|s| s.mean_error).collect::<Vec<_>>();
    assert_eq!(errors(&ha), errors(&hb));
    assert_eq!(a.layers, b.layers);
    assert_eq!(a.context(), b.context());
}
