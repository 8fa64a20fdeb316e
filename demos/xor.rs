use perceptron_nn::{ActivationFunction, GradientRule, Network, NetworkSpec};

fn run(gradient: GradientRule) -> perceptron_nn::Result<()> {
    let spec = NetworkSpec::feed_forward(vec![2, 3, 1], 0.5, ActivationFunction::Sigmoid)
        .with_gradient(gradient)
        .with_init_scale(1.0)
        .with_seed(7);
    let mut network = Network::from_spec(&spec)?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let epochs = 10000;
    for epoch in 0..=epochs {
        let mut error = 0.0;
        for (input, expected) in inputs.iter().zip(&expected_outputs) {
            error += network.backpropagate(input, expected)?;
        }
        if epoch % 1000 == 0 {
            println!("{gradient:?} epoch {epoch}: mean error = {:.6}", error / inputs.len() as f64);
        }
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.execute(input)?[0]);
    }
    Ok(())
}

fn main() -> perceptron_nn::Result<()> {
    run(GradientRule::Reference)?;
    run(GradientRule::Analytic)
}
