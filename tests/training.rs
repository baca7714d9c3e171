use approx::assert_abs_diff_eq;
use mlp::network::activation::{Activation, StepConvention};
use mlp::network::json;
use mlp::network::neuron::Neuron;
use mlp::network::Network;
use mlp::trainer::{LogicGate, StraightLine, Trainer, DEFAULT_THRESHOLD};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

const CASES: [[f64; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

fn train_and_perceptron(convention: StepConvention, seed: u64) -> Neuron {
    let activation = Activation::Step(convention);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut neuron = Neuron::random(2, activation, 0.1, &mut rng);
    let mut trainer = Trainer::new(LogicGate::and(activation.false_value()), DEFAULT_THRESHOLD);

    let summary = trainer.train(&mut neuron, None, 1000).unwrap();
    assert!(summary.converged);
    neuron
}

#[test]
fn step_perceptron_learns_and_with_zero_false() {
    for seed in 0..5 {
        let mut neuron = train_and_perceptron(StepConvention::ZeroOne, seed);
        assert_eq!(neuron.feed_forward(&[1.0, 1.0]).unwrap(), 1.0);
        assert_eq!(neuron.feed_forward(&[0.0, 0.0]).unwrap(), 0.0);
        assert_eq!(neuron.feed_forward(&[1.0, 0.0]).unwrap(), 0.0);
        assert_eq!(neuron.feed_forward(&[0.0, 1.0]).unwrap(), 0.0);
    }
}

#[test]
fn step_perceptron_learns_and_with_bipolar_false() {
    for seed in 0..5 {
        let mut neuron = train_and_perceptron(StepConvention::Bipolar, seed);
        assert_eq!(neuron.feed_forward(&[1.0, 1.0]).unwrap(), 1.0);
        assert_eq!(neuron.feed_forward(&[0.0, 0.0]).unwrap(), -1.0);
        assert_eq!(neuron.feed_forward(&[1.0, 0.0]).unwrap(), -1.0);
        assert_eq!(neuron.feed_forward(&[0.0, 1.0]).unwrap(), -1.0);
    }
}

#[test]
fn sigmoid_neuron_learns_or() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut neuron = Neuron::random(2, Activation::Sigmoid, 0.1, &mut rng);
    let mut trainer = Trainer::new(LogicGate::or(0.0), DEFAULT_THRESHOLD);

    trainer.train(&mut neuron, None, 20_000).unwrap();
    assert_eq!(trainer.test(&mut neuron).unwrap(), 100.0);
    assert!(trainer.failures().is_empty());
}

#[test]
fn single_layer_network_learns_or() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut network = Network::random(2, &[1], Activation::Sigmoid, 0.1, 0.5, &mut rng).unwrap();
    let mut trainer = Trainer::new(LogicGate::or(0.0), DEFAULT_THRESHOLD);

    trainer.train(&mut network, None, 20_000).unwrap();
    assert_eq!(trainer.test(&mut network).unwrap(), 100.0);
}

#[test]
fn two_layer_network_learns_or() {
    let sigmoid = |weights: Vec<f64>, bias: f64| Neuron::new(weights, bias, Activation::Sigmoid, 0.1);
    let mut network = Network::from_layers(
        vec![
            vec![sigmoid(vec![0.5, -0.4], 0.1), sigmoid(vec![-0.3, 0.8], -0.2)],
            vec![sigmoid(vec![0.6, -0.7], 0.3)],
        ],
        0.1,
    )
    .unwrap();
    let mut trainer = Trainer::new(LogicGate::or(0.0), DEFAULT_THRESHOLD);

    trainer.train(&mut network, None, 20_000).unwrap();
    assert_eq!(trainer.test(&mut network).unwrap(), 100.0);
}

#[test]
fn single_layer_network_separates_straight_line() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut network = Network::random(2, &[1], Activation::Sigmoid, 0.1, 0.5, &mut rng).unwrap();
    let mut trainer = Trainer::new(StraightLine::new(5, 0.0), DEFAULT_THRESHOLD);

    trainer.train(&mut network, None, 2_000).unwrap();
    assert_eq!(trainer.test(&mut network).unwrap(), 100.0);
}

// All neurons of a hidden layer receive the same delta, so they move in
// lockstep and the network cannot build the two distinct features XOR needs:
// its output collapses to a single value for every input.
#[test]
fn shared_delta_network_collapses_on_xor() {
    let sigmoid = |weights: Vec<f64>, bias: f64| Neuron::new(weights, bias, Activation::Sigmoid, 0.1);
    let mut network = Network::from_layers(
        vec![
            vec![sigmoid(vec![0.5, -0.4], 0.1), sigmoid(vec![-0.3, 0.8], -0.2)],
            vec![sigmoid(vec![0.6, -0.7], 0.3)],
        ],
        0.5,
    )
    .unwrap();
    let mut trainer = Trainer::new(LogicGate::xor(0.0), DEFAULT_THRESHOLD);

    trainer.train(&mut network, None, 100_000).unwrap();

    let hidden = &network.layers()[0];
    assert_abs_diff_eq!(hidden[0].weights[0] - hidden[1].weights[0], 0.8, epsilon = 1e-6);
    assert_abs_diff_eq!(hidden[0].weights[1] - hidden[1].weights[1], -1.2, epsilon = 1e-6);
    assert_abs_diff_eq!(hidden[0].bias - hidden[1].bias, 0.3, epsilon = 1e-6);

    let outputs: Vec<f64> = CASES
        .iter()
        .map(|case| network.feed_forward(case).unwrap()[0])
        .collect();
    for output in &outputs {
        assert!(output.is_finite());
        assert_abs_diff_eq!(*output, outputs[0], epsilon = 1e-6);
    }
    assert!(trainer.test(&mut network).unwrap() < 100.0);
    assert!(!trainer.failures().is_empty());
}

#[test]
fn saved_network_keeps_its_accuracy() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("or.json");

    let mut rng = StdRng::seed_from_u64(4);
    let mut network = Network::random(2, &[1], Activation::Sigmoid, 0.1, 0.5, &mut rng).unwrap();
    let mut trainer = Trainer::new(LogicGate::or(0.0), DEFAULT_THRESHOLD);
    trainer.train(&mut network, None, 20_000).unwrap();
    let accuracy = trainer.test(&mut network).unwrap();

    json::save_to_file(&network, &path).unwrap();
    let mut loaded = json::load_from_file(&path).unwrap();
    assert_eq!(trainer.test(&mut loaded).unwrap(), accuracy);
    for case in CASES.iter() {
        assert_abs_diff_eq!(
            loaded.feed_forward(case).unwrap()[0],
            network.feed_forward(case).unwrap()[0],
            epsilon = 1e-12
        );
    }
}
