use super::*;

fn optimizer_setup() -> (NetworkConfig, LstmParameters) {
    let config = NetworkConfig::new(1, 1, 1, 0.1, 0.5, 0.01)
        .unwrap()
        .with_sub_network_hyper_parameters(0.2, 0.25, 0.0)
        .unwrap()
        .with_random_seed(3);
    let network = Network::new(config.clone()).unwrap();
    (config, network.parameters().clone())
}

#[test]
fn test_momentum_and_weight_decay_arithmetic() {
    let (config, mut parameters) = optimizer_setup();
    let initial = parameters.clone();
    let mut gradients = parameters.zeros_like();
    fill_parameters(&mut gradients, 1.0);

    let mut optimizer = MomentumOptimizer::new(&parameters, &config);
    optimizer.step(&mut parameters, &gradients).unwrap();

    for kind in GateKind::ALL {
        let w0 = initial[kind].networks[0].layers()[0].weights[[0, 1]];
        let w1 = parameters[kind].networks[0].layers()[0].weights[[0, 1]];
        // (1 - 0.25) * (-0.2 * 1)
        assert_abs_diff_eq!(w1, w0 - 0.15, epsilon = 1e-12);

        // gate bias starts at 0 and uses the global values: (1 - 0.5) * (-0.1 * 1)
        assert_abs_diff_eq!(parameters[kind].bias[0], -0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(
            optimizer.previous_deltas()[kind].bias[0],
            -0.05,
            epsilon = 1e-12
        );
    }

    optimizer.step(&mut parameters, &gradients).unwrap();

    for kind in GateKind::ALL {
        let w0 = initial[kind].networks[0].layers()[0].weights[[0, 1]];
        let w2 = parameters[kind].networks[0].layers()[0].weights[[0, 1]];
        // -0.15 + 0.25 * -0.15
        assert_abs_diff_eq!(w2, w0 - 0.15 - 0.1875, epsilon = 1e-12);

        // -0.05 + 0.5 * -0.05 - 0.01 * -0.05
        let delta = -0.05 - 0.025 + 0.0005;
        assert_abs_diff_eq!(parameters[kind].bias[0], -0.05 + delta, epsilon = 1e-12);
    }
}

#[test]
fn test_weight_decay_without_gradient() {
    let config = NetworkConfig::new(1, 1, 1, 0.1, 0.0, 0.1).unwrap();
    let network = Network::new(config.clone()).unwrap();
    let mut parameters = network.parameters().clone();
    fill_parameters(&mut parameters, 2.0);
    let gradients = parameters.zeros_like();

    let mut optimizer = MomentumOptimizer::new(&parameters, &config);
    optimizer.step(&mut parameters, &gradients).unwrap();

    // value -= weight_decay * value
    let layer = &parameters[GateKind::Candidate].networks[0].layers()[0];
    assert!(layer.weights.iter().all(|&w| (w - 1.8).abs() < 1e-12));
    assert_abs_diff_eq!(parameters[GateKind::Input].bias[0], 1.8, epsilon = 1e-12);
}

#[test]
fn test_gate_override() {
    let config = NetworkConfig::new(1, 1, 1, 0.1, 0.0, 0.0)
        .unwrap()
        .with_gate(
            GateKind::Output,
            GateConfig::new().with_learning_rate(1.0).unwrap(),
        );
    let network = Network::new(config.clone()).unwrap();
    let mut parameters = network.parameters().clone();
    let initial = parameters.clone();
    let mut gradients = parameters.zeros_like();
    fill_parameters(&mut gradients, 1.0);

    let mut optimizer = MomentumOptimizer::new(&parameters, &config);
    assert_eq!(
        optimizer.gate_hyper_parameters(GateKind::Output).learning_rate,
        1.0
    );
    assert_eq!(optimizer.bias_hyper_parameters().learning_rate, 0.1);
    optimizer.step(&mut parameters, &gradients).unwrap();

    let moved = |kind: GateKind| {
        parameters[kind].networks[0].layers()[0].biases[0]
            - initial[kind].networks[0].layers()[0].biases[0]
    };
    assert_abs_diff_eq!(moved(GateKind::Output), -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(moved(GateKind::Forget), -0.1, epsilon = 1e-12);
    // scalar biases ignore the gate override
    assert_abs_diff_eq!(parameters[GateKind::Output].bias[0], -0.1, epsilon = 1e-12);
}

#[test]
fn test_step_rejects_mismatched_shapes() {
    let (config, mut parameters) = optimizer_setup();
    let mut optimizer = MomentumOptimizer::new(&parameters, &config);

    let other = seeded_network(2, 2, 1, 1);
    let gradients = other.parameters().zeros_like();
    let before = parameters.clone();

    assert!(matches!(
        optimizer.step(&mut parameters, &gradients),
        Err(ModelError::ProcessingError(_))
    ));
    assert_eq!(parameters, before);
}

#[test]
fn test_network_keeps_deltas_between_learn_calls() {
    let mut network = seeded_network(2, 2, 1, 31);
    let initial_deltas = network.optimizer().previous_deltas();
    assert!(initial_deltas.iter().all(|(_, gate)| gate.bias.iter().all(|&d| d == 0.0)));

    let desired = array![[1.0, 0.0], [0.0, 1.0]];
    network.process(array![1.0, 0.0].view()).unwrap();
    network.process(array![0.0, 1.0].view()).unwrap();
    let before = network.parameters().clone();
    network.learn(desired.view()).unwrap();

    let first = network.optimizer().previous_deltas().clone();
    for kind in GateKind::ALL {
        let moved = &network.parameters()[kind].bias - &before[kind].bias;
        for (&m, &d) in moved.iter().zip(first[kind].bias.iter()) {
            assert_abs_diff_eq!(m, d, epsilon = 1e-12);
        }
    }

    // the second update mixes in the first one: (1 - 0.5) * (-0.1 * g) + 0.5 * prev - 1e-5 * v
    network.process(array![0.0, 1.0].view()).unwrap();
    let before = network.parameters().clone();
    let gradients = network.clone().gradients(desired.view()).unwrap();
    network.learn(desired.view()).unwrap();

    let second = network.optimizer().previous_deltas();
    for kind in GateKind::ALL {
        for cell in 0..2 {
            let expected = 0.5 * (-0.1 * gradients.parameters[kind].bias[cell])
                + 0.5 * first[kind].bias[cell]
                - 1e-5 * before[kind].bias[cell];
            assert_abs_diff_eq!(second[kind].bias[cell], expected, epsilon = 1e-12);
            assert_abs_diff_eq!(
                network.parameters()[kind].bias[cell],
                before[kind].bias[cell] + expected,
                epsilon = 1e-12
            );
        }
    }
}
