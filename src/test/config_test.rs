use super::*;

#[test]
fn test_new_and_getters() {
    let config = NetworkConfig::new(3, 2, 4, 0.1, 0.5, 1e-5).unwrap();
    assert_eq!(config.get_input_width(), 3);
    assert_eq!(config.get_output_width(), 2);
    assert_eq!(config.get_truncation_window(), 4);
    assert_eq!(config.get_memory_cells(), 0);
    assert_eq!(config.get_cell_width(), 2);
    assert_eq!(config.get_network_input_width(), 5);
    assert_eq!(config.get_random_seed(), None);

    let hyper = config.get_hyper_parameters();
    assert_eq!(hyper.learning_rate, 0.1);
    assert_eq!(hyper.momentum, 0.5);
    assert_eq!(hyper.weight_decay, 1e-5);

    let config = config.with_memory_cells(2).with_random_seed(8);
    assert_eq!(config.get_cell_width(), 4);
    assert_eq!(config.get_network_input_width(), 7);
    assert_eq!(config.get_random_seed(), Some(8));
}

#[test]
fn test_new_rejects_invalid_values() {
    let invalid = [
        NetworkConfig::new(0, 2, 1, 0.1, 0.5, 0.0),
        NetworkConfig::new(2, 0, 1, 0.1, 0.5, 0.0),
        NetworkConfig::new(2, 2, 0, 0.1, 0.5, 0.0),
        NetworkConfig::new(2, 2, 1, 0.0, 0.5, 0.0),
        NetworkConfig::new(2, 2, 1, -0.1, 0.5, 0.0),
        NetworkConfig::new(2, 2, 1, f64::NAN, 0.5, 0.0),
        NetworkConfig::new(2, 2, 1, 0.1, 1.0, 0.0),
        NetworkConfig::new(2, 2, 1, 0.1, -0.1, 0.0),
        NetworkConfig::new(2, 2, 1, 0.1, 0.5, -1e-3),
        NetworkConfig::new(2, 2, 1, 0.1, 0.5, f64::INFINITY),
    ];
    for result in invalid {
        assert!(matches!(result, Err(ModelError::InputValidationError(_))));
    }
}

#[test]
fn test_gate_config_validation() {
    assert!(
        GateConfig::new()
            .with_hidden_layers(HiddenLayers::Widths(vec![3, 0]))
            .is_err()
    );
    assert!(GateConfig::new().with_learning_rate(0.0).is_err());
    assert!(GateConfig::new().with_momentum(1.5).is_err());
    assert!(GateConfig::new().with_weight_decay(-0.5).is_err());
    assert!(
        NetworkConfig::new(2, 2, 1, 0.1, 0.5, 0.0)
            .unwrap()
            .with_sub_network_hyper_parameters(0.1, 1.0, 0.0)
            .is_err()
    );
}

#[test]
fn test_hidden_layers_resolve() {
    assert!(HiddenLayers::None.resolve(5).is_empty());
    assert_eq!(HiddenLayers::Count(2).resolve(5), vec![5, 5]);
    assert_eq!(HiddenLayers::Widths(vec![7, 3]).resolve(5), vec![7, 3]);
}

#[test]
fn test_default_hidden_width_is_input_plus_cells() {
    let config = NetworkConfig::new(3, 2, 1, 0.1, 0.5, 0.0)
        .unwrap()
        .with_memory_cells(1)
        .with_hidden_layers(HiddenLayers::Count(2))
        .unwrap();
    for kind in GateKind::ALL {
        assert_eq!(config.gate_settings(kind).hidden_layer_widths, vec![6, 6]);
    }
}

#[test]
fn test_hyper_parameter_resolution() {
    let config = NetworkConfig::new(2, 2, 1, 0.1, 0.5, 1e-5).unwrap();
    // nothing set: global values
    assert_eq!(
        config.gate_settings(GateKind::Input).hyper_parameters,
        config.get_hyper_parameters()
    );

    let config = config
        .with_sub_network_hyper_parameters(0.2, 0.3, 0.0)
        .unwrap()
        .with_gate(
            GateKind::Forget,
            GateConfig::new().with_learning_rate(0.05).unwrap(),
        );

    let forget = config.gate_settings(GateKind::Forget).hyper_parameters;
    assert_eq!(forget.learning_rate, 0.05);
    assert_eq!(forget.momentum, 0.3);
    assert_eq!(forget.weight_decay, 0.0);

    let input = config.gate_settings(GateKind::Input).hyper_parameters;
    assert_eq!(input, LearningHyperParameters::new(0.2, 0.3, 0.0).unwrap());

    // the global values stay untouched for the scalar gate biases
    assert_eq!(config.get_hyper_parameters().learning_rate, 0.1);
}

#[test]
fn test_with_hidden_layers_keeps_overrides() {
    let config = NetworkConfig::new(2, 2, 1, 0.1, 0.5, 0.0)
        .unwrap()
        .with_gate(
            GateKind::Output,
            GateConfig::new().with_momentum(0.9).unwrap(),
        )
        .with_hidden_layers(HiddenLayers::Widths(vec![3]))
        .unwrap();

    let output = config.gate_settings(GateKind::Output);
    assert_eq!(output.hidden_layer_widths, vec![3]);
    assert_eq!(output.hyper_parameters.momentum, 0.9);
    assert_eq!(
        config.gate_config(GateKind::Candidate).hidden_layers(),
        &HiddenLayers::Widths(vec![3])
    );
}
