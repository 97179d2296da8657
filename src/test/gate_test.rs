use super::*;

#[test]
fn test_gate_kind() {
    let indices: Vec<usize> = GateKind::ALL.iter().map(|kind| kind.index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);

    assert_eq!(GateKind::Forget.activation(), Activation::Sigmoid);
    assert_eq!(GateKind::Input.activation(), Activation::Sigmoid);
    assert_eq!(GateKind::Output.activation(), Activation::Sigmoid);
    assert_eq!(GateKind::Candidate.activation(), Activation::Tanh);

    assert_eq!(GateKind::Candidate.to_string(), "candidate");
}

#[test]
fn test_gate_parameters_random() {
    let distribution = Uniform::new(-0.1, 0.1).unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    let gate = GateParameters::random(3, 5, &[4], &distribution, &mut rng);

    assert_eq!(gate.networks.len(), 3);
    assert!(gate.bias.iter().all(|&b| b == 0.0));
    assert!(gate.networks.iter().all(|n| n.input_width() == 5));
    // per network: (4*5 + 4) + (5*4 + 5) = 49
    assert_eq!(gate.parameter_count(), 3 * 49 + 3);
}

#[test]
fn test_lstm_parameters_from_gates() {
    let distribution = Uniform::new(-0.1, 0.1).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let gates = GateKind::ALL.map(|_| GateParameters::random(2, 4, &[], &distribution, &mut rng));
    let parameters = LstmParameters::from_gates(gates).unwrap();

    assert_eq!(parameters.cells(), 2);
    assert_eq!(parameters.parameter_count(), 4 * (2 * 20 + 2));
    assert_eq!(&parameters[GateKind::Output], parameters.gate(GateKind::Output));
    assert_eq!(parameters.iter().count(), 4);

    let zeros = parameters.zeros_like();
    assert_eq!(zeros.parameter_count(), parameters.parameter_count());
    assert!(zeros[GateKind::Forget].networks[1].layers()[0]
        .weights
        .iter()
        .all(|&w| w == 0.0));
}

#[test]
fn test_lstm_parameters_reject_mismatched_gates() {
    let distribution = Uniform::new(-0.1, 0.1).unwrap();
    let mut rng = StdRng::seed_from_u64(4);

    let mut gates = GateKind::ALL.map(|_| GateParameters::random(2, 4, &[], &distribution, &mut rng));
    gates[GateKind::Input.index()] = GateParameters::random(3, 5, &[], &distribution, &mut rng);
    assert!(matches!(
        LstmParameters::from_gates(gates),
        Err(ModelError::InputValidationError(_))
    ));

    let mut gates = GateKind::ALL.map(|_| GateParameters::random(2, 4, &[], &distribution, &mut rng));
    gates[GateKind::Candidate.index()] = GateParameters::random(2, 6, &[], &distribution, &mut rng);
    assert!(LstmParameters::from_gates(gates).is_err());
}
