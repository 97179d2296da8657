use super::*;

#[test]
fn test_new() {
    assert!(matches!(
        StateHistory::new(0),
        Err(ModelError::InputValidationError(_))
    ));

    let history = StateHistory::new(4).unwrap();
    assert_eq!(history.capacity(), 9);
    assert_eq!(history.truncation_window(), 4);
    assert!(history.is_empty());
    assert_eq!(history.len(), 0);
    assert!(!history.has(0));
    assert!(matches!(history.current(), Err(ModelError::EmptyHistory)));
    assert!(matches!(history.get(0), Err(ModelError::EmptyHistory)));
}

#[test]
fn test_window_follows_pushes_across_wraparounds() {
    for window in 1..=4 {
        let mut network = seeded_network(1, 1, window, 17);
        // several compactions: the ring has 2T + 1 slots
        let pushes = 5 * (2 * window + 1) + 3;

        for n in 1..=pushes {
            network.process(array![n as f64 - 1.0].view()).unwrap();

            let available = network.available_steps_back();
            assert_eq!(available, window.min(n - 1));
            assert_eq!(network.history().len(), available + 1);

            for k in 0..=available {
                assert!(network.has_state(k));
                let state = network.state(k).unwrap();
                assert_eq!(state.input()[0], (n - 1 - k) as f64);
            }

            assert!(!network.has_state(available + 1));
            assert!(matches!(
                network.state(available + 1),
                Err(ModelError::StepOutOfWindow { steps_back, available: a })
                    if steps_back == available + 1 && a == available
            ));
        }
    }
}

#[test]
fn test_states_chain_through_the_recurrence() {
    let mut network = seeded_network(2, 2, 2, 23);
    for n in 0..12 {
        network.process(one_hot(n % 2, 2).view()).unwrap();
        if n == 0 {
            assert!(!network.current_state().unwrap().has_previous());
            continue;
        }
        // each step consumed the output of the step before it, also after compaction
        let current = network.state(0).unwrap();
        let previous = network.state(1).unwrap();
        assert!(current.has_previous());
        assert_eq!(
            current.sub_network_input().slice(s![2..]),
            previous.output().view()
        );
    }
}

#[test]
fn test_reset_empties_history() {
    let mut network = seeded_network(1, 1, 2, 5);
    for n in 0..4 {
        network.process(array![n as f64].view()).unwrap();
    }
    let parameters = network.parameters().clone();

    network.reset();
    assert!(network.history().is_empty());
    assert_eq!(network.available_steps_back(), 0);
    assert!(matches!(network.current_state(), Err(ModelError::EmptyHistory)));
    assert_eq!(network.parameters(), &parameters);

    network.process(array![9.0].view()).unwrap();
    assert!(!network.current_state().unwrap().has_previous());
    assert_eq!(network.available_steps_back(), 0);
}
