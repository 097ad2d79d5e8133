use bitmlp::{Network, TrainConfig, Trainer, TrainingExample};

/// Seed whose uniform [-1, 1] initialisation of a 2-2-1 network starts
/// outside XOR's flat regions.
const SEED: u64 = 28;

fn xor() -> Vec<TrainingExample> {
    vec![
        TrainingExample::new(vec![0.0, 0.0], vec![0.0]),
        TrainingExample::new(vec![1.0, 1.0], vec![0.0]),
        TrainingExample::new(vec![1.0, 0.0], vec![1.0]),
        TrainingExample::new(vec![0.0, 1.0], vec![1.0]),
    ]
}

/// A hand-picked starting point that also converges.
fn fixed_start() -> Network {
    Network::from_parts(
        2,
        2,
        1,
        vec![vec![0.05, -0.96], vec![-0.12, -0.63]],
        vec![-0.99, 0.6],
        vec![vec![-0.66], vec![-0.05]],
        vec![0.45],
    )
    .unwrap()
}

fn train(network: Network) -> (Vec<f64>, f64, Network) {
    let config = TrainConfig::new(1000, 0.5).with_batch_size(1);
    let mut trainer = Trainer::new(network, config);
    let mut checkpoints = Vec::new();
    let outcome = trainer
        .train_with_progress(&xor(), |s| checkpoints.push(s.average_error))
        .unwrap();
    assert_eq!(outcome.epochs_run, 1000);
    (checkpoints, outcome.final_error, trainer.into_network())
}

fn assert_learns_xor(start: Network) {
    let (checkpoints, final_error, network) = train(start);

    // epoch 1, 100, 200, ..., 1000
    assert_eq!(checkpoints.len(), 11);
    let decreasing = checkpoints.windows(2).filter(|w| w[1] < w[0]).count();
    assert!(decreasing * 10 >= (checkpoints.len() - 1) * 9, "{checkpoints:?}");
    assert!(final_error < 0.05, "final error {final_error}");

    for example in xor() {
        let out = network.forward(&example.input).unwrap();
        assert_eq!(out[0].round(), example.target[0], "{:?}", example.input);
    }
}

#[test]
fn seeded_xor_error_falls_steadily_and_ends_low() {
    assert_learns_xor(Network::seeded(2, 2, 1, SEED));
}

#[test]
fn explicit_xor_start_also_converges() {
    assert_learns_xor(fixed_start());
}

#[test]
fn same_seed_trains_identically() {
    let (a, err_a, net_a) = train(Network::seeded(2, 2, 1, SEED));
    let (b, err_b, net_b) = train(Network::seeded(2, 2, 1, SEED));
    assert_eq!(a, b);
    assert_eq!(err_a.to_bits(), err_b.to_bits());
    assert_eq!(net_a, net_b);
}
