use bitmlp::{Network, TrainConfig, Trainer, TrainingExample};

fn main() {
    let data = vec![
        TrainingExample::new(vec![1.0, 0.0], vec![1.0]),
        TrainingExample::new(vec![1.0, 1.0], vec![0.0]),
        TrainingExample::new(vec![0.0, 1.0], vec![1.0]),
        TrainingExample::new(vec![0.0, 0.0], vec![0.0]),
    ];

    let network = Network::seeded(2, 4, 1, 7);
    // batch size 1: every example is its own batch, so each epoch applies
    // the full summed gradient
    let config = TrainConfig::new(10_000, 0.5).with_batch_size(1).with_report_every(1000);
    let mut trainer = Trainer::new(network, config);

    let outcome = trainer
        .train_with_progress(&data, |s| {
            println!("Epoch {}: error = {:.6}", s.epoch, s.average_error)
        })
        .expect("xor data matches the network");
    println!("Stopped after {} epochs, error {:.6}", outcome.epochs_run, outcome.final_error);

    let network = trainer.into_network();
    for example in &data {
        let out = network.forward(&example.input).expect("input has two bits");
        println!("Input: {:?} -> Output: {:.4}", example.input, out[0]);
    }
}
