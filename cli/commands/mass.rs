use std::io::IsTerminal;

use anyhow::Context;
use log::{info, warn};

use bitmlp::experiment::report::ranked_table;
use bitmlp::{
    Dashboard, LogRenderer, Orchestrator, Renderer, TaskConfig, TerminalRenderer, TrainingData,
};

pub fn run(config: &TaskConfig) -> anyhow::Result<()> {
    println!("--- Starting Mass Training Experiment ---");

    let path = &config.training_data_file_name;
    let data = TrainingData::load_json(path)
        .with_context(|| format!("loading training data from {}", path.display()))?;
    info!("training data loaded with {} samples", data.len());

    let mut experiment = config.experiment();
    if let Err(e) = data.check_sizes(config.input_bit_amount, config.output_size) {
        warn!("{e}; runs will use the dataset's own sizes");
        experiment.input_size = data.input_size;
        experiment.output_size = data.output_size;
    }

    let orchestrator = Orchestrator::new(experiment)?;
    let runs = orchestrator.runs();
    println!("Will perform {} training runs in parallel.", runs.len());
    println!("-------------------------------------------------");

    let renderer: Box<dyn Renderer> = if std::io::stdout().is_terminal() {
        Box::new(TerminalRenderer::stdout())
    } else {
        Box::new(LogRenderer)
    };
    let dashboard = Dashboard::new(&runs, renderer, Some(config.status_file.clone()));

    let results = orchestrator.run(&data.examples(), &dashboard)?;

    println!("\n-------------------------------------------------");
    println!("All training runs complete. Analyzing results...");

    let best_path = orchestrator.persist(&results)?;
    let Some(best) = results.first() else {
        println!("No results were generated.");
        return Ok(());
    };

    println!("\n--- Best Performing Model ---");
    println!("Model ID: {}", best.run.id());
    println!("Epochs to Converge: {}", best.epochs_run);
    println!("Final Average Error: {:.21}", best.final_error);
    println!("-----------------------------\n");
    if let Some(best_path) = best_path {
        println!("Saved best model to {}", best_path.display());
    }

    println!("\n--- Full Report (sorted by error) ---");
    print!("{}", ranked_table(&results));
    println!(
        "\nSaved all models to '{}' directory.",
        orchestrator.config().results_dir.display()
    );
    Ok(())
}
