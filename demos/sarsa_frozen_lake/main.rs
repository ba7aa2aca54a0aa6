use std::{error::Error, fs, path::Path};

use log::info;
use sarsa::{gym::FrozenLake, Trainer, TrainerConfig};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let path = Path::new("demos/sarsa_frozen_lake");

    let mut env = FrozenLake::new();
    let mut trainer = Trainer::new(TrainerConfig {
        total_steps: 200_000,
        eval_freq: 10_000,
        eval_epsilon: Some(0.0),
        ..Default::default()
    })?;

    let training = trainer.run(&mut env);
    info!("Learned {} state-action values", training.table.len());

    fs::create_dir_all(path.join("out"))?;

    let mut wtr = csv::Writer::from_path(path.join("out/data.csv"))?;
    wtr.write_record(["steps", "mean", "std"])?;

    for eval in &training.evaluations {
        wtr.write_record(&[
            eval.steps.to_string(),
            eval.mean.to_string(),
            eval.std.to_string(),
        ])?;
    }

    wtr.flush()?;

    Ok(())
}
