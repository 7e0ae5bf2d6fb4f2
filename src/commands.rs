//! Subcommand implementations.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use pokeclass::dataset::{load_labeled, load_test_points};
use pokeclass::{HoldoutConfig, KnnClassifier, L2Dist, Sample, evaluate_with_seed, predict_all};

use crate::cli::{ClassifyArgs, ClassifyFileArgs, Command, EvaluateArgs};
use crate::report;

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::ClassifyFile(args) => classify_file(args),
        Command::Classify(args) => classify(args),
        Command::Evaluate(args) => evaluate(args),
    }
}

fn classify_file(args: ClassifyFileArgs) -> Result<()> {
    let _cmd = info_span!("classify_file").entered();
    let reference = load_labeled(&args.data.data)
        .context("failed to load labeled data")?
        .all();
    let queries = load_test_points(&args.tests).context("failed to load test points")?;

    info!(
        reference = reference.len(),
        queries = queries.len(),
        k = args.k,
        "classifying test points"
    );
    let predictions = predict_all(&reference, &queries, args.k)?;
    print!("{}", report::render_predictions(&queries, &predictions));
    Ok(())
}

fn classify(args: ClassifyArgs) -> Result<()> {
    let _cmd = info_span!("classify").entered();
    let query = Sample::measured(args.width, args.height).context("invalid measurement")?;
    let reference = load_labeled(&args.data.data)
        .context("failed to load labeled data")?
        .all();

    let classifier = KnnClassifier::new(args.k, &reference, L2Dist)?;
    let predicted = classifier.predict(&query)?;
    print!("{}", report::render_single(&query, predicted, args.k));
    Ok(())
}

fn evaluate(args: EvaluateArgs) -> Result<()> {
    let _cmd = info_span!("evaluate").entered();
    let pools = load_labeled(&args.data.data).context("failed to load labeled data")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = HoldoutConfig::new()
        .with_iterations(args.iterations)
        .with_training_amount(args.training)
        .with_test_amount(args.test)
        .with_k(args.k);
    info!(
        seed,
        pikachus = pools.pikachus.len(),
        pichus = pools.pichus.len(),
        "running holdout evaluation"
    );

    let report = evaluate_with_seed(&pools.pikachus, &pools.pichus, &config, seed)?;
    print!("{}", report::render_evaluation(&report, &config, seed));
    Ok(())
}
