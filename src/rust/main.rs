use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, warn};

use newscat::{
    ArtifactManager, ClassifierError, Predictor, RawArticle, RuntimeConfig, NO_AUTHOR, YEAR_RANGE,
};

#[derive(Parser)]
#[command(author, version, about = "Predict the category of a news article", long_about = None)]
struct Args {
    /// Directory holding the model and encoder artifacts
    #[arg(short, long, global = true)]
    artifacts: Option<PathBuf>,

    /// Skip checksum verification against manifest.json
    #[arg(long, global = true)]
    no_verify: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict the category of one article
    Predict {
        /// Article headline
        #[arg(long)]
        headline: String,

        /// Article description
        #[arg(long)]
        description: String,

        /// Year of publishing
        #[arg(long, default_value_t = *YEAR_RANGE.end(),
              value_parser = clap::value_parser!(i32).range(*YEAR_RANGE.start() as i64..=*YEAR_RANGE.end() as i64))]
        year: i32,

        /// Author; if not in the known-author list use "None of the above"
        #[arg(long, default_value = NO_AUTHOR)]
        author: String,

        /// Also print the score of every category
        #[arg(long)]
        scores: bool,
    },
    /// List the known authors
    Authors,
    /// Describe the loaded artifacts
    Info,
    /// Write manifest.json with checksums of the current artifacts
    Manifest,
}

fn artifact_manager(args: &Args) -> ArtifactManager {
    match &args.artifacts {
        Some(dir) => ArtifactManager::new(dir),
        None => ArtifactManager::new_default(),
    }
}

fn load_predictor(args: &Args) -> anyhow::Result<Predictor> {
    let start_time = Instant::now();
    let builder = Predictor::builder()
        .with_runtime_config(RuntimeConfig::default().with_verify_checksums(!args.no_verify));
    let builder = match &args.artifacts {
        Some(dir) => builder.with_artifacts_dir(dir)?,
        None => builder.with_default_artifacts()?,
    };

    let predictor = builder.build().context("failed to load artifacts")?;
    if let Some(dir) = predictor.info().artifacts_dir {
        info!("Loaded artifacts from {:?}", dir);
    }
    info!("Predictor built (took {:.2?})", start_time.elapsed());
    Ok(predictor)
}

fn run(args: &Args) -> anyhow::Result<()> {
    match &args.command {
        Command::Predict {
            headline,
            description,
            year,
            author,
            scores,
        } => {
            let article = RawArticle::new(headline.as_str(), description.as_str(), *year, author.as_str());
            // reject before paying for artifact loading
            article.validate()?;

            let predictor = load_predictor(args)?;
            if author != NO_AUTHOR && !predictor.known_authors().iter().any(|a| a == author) {
                warn!("Author {:?} is not in the known-author list", author);
            }

            if *scores {
                let (label, scores) = predictor.predict_with_scores(
                    article.year,
                    &article.author,
                    &article.headline,
                    &article.description,
                )?;
                let mut scores: Vec<_> = scores.into_iter().collect();
                scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

                println!("Predicted category: {}", label);
                println!("Scores (sorted):");
                for (label, score) in scores {
                    println!("  {}: {:.4}", label, score);
                }
            } else {
                println!("Predicted category: {}", predictor.predict_article(&article)?);
            }
        }
        Command::Authors => {
            let manager = artifact_manager(args);
            for author in manager.load_authors()? {
                println!("{}", author);
            }
            println!("{}", NO_AUTHOR);
        }
        Command::Info => {
            let info = load_predictor(args)?.info();
            if let Some(dir) = &info.artifacts_dir {
                println!("Artifacts:      {}", dir.display());
            }
            println!("Categories:     {} ({})", info.num_classes, info.class_labels.join(", "));
            println!("Known authors:  {}", info.num_known_authors);
            println!(
                "Feature blocks: headline={} description={} author={} year={}",
                info.block_widths[0], info.block_widths[1], info.block_widths[2], info.block_widths[3]
            );
            println!("Total features: {}", info.n_features);
        }
        Command::Manifest => {
            let manager = artifact_manager(args);
            let path = manager.write_manifest()?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ClassifierError>() {
                Some(ClassifierError::ValidationError(msg)) => eprintln!("{}", msg),
                _ => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
