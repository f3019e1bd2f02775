use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::io;
use std::path::PathBuf;

use urlguard_classifiers::io::load_model;
use urlguard_cli::classify::{classify_urls, extract_json};
use urlguard_cli::serve::{run_server, ServeConfig};
use urlguard_cli::train::{run_training, TrainConfig};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("URLGUARD_LOG", "error,urlguard=info"))
        .init();

    let matches = Command::new("urlguard")
        .version(clap::crate_version!())
        .about("urlguard - flag suspicious URLs with a rule and a random forest")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Train a random forest on a labelled URL dataset")
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON training configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("dataset")
                        .short('d')
                        .long("dataset")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Path to the labelled CSV/TSV dataset. Overrides the dataset \
                             specified in the configuration file.",
                        )
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help("File the trained model is written to.")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(clap::value_parser!(u64))
                        .help("Seed for the train/test split and the forest."),
                )
                .arg(
                    Arg::new("n_trees")
                        .long("n-trees")
                        .value_parser(clap::value_parser!(usize))
                        .help("Number of trees in the forest."),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help("Write an HTML training report to this file.")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("classify")
                .about("Classify URLs with a trained model")
                .arg(
                    Arg::new("model_path")
                        .short('m')
                        .long("model")
                        .help("Path to the trained model file")
                        .default_value("model.urlguard")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("urls")
                        .help("URLs to classify")
                        .required(true)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("extract")
                .about("Print the feature vector of a URL as JSON")
                .arg(Arg::new("url").help("URL to featurize").required(true)),
        )
        .subcommand(
            Command::new("serve")
                .about("Serve the scan endpoint over HTTP")
                .arg(
                    Arg::new("model_path")
                        .short('m')
                        .long("model")
                        .help("Path to the trained model file")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("host")
                        .long("host")
                        .help("Address to bind (default 0.0.0.0)")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .help("Port to listen on. Defaults to $PORT, then 10000.")
                        .value_parser(clap::value_parser!(u16)),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_m)) => handle_train(sub_m),
        Some(("classify", sub_m)) => handle_classify(sub_m),
        Some(("extract", sub_m)) => {
            let url: &String = sub_m.get_one("url").unwrap();
            println!("{}", extract_json(url)?);
            Ok(())
        }
        Some(("serve", sub_m)) => handle_serve(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_train(matches: &ArgMatches) -> Result<()> {
    let config_path: Option<&PathBuf> = matches.get_one("config");
    match config_path {
        Some(path) => log::info!("[urlguard::train] Training from config: {:?}", path),
        None => {
            eprintln!("[urlguard::train] No config file provided; using defaults.");
            let default_json = serde_json::to_string_pretty(&TrainConfig::default())?;
            eprintln!("[urlguard::train] Default config:\n{}", default_json);
        }
    }

    let params = TrainConfig::from_arguments(config_path, matches)?;
    match run_training(&params) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_classify(matches: &ArgMatches) -> Result<()> {
    let model_path: &PathBuf = matches.get_one("model_path").unwrap();
    let urls: Vec<String> = matches
        .get_many::<String>("urls")
        .unwrap_or_default()
        .cloned()
        .collect();

    let artifact = load_model(model_path)
        .with_context(|| format!("Failed to load model: {}", model_path.display()))?;
    classify_urls(&artifact.forest, &urls, &mut io::stdout().lock())
}

fn handle_serve(matches: &ArgMatches) -> Result<()> {
    let config = ServeConfig::from_parts(
        matches.get_one::<String>("host").map(String::as_str),
        matches.get_one::<u16>("port").copied(),
        matches.get_one::<String>("model_path").map(String::as_str),
    )?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start the async runtime")?;
    match runtime.block_on(run_server(&config)) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("Server failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
