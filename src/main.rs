use nbsim::recorder::traj::{write_energy_series, write_field_csv, TrajWriter};
use nbsim::{gaussian_random_field, Scenario, ScenarioConfig, Simulation};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, resolved under the crate's scenarios/ directory
    #[arg(short, default_value = "two_body.yaml")]
    file_name: String,
}

fn initialize_logging() {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .expect("logging configuration is well-formed");
    log4rs::init_config(config).expect("logging initialized once");
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario file {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario file {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    initialize_logging();

    let args = Args::parse();
    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;

    let field_cfg = scenario_cfg.field.clone();
    let has_bodies = !scenario_cfg.bodies.is_empty() || scenario_cfg.lattice.is_some();

    if !has_bodies && field_cfg.is_none() {
        warn!(
            "scenario '{}' defines no bodies, no lattice and no field; nothing to run",
            args.file_name
        );
    }

    if has_bodies {
        let scenario = Scenario::build_scenario(scenario_cfg).context("building scenario")?;
        let simulation = Simulation::new(scenario).context("validating scenario")?;
        let result = simulation.run();

        let mut traj = TrajWriter::create("trajectory.txt")?;
        traj.write_run(&result)?;
        info!("trajectory written to trajectory.txt");

        if !result.energies.is_empty() {
            write_energy_series("energy.txt", &result)?;
            info!("energy series written to energy.txt");
        }
    }

    if let Some(field) = field_cfg {
        let grid = gaussian_random_field(field.alpha, field.size, field.normalize, field.seed)
            .context("generating random field")?;
        write_field_csv("field.csv", &grid)?;
        info!(
            "random field ({}x{}, alpha = {}) written to field.csv",
            field.size, field.size, field.alpha
        );
    }

    Ok(())
}
