use std::path::PathBuf;

use analysis::{ArmConfig, analyze};
use clap::{Parser, ValueEnum};
use kinematics::ElbowBranch;
use log::{error, info};

mod communication;
mod report;

use communication::{CommunicationLayer, DEFAULT_JOINT_COMMAND_KEY};

/// Kinematics, torques and workspace of a three-link planar arm.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Arm configuration file (TOML).
    #[arg(default_value = "input.toml")]
    input: PathBuf,

    /// Workspace sampling step in degrees, overriding the file.
    #[arg(short, long)]
    step: Option<f64>,

    /// Write the workspace point cloud to this CSV file.
    #[arg(long)]
    workspace_csv: Option<PathBuf>,

    /// Publish the selected configuration as a ROS 2 JointState over zenoh.
    #[arg(long)]
    publish: bool,

    /// Inverse kinematics branch to publish.
    #[arg(long, value_enum, default_value_t = Branch::Up)]
    branch: Branch,

    /// Key expression to publish on.
    #[arg(long, default_value = DEFAULT_JOINT_COMMAND_KEY)]
    key: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Branch {
    Up,
    Down,
}

impl From<Branch> for ElbowBranch {
    fn from(branch: Branch) -> Self {
        match branch {
            Branch::Up => ElbowBranch::Up,
            Branch::Down => ElbowBranch::Down,
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ArmConfig::load(&cli.input)?;
    if let Some(step) = cli.step {
        config.workspace.step = step;
    }
    let problem = config.validate()?;
    info!("loaded {} ({:?} mode)", cli.input.display(), config.mode);

    let report = analyze(&problem)?;
    print!("{}", report::Summary(&report));

    if let Some(path) = &cli.workspace_csv {
        report::write_workspace_csv(path, &report.workspace)?;
        info!("wrote {} workspace points to {}", report.workspace.len(), path.display());
    }

    if cli.publish {
        let joints = report.joint_states(report.position.select(cli.branch.into()));
        let comm = CommunicationLayer::new(&cli.key).await?;
        comm.publish_joint_command(&joints).await?;
        info!("published joint command on {}", cli.key);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
