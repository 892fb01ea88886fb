use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use snake_qlearn::game::GameConfig;
use snake_qlearn::modes::{TrainConfig, TrainMode};
use snake_qlearn::render::{Frontend, HeadlessFrontend, Speed, TerminalFrontend};
use snake_qlearn::rl::{AgentConfig, TrainingBackend, default_device, seed_backend};

#[derive(Parser)]
#[command(name = "snake_qlearn")]
#[command(version, about = "Snake played by a Q-learning agent")]
struct Cli {
    /// Where to show the game
    #[arg(long, default_value = "tui")]
    frontend: FrontendKind,

    /// Frame pacing [default: normal for tui, max for headless]
    #[arg(long)]
    speed: Option<Speed>,

    /// Board width in pixels
    #[arg(long, default_value = "640")]
    width: i32,

    /// Board height in pixels
    #[arg(long, default_value = "480")]
    height: i32,

    /// Cell size in pixels
    #[arg(long, default_value = "20")]
    block_size: i32,

    /// Stop after this many episodes (trains until quit when omitted)
    #[arg(long)]
    episodes: Option<usize>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print a progress summary every N episodes
    #[arg(long, default_value = "100")]
    log_frequency: usize,

    /// Learning rate
    #[arg(long, default_value = "0.001")]
    lr: f64,

    /// Discount factor
    #[arg(long, default_value = "0.9")]
    gamma: f32,
}

#[derive(Clone, ValueEnum)]
enum FrontendKind {
    /// Board and score plot in the terminal
    Tui,
    /// Console output only
    Headless,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut game_config = GameConfig::new(cli.width, cli.height);
    game_config.block_size = cli.block_size;

    let agent_config = AgentConfig {
        learning_rate: cli.lr,
        gamma: cli.gamma,
        ..AgentConfig::default()
    };

    let config = TrainConfig {
        max_episodes: cli.episodes,
        log_frequency: cli.log_frequency,
        seed: cli.seed,
        game_config,
        agent_config,
    };
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    if let Some(seed) = config.seed {
        seed_backend(seed);
    }

    // Printed before the TUI takes over the screen
    config.print_header();

    let frontend: Box<dyn Frontend> = match cli.frontend {
        FrontendKind::Tui => Box::new(TerminalFrontend::new(cli.speed.unwrap_or(Speed::Normal))?),
        FrontendKind::Headless => Box::new(HeadlessFrontend::new(cli.speed.unwrap_or(Speed::Max))),
    };

    let mut train_mode = TrainMode::<TrainingBackend>::new(config, default_device(), frontend)?;
    train_mode.run()?;

    // Dropping the mode restores the terminal before the summary is printed
    let stats = train_mode.into_stats();

    println!("\nTraining stopped.");
    println!("\nFinal Statistics:");
    println!("{}", stats.format_summary());

    Ok(())
}
