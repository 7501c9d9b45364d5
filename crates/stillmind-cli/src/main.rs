use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "stillmind", version, about = "Stillmind wellness CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live guided breathing
    Breathe(commands::breathe::BreatheArgs),
    /// Live meditation countdown
    Meditate(commands::meditate::MeditateArgs),
    /// Background timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Mood journal
    Mood {
        #[command(subcommand)]
        action: commands::mood::MoodAction,
    },
    /// Wellness activity checklist
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Today's wellness tip
    Tip,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Session statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Breathe(args) => commands::breathe::run(args),
        Commands::Meditate(args) => commands::meditate::run(args),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Mood { action } => commands::mood::run(action),
        Commands::Activity { action } => commands::activity::run(action),
        Commands::Tip => commands::tip::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Stats { action } => commands::stats::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
