use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use lineup_planner::display::{print_lineup, write_plan_to_file, write_roster_to_file};
use lineup_planner::parser::{load_roster, load_settings};
use lineup_planner::{allocate_game, logging, underplayed_players, validate_lineup, LineupSettings, Role};

#[derive(Parser)]
#[command(name = "lineup-planner")]
#[command(about = "Plan fair quarter-by-quarter soccer lineups", long_about = None)]
struct Cli {
    /// Roster file with position history (.csv or .json)
    #[arg(short, long)]
    roster: PathBuf,

    /// Settings file (.json); missing keys use the defaults
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Minimum quarters per player per game
    #[arg(long)]
    min: Option<u32>,

    /// Maximum quarters per player per game
    #[arg(long)]
    max: Option<u32>,

    #[arg(long)]
    goalies: Option<u32>,

    #[arg(long)]
    defenders: Option<u32>,

    #[arg(long)]
    midfielders: Option<u32>,

    #[arg(long)]
    forwards: Option<u32>,

    /// Write the updated roster here (.csv or .json) for the next game
    #[arg(long)]
    out_roster: Option<PathBuf>,

    /// Write the game plan here as text
    #[arg(long)]
    out_plan: Option<PathBuf>,

    /// Print the full result as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Result<LineupSettings> {
        let mut settings = match &self.settings {
            Some(path) => load_settings(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => LineupSettings::default(),
        };

        if let Some(min) = self.min {
            settings.min_segments_per_game = min;
        }
        if let Some(max) = self.max {
            settings.max_segments_per_game = max;
        }
        let overrides = [
            (Role::Goalie, self.goalies),
            (Role::Defender, self.defenders),
            (Role::Midfielder, self.midfielders),
            (Role::Forward, self.forwards),
        ];
        for (role, count) in overrides {
            if let Some(count) = count {
                settings.set_required(role, count);
            }
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let settings = cli.settings()?;
    let roster = load_roster(&cli.roster)
        .with_context(|| format!("Failed to load roster from {}", cli.roster.display()))?;
    info!(players = roster.len(), path = %cli.roster.display(), "Loaded roster");

    validate_lineup(&roster, &settings).context("Cannot generate a lineup")?;

    let result = allocate_game(&roster, &settings);

    for player in underplayed_players(&result.updated_roster, &settings) {
        warn!(
            player = %player.name,
            quarters = player.segments_this_game,
            min = settings.min_segments_per_game,
            "Player is below the minimum quarters this game"
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_lineup(&result.plan, &result.updated_roster, &settings);
    }

    if let Some(path) = &cli.out_plan {
        write_plan_to_file(&result.plan, path)
            .with_context(|| format!("Failed to write plan to {}", path.display()))?;
        info!(path = %path.display(), "Saved game plan");
    }
    if let Some(path) = &cli.out_roster {
        write_roster_to_file(&result.updated_roster, path)
            .with_context(|| format!("Failed to write roster to {}", path.display()))?;
        info!(path = %path.display(), "Saved updated roster");
    }

    Ok(())
}
