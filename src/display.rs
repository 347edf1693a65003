use std::fs::File;
use std::io::Write;
use std::path::Path;
use csv::Writer;

use crate::error::RosterError;
use crate::lineup::{GamePlan, LineupSettings, Player, Role, Segment, SlotRole};
use crate::parser::{file_format, FileFormat};

/// Groups a segment by role in fill order, e.g. `Defender: Taj, Talon`
pub fn format_segment(segment: &Segment) -> Vec<String> {
    let order = Role::ALL
        .into_iter()
        .map(SlotRole::Field)
        .chain(std::iter::once(SlotRole::Substitute));

    order
        .filter_map(|slot_role| {
            let names: Vec<&str> = segment
                .slots
                .iter()
                .filter(|slot| slot.role == slot_role)
                .map(|slot| slot.name.as_str())
                .collect();
            if names.is_empty() {
                None
            } else {
                Some(format!("{}: {}", slot_role, names.join(", ")))
            }
        })
        .collect()
}

/// Renders the whole plan, one block per quarter
pub fn format_game_plan(plan: &GamePlan) -> String {
    let mut out = String::new();
    for (idx, segment) in plan.segments.iter().enumerate() {
        out.push_str(&format!("Quarter {}:\n", idx + 1));
        if segment.slots.is_empty() {
            out.push_str("  [EMPTY]\n");
        }
        for line in format_segment(segment) {
            out.push_str(&format!("  {}\n", line));
        }
    }
    out
}

/// Renders per-player counters; players under the minimum are marked with `*`
pub fn format_roster_table(roster: &[Player], settings: &LineupSettings) -> String {
    // format! pads by chars, so measure names the same way
    let width = roster.iter().map(|p| p.name.chars().count()).max().unwrap_or(4).max(4);
    let mut out = format!(
        "  {:<width$} {:>3} {:>3} {:>3} {:>3} {:>5} {:>5}\n",
        "Name", "GK", "DEF", "MID", "FWD", "Total", "Game",
        width = width
    );
    for player in roster {
        let marker = if !player.active {
            "-"
        } else if player.segments_this_game < settings.min_segments_per_game {
            "*"
        } else {
            " "
        };
        out.push_str(&format!(
            "{} {:<width$} {:>3} {:>3} {:>3} {:>3} {:>5} {:>5}\n",
            marker,
            player.name,
            player.role_count(Role::Goalie),
            player.role_count(Role::Defender),
            player.role_count(Role::Midfielder),
            player.role_count(Role::Forward),
            player.total_segments,
            player.segments_this_game,
            width = width
        ));
    }
    out
}

/// Prints the plan and the updated counters
pub fn print_lineup(plan: &GamePlan, roster: &[Player], settings: &LineupSettings) {
    println!("=== Game Plan ===");
    print!("{}", format_game_plan(plan));
    println!("\n=== Updated Players ===");
    print!("{}", format_roster_table(roster, settings));
}

/// Writes the plan as plain text
pub fn write_plan_to_file<P: AsRef<Path>>(plan: &GamePlan, path: P) -> Result<(), RosterError> {
    let mut file = File::create(path)?;
    writeln!(file, "** Game Plan **")?;
    for (idx, segment) in plan.segments.iter().enumerate() {
        writeln!(file, "Quarter {}:", idx + 1)?;
        for slot in &segment.slots {
            writeln!(file, " - {}: {}", slot.name, slot.role)?;
        }
    }
    Ok(())
}

/// Writes roster counters as CSV with the header the parser reads back
pub fn write_roster_csv<W: Write>(roster: &[Player], writer: W) -> Result<(), RosterError> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record([
        "name",
        "goalie",
        "defender",
        "midfielder",
        "forward",
        "total_quarters",
        "quarters_this_game",
        "active",
    ])?;
    for player in roster {
        let counts: Vec<String> = Role::ALL
            .into_iter()
            .map(|role| player.role_count(role).to_string())
            .collect();
        let mut record = vec![player.name.clone()];
        record.extend(counts);
        record.push(player.total_segments.to_string());
        record.push(player.segments_this_game.to_string());
        record.push(if player.active { "yes" } else { "no" }.to_string());
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports the updated roster as `.csv` or `.json`, picked by extension
pub fn write_roster_to_file<P: AsRef<Path>>(roster: &[Player], path: P) -> Result<(), RosterError> {
    let path = path.as_ref();
    let format = file_format(path)?;
    let file = File::create(path)?;
    match format {
        FileFormat::Csv => write_roster_csv(roster, file),
        FileFormat::Json => {
            serde_json::to_writer_pretty(file, roster)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::SlotAssignment;
    use crate::parser::{load_roster, parse_roster_csv};

    fn slot(name: &str, role: SlotRole) -> SlotAssignment {
        SlotAssignment { name: name.to_string(), role }
    }

    #[test]
    fn segment_lines_follow_fill_order() {
        let segment = Segment {
            slots: vec![
                slot("Abel", SlotRole::Field(Role::Goalie)),
                slot("Taj", SlotRole::Field(Role::Defender)),
                slot("Talon", SlotRole::Field(Role::Defender)),
                slot("Xander", SlotRole::Field(Role::Forward)),
                slot("James", SlotRole::Substitute),
            ],
        };
        assert_eq!(
            format_segment(&segment),
            vec!["Goalie: Abel", "Defender: Taj, Talon", "Forward: Xander", "Substitute: James"]
        );
    }

    #[test]
    fn roster_table_marks_short_and_inactive_players() {
        let mut short = Player::new("Zeke");
        short.segments_this_game = 1;
        let mut full = Player::new("Ryder");
        full.segments_this_game = 2;
        let mut benched = Player::new("Asher");
        benched.active = false;

        let table = format_roster_table(&[short, full, benched], &LineupSettings::default());
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[1].starts_with("* Zeke"));
        assert!(lines[2].starts_with("  Ryder"));
        assert!(lines[3].starts_with("- Asher"));
    }

    #[test]
    fn roster_table_width_counts_characters() {
        let mut player = Player::new("Élodie");
        player.segments_this_game = 2;

        let table = format_roster_table(&[player], &LineupSettings::default());
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("  Name    GK"), "{:?}", lines[0]);
        assert!(lines[1].starts_with("  Élodie   0"), "{:?}", lines[1]);
    }

    #[test]
    fn csv_export_reads_back() {
        let mut player = Player::new("Grayson");
        player.role_counts.midfielder_count = 4;
        player.total_segments = 16;
        player.segments_this_game = 3;
        let mut bench = Player::new("Tadhg");
        bench.active = false;

        let mut buf = Vec::new();
        write_roster_csv(&[player.clone(), bench.clone()], &mut buf).unwrap();
        let roster = parse_roster_csv(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(roster, vec![player, bench]);
    }

    #[test]
    fn writes_json_roster_and_plan_files() {
        let dir = tempfile::tempdir().unwrap();
        let roster = vec![Player::new("Bronx")];
        let json_path = dir.path().join("roster.json");
        write_roster_to_file(&roster, &json_path).unwrap();
        assert_eq!(load_roster(&json_path).unwrap(), roster);

        let plan = GamePlan {
            segments: vec![Segment { slots: vec![slot("Bronx", SlotRole::Field(Role::Midfielder))] }],
        };
        let plan_path = dir.path().join("plan.txt");
        write_plan_to_file(&plan, &plan_path).unwrap();
        let text = std::fs::read_to_string(plan_path).unwrap();
        assert_eq!(text, "** Game Plan **\nQuarter 1:\n - Bronx: Midfielder\n");
    }
}
