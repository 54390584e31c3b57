use colored::Colorize;
use tsmw_mechanics::{DiceRoller, Difficulty, Roller, quick_check};
use tsmw_middleware::MiddlewareConfig;

pub fn run(
    config: &MiddlewareConfig,
    threshold: i32,
    roll: Option<i64>,
    difficulty: Option<&str>,
) -> Result<(), String> {
    let modifier = match difficulty {
        Some(name) => Difficulty::parse(name)
            .ok_or_else(|| format!("unknown difficulty: {name}"))?
            .modifier(),
        None => 0,
    };
    let target = config
        .target_clamp
        .apply(threshold.saturating_add(modifier));

    let roll = match roll {
        Some(value) => super::manual_roll(value)?,
        None => DiceRoller::new(config.seed).roll_d100(),
    };

    let verdict = quick_check(target, roll);
    let outcome = if verdict.resolution.success {
        "success".green().bold()
    } else {
        "failure".red().bold()
    };
    println!(
        "  Roll {} vs {}: {} (margin {}, {}, {})",
        roll, target, outcome, verdict.resolution.margin, verdict.resolution.degree, verdict.quality
    );

    Ok(())
}
