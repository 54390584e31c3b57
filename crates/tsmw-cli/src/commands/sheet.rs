use comfy_table::{ContentArrangement, Table};
use tsmw_middleware::MiddlewareConfig;

pub fn run(config: &MiddlewareConfig, who: &str) -> Result<(), String> {
    let store = super::open_store(config)?;
    let document = store.document().map_err(|e| e.to_string())?;
    let character = document
        .character(who)
        .ok_or_else(|| format!("unknown character id: {who}"))?;

    let ratings = character.ratings();
    if ratings.is_empty() {
        println!("  No skills recorded for {who}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Skill", "Rating"]);
    for (skill, rating) in &ratings {
        table.add_row(vec![skill.to_string(), rating.to_string()]);
    }

    println!("{table}");
    println!();
    println!("  {} skills", ratings.len());

    Ok(())
}
