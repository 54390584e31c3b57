use tsmw_middleware::MiddlewareConfig;

pub fn run(config: &MiddlewareConfig, path: &str) -> Result<(), String> {
    let store = super::open_store(config)?;
    let document = store.document().map_err(|e| e.to_string())?;
    let value = document
        .get(path)
        .ok_or_else(|| format!("nothing at {path}"))?;
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}
