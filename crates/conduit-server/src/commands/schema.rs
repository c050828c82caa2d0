use anyhow::Context;
use conduit_schema::SchemaRegistry;

/// Handle `conduit schema`.
pub fn handle(shape: Option<&str>) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new()?;
    match shape {
        Some(name) => {
            let schema = registry
                .get(name)
                .with_context(|| format!("unknown shape '{name}'; run `conduit schema` to list shapes"))?;
            println!("{}", serde_json::to_string_pretty(schema)?);
        }
        None => {
            for name in registry.list() {
                println!("{name}");
            }
        }
    }
    Ok(())
}
