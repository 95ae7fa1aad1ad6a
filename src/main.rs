use std::error::Error;

use recipefp::{Ingredient, RecipeFpConfig, compare, hash_recipe, latte_demo, to_markdown};

fn main() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => RecipeFpConfig::from_file(path)?,
        None => RecipeFpConfig::default(),
    };

    let filter = config
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter.as_str())
        .with_target(false)
        .json()
        .init();

    let cfg = config.sketch_config();
    let latte = latte_demo()?;
    let encoded = hash_recipe(&latte, &cfg)?;

    let mut with_cookie = latte.clone();
    with_cookie.substitute("Sugar", Ingredient::new("Cookie"))?;
    let score = compare(&latte, &with_cookie, &cfg)?;

    println!("{}", to_markdown(&latte));
    println!("hash ({} buckets): {encoded}", cfg.buckets);
    println!("similarity to cookie variant: {score:.6}");

    Ok(())
}
