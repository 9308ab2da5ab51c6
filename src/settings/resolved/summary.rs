use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
    println!("Effective configuration:");
    println!("  Catalog directory: {}", config.catalog_dir.display());
    println!("  Filter set: {}", config.filter_set);
    match &config.parameters {
        Some(path) => println!("  Parameters: {}", path.display()),
        None => println!("  Parameters: (none)"),
    }
    println!("  Drill-down mode: {}", mode_name(config));
    println!("  Layout: {}", config.layout);
    println!("  Title: {}", config.title);
    println!(
        "  UI theme: {}",
        config
            .theme
            .as_deref()
            .unwrap_or("(use the library default)")
    );
    println!("  Show logs: {}", bool_to_word(config.show_logs));
}

fn mode_name(config: &ResolvedConfig) -> &'static str {
    match config.mode {
        fltr::engine::DrillDownMode::RowPerDrillDown => "new-row",
        fltr::engine::DrillDownMode::ReplaceInPlace => "replace",
    }
}

fn bool_to_word(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
