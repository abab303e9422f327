use crate::commands::Commands;
use crate::output::{print_error, print_info, print_layout_summary};
use crate::replay::{load_rows, replay, WindowSelection};
use layout::{ComponentDefinition, ComponentKind, LayoutDefinition};
use std::path::Path;

pub fn handle_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Init { path, name } => handle_init(&path, name)?,
        Commands::Check { path } => handle_check(&path)?,
        Commands::Replay {
            layout,
            component,
            input,
            start,
            end,
            all,
        } => {
            let selection = match (start, end, all) {
                (_, _, true) => WindowSelection::All,
                (Some(start), Some(end), false) => WindowSelection::Range(start, end),
                _ => WindowSelection::Shown,
            };
            handle_replay(&layout, &component, &input, selection)?;
        }
    }
    Ok(())
}

fn load_valid_layout(path: &Path) -> Result<LayoutDefinition, Box<dyn std::error::Error>> {
    let layout = LayoutDefinition::load_from_file(path).map_err(|e| {
        print_error(&format!("Failed to load layout '{}': {e}", path.display()));
        e
    })?;
    layout.validate().map_err(|e| {
        print_error(&format!("Layout '{}' is invalid: {e}", path.display()));
        e
    })?;
    Ok(layout)
}

fn handle_init(path: &Path, name: String) -> Result<(), Box<dyn std::error::Error>> {
    let mut layout = LayoutDefinition::new(name);
    layout
        .components
        .push(ComponentDefinition::new("value", ComponentKind::Value, 1));
    layout.save_to_file(path).map_err(|e| {
        print_error(&format!("Failed to write layout '{}': {e}", path.display()));
        e
    })?;
    print_info(&format!("Layout written to {}", path.display()));
    Ok(())
}

fn handle_check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let layout = load_valid_layout(path)?;
    print_layout_summary(&layout);
    Ok(())
}

fn handle_replay(
    layout_path: &Path,
    uid: &str,
    input: &Path,
    selection: WindowSelection,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout = load_valid_layout(layout_path)?;
    let samples = load_rows(input).map_err(|e| {
        print_error(&format!("Failed to read samples '{}': {e}", input.display()));
        e
    })?;
    let report = replay(&layout, uid, &samples, selection)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
