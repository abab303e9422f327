use layout::LayoutDefinition;

pub fn print_info(message: &str) {
    println!("[SimViz][INFO] {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[SimViz][ERROR]: {message}");
}

pub fn print_layout_summary(layout: &LayoutDefinition) {
    print_info(&format!("Layout '{}' is valid", layout.name));
    println!(
        "Time: shown {}s, kept {}s, dt {}s",
        layout.time.shown_time, layout.time.kept_time, layout.time.dt
    );
    if layout.components.is_empty() {
        println!("\t(no components)");
        return;
    }
    for component in &layout.components {
        println!(
            "\t{} ({:?}) lines={} synapse={} range=[{}, {}] ordering={:?}",
            component.uid,
            component.kind,
            component.n_lines,
            component.synapse(),
            component.min_value,
            component.max_value,
            component.ordering
        );
    }
}
