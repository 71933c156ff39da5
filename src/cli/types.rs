use console::style;
use diagent_core::DiagramType;

/// Print the diagram catalog
pub fn handle_types_command() {
    println!("{}", style("Supported diagram types").blue().bold());
    println!();

    let width = DiagramType::ALL
        .iter()
        .map(|kind| kind.slug().len())
        .max()
        .unwrap_or_default();

    for kind in DiagramType::ALL {
        println!(
            "  {:<width$}  {}",
            style(kind.slug()).cyan(),
            style(kind.label()).bold()
        );
        println!("  {:<width$}  {}", "", style(kind.useful_for()).dim());
    }

    println!();
    println!("Pass a slug or a label to --type, e.g. --type sequence");
}
