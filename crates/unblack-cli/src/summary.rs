use console::Style;
use unblack_core::{BitGrid, ClearConfig, ClearStats};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
        }
    }
}

/// Print a short report of an edge-clearing run to stderr.
pub fn print_clear_summary(
    input: &str,
    grid: &BitGrid,
    config: &ClearConfig,
    stats: &ClearStats,
) {
    let s = Styles::new();

    eprintln!();
    eprintln!("  {}", s.title.apply_to("Edge Clear"));
    eprintln!();
    eprintln!(
        "  {}  {}",
        s.label.apply_to("Input     "),
        s.value.apply_to(input)
    );
    eprintln!(
        "  {}  {}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", grid.width(), grid.height()))
    );
    eprintln!(
        "  {}  {}",
        s.label.apply_to("Order     "),
        s.method.apply_to(config.order)
    );
    eprintln!(
        "  {}  {}",
        s.label.apply_to("Output    "),
        s.method.apply_to(config.output)
    );
    eprintln!(
        "  {}  {}",
        s.label.apply_to("Seeds     "),
        s.value.apply_to(stats.seeds)
    );
    eprintln!(
        "  {}  {}",
        s.label.apply_to("Cleared   "),
        s.value.apply_to(stats.cleared)
    );
    eprintln!(
        "  {}  {}",
        s.label.apply_to("Remaining "),
        s.value.apply_to(grid.count_ones())
    );
    eprintln!(
        "  {}  {}",
        s.label.apply_to("Peak frontier"),
        s.value.apply_to(stats.max_frontier)
    );
    eprintln!();
}
