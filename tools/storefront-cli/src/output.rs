//! Output formatting for the CLI.

use console::{pad_str, style, truncate_str, Alignment, Term};
use storefront_discovery::catalog::{Product, ProductBadge};
use storefront_discovery::reviews::ProductRating;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stdout(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", info_line(msg));
    }

    /// Print an empty spacer line.
    pub fn blank(&self) {
        if self.json {
            return;
        }
        println!();
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row, truncating columns to the terminal width.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| pad_str(col, *width, Alignment::Left, Some("…")).into_owned())
            .collect();
        let line = format!("  {}", formatted.join("  "));
        println!("{}", truncate_str(&line, self.term_width(), "…"));
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Get terminal width.
    pub fn term_width(&self) -> usize {
        match self.term.size_checked() {
            Some((_, cols)) => cols as usize,
            None => usize::MAX,
        }
    }
}

/// An empty message renders as a bare spacer, without the marker.
fn info_line(msg: &str) -> String {
    if msg.is_empty() {
        String::new()
    } else {
        format!("{} {}", style("ℹ").blue(), msg)
    }
}

/// Styled badge label.
pub fn badge_label(badge: ProductBadge) -> String {
    let name = badge.display_name();
    match badge {
        ProductBadge::BestSeller => style(name).red().bold().to_string(),
        ProductBadge::LowStock => style(name).yellow().to_string(),
        ProductBadge::NewArrival => style(name).green().to_string(),
    }
}

/// Price column: the sale price with the list price struck through when discounted.
pub fn price_label(product: &Product) -> String {
    if product.is_discounted() {
        format!(
            "{} {}",
            style(product.effective_price().display()).red(),
            style(product.price.display()).dim().strikethrough()
        )
    } else {
        product.price.display()
    }
}

/// Rating column, e.g. "★ 4.5 (12)".
pub fn rating_label(rating: Option<&ProductRating>) -> String {
    match rating {
        Some(r) => format!("{} {:.1} ({})", style("★").yellow(), r.average, r.count),
        None => style("no reviews").dim().to_string(),
    }
}
