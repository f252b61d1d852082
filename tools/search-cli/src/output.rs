//! Output formatting for the CLI.

use console::style;
use turbo_search::catalog::Product;
use turbo_search::FacetCount;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
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

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print products as a table.
    pub fn products(&self, products: &[Product]) {
        self.table_row(&["ID", "TITLE", "PRICE", "STOCK", "BRAND"], &PRODUCT_WIDTHS);
        for product in products {
            let id = product.id.to_string();
            let price = product.display_price();
            let stock = availability_badge(product.availability);
            let brand = product.brand.as_ref().map_or("-", |b| b.name.as_str());
            self.table_row(
                &[&id, &truncate(&product.title, 32), &price, &stock, brand],
                &PRODUCT_WIDTHS,
            );
        }
    }

    /// Print name/count pairs as a table.
    pub fn counts(&self, title: &str, counts: &[FacetCount]) {
        if counts.is_empty() {
            return;
        }
        self.header(title);
        for count in counts {
            self.table_row(&[&count.name, &count.count.to_string()], &[32, 8]);
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

const PRODUCT_WIDTHS: [usize; 5] = [6, 32, 12, 12, 20];

/// Status badge for product availability.
pub fn availability_badge(available: bool) -> String {
    if available {
        style("in stock").green().to_string()
    } else {
        style("sold out").dim().to_string()
    }
}

/// Shorten `text` to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
