//! Output formatting for the CLI.

use console::style;
use rocket_cart::{Cart, Notice};

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
            eprintln!(r#"{{"error": "{}"}}"#, msg.replace('"', "\\\""));
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

    /// Print a notice raised by a cart operation.
    pub fn notice(&self, notice: Notice) {
        if self.json {
            eprintln!("{}", notice_json(notice));
            return;
        }
        self.warn(&format!("{} ({})", notice.message(), style(notice.kind()).dim()));
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print the cart as a table, or as JSON in JSON mode.
    pub fn cart(&self, cart: &Cart) {
        if self.json {
            self.json(cart);
            return;
        }

        if cart.is_empty() {
            println!("  {}", style("cart is empty").dim());
            return;
        }

        let widths = [6, 32, 10, 6];
        self.table_row(&["ID", "PRODUCT", "PRICE", "QTY"], &widths);
        for line in cart {
            let id = line.id.to_string();
            let price = format_price(line.price);
            let amount = line.amount.to_string();
            self.table_row(
                &[id.as_str(), line.title.as_str(), price.as_str(), amount.as_str()],
                &widths,
            );
        }
        println!(
            "\n  {} {} in {} {}",
            style(cart.item_count()).bold(),
            plural(cart.item_count(), "item", "items"),
            cart.len(),
            plural(cart.len() as i64, "line", "lines"),
        );
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
}

/// Format a unit price with two decimals.
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// JSON form of a notice: `{"notice": kind, "message": text}`.
pub fn notice_json(notice: Notice) -> serde_json::Value {
    serde_json::json!({
        "notice": notice,
        "message": notice.message(),
    })
}

fn plural(n: i64, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(179.9), "179.90");
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(1234.567), "1234.57");
    }

    #[test]
    fn test_notice_json() {
        let value = notice_json(Notice::OutOfStock);
        assert_eq!(value["notice"], "out-of-stock");
        assert_eq!(value["message"], Notice::OutOfStock.message());

        let line = notice_json(Notice::UpdateFailed).to_string();
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["notice"], "update-failed");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "item", "items"), "item");
        assert_eq!(plural(0, "item", "items"), "items");
        assert_eq!(plural(3, "line", "lines"), "lines");
    }
}
