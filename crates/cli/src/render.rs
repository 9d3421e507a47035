//! Terminal rendering of the shopping list

use anyhow::Result;
use carrito_core::domain::Item;
use colored::Colorize;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ItemDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl From<&Item> for ItemDisplay {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            product: item.name.clone(),
            status: item.status(),
        }
    }
}

/// Main screen: pending items on top, purchased at the bottom
pub fn print_list(items: &[Item], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("{}", "No products to show".bold());
        return Ok(());
    }

    let rows: Vec<ItemDisplay> = items.iter().map(ItemDisplay::from).collect();
    println!("{}", Table::new(rows));

    let pending = items.iter().filter(|item| !item.purchased).count();
    println!(
        "{} pending, {} purchased",
        pending.to_string().yellow(),
        (items.len() - pending).to_string().green()
    );
    Ok(())
}
