// Application Layer - Use Cases

pub mod actions;
pub mod shopping_list;

// Re-exports
pub use actions::{ActionOutcome, ListAction, ListActions};
pub use shopping_list::ShoppingListService;
