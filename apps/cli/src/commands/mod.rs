//! # Commands
//!
//! One function per CLI subcommand. Each runs a cart operation and returns
//! the cart as it stands afterwards.
//!
//! | Command | Engine call |
//! |---|---|
//! | `show` | `cart()` |
//! | `add <ID>` | `add_product(id)` |
//! | `remove <ID>` | `remove_product(id)` |
//! | `update <ID> <AMOUNT>` | `update_product_amount({ id, amount })` |

pub mod cart;
