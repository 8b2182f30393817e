// Resource endpoints, one module per kind. Each attaches inherent
// methods to `MastheadClient`, keeping `client.rs` focused on transport
// mechanics.

mod domains;
mod products;
mod users;
