pub mod cart_item;
pub mod offer;
pub mod order;
pub mod product;
pub mod schema;
