pub mod cart_controller;
pub mod dto;
pub mod favorite_controller;
pub mod order_controller;
pub mod product_controller;
