pub mod admin_order_routes;
pub mod cart_routes;
pub mod favorite_routes;
pub mod order_routes;
pub mod product_routes;
