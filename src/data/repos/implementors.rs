pub mod cart_repo;
pub mod favorite_repo;
pub mod order_repo;
pub mod product_repo;
