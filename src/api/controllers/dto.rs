pub mod cart_dto;
pub mod favorite_dto;
pub mod order_dto;
pub mod product_dto;
