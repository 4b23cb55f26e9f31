pub mod addresses;
pub mod auth;
pub mod favorite_pizzas;
pub mod orders;
