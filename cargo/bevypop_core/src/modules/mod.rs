pub mod controller;
pub mod follow;
pub mod view;
