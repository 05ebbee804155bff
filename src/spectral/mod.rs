pub mod grf;
