// Library entry exposing the dialect table and generator modules.
pub mod core;
pub mod generator;
pub mod reporter;
pub mod toolchains;
