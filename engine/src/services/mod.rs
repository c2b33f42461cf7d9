pub mod universe_loader;

pub use universe_loader::UniverseLoader;
