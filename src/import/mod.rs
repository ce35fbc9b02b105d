mod dates;
mod loader;

pub(crate) use loader::{load, parse_value, COLUMNS};

#[cfg(test)]
pub(crate) use loader::load_from_reader;
