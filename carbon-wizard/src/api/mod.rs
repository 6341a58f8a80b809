// Network API modules

pub mod results;
