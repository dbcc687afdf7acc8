pub mod ports;
pub mod parse_use_case;

pub use parse_use_case::ParseUseCase;
