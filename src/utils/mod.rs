pub mod numeric;
pub mod text;
