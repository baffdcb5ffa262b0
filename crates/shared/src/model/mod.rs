pub mod bin;
pub mod card;
