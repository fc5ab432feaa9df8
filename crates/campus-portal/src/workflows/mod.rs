pub mod outpass;
pub mod profile;
