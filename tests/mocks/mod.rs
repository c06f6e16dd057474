pub mod generator;
pub mod transcripts;
