pub mod delimited;
pub mod excel;
