// Listingmark - watermarking pipeline for listing photos

pub mod batch;
pub mod config;
pub mod constants;
pub mod logging;
pub mod watermark;
