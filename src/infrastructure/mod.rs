pub mod debug_report;
pub mod output;
pub mod pcm;
pub mod progress;
