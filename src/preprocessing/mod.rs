pub mod cut_points;
pub mod envelope;
pub mod normalizer;
pub mod segmenter;
