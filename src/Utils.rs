//! different utility modules used throughout the project
/// logging setup: terminal and optional log file
pub mod logger;
/// chart output: series, the chart surface trait and a PNG chart drawn with plotters
pub mod plots;
/// parse task document with structure like "title1 \n key1: value1 \n title2 \n key2: value2" into a run config
pub mod task_parser;
///
mod task_parser_tests;
