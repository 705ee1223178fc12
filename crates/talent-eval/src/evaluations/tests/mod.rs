mod common;
mod matrix;
