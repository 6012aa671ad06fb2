#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]
pub mod data;
pub mod evaluate;
pub mod model;
pub mod pipeline;
pub mod predict;
pub mod split;
