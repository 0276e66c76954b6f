#![allow(dead_code)]

pub mod sample_workflows;
