mod common;
mod reassignment;
