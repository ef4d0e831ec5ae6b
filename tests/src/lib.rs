#![cfg(test)]

mod discovery;
mod utils;
